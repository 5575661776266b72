//! Manifest resolution.
//!
//! A manifest is a newline-delimited list of dotted module names. Lines
//! starting with `#` are comments. Every other line becomes a [`ModuleSpec`]
//! whose source path is derived from the name, in the order the lines
//! appear. Names are taken verbatim: surrounding whitespace is kept.

mod types;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::BuildConfig;

pub use types::*;

/// Split text into lines on `\n`, `\r\n` and `\r`.
///
/// A terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
  let bytes = text.as_bytes();
  let mut lines = Vec::new();
  let mut start = 0;
  let mut i = 0;

  while i < bytes.len() {
    match bytes[i] {
      b'\n' => {
        lines.push(&text[start..i]);
        i += 1;
        start = i;
      }
      b'\r' => {
        lines.push(&text[start..i]);
        i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
        start = i;
      }
      _ => i += 1,
    }
  }

  if start < bytes.len() {
    lines.push(&text[start..]);
  }

  lines
}

/// Resolve manifest text into module specs.
///
/// Pure: the same text, config and options always produce the same list.
/// The only failure is a duplicate name under [`Duplicates::Reject`].
pub fn resolve(text: &str, config: &BuildConfig, options: &ResolveOptions) -> Result<Vec<ModuleSpec>, ManifestError> {
  let mut modules = Vec::new();
  let mut seen: HashMap<&str, usize> = HashMap::new();

  for (index, line) in split_lines(text).into_iter().enumerate() {
    let line_no = index + 1;

    if is_comment(line) {
      trace!(line = line_no, "skipping comment");
      continue;
    }

    if options.blank_lines == BlankLines::Skip && line.trim().is_empty() {
      trace!(line = line_no, "skipping blank line");
      continue;
    }

    if options.duplicates == Duplicates::Reject {
      if let Some(first_line) = seen.insert(line, line_no) {
        return Err(ManifestError::DuplicateName {
          name: line.to_string(),
          first_line,
          line: line_no,
        });
      }
    }

    let module = ModuleSpec::new(line, config);
    debug!(name = %module.name, source = %module.source_path.display(), "resolved module");
    modules.push(module);
  }

  Ok(modules)
}

/// Read a manifest file and resolve it.
pub fn resolve_file(path: &Path, config: &BuildConfig, options: &ResolveOptions) -> Result<Vec<ModuleSpec>, ManifestError> {
  let bytes = fs::read(path).map_err(|source| ManifestError::Unreadable {
    path: path.to_path_buf(),
    source,
  })?;
  let text = String::from_utf8(bytes).map_err(|_| ManifestError::NotUtf8 {
    path: path.to_path_buf(),
  })?;

  let modules = resolve(&text, config, options)?;
  debug!(path = %path.display(), count = modules.len(), "resolved manifest");
  Ok(modules)
}
