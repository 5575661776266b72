use std::fs;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};

use extbuild_lib::config::{BuildConfig, load_config};
use extbuild_lib::manifest::{ManifestError, ModuleSpec, ResolveOptions, resolve, resolve_file};
use tempfile::TempDir;

fn pyx(components: &[&str]) -> PathBuf {
  PathBuf::from(format!("./{}.pyx", components.join(MAIN_SEPARATOR_STR)))
}

#[test]
fn scenario_from_manifest_file() {
  let temp = TempDir::new().unwrap();
  let manifest = temp.path().join("names.txt");
  fs::write(&manifest, "foo.bar\n# skip.me\nbaz\n").unwrap();

  let modules = resolve_file(&manifest, &BuildConfig::default(), &ResolveOptions::default()).unwrap();

  assert_eq!(
    modules,
    vec![
      ModuleSpec {
        name: "foo.bar".to_string(),
        source_path: pyx(&["foo", "bar"]),
        include_dirs: vec![],
      },
      ModuleSpec {
        name: "baz".to_string(),
        source_path: pyx(&["baz"]),
        include_dirs: vec![],
      },
    ]
  );
}

#[test]
fn config_next_to_manifest_supplies_include_dirs() {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join("names.txt"), "mmfparser.player.common\r\nmmfparser.player.event\r\n").unwrap();
  fs::write(
    temp.path().join("extbuild.json"),
    r#"{ "include_dirs": ["./mmfparser/player"] }"#,
  )
  .unwrap();

  let config = temp_env::with_var("EXTBUILD_CONFIG", None::<&str>, || load_config(None, temp.path())).unwrap();
  let modules = resolve_file(&temp.path().join("names.txt"), &config, &ResolveOptions::default()).unwrap();

  assert_eq!(modules.len(), 2);
  assert_eq!(modules[0].source_path, pyx(&["mmfparser", "player", "common"]));
  assert_eq!(modules[1].source_path, pyx(&["mmfparser", "player", "event"]));
  for module in &modules {
    assert_eq!(module.include_dirs, vec![PathBuf::from("./mmfparser/player")]);
  }
}

#[test]
fn strict_rejects_and_default_accepts_duplicates() {
  let text = "a.b\nc\na.b\n";

  let lenient = resolve(text, &BuildConfig::default(), &ResolveOptions::default()).unwrap();
  assert_eq!(lenient.len(), 3);

  let strict = resolve(text, &BuildConfig::default(), &ResolveOptions::strict());
  assert!(matches!(strict, Err(ManifestError::DuplicateName { first_line: 1, line: 3, .. })));
}

#[test]
fn unreadable_manifest_names_path() {
  let temp = TempDir::new().unwrap();
  let missing = temp.path().join("names.txt");

  let err = resolve_file(&missing, &BuildConfig::default(), &ResolveOptions::default()).unwrap_err();
  assert!(err.to_string().contains("names.txt"));
}
