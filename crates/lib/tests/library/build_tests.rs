use std::fs;

use extbuild_lib::compile::{CommandCompiler, CompileError, build};
use extbuild_lib::config::BuildConfig;
use extbuild_lib::manifest::{ResolveOptions, resolve};
use tempfile::TempDir;

#[test]
fn missing_compiler_aborts_build() {
  let temp = TempDir::new().unwrap();
  let config = BuildConfig::default();
  let modules = resolve("a\nb", &config, &ResolveOptions::default()).unwrap();
  let compiler = CommandCompiler::new("extbuild-no-such-compiler", temp.path());

  let result = build(&modules, &config, &compiler);
  assert!(matches!(result, Err(CompileError::Spawn { .. })));
}

#[test]
#[cfg(unix)]
fn fake_compiler_writes_every_output() {
  let temp = TempDir::new().unwrap();
  fs::create_dir_all(temp.path().join("pkg")).unwrap();
  fs::write(temp.path().join("pkg/one.pyx"), "").unwrap();
  fs::write(temp.path().join("two.pyx"), "").unwrap();

  // Creates the file passed after -o.
  let script = temp.path().join("fake-cython.sh");
  fs::write(
    &script,
    r#"while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then shift; : > "$1"; fi
  shift
done
"#,
  )
  .unwrap();

  let config = BuildConfig::default();
  let modules = resolve("pkg.one\n#pkg.skipped\ntwo\n", &config, &ResolveOptions::default()).unwrap();
  let compiler = CommandCompiler::new("/bin/sh", temp.path()).with_prefix_args([script.to_str().unwrap()]);

  let report = build(&modules, &config, &compiler).unwrap();

  assert_eq!(report.outputs.len(), 2);
  assert!(temp.path().join("pkg/one.cpp").exists());
  assert!(temp.path().join("two.cpp").exists());
  assert!(!temp.path().join("pkg/skipped.cpp").exists());
}
