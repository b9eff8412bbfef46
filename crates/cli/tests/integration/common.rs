//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for the real compiler.
///
/// Fails with exit code 2 if any `.go` input contains `SYNTAX_ERROR`, and with
/// exit code 1 if an `.o` input does not exist. Otherwise writes an
/// executable no-op script to the `-o` path.
const FAKE_COMPILER: &str = r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then
    out="$a"
  else
    case "$a" in
      *.go)
        if [ -f "$a" ] && grep -q SYNTAX_ERROR "$a"; then
          echo "$a: syntax error" >&2
          exit 2
        fi
        ;;
      *.o)
        if [ ! -f "$a" ]; then
          echo "$a: no such file" >&2
          exit 1
        fi
        ;;
    esac
  fi
  prev="$a"
done
printf '#!/bin/sh\nexit 0\n' > "$out"
chmod +x "$out"
"#;

/// Isolated project directory with a fake compiler.
pub struct TestEnv {
  pub temp: TempDir,
  compiler: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let compiler = temp.path().join("tools").join("fakecc");
    write_executable(&compiler, FAKE_COMPILER);
    Self { temp, compiler }
  }

  /// Wrap the fake compiler in one that also prints to stdout.
  pub fn with_noisy_compiler(mut self) -> Self {
    let noisy = self.root().join("tools").join("noisycc");
    let script = format!("#!/bin/sh\necho compiling \"$@\"\nexec \"{}\" \"$@\"\n", self.compiler.display());
    write_executable(&noisy, &script);
    self.compiler = noisy;
    self
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn write_manifest(&self, json: &str) {
    self.write_file("forge.json", json);
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.root().join(relative_path).exists()
  }

  /// `forge` running in the project root with the fake compiler.
  pub fn forge(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd
      .current_dir(self.root())
      .env("FORGE_CC", &self.compiler)
      .env_remove("FORGE_OUT_DIR")
      .env_remove("RUST_LOG");
    cmd
  }
}

#[cfg(unix)]
fn write_executable(path: &Path, content: &str) {
  use std::os::unix::fs::PermissionsExt;

  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Two modules, `A` and `B`, where `B` links against `A`.
pub const TWO_MODULE_MANIFEST: &str = r#"{
  "modules": [
    { "name": "A", "sources": ["src/a"] },
    { "name": "B", "sources": ["src/b.go"], "deps": ["A"] }
  ],
  "bench": {
    "dir": "bench",
    "iterations": 3,
    "prerequisite": { "name": "hello", "sources": ["hello.go"], "deps": ["A"] },
    "commands": [
      { "name": "hello", "command": "./hello" },
      { "name": "noop", "command": "true" }
    ]
  }
}"#;

/// A project using [`TWO_MODULE_MANIFEST`] with valid sources.
pub fn two_module_project() -> TestEnv {
  let env = TestEnv::new();
  env.write_manifest(TWO_MODULE_MANIFEST);
  env.write_file("src/a/one.go", "package a");
  env.write_file("src/a/two.go", "package a");
  env.write_file("src/b.go", "package b");
  env.write_file("test/A_test.go", "package main");
  env.write_file("test/B_test.go", "package main");
  env.write_file("bench/hello.go", "package main");
  env
}
