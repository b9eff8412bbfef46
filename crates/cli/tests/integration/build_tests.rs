use predicates::prelude::*;

use crate::common::{TestEnv, two_module_project};

#[test]
fn builds_dependent_modules() {
  let env = two_module_project();

  env
    .forge()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "***** Building A\n***** Building A_test\n***** Building B\n***** Building B_test\n",
    ));

  for artifact in ["build/A.o", "build/A_test", "build/B.o", "build/B_test"] {
    assert!(env.exists(artifact), "{} should exist", artifact);
  }
}

#[test]
fn no_subcommand_runs_build() {
  let env = two_module_project();

  env.forge().assert().success();

  assert!(env.exists("build/B_test"));
}

#[test]
fn invalid_first_module_aborts_build() {
  let env = two_module_project();
  env.write_file("src/a/two.go", "package a SYNTAX_ERROR");

  env
    .forge()
    .arg("build")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("***** Building A\n"))
    .stdout(predicate::str::contains("Building B").not())
    .stderr(predicate::str::contains("Build aborted"));

  for artifact in ["build/A.o", "build/A_test", "build/B.o", "build/B_test"] {
    assert!(!env.exists(artifact), "{} should not exist", artifact);
  }
}

#[test]
fn missing_dependency_fails_at_link() {
  let env = TestEnv::new();
  env.write_manifest(
    r#"{ "modules": [{ "name": "lonely", "sources": ["lonely.go"], "deps": ["ghost"] }] }"#,
  );
  env.write_file("lonely.go", "package lonely");

  env
    .forge()
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("link step of module lonely"));

  assert!(env.exists("build/lonely.o"));
  assert!(!env.exists("build/lonely_test"));
}

#[test]
fn rebuild_overwrites_artifacts() {
  let env = two_module_project();

  env.forge().arg("build").assert().success();
  env.forge().arg("build").assert().success();

  assert!(env.exists("build/A_test"));
}

#[test]
fn default_layout_builds_argo_modules() {
  let env = TestEnv::new();
  env.write_file("src/argo/graph.go", "package argo");
  env.write_file("src/argo/term.go", "package argo");
  env.write_file("src/apis/kasabi.go", "package argo");
  env.write_file("test/argo_test.go", "package main");
  env.write_file("test/argo_kasabi_test.go", "package main");

  env.forge().arg("build").assert().success();

  for artifact in [
    "build/argo.o",
    "build/argo_test",
    "build/argo_kasabi.o",
    "build/argo_kasabi_test",
  ] {
    assert!(env.exists(artifact), "{} should exist", artifact);
  }
}

#[test]
fn verbose_echoes_command_lines() {
  let env = two_module_project();

  env
    .forge()
    .args(["--verbose", "build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("fakecc -g -O2 -Wall"));
}

#[test]
fn out_dir_env_override() {
  let env = two_module_project();

  env
    .forge()
    .env("FORGE_OUT_DIR", "objs")
    .arg("build")
    .assert()
    .success();

  assert!(env.exists("objs/A.o"));
  assert!(!env.exists("build"));
}

#[test]
fn json_build_report() {
  let env = two_module_project();

  let output = env.forge().args(["--format", "json", "build"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["outcome"], "success");
  assert_eq!(report["artifacts"].as_array().unwrap().len(), 4);
}

#[test]
fn json_build_report_excludes_compiler_stdout() {
  let env = two_module_project().with_noisy_compiler();

  let output = env.forge().args(["--format", "json", "build"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["outcome"], "success");
  assert!(String::from_utf8_lossy(&output.stderr).contains("compiling"));
}

#[test]
fn text_build_shows_compiler_stdout() {
  let env = two_module_project().with_noisy_compiler();

  env
    .forge()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("compiling"));
}
