use predicates::prelude::*;

use crate::common::two_module_project;

#[test]
fn bench_compiles_then_times_commands() {
  let env = two_module_project();
  env.forge().arg("build").assert().success();

  env
    .forge()
    .arg("bench")
    .assert()
    .success()
    .stdout(predicate::str::contains("***** Compiling hello\n"))
    .stdout(predicate::str::contains("\r1/3\r2/3\r3/3\n"))
    .stdout(predicate::str::contains("============ Results ============\n"))
    .stdout(predicate::str::is_match(r"hello: \d+\.\d{3}s, \d+\.\d{3}ms, \d+\.\d{3}us").unwrap())
    .stdout(predicate::str::contains("noop: "));

  assert!(env.exists("bench/hello"));
}

#[test]
fn iterations_flag_overrides_manifest() {
  let env = two_module_project();
  env.forge().arg("build").assert().success();

  env
    .forge()
    .args(["bench", "--iterations", "2"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\r2/2\n"))
    .stdout(predicate::str::contains("3/3").not());
}

#[test]
fn prerequisite_failure_aborts_bench() {
  let env = two_module_project();
  env.forge().arg("build").assert().success();
  env.write_file("bench/hello.go", "package main SYNTAX_ERROR");

  env
    .forge()
    .arg("bench")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Benchmarks").not())
    .stderr(predicate::str::contains("Failed to compile hello"));
}

#[test]
fn failing_benchmark_command_still_reports() {
  let env = two_module_project();
  env.write_manifest(
    r#"{
      "modules": [],
      "bench": {
        "dir": ".",
        "iterations": 2,
        "prerequisite": null,
        "commands": [{ "name": "broken", "command": "exit 7" }]
      }
    }"#,
  );

  env
    .forge()
    .arg("bench")
    .assert()
    .success()
    .stdout(predicate::str::contains("broken: "));
}

#[test]
fn json_bench_report() {
  let env = two_module_project();
  env.forge().arg("build").assert().success();

  let output = env.forge().args(["--format", "json", "bench"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["outcome"], "completed");
  let results = report["results"].as_array().unwrap();
  assert_eq!(results.len(), 2);
  assert_eq!(results[0]["name"], "hello");
  assert_eq!(results[0]["iterations"], 3);
  assert!(results[0]["mean_secs"].as_f64().unwrap() >= 0.0);
}

#[test]
fn json_bench_report_excludes_compiler_stdout() {
  let env = two_module_project().with_noisy_compiler();
  env.forge().arg("build").assert().success();

  let output = env.forge().args(["--format", "json", "bench"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["outcome"], "completed");
  assert!(String::from_utf8_lossy(&output.stderr).contains("compiling"));
}
