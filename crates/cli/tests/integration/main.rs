//! End-to-end tests driving the `forge` binary against a fake compiler.

#![cfg(unix)]

mod bench_tests;
mod build_tests;
mod common;
