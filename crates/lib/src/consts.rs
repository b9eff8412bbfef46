/// Optional project manifest looked up in the project root.
pub const MANIFEST_FILE: &str = "forge.json";

/// Default directory receiving object files and test binaries.
pub const DEFAULT_OUT_DIR: &str = "build";

/// Default directory holding `<module>_test.<ext>` sources.
pub const DEFAULT_TEST_DIR: &str = "test";

pub const DEFAULT_TEST_EXTENSION: &str = "go";

pub const DEFAULT_COMPILER: &str = "gccgo";

pub const DEFAULT_COMPILER_FLAGS: &[&str] = &["-g", "-O2", "-Wall"];

/// Default directory the benchmark commands run in.
pub const DEFAULT_BENCH_DIR: &str = "benchmark";

/// Number of timed invocations per benchmarked command.
pub const DEFAULT_ITERATIONS: u32 = 100;

/// Extension of object artifacts.
pub const OBJECT_EXTENSION: &str = "o";

/// Suffix appended to a module name to form its test binary name.
pub const TEST_SUFFIX: &str = "_test";

/// Overrides the compiler program.
pub const ENV_COMPILER: &str = "FORGE_CC";

/// Overrides the output directory.
pub const ENV_OUT_DIR: &str = "FORGE_OUT_DIR";
