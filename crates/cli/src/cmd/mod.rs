mod bench;
mod build;
mod info;

pub use bench::cmd_bench;
pub use build::cmd_build;
pub use info::cmd_info;
