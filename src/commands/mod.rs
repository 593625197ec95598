pub mod build;
pub mod clean;

pub use build::{execute_build, BuildOptions};
pub use clean::execute_clean;
