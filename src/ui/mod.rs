//! Console front end

pub mod shell;

pub use shell::{Shell, ShellOptions};
