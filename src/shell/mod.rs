pub mod command;

pub use command::{ProcessRunner, RunResult, ShellCommand, ShellRunner};

#[cfg(test)]
pub use command::MockProcessRunner;
