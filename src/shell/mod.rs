mod commands;
mod console;
mod error;
mod interpreter;
mod parser;
mod readline;
mod session;
#[allow(clippy::module_inception)]
mod shell;

pub use shell::Shell;
