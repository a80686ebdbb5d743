pub mod controller;
pub mod repl;

pub use controller::{Controller, Outcome};
pub use repl::{parse_command, Command, Repl};
