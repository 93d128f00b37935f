//! Configuration sources, lowest precedence first: file, then environment.

pub mod environment;
pub mod file;
