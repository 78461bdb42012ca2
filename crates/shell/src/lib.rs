//! `stockroom-shell`
//!
//! **Responsibility:** line-oriented presentation layer for the catalog.
//!
//! The shell is a **thin layer** over `stockroom-inventory`: every mutation goes
//! through the catalog entry API and views are re-rendered from model state after
//! each command.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use command::{Command, parse_line};
pub use config::ShellConfig;
pub use error::ShellError;
pub use session::{Outcome, Session};
