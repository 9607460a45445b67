//! Desktop collaborators: responsibility and boundaries
//!
//! This module and its submodules are the ONLY place that talks to the outside
//! world: window listing, window properties, the process table, monitor listing,
//! window-manager control and process launch. Every query degrades to an empty
//! or neutral value on failure; nothing here decides what to capture or restore.

mod command;
mod dry_run;
#[cfg(test)]
pub mod fake;
mod parse;
mod r#trait;
mod x11;

pub use self::r#trait::{create_desktop, Desktop, Directive, LaunchCommand, LaunchOutcome, ProcessEntry};
