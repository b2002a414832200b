//! CLI module
//!
//! Command-line interface for seeding the table and paging through it.
//!
//! # Commands
//!
//! - `seed` - Load the demonstration players into an empty table
//! - `get` - Look up one player
//! - `list` / `list-all` - Team listings without client-side paging
//! - `list-limited` - Fixed-size pages straight from the store
//! - `by-goals` / `by-goals-sorted` - Goal-filtered pages with accumulation
//! - `demo` - Seed and run every listing once

mod commands;
mod runner;

pub use commands::{Cli, Commands, PagingArgs, TeamArgs};
pub use runner::Runner;
