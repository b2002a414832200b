//! CLI commands and argument parsing

use crate::config::Backend;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginated player statistics over a partitioned table
#[derive(Parser, Debug)]
#[command(name = "goalpost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend
    ///
    /// Defaults to `memory`, a fresh empty table per invocation: only `demo`
    /// is useful there. Use `dynamo` for `seed`, `get` and `--cursor` tokens
    /// that should outlive one run.
    #[arg(short, long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Endpoint override, e.g. http://localhost:8000
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// AWS region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Table name
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Secondary index name
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load seed players unless the table already has items
    Seed,

    /// Look up a single player
    Get {
        #[command(flatten)]
        team: TeamArgs,

        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,
    },

    /// One unbounded store page of a team
    List {
        #[command(flatten)]
        team: TeamArgs,
    },

    /// Every player of a team
    ListAll {
        #[command(flatten)]
        team: TeamArgs,
    },

    /// Fixed-size store pages of a team
    ListLimited {
        #[command(flatten)]
        team: TeamArgs,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Pages of players with at least `threshold` goals
    ByGoals {
        #[command(flatten)]
        team: TeamArgs,

        /// Minimum goals
        #[arg(long, default_value = "10")]
        threshold: u32,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Like `by-goals`, ordered by goals
    ByGoalsSorted {
        #[command(flatten)]
        team: TeamArgs,

        /// Minimum goals
        #[arg(long, default_value = "10")]
        threshold: u32,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Seed the table and run every listing once
    Demo,
}

/// Partition and team selection
#[derive(Args, Debug, Clone)]
pub struct TeamArgs {
    /// Country (partition key)
    #[arg(long)]
    pub country: String,

    /// National team, e.g. MNT or WNT
    #[arg(long)]
    pub team: String,
}

/// Page size, direction and continuation
#[derive(Args, Debug, Clone)]
pub struct PagingArgs {
    /// Records per page (taken from the token when resuming)
    #[arg(long, default_value = "4")]
    pub page_size: u32,

    /// Walk in descending order (taken from the token when resuming)
    #[arg(long)]
    pub descending: bool,

    /// Resume from a cursor token printed by an earlier run
    ///
    /// The token carries its own page size and direction.
    #[arg(long, conflicts_with_all = ["page_size", "descending"])]
    pub cursor: Option<String>,

    /// Keep paging until the end
    #[arg(long)]
    pub all: bool,
}
