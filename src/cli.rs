// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "freja",
    about = "Task-scoped LLM model resolution and multimodal tools",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration and exit
    ShowConfig,

    /// List all supported model providers
    ListProviders {
        /// Output as JSON instead of a formatted table
        #[arg(long)]
        json: bool,
    },

    /// Ask the agent's central model a one-shot question (no tools)
    Ask {
        /// The question or instruction
        prompt: String,
    },

    /// Evaluate an arithmetic expression with the safe calculator
    Calc {
        /// Expression, e.g. "(2 + 3) * 4" or "-2**2"
        expression: String,
    },

    /// Fetch a webpage as text via the direct → reader-proxy chain
    Fetch {
        /// The URL to fetch
        url: String,
        /// Maximum characters to print
        #[arg(long, default_value = "12000")]
        max_chars: usize,
    },

    /// Search the web via the Brave Search API (requires BRAVE_API_KEY)
    Search {
        /// Search query
        query: String,
        /// Number of results (1-10)
        #[arg(long, short = 'n', default_value = "5")]
        count: u64,
    },
}
