//! CLI argument parsing for Tably
//!
//! Makes the TUI wizard the default entry point when no subcommand is
//! provided.

use crate::client::DEFAULT_API_BASE;
use crate::mode::MealMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tably")]
#[command(about = "🍽️ Tably - decide together what to eat")]
#[command(long_about = "🍽️ Tably - decide together what to eat\n\n\
    A guided wizard for setting up a shared decision room: pick how you want\n\
    to eat, tune the room settings, and share the invite code.\n\n\
    Run without arguments to launch the interactive wizard (recommended! 🎉)\n\
    Or use subcommands for CLI scripting.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Resume the wizard at a step segment (basic-info, settings, summary)
    #[arg(long, global = true)]
    pub resume_step: Option<String>,

    /// Preselect the meal mode, as the launching context would
    #[arg(long, value_enum, global = true)]
    pub mode: Option<MealMode>,

    /// Backend API base URL
    #[arg(long, default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Run without a backend: fallback suggestions, locally minted share code
    #[arg(long, global = true)]
    pub offline: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Where the one-time hint flags are stored
    #[arg(long, global = true)]
    pub hint_file: Option<PathBuf>,

    /// Dump wizard step render text to stdout and exit
    #[arg(long, global = true)]
    pub dump_tui: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a room directly from flags (for scripting)
    Create {
        /// Room title
        #[arg(long)]
        title: String,

        /// Decision timer in minutes
        #[arg(long, default_value_t = 30)]
        timer_minutes: u16,
    },
    /// Print the meal suggestions for a category and exit
    Suggest {
        /// Category: general, morning, evening, cooking, dine-out
        #[arg(long, default_value = "general")]
        category: String,
    },
}
