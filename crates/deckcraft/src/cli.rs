use clap::{ArgAction, Parser, Subcommand};

use crate::app::{self, AppOptions};

#[derive(Parser)]
#[command(name = "deckcraft")]
#[command(author, version, about)]
#[command(long_about = "A slide-deck editor and player.\n\n\
    Build a deck with layouts, templates and animations, present it\n\
    full screen, and export slides as PNG images.\n\n\
    Examples:\n  \
    deckcraft                    Launch the editor with an empty deck\n  \
    deckcraft --demo             Launch with a sample deck\n  \
    deckcraft config show        Print current configuration")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch the editor full screen
    #[arg(long)]
    pub fullscreen: bool,

    /// Seed the editor with a sample deck
    #[arg(long)]
    pub demo: bool,

    /// Select a slide at startup (1-indexed, clamped to the deck)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.template, defaults.layout)
        key: String,

        /// Value to set
        value: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Version) => {
                println!("deckcraft {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => app::run(AppOptions {
                fullscreen: self.fullscreen,
                demo: self.demo,
                start_slide: self.slide.map(|s| s.saturating_sub(1)),
            }),
        }
    }
}
