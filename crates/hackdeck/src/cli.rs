use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::app::Settings;
use crate::config::Config;
use crate::theme::ThemeMode;

#[derive(Parser)]
#[command(name = "hackdeck")]
#[command(author, version, about)]
#[command(long_about = "Slide deck for the UIDAI data hackathon report.\n\n\
    Presents the built-in deck with an interactive region map.\n\n\
    Examples:\n  \
    hackdeck                      Launch presentation (fullscreen)\n  \
    hackdeck --windowed --slide 11  Open the first map slide in a window\n  \
    hackdeck export -o out        Write one PNG per navigation stop\n  \
    hackdeck check                Validate the map and chart assets")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Color theme
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ThemeMode>,

    /// Directory holding india.svg and the chart image
    #[arg(long, global = true)]
    pub assets: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export every slide and map point as PNG images
    Export {
        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Color theme for the exported images
        #[arg(long, value_parser = parse_theme)]
        theme: Option<ThemeMode>,
    },

    /// Validate the map and image assets against the deck
    Check,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
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
        /// Configuration key (e.g. defaults.theme, defaults.start_slide)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    ThemeMode::from_name(value).ok_or_else(|| format!("unknown theme '{value}' (light, dark)"))
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Export {
                output_dir,
                width,
                height,
                theme,
            }) => {
                let settings = Settings::resolve(theme, None, self.assets, &Config::load_or_default());
                crate::commands::export::run(&settings, output_dir, width, height)
            }
            Some(Commands::Check) => {
                let settings = Settings::resolve(None, None, self.assets, &Config::load_or_default());
                crate::commands::check::run(&settings)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!(
                    "{} {}",
                    "hackdeck".bold(),
                    env!("CARGO_PKG_VERSION").green()
                );
                Ok(())
            }
            None => {
                let settings = Settings::resolve(
                    self.theme,
                    self.slide,
                    self.assets,
                    &Config::load_or_default(),
                );
                crate::app::run(self.windowed, settings)
            }
        }
    }
}
