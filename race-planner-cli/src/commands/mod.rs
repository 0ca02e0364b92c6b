mod config_cmd;
mod generate;
mod mileage;
mod pace;
mod workout;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

pub use generate::GenerateCommand;
pub use mileage::MileageCommand;
pub use pace::PaceCommand;
pub use workout::WorkoutCommand;

/// Plans shorter or longer than this are refused at the command line
pub const MIN_WEEKS: u32 = 4;
pub const MAX_WEEKS: u32 = 20;

#[derive(Parser)]
#[command(name = "race-planner")]
#[command(about = "Periodized running plans from start date to race day", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "RACE_PLANNER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a day-by-day training plan
    Generate(GenerateCommand),

    /// Show the weekly mileage curve
    Mileage(MileageCommand),

    /// Recommend a pace for a workout type and phase
    Pace(PaceCommand),

    /// Resolve a structured workout, or list them all
    Workout(WorkoutCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// How plan-shaped output is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Explicit flag first, then the configured format
    pub fn resolve(flag: Option<OutputFormat>, config: &Config) -> Result<Self> {
        if let Some(format) = flag {
            return Ok(format);
        }
        match config.output.format.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => bail!("Unknown output format in config: {}", other),
        }
    }
}

/// Reject week counts outside the supported plan lengths
pub fn validate_weeks(weeks: u32) -> Result<u32> {
    if !(MIN_WEEKS..=MAX_WEEKS).contains(&weeks) {
        bail!(
            "Plans must span {} to {} weeks, got {}",
            MIN_WEEKS,
            MAX_WEEKS,
            weeks
        );
    }
    Ok(weeks)
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn execute(self) -> Result<()> {
        let config_path = self.config.as_deref();

        match self.command {
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let config = Config::load_from(config_path)?;
                if !config.output.color {
                    colored::control::set_override(false);
                }

                match command {
                    Commands::Generate(cmd) => cmd.execute(&config),
                    Commands::Mileage(cmd) => cmd.execute(&config),
                    Commands::Pace(cmd) => cmd.execute(&config),
                    Commands::Workout(cmd) => cmd.execute(&config),
                    Commands::Config(_) | Commands::Completions { .. } => Ok(()),
                }
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
