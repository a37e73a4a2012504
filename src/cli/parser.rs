use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archivist")]
#[command(about = "Move files older than a cutoff year into a mirrored backup tree")]
#[command(version)]
pub struct Cli {
    /// Enable debug diagnostics on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Relocate files last modified before the cutoff year
    Run(RunArgs),
    /// Inspect configuration
    Config(ConfigArgs),
    /// Generate shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    # Preview what would move
    archivist run ~/Documents --cutoff-year 2022 --dry-run

    # Move everything last touched before 2020 into ~/Documents_backup
    archivist run ~/Documents --cutoff-year 2020 --yes")]
pub struct RunArgs {
    /// Source directory to scan
    pub source: String,

    /// Files modified before this year are relocated (1900 to the current year)
    #[arg(long, short = 'c', value_name = "YEAR")]
    pub cutoff_year: String,

    /// Only report what would be moved
    #[arg(long, help = "Only report what would be moved (dry run)")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub yes: bool,

    /// Print the run report as JSON instead of the log transcript
    #[arg(long)]
    pub json: bool,

    /// Read configuration from this file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Read configuration from this file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Print the default configuration file path
    Path,
}

#[derive(Args, Debug)]
#[command(after_help = "INSTALL:
    bash:  eval \"$(archivist completion bash)\"  in ~/.bashrc
    zsh:   eval \"$(archivist completion zsh)\"   in ~/.zshrc
    fish:  archivist completion fish > ~/.config/fish/completions/archivist.fish")]
pub struct CompletionArgs {
    /// Shell to generate completion for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl RunArgs {
    /// Whether to prompt before touching the filesystem.
    pub fn needs_confirmation(&self, config_wants_confirm: bool) -> bool {
        !self.dry_run && !self.yes && config_wants_confirm
    }
}
