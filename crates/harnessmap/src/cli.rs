use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harnessmap")]
#[command(author, version, about)]
#[command(long_about = "Wire routing and splice normalization for harness diagrams.\n\n\
    Reads a diagram snapshot (JSON), routes its wires around components and\n\
    rewrites implicit splices into explicit junctions.\n\n\
    Examples:\n  \
    harnessmap route harness.json              Corridor routes as JSON\n  \
    harnessmap route harness.json --precise    Grid routes that avoid every component\n  \
    harnessmap migrate harness.json -o out.json\n  \
    harnessmap splices harness.json            List pins feeding several wires")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route every wire of a diagram
    Route {
        /// Diagram JSON file
        file: PathBuf,

        /// Use the grid router instead of the corridor router
        #[arg(long)]
        precise: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: RouteFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite implicit splices into junctions
    Migrate {
        /// Diagram JSON file
        file: PathBuf,

        /// Write the migrated diagram here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only report whether migration is needed (exit code 1 if so)
        #[arg(long)]
        check: bool,
    },

    /// List implicit splices
    Splices {
        /// Diagram JSON file
        file: PathBuf,
    },

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
        /// Configuration key (e.g. routing.lane_spacing, migration.ground_circuit)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the config file location
    Path,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouteFormat {
    /// Waypoints, drawing commands and markers per wire
    Json,
    /// One SVG path per wire
    Svg,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Route {
                file,
                precise,
                format,
                output,
            }) => crate::commands::route::run(&file, precise, format, output.as_deref()),
            Some(Commands::Migrate {
                file,
                output,
                check,
            }) => crate::commands::migrate::run(&file, output.as_deref(), check),
            Some(Commands::Splices { file }) => crate::commands::splices::run(&file),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("harnessmap {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
