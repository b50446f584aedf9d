//! CLI entry point for the `depgraph` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use elf_depgraph::cli::commands;
use elf_depgraph::{Config, DepGraphError, DepGraphResult, Strategy};

#[derive(Parser)]
#[command(
    name = "depgraph",
    about = "Shared-library dependency graphs for ELF executables and libraries"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph of an artifact and write it as a dot file
    Graph {
        /// Path to the root executable or library
        file: PathBuf,
        /// Resolution strategy: elf (read dynamic sections) or ldd
        #[arg(long, default_value = "elf")]
        strategy: String,
        /// Extra library directory, searched after the current directory
        #[arg(long = "search-dir", short = 'L')]
        search_dirs: Vec<PathBuf>,
        /// Loader-diagnostic command for the ldd strategy
        #[arg(long)]
        ldd: Option<String>,
        /// Directory to write the dot file to
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// List the libraries an artifact directly needs
    Needed {
        /// Path to the ELF artifact
        file: PathBuf,
    },
    /// Show where a bare library name resolves on the search path
    Resolve {
        /// Library name, e.g. libc.so.6
        name: String,
        /// Extra library directory, searched after the current directory
        #[arg(long = "search-dir", short = 'L')]
        search_dirs: Vec<PathBuf>,
    },
    /// Write the default configuration to a TOML file
    InitConfig {
        /// Path of the file to create
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> DepGraphResult<()> {
    let json = cli.format == "json";
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Graph {
            file,
            strategy,
            search_dirs,
            ldd,
            output_dir,
        } => {
            let strategy = Strategy::from_name(&strategy)?;
            config.add_search_dirs(&search_dirs);
            if let Some(ldd) = ldd {
                config.ldd_command = ldd;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            commands::cmd_graph(&file, strategy, &config, json)
        }
        Commands::Needed { file } => commands::cmd_needed(&file, json),
        Commands::Resolve { name, search_dirs } => {
            config.add_search_dirs(&search_dirs);
            commands::cmd_resolve(&name, &config, json)
        }
        Commands::InitConfig { file } => commands::cmd_init_config(&file),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let code = match &e {
            DepGraphError::RootNotFound(_) | DepGraphError::Io(_) => 1,
            e if e.is_malformed() => 2,
            DepGraphError::ToolUnavailable { .. } => 3,
            DepGraphError::Config(_) | DepGraphError::UnknownStrategy(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
