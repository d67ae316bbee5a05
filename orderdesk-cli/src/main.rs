use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orderdesk_ingest::{export::TEMPLATE_FILE_NAME, list_spreadsheets, load_spreadsheet, write_template};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod preview;
mod process;
mod state;
mod tui;

use config::{config_path, init_config, load_config};
use process::{run_process, ProcessArgs};

#[derive(Parser, Debug)]
#[command(
    name = "orderdesk",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ORDERDESK_BUILD_SHA"), ")"),
    about = "Buy-order spreadsheet processor and source-file viewer"
)]
struct Cli {
    /// Config file (default: ~/.orderdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty upload template with the nine order columns
    Template {
        /// Where to write it (default: ./excel_template.xlsx)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Normalize an uploaded order sheet and export the processed file
    Process {
        /// Uploaded order sheet (.xlsx, .xls or .csv)
        #[arg(long)]
        input: PathBuf,

        /// Output file name without extension (default: Buy_<YYYYMMDDHHMM>)
        #[arg(long)]
        output: Option<String>,

        /// Broker master CSV (overrides config)
        #[arg(long)]
        brokers: Option<PathBuf>,

        /// Scheme master CSV (overrides config)
        #[arg(long)]
        schemes: Option<PathBuf>,

        /// Directory for the processed file (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the full outcome as JSON instead of previews
        #[arg(long)]
        json: bool,
    },

    /// Browse spreadsheets in the source folder
    View {
        /// Print this file instead of opening the interactive viewer
        file: Option<String>,

        /// Source folder (overrides config)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Only list the available files
        #[arg(long)]
        list: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg_path = config_path(cli.config.as_deref())?;
    let cfg = load_config(&cfg_path)?;

    match cli.command {
        Command::Template { out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME));
            write_template(&out)?;
            println!("Wrote template {}", out.display());
        }

        Command::Process {
            input,
            output,
            brokers,
            schemes,
            out_dir,
            json,
        } => {
            let args = ProcessArgs {
                input,
                output,
                brokers,
                schemes,
                out_dir,
                json,
            };
            let report = run_process(&cfg, &args)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        Command::View { file, dir, list } => {
            let dir = dir.unwrap_or_else(|| cfg.viewer.source_dir.clone());
            if list {
                for name in list_spreadsheets(&dir)? {
                    println!("{name}");
                }
            } else if let Some(file) = file {
                let table = load_spreadsheet(&dir, &file)?;
                println!("Displaying data from {file}\n");
                println!("{}", preview::render_table(&table));
            } else {
                tui::run_viewer(dir)?;
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("# {}\n{}", cfg_path.display(), s);
            }
            ConfigCommand::Path => println!("{}", cfg_path.display()),
        },
    }

    Ok(())
}
