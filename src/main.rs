//! `connex-provider` command line.
//!
//! Inspects contract import files and checks provider configs without a
//! connector.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use connex_provider::config::{load_config, ObservabilityConfig};
use connex_provider::contract::AbiEntry;
use connex_provider::observability::logging::init_logging;
use connex_provider::{ChainTag, ContractImport};

#[derive(Parser)]
#[command(name = "connex-provider")]
#[command(about = "Inspect Connex contract imports and provider configs", long_about = None)]
struct Cli {
    /// Log level or filter directive.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List functions and events of a contract import
    Abi { import: PathBuf },
    /// Print the ABI entry with the given name
    Lookup { import: PathBuf, name: String },
    /// Print the contract address for a chain tag (e.g. 0x27)
    Address { import: PathBuf, chain_tag: ChainTag },
    /// Load and validate a provider config file
    CheckConfig { config: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
        json: false,
    });

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Abi { import } => {
            let import = ContractImport::from_file(&import)?;
            for entry in import.entries() {
                let kind = match entry {
                    AbiEntry::Function(_) => "function",
                    AbiEntry::Event(_) => "event",
                };
                println!("{:<9} {}", kind, entry.signature());
            }
            Ok(true)
        }
        Commands::Lookup { import, name } => {
            let import = ContractImport::from_file(&import)?;
            match import.entry(&name) {
                Some(entry) => {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                    Ok(true)
                }
                None => {
                    eprintln!("No ABI entry named {}", name);
                    Ok(false)
                }
            }
        }
        Commands::Address { import, chain_tag } => {
            let import = ContractImport::from_file(&import)?;
            match import.address_for(chain_tag) {
                Some(address) => {
                    println!("{}", address);
                    Ok(true)
                }
                None => {
                    eprintln!("No address for chain tag {}", chain_tag);
                    Ok(false)
                }
            }
        }
        Commands::CheckConfig { config } => {
            let config = load_config(&config)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(true)
        }
    }
}
