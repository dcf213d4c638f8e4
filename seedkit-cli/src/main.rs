mod commands;
mod config;

use clap::{Parser, Subcommand};
use seedkit_core::storage::Storage;
use seedkit_core::SeedkitError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seedkit")]
#[command(about = "seedkit - wallet codec and account-secret toolkit")]
#[command(version)]
struct Cli {
    /// Data directory for account storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Base-85 encoding and PSBT fragment commands
    #[command(subcommand)]
    Codec(commands::CodecCommands),

    /// Mnemonic wordlist commands
    #[command(subcommand)]
    Mnemonic(commands::MnemonicCommands),

    /// Label parsing and BIP-329 interchange commands
    #[command(subcommand)]
    Label(commands::LabelCommands),

    /// Address classification commands
    #[command(subcommand)]
    Address(commands::AddressCommands),

    /// Account and PIN management commands
    #[command(subcommand)]
    Account(commands::AccountCommands),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "seedkit={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get data directory
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config::CliConfig::default().data_dir);

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir).await?;

    // Account storage lives in a single database file
    let storage = Storage::new(&data_dir.join("seedkit.db")).await?;

    // Execute command
    let result = match cli.command {
        Commands::Codec(cmd) => commands::handle_codec_command(cmd),
        Commands::Mnemonic(cmd) => commands::handle_mnemonic_command(cmd),
        Commands::Label(cmd) => commands::handle_label_command(cmd).await,
        Commands::Address(cmd) => commands::handle_address_command(cmd),
        Commands::Account(cmd) => commands::handle_account_command(cmd, &storage).await,
    };

    if let Err(e) = result {
        match e {
            SeedkitError::AccountNotFound { name } => {
                eprintln!("Error: Account '{}' not found", name);
                eprintln!("Use 'seedkit account list' to see stored accounts");
            }
            SeedkitError::UnknownWord { word, position } => {
                eprintln!("Error: '{}' (word {}) is not in the source wordlist", word, position + 1);
                eprintln!("Check the --from language and the spelling of each word");
            }
            SeedkitError::NoValidLabels => {
                eprintln!("Error: No valid BIP-329 labels found in the import");
            }
            SeedkitError::InvalidCharacter { character, position } => {
                eprintln!("Error: Invalid character '{}' at position {}", character, position);
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
