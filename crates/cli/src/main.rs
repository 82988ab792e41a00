//! FoodIa CLI - database migrations, accounts, and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply the workspace migrations
//! foodia-cli migrate
//!
//! # Create a store owner account
//! foodia-cli account create -e owner@example.com -p 'a long password'
//!
//! # Load a demo store for an existing account
//! foodia-cli seed demo -f crates/cli/seed/demo_store.yaml --account owner@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `account create` - Create owner accounts
//! - `seed demo` - Fill an account's store with a menu, orders, and customers

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "foodia-cli")]
#[command(author, version, about = "FoodIa CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage owner accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Load sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a new owner account
    Create {
        /// Owner email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Replace an account's store with a demo store
    Demo {
        /// YAML file describing the store
        #[arg(short, long, default_value = "crates/cli/seed/demo_store.yaml")]
        file: String,

        /// Email of the owning account
        #[arg(long)]
        account: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Account { action } => match action {
            AccountAction::Create { email, password } => {
                commands::account::create(&email, &password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Demo { file, account } => commands::seed::demo(&file, &account).await?,
        },
    }
    Ok(())
}
