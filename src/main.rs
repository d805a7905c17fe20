use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tallybook::app;
use tallybook::clock::SystemClock;
use tallybook::config::ResolvedConfig;
use tallybook::export;
use tallybook::filter::TransactionFilter;
use tallybook::form;
use tallybook::models::{Id, Transaction};
use tallybook::storage::JsonFileStorage;
use tallybook::store::TransactionStore;
use tallybook::summary::Summary;

#[derive(Parser)]
#[command(name = "tallybook")]
#[command(about = "Local-first income and expense tracker")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "tallybook.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new transaction
    Add {
        /// income or expense; defaults to expense
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
        /// Transaction date (YYYY-MM-DD, not in the future)
        #[arg(long)]
        date: String,
        /// One of: Food, Transport, Shopping, Bills, Entertainment, Other
        #[arg(long)]
        category: Option<String>,
    },
    /// List transactions, split by type and optionally filtered
    List {
        /// Case-insensitive match against description and category
        #[arg(long)]
        search: Option<String>,
        /// all, today, week, month, year, custom
        #[arg(long, default_value = "all")]
        range: String,
        /// Custom range start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Custom range end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Keep only the newest N entries of each partition
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replace a transaction by id
    Update {
        #[arg(long)]
        id: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: String,
        /// Required in practice: an update without a category is rejected
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a transaction by id
    Remove { id: String },
    /// Show totals and category breakdowns
    Summary,
    /// Export the full list
    Export {
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: String,
        /// Output file; prints to stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ResolvedConfig::load_or_default(&cli.config)?;
    let storage = Arc::new(JsonFileStorage::new(&config.data_dir));
    let clock = SystemClock;

    match cli.command {
        Command::Add {
            kind,
            amount,
            description,
            date,
            category,
        } => {
            let draft = form::parse_draft(
                kind.as_deref(),
                &amount,
                &description,
                &date,
                category.as_deref(),
                &clock,
            )?;
            let mut store = TransactionStore::load(storage).await;
            let result = app::add_transaction(&mut store, draft, &config.display).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::List {
            search,
            range,
            start,
            end,
            limit,
        } => {
            let store = TransactionStore::load(storage).await;
            let filter = TransactionFilter::new(
                search.unwrap_or_default(),
                app::parse_range(&range, start.as_deref(), end.as_deref())?,
            );
            let output = app::list_transactions(&store, &filter, &clock, &config.display, limit);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Update {
            id,
            kind,
            amount,
            description,
            date,
            category,
        } => {
            let replacement = Transaction {
                id: Id::from_string(id),
                kind: form::parse_kind(Some(kind.as_str()))?,
                amount: form::parse_amount(&amount)?,
                description: description.trim().to_string(),
                date: form::parse_date(&date, &clock)?,
                // No default on update: a missing category reaches the store
                // blank and is rejected there.
                category: form::parse_category(category.as_deref())?.unwrap_or_default(),
            };
            let mut store = TransactionStore::load(storage).await;
            let result =
                app::update_transaction(&mut store, replacement, &config.display).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Remove { id } => {
            let mut store = TransactionStore::load(storage).await;
            let result = app::remove_transaction(&mut store, &id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Summary => {
            let store = TransactionStore::load(storage).await;
            let summary = Summary::compute(store.transactions());
            let output = app::summary_output(&summary, &config.display);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Export { format, output } => {
            let store = TransactionStore::load(storage).await;
            let content = match format.trim().to_lowercase().as_str() {
                "csv" => export::to_csv(store.transactions())?,
                "json" => export::to_json(store.transactions())?,
                other => anyhow::bail!("Invalid format: {other}. Use: csv, json"),
            };
            match output {
                Some(path) => {
                    export::write_to_file(&content, &path).await?;
                    println!(
                        "Exported {} transactions to {}",
                        store.transactions().len(),
                        path.display()
                    );
                }
                None => println!("{content}"),
            }
        }
        Command::Config => {
            println!("Config file: {}", cli.config.display());
            println!("Data directory: {}", config.data_dir.display());
        }
    }

    Ok(())
}
