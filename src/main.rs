//! directory-import - bulk business import for the directory
//!
//! Reads a CSV of businesses and imports it into the directory database

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use directory_import::storage::RecordStore;
use directory_import::{
    Config, Confirmation, Database, ImportController, ImportOutcome, ImportPhase, ImportSummary,
    InMemoryStore, Table, parse_table, template_header, utils, write_error_report,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "directory-import", version, about = "Bulk business import for the directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import businesses from a CSV file
    Import {
        /// CSV file with a header row
        file: PathBuf,
        /// YAML configuration file
        #[arg(long, env = "DIRECTORY_IMPORT_CONFIG")]
        config: Option<PathBuf>,
        /// Skip the confirmation prompt for large files
        #[arg(long, short = 'y')]
        yes: bool,
        /// Run against an in-memory copy; nothing is written to the database
        #[arg(long)]
        dry_run: bool,
        /// Write failed rows to this CSV file
        #[arg(long)]
        errors_out: Option<PathBuf>,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the CSV header the importer understands
    Template,
    /// Create or update the database schema
    Migrate {
        /// YAML configuration file
        #[arg(long, env = "DIRECTORY_IMPORT_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Template => {
            println!("{}", template_header());
            Ok(ExitCode::SUCCESS)
        }
        Command::Migrate { config } => migrate(config.as_deref()).await,
        Command::Import {
            file,
            config,
            yes,
            dry_run,
            errors_out,
            json,
        } => {
            let options = ImportOptions {
                confirmation: Confirmation::from(yes),
                dry_run,
                errors_out,
                json,
            };
            import(&file, config.as_deref(), &options).await
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            // Display, not Debug, keeps the context chain readable
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load(path).await?;
    utils::init_tracing(&config.logging)?;
    Ok(config)
}

async fn migrate(config: Option<&Path>) -> anyhow::Result<ExitCode> {
    let config = load_config(config).await?;
    let database = Database::connect_and_migrate(&config.database).await?;
    let stats = database.stats().await?;
    println!(
        "Schema up to date: {} categories, {} neighbourhoods, {} businesses",
        stats.categories, stats.neighbourhoods, stats.businesses
    );
    Ok(ExitCode::SUCCESS)
}

struct ImportOptions {
    confirmation: Confirmation,
    dry_run: bool,
    errors_out: Option<PathBuf>,
    json: bool,
}

async fn import(
    file: &Path,
    config: Option<&Path>,
    options: &ImportOptions,
) -> anyhow::Result<ExitCode> {
    let config = load_config(config).await?;

    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let table = parse_table(&bytes)?;

    let store: Arc<dyn RecordStore> = if options.dry_run {
        // Read-only: no migrations
        let database = Database::new(&config.database).await?;
        info!("Dry run: importing into an in-memory copy of the reference data");
        Arc::new(InMemoryStore::with_references_from(&database).await?)
    } else {
        Arc::new(Database::connect_and_migrate(&config.database).await?)
    };

    let controller = Arc::new(ImportController::new(store, config.import.clone()));

    let first = run_with_progress(&controller, table.clone(), options.confirmation).await?;
    let summary = match first {
        ImportOutcome::Finished(summary) => summary,
        ImportOutcome::ConfirmationRequired { total, threshold } => {
            if !ask_confirmation(total, threshold)? {
                println!("Import cancelled; nothing was written");
                return Ok(ExitCode::FAILURE);
            }
            match run_with_progress(&controller, table, Confirmation::Confirmed).await? {
                ImportOutcome::Finished(summary) => summary,
                ImportOutcome::ConfirmationRequired { .. } => {
                    anyhow::bail!("import still requires confirmation")
                }
            }
        }
    };

    report(&summary, options)?;
    controller.take_summary();

    Ok(match summary.phase {
        ImportPhase::Completed => ExitCode::SUCCESS,
        ImportPhase::CompletedWithErrors => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    })
}

async fn run_with_progress(
    controller: &Arc<ImportController>,
    table: Table,
    confirmation: Confirmation,
) -> anyhow::Result<ImportOutcome> {
    let mut handle = Arc::clone(controller).spawn(table, confirmation)?;

    if let Some(observer) = handle.observer() {
        while let Some(snapshot) = observer.changed().await {
            if snapshot.phase == ImportPhase::Importing && snapshot.processed > 0 {
                eprintln!(
                    "[{:>3.0}%] {}/{} rows, {} imported, {} failed",
                    snapshot.progress() * 100.0,
                    snapshot.processed,
                    snapshot.total,
                    snapshot.success,
                    snapshot.failed
                );
            }
            if snapshot.is_terminal() || snapshot.phase == ImportPhase::Idle {
                break;
            }
        }
    }

    Ok(handle.wait().await?)
}

fn ask_confirmation(total: usize, threshold: usize) -> anyhow::Result<bool> {
    print!(
        "The file has {} rows, more than the usual limit of {}. Import anyway? [y/N] ",
        total, threshold
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn report(summary: &ImportSummary, options: &ImportOptions) -> anyhow::Result<()> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
        for error in summary.errors.iter() {
            println!("  {}", error);
        }
    }

    if let Some(path) = options.errors_out.as_deref() {
        if summary.errors.is_empty() {
            return Ok(());
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_error_report(&summary.errors, file)?;
        warn!(path = %path.display(), count = summary.errors.len(), "Wrote error report");
        println!("Failed rows written to {}", path.display());
    }

    Ok(())
}
