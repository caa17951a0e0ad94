use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use students_core::error::CoreError;
use students_core::types::DbId;
use students_db::models::student::CreateStudent;
use students_db::repositories::StudentRepo;
use students_db::{DbConfig, DbError, DbPool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "students")]
#[command(about = "Validate and store student records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate one student given as JSON and print the result
    Validate {
        /// Read the student from this file instead of stdin. `birthday`
        /// may be an RFC 3339 timestamp or a `YYYY-MM-DD` date.
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Validate and store one student given as JSON
    Save {
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print a stored student
    Show { id: DbId },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Stdout carries the JSON output; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "students_cli=info,students_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => validate_student(file.as_deref()),
        Commands::Save { file } => {
            let input = read_student(file.as_deref())?;
            let pool = open_datastore().await?;
            save_student(&pool, &input).await
        }
        Commands::Show { id } => {
            let pool = open_datastore().await?;
            show_student(&pool, id).await
        }
    }
}

fn validate_student(file: Option<&Path>) -> Result<ExitCode> {
    let input = read_student(file)?;
    let result = students_core::validate_now(&input.snapshot());
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.is_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        for message in result.full_messages() {
            tracing::info!("{message}");
        }
        Ok(ExitCode::FAILURE)
    }
}

async fn save_student(pool: &DbPool, input: &CreateStudent) -> Result<ExitCode> {
    match StudentRepo::save(pool, input, chrono::Utc::now()).await {
        Ok(row) => {
            println!("{}", serde_json::to_string_pretty(&row)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(DbError::Core(CoreError::Invalid(result))) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("Failed to save student"),
    }
}

async fn show_student(pool: &DbPool, id: DbId) -> Result<ExitCode> {
    let row = StudentRepo::find_by_id(pool, id)
        .await
        .context("Failed to load student")?
        .ok_or(CoreError::NotFound {
            entity: "student",
            id,
        })?;
    println!("{}", serde_json::to_string_pretty(&row)?);
    Ok(ExitCode::SUCCESS)
}

async fn open_datastore() -> Result<DbPool> {
    let config = DbConfig::from_env().context("Invalid datastore configuration")?;
    tracing::info!(url = %config.database_url, "Loaded datastore configuration");
    students_db::connect(&config)
        .await
        .context("Failed to open student datastore")
}

fn read_student(file: Option<&Path>) -> Result<CreateStudent> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Student JSON is malformed")
}
