use clap::{Parser, Subcommand};
use config::{timezone_from_hours, Config};
use history::impl_sqlite::HistoryStoreSqlite;
use image_classifier::availability::ModelAvailability;
use image_classifier::dispatch::ClassificationDispatcher;
use image_classifier::models::model_config::TensorLayout;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use prediction_service::main::PredictionService;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

mod category;
mod config;
mod history;
mod image_classifier;
mod image_decoder;
mod library;
mod prediction_service;
mod thumbnail;

/// Classify waste images and keep a history of the results.
#[derive(Parser)]
#[command(name = "eco-sort", version)]
struct Cli {
    /// SQLite database holding the prediction history
    #[arg(long, global = true, env = "ECO_SORT_DB_PATH")]
    db_path: Option<PathBuf>,

    /// ONNX model; demo predictions are used when it cannot be loaded
    #[arg(long, global = true, env = "ECO_SORT_MODEL_PATH")]
    model_path: Option<String>,

    /// Input tensor layout of the model
    #[arg(long, global = true, env = "ECO_SORT_MODEL_LAYOUT", value_enum)]
    model_layout: Option<TensorLayout>,

    /// Directory with one sub-directory of sample images per category
    #[arg(long, global = true, env = "ECO_SORT_DATASET_DIR")]
    dataset_dir: Option<PathBuf>,

    /// Whole-hour offset from UTC used for log timestamps
    #[arg(
        long,
        global = true,
        env = "ECO_SORT_UTC_OFFSET_HOURS",
        allow_hyphen_values = true
    )]
    utc_offset_hours: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an image file, or an encoded data URI read from stdin with `-`
    Classify {
        #[arg(value_name = "FILE")]
        image: PathBuf,

        /// Known category of a demo image, used when no model is loaded
        #[arg(long)]
        demo_category: Option<String>,

        /// Identifies the submitting client in the history
        #[arg(long, default_value = concat!("eco-sort/", env!("CARGO_PKG_VERSION")))]
        client: String,
    },
    /// Show the most recent predictions
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete one prediction from the history
    Delete { id: i64 },
    /// Delete every prediction from the history
    Clear,
    /// Report whether the service is up
    Health,
    /// List the sample images bundled for a category
    DemoImages { category: String },
}

const EXIT_CLASSIFICATION_FAILED: u8 = 1;
const EXIT_NOT_FOUND: u8 = 3;

fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::default();

    if let Some(db_path) = &cli.db_path {
        config.db_path = db_path.clone();
    }
    if let Some(model_path) = &cli.model_path {
        config.model.onnx_model_path = model_path.clone();
    }
    if let Some(layout) = cli.model_layout {
        config.model.layout = layout;
    }
    if let Some(dataset_dir) = &cli.dataset_dir {
        config.dataset_dir = dataset_dir.clone();
    }
    if let Some(hours) = cli.utc_offset_hours {
        config.logger_timezone = timezone_from_hours(hours)
            .ok_or_else(|| format!("UTC offset of {} hours is out of range", hours))?;
    }

    Ok(config)
}

fn read_image(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    }

    let bytes = std::fs::read(path)?;
    Ok(image_decoder::encode_image_file(&bytes)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    let availability = ModelAvailability::load(&config.model, logger.clone());

    let history = Arc::new(HistoryStoreSqlite::open(&config.db_path, logger.clone())?);
    let _ = logger.info(&format!("{} predictions in history", history.count()?));

    let dispatcher = ClassificationDispatcher::new(availability, logger.clone());

    let service = PredictionService::new(config, logger.clone(), dispatcher, history);

    match cli.command {
        Commands::Classify {
            image,
            demo_category,
            client,
        } => {
            let _ = logger.info(&format!(
                "Classifying {} (model available: {})",
                image.display(),
                service.model_available()
            ));
            let encoded = read_image(&image)?;
            let response = service.classify(&encoded, demo_category, &client)?;
            print_json(&response)?;
            if !response.is_success() {
                return Ok(ExitCode::from(EXIT_CLASSIFICATION_FAILED));
            }
        }
        Commands::History { limit } => print_json(&service.list_history(limit)?)?,
        Commands::Delete { id } => match service.delete_history_entry(id) {
            Ok(response) => print_json(&response)?,
            Err(e) if e.is_not_found() => {
                print_json(&serde_json::json!({ "error": e.to_string(), "success": false }))?;
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Clear => print_json(&service.clear_history()?)?,
        Commands::Health => print_json(&service.health())?,
        Commands::DemoImages { category } => print_json(&service.demo_images(&category))?,
    }

    Ok(ExitCode::SUCCESS)
}
