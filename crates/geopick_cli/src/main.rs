//! Terminal front end for the geopick picker.
//!
//! # Responsibility
//! - Drive the core picker service from one-shot commands.
//! - Print the same header and location panel the Flutter shell renders.

use clap::{Parser, Subcommand};
use geopick_core::{
    classify_geo, init_from_config, AppConfig, Geo, HttpDirectoryClient,
    LocationPanel, PickerService, PickerView, SqliteKeyValueStore, SELECT_PROMPT_TEXT,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pick a person from the directory and see where they are.
#[derive(Parser)]
#[command(name = "geopick")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory base URL (overrides GEOPICK_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// SQLite file holding the selection (overrides GEOPICK_DB_PATH).
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Log level (overrides GEOPICK_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the directory listing.
    List,

    /// Fetch one user and make it the saved selection.
    Select {
        /// Directory id of the user.
        id: i64,
    },

    /// Print the saved selection without network access.
    Show,

    /// Classify a coordinate pair.
    Classify {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        lng: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Err(err) = config.validate() {
        eprintln!("geopick: {err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("geopick: {err}");
        return ExitCode::FAILURE;
    }

    if let Commands::Classify { lat, lng } = &cli.command {
        let geo = Geo::new(lat.as_str(), lng.as_str());
        match classify_geo(&geo) {
            Some(quadrant) => println!("{} ({})", quadrant.label(), quadrant.color().name()),
            None => println!("(no quadrant)"),
        }
        return ExitCode::SUCCESS;
    }

    let storage = match SqliteKeyValueStore::open(&config.db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("geopick: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let service = PickerService::new(HttpDirectoryClient::new(config.base_url.clone()), storage);

    match cli.command {
        Commands::List => {
            if let Err(err) = service.refresh_directory() {
                eprintln!("geopick: {err}");
                return ExitCode::FAILURE;
            }
            print_listing(&service.view());
        }
        Commands::Select { id } => match service.select(id) {
            Ok(_) => print_selection(&service.view()),
            Err(err) => {
                eprintln!("geopick: {err}");
                print_selection(&service.view());
                return ExitCode::FAILURE;
            }
        },
        Commands::Show => print_selection(&service.view()),
        Commands::Classify { .. } => {}
    }

    ExitCode::SUCCESS
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(db_path) = &cli.db_path {
        config.db_path = db_path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

fn print_listing(view: &PickerView) {
    println!("{SELECT_PROMPT_TEXT}");
    for option in &view.options {
        println!("{:>4}  {}", option.id, option.name);
    }
}

fn print_selection(view: &PickerView) {
    println!("{}", view.header);
    match view.location {
        LocationPanel::Classified(quadrant) => {
            println!("{} [{}]", quadrant.label(), quadrant.color().name());
        }
        LocationPanel::NotSelected => println!("{}", view.location.text()),
        LocationPanel::Unclassified => {}
    }
}
