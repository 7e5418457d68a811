use chrono::NaiveDate;
use clap::Parser;
use docket_core::dates;
use docket_core::projection::{ArchiveQuery, SortOrder, TypeFilter, UpcomingQuery};
use docket_storage::{create_storage, JsonFileStorage, StorageConfig, StorageKind, DEFAULT_DATA_FILE};
use docket_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info, warn};

mod logging;
mod shell;
mod views;

use shell::RecordFields;

#[derive(Parser, Debug)]
#[command(author, version, about = "Schedule and publish case coverage videos", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = StorageKind::Json)]
    storage: StorageKind,
    /// JSON file holding the whole collection
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,
    /// Reference date for the views (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Create an empty store file if there is none
    Init,
    /// Content due in the next two weeks
    Upcoming {
        #[arg(long, default_value = "asc")]
        order: SortOrder,
        #[arg(long = "type", default_value = "all")]
        type_filter: TypeFilter,
    },
    /// Published content
    Archive {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "desc")]
        order: SortOrder,
        #[arg(long = "type", default_value = "all")]
        type_filter: TypeFilter,
    },
    /// Add new content
    Create {
        #[command(flatten)]
        fields: RecordFields,
    },
    /// Change the content at a position
    Edit {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        #[command(flatten)]
        fields: RecordFields,
    },
    /// Remove the content at a position
    Delete {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
}

async fn init(config: &StorageConfig) -> anyhow::Result<()> {
    if config.kind != StorageKind::Json {
        warn!("⚠️ Nothing to initialise for {} storage", config.kind);
        return Ok(());
    }
    let storage = JsonFileStorage::init(&config.data_file).await?;
    info!("✨ Store ready at {}", storage.path().display());
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StorageConfig {
        kind: cli.storage,
        data_file: cli.data_file,
    };
    let today = cli.today.unwrap_or_else(dates::today);

    match cli.command {
        Commands::Init => init(&config).await?,
        Commands::Serve { bind } => {
            let storage = create_storage(&config).await?;
            let state = AppState::new(storage).with_today(cli.today);
            docket_web::serve(state, bind).await?;
        }
        Commands::Upcoming { order, type_filter } => {
            let storage = create_storage(&config).await?;
            let query = UpcomingQuery { order, type_filter };
            print!("{}", shell::upcoming(storage.as_ref(), today, &query).await?);
        }
        Commands::Archive { search, order, type_filter } => {
            let storage = create_storage(&config).await?;
            let query = ArchiveQuery { search, order, type_filter };
            print!("{}", shell::archive(storage.as_ref(), today, &query).await?);
        }
        Commands::Create { fields } => {
            let storage = create_storage(&config).await?;
            shell::create(storage.as_ref(), fields).await?;
        }
        Commands::Edit { index, fields } => {
            let storage = create_storage(&config).await?;
            shell::edit(storage.as_ref(), index, fields).await?;
        }
        Commands::Delete { index } => {
            let storage = create_storage(&config).await?;
            shell::delete(storage.as_ref(), index).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
