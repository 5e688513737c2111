use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::Settings;
use core_types::{SchoolFilter, SchoolRecord, SchoolSubmission};
use database::{DbRepository, SchoolStore};
use std::net::SocketAddr;

/// The main entry point for the school directory.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; DATABASE_URL may come from the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = configuration::load_settings().context("Failed to load configuration")?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Serve(args) => {
            let addr = args.addr.unwrap_or_else(|| settings.server.addr());
            web_server::run_server(settings, addr).await
        }
        Commands::List(args) => handle_list(args, &settings).await,
        Commands::Add(args) => handle_add(args, &settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Submit, browse and serve a directory of schools.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Print the directory, newest first, optionally filtered.
    List(ListArgs),
    /// Add a school from the command line.
    Add(AddArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on; defaults to `server.host:server.port` from the config.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct ListArgs {
    /// Part of the school name (case-insensitive).
    #[arg(long, default_value = "")]
    search: String,

    /// Exact city (case-insensitive).
    #[arg(long, default_value = "")]
    city: String,

    /// Part of the board name, e.g. "CBSE" or "state".
    #[arg(long, default_value = "")]
    board: String,
}

#[derive(Parser)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    /// 7 to 15 digits.
    #[arg(long)]
    contact: String,
    #[arg(long)]
    email: String,
    /// One of: CBSE, ICSE, IB, Cambridge, State Board.
    #[arg(long)]
    board: String,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_list(args: ListArgs, settings: &Settings) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database).await?;
    let db_repo = DbRepository::new(db_pool.clone());
    let schools = db_repo.get_all_schools().await;
    database::close(&db_pool).await;
    let schools = schools?;

    let filter = SchoolFilter::new(args.search, args.city, args.board);
    let matches = filter.apply(&schools);
    if matches.is_empty() {
        println!("No schools found");
        return Ok(());
    }

    println!("{}", render_table(&matches));
    println!("{} of {} schools", matches.len(), schools.len());
    Ok(())
}

async fn handle_add(args: AddArgs, settings: &Settings) -> anyhow::Result<()> {
    let school = SchoolSubmission {
        name: Some(args.name),
        address: Some(args.address),
        city: Some(args.city),
        state: Some(args.state),
        contact: Some(args.contact),
        email_id: Some(args.email),
        board: Some(args.board),
        website: args.website,
        image: None,
        description: args.description,
    }
    .validate()?;

    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool.clone());

    let result = async {
        if db_repo.school_exists(&school.name, &school.address).await? {
            return Err(database::DbError::Duplicate);
        }
        db_repo.insert_school(&school).await
    }
    .await;
    database::close(&db_pool).await;

    let id = result?;
    tracing::info!(id, name = %school.name, "School added.");
    println!("School added successfully (id {id})");
    Ok(())
}

fn render_table(schools: &[&SchoolRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "City", "Board", "Contact", "Email"]);
    for school in schools {
        table.add_row(vec![
            school.id.to_string(),
            school.name.clone(),
            school.city.clone(),
            school.board.clone(),
            school.contact.to_string(),
            school.email_id.clone(),
        ]);
    }
    table
}
