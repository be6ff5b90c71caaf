mod cooking_times;
mod reference;
mod users;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diesel::{Connection, PgConnection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry operator CLI", long_about = None)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load tags from a JSON array of {name, slug}
    LoadTags {
        #[arg(long, default_value = "data/tags.json")]
        file: PathBuf,
    },
    /// Load ingredients from a JSON array of {name, measurement_unit}
    LoadIngredients {
        #[arg(long, default_value = "data/ingredients.json")]
        file: PathBuf,
    },
    /// Create a user and print a bearer token for them
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Print the fast/medium/slow cooking-time thresholds
    CookingTimes {
        /// Also list every recipe with its bucket
        #[arg(long)]
        recipes: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut conn = connect(cli.database_url.as_deref())?;

    match cli.command {
        Commands::LoadTags { file } => reference::load_tags(&mut conn, &file)?,
        Commands::LoadIngredients { file } => reference::load_ingredients(&mut conn, &file)?,
        Commands::CreateUser {
            email,
            username,
            first_name,
            last_name,
        } => users::create_user(&mut conn, &email, &username, &first_name, &last_name)?,
        Commands::CookingTimes { recipes } => cooking_times::print_buckets(&mut conn, recipes)?,
    }

    Ok(())
}

fn connect(database_url: Option<&str>) -> Result<PgConnection> {
    let url = database_url.context("DATABASE_URL must be set or passed with --database-url")?;
    let mut conn = PgConnection::establish(url).context("Failed to connect to database")?;
    pantry_server::db::run_migrations(&mut conn).context("Failed to run migrations")?;
    Ok(conn)
}
