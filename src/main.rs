//! Solo Leveling Fitness (slfit)
//!
//! An MCP server for fitness targets, workouts, and progress sharing.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

use slfit::config::{self, Config};
use slfit::db;
use slfit::mcp::FitnessService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries MCP traffic; logs go to stderr
    config::init_logging()?;

    slfit::build_info::print_startup_banner();

    let config = Config::from_env();
    let db_path = config.database_path;
    tracing::info!(path = %db_path.display(), "Opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::open_migrated(&db_path)?;
    let version = database.with_conn(db::migrations::get_schema_version)?;
    tracing::info!(version, "Database ready");

    let service = FitnessService::new(db_path, database);

    tracing::info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
