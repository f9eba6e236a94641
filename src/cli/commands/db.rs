use clap::Subcommand;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the Todo and users tables if they do not exist")]
    CreateTables,

    #[command(about = "Check that the configured database answers")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let db_config = &config::config().database;
    let pool = DatabaseManager::connect(db_config).await?;

    let action = match cmd {
        DbCommands::CreateTables => {
            DatabaseManager::create_tables(&pool).await?;
            "tables created"
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await?;
            "database ok"
        }
    };
    pool.close().await;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "success": true, "message": action, "database": db_config.name })
        ),
        OutputFormat::Text => println!("{} ({})", action, db_config.name),
    }
    Ok(())
}
