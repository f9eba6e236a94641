use clap::Subcommand;
use serde_json::json;

use crate::auth::{self, password, TokenConfig, UserStore};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Print an Argon2id hash for a password")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },

    #[command(about = "Log in as a demo user and print the access token")]
    Token {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Password")]
        password: String,
    },

    #[command(about = "List the demo users and their roles")]
    Users,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::HashPassword { password } => {
            let hash = password::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
            match output_format {
                OutputFormat::Json => println!("{}", json!({ "hash": hash })),
                OutputFormat::Text => println!("{}", hash),
            }
        }
        AuthCommands::Token { username, password } => {
            let users = UserStore::demo()?;
            let tokens = TokenConfig::from_security(&config::config().security);
            let response = auth::login(&users, &tokens, &username, &password)?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
                OutputFormat::Text => println!("{}", response.access_token),
            }
        }
        AuthCommands::Users => {
            let users = UserStore::demo()?;
            let mut views: Vec<_> = users.iter().map(|user| user.view()).collect();
            views.sort_by(|a, b| a.username.cmp(&b.username));
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&views)?),
                OutputFormat::Text => {
                    for view in views {
                        println!(
                            "{:<10} {:<6} {}",
                            view.username,
                            view.role.as_str(),
                            view.email.unwrap_or_default()
                        );
                    }
                }
            }
        }
    }
    Ok(())
}
