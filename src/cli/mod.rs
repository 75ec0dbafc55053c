pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::StorefrontClient;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront CLI - catalog administration from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "STOREFRONT_URL",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the Storefront API"
    )]
    pub url: String,

    #[arg(
        long,
        global = true,
        env = "STOREFRONT_TOKEN",
        hide_env_values = true,
        help = "Admin session token for protected commands"
    )]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse and manage catalog products")]
    Products {
        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },

    #[command(about = "Join the mailing list")]
    Signup {
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Email address")]
        email: String,
    },

    #[command(about = "Show dashboard statistics (admin)")]
    Stats,

    #[command(about = "Mint an admin session token from ADMIN_JWT_SECRET")]
    Token {
        #[arg(long, default_value = "admin", help = "Token subject")]
        subject: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn client(cli: &Cli) -> anyhow::Result<StorefrontClient> {
    let client = StorefrontClient::new(&cli.url)?;
    Ok(match &cli.token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    })
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { ref subject } => commands::token::handle(subject, output_format),
        Commands::Products { ref cmd } => {
            commands::products::handle(cmd, &client(&cli)?, output_format).await
        }
        Commands::Signup {
            ref name,
            ref email,
        } => commands::signup::handle(name, email, &client(&cli)?, output_format).await,
        Commands::Stats => commands::stats::handle(&client(&cli)?, output_format).await,
    }
}
