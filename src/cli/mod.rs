pub mod client;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::TodoClient;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Todo CLI - command-line client for the Todo Items API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "TODO_API_URL", default_value = "http://127.0.0.1:7071", help = "API base URL, including any route prefix")]
    pub server: String,

    #[arg(long, global = true, env = "TODO_USER", help = "Principal name sent in the identity header")]
    pub user: Option<String>,

    #[arg(long, global = true, default_value = "X-MS-CLIENT-PRINCIPAL-NAME", help = "Identity header name")]
    pub principal_header: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create a todo item, or overwrite one when --id is given")]
    Add {
        #[arg(help = "Item name")]
        name: String,
        #[arg(long, help = "Existing item id to upsert")]
        id: Option<String>,
    },

    #[command(about = "List your todo items")]
    List,

    #[command(about = "Delete a todo item by id")]
    Delete {
        #[arg(help = "Item id")]
        id: String,
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let principal = cli.user.clone().map(|user| (cli.principal_header.clone(), user));
    let client = TodoClient::new(&cli.server, principal)?;

    match cli.command {
        Commands::Add { name, id } => {
            let item = client.add(&name, id).await?;
            utils::output_item(&output_format, &item)
        }
        Commands::List => {
            let list = client.list().await?;
            utils::output_list(&output_format, &list)
        }
        Commands::Delete { id } => {
            client.delete(&id).await?;
            utils::output_success(&output_format, &format!("Deleted {}", id))
        }
    }
}
