use clap::Parser;
use index_sync::cli::commands::{Cli, Commands};
use index_sync::IndexSync;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("index_sync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match IndexSync::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error initializing index-sync: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(client, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(client: IndexSync, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Upload {
            index,
            chunks,
            namespace,
        } => {
            let report = client.upload(&chunks, &index, &namespace).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Query {
            index,
            text,
            top_k,
            namespace,
        } => {
            let top_k = usize::try_from(top_k)?;
            let chunks = client.query(&text, &index, top_k, &namespace).await?;
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
        Commands::Delete { index } => {
            if client.delete(&index).await? {
                println!("Index '{index}' deleted");
            } else {
                println!("Index '{index}' does not exist, nothing to delete");
            }
        }
        Commands::List => {
            for name in client.list_indexes().await? {
                println!("{name}");
            }
        }
    }
    Ok(())
}
