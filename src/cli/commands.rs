use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "index-sync",
    about = "Sync text chunks into a vector index and query it",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recreate an index and upload one vector per chunk
    Upload {
        /// Index name (any existing index with this name is deleted first)
        index: String,
        /// Chunks of text; ids are assigned by position starting at 0
        chunks: Vec<String>,
        #[arg(long, default_value = "")]
        namespace: String,
    },
    /// Return the chunks most similar to a query, most similar first
    Query {
        index: String,
        text: String,
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..))]
        top_k: u64,
        #[arg(long, default_value = "")]
        namespace: String,
    },
    /// Delete an index if it exists
    Delete { index: String },
    /// List index names
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "index-sync", "upload", "animals", "cats", "dogs", "--namespace", "pets",
        ])
        .unwrap();
        match cli.command {
            Commands::Upload { index, chunks, namespace } => {
                assert_eq!(index, "animals");
                assert_eq!(chunks, vec!["cats", "dogs"]);
                assert_eq!(namespace, "pets");
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn test_query_defaults() {
        let cli = Cli::try_parse_from(["index-sync", "query", "animals", "cats"]).unwrap();
        match cli.command {
            Commands::Query { top_k, namespace, .. } => {
                assert_eq!(top_k, 3);
                assert_eq!(namespace, "");
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_query_rejects_zero_top_k() {
        let args = ["index-sync", "query", "animals", "cats", "--top-k", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
