//! Environment-driven settings.
//!
//! | Variable                        | Default                   |
//! |---------------------------------|---------------------------|
//! | `INDEX_SYNC_STORE`              | `pinecone`                |
//! | `INDEX_SYNC_EMBEDDING_PROVIDER` | `openai`                  |
//! | `PINECONE_API_KEY`              | required for `pinecone`   |
//! | `PINECONE_ENVIRONMENT`          | `us-east-1-aws`           |
//! | `PINECONE_CLOUD`                | derived from environment  |
//! | `PINECONE_REGION`               | derived from environment  |
//! | `PINECONE_CONTROLLER_HOST`      | `https://api.pinecone.io` |
//! | `OPENAI_API_KEY`                | required for `openai`     |
//! | `OPENAI_EMBEDDING_MODEL`        | `text-embedding-3-small`  |
//! | `OPENAI_BASE_URL`               | `https://api.openai.com`  |
//! | `INDEX_SYNC_EMBED_CONCURRENCY`  | `4`                       |
//! | `INDEX_SYNC_READY_TIMEOUT_SECS` | `300`                     |

use crate::domain::error::DomainError;
use crate::domain::values::serverless::{Cloud, ServerlessSpec, DEFAULT_ENVIRONMENT};
use crate::infrastructure::pinecone::DEFAULT_CONTROLLER_HOST;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_EMBED_CONCURRENCY: usize = 4;
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Pinecone,
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Pinecone => write!(f, "pinecone"),
            StoreKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pinecone" => Ok(StoreKind::Pinecone),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(format!("Unknown vector store: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingKind {
    #[default]
    OpenAi,
    Hashing,
}

impl fmt::Display for EmbeddingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingKind::OpenAi => write!(f, "openai"),
            EmbeddingKind::Hashing => write!(f, "hashing"),
        }
    }
}

impl FromStr for EmbeddingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingKind::OpenAi),
            "hashing" => Ok(EmbeddingKind::Hashing),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreKind,
    pub embedding: EmbeddingKind,
    pub pinecone_api_key: Option<String>,
    pub controller_host: String,
    pub serverless: ServerlessSpec,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub embed_concurrency: usize,
    pub ready_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            embedding: EmbeddingKind::default(),
            pinecone_api_key: None,
            controller_host: DEFAULT_CONTROLLER_HOST.to_string(),
            serverless: ServerlessSpec::default(),
            openai_api_key: None,
            openai_model: None,
            openai_base_url: None,
            embed_concurrency: DEFAULT_EMBED_CONCURRENCY,
            ready_timeout: Duration::from_secs(DEFAULT_READY_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = get("INDEX_SYNC_STORE")
            .map(|s| s.parse::<StoreKind>())
            .transpose()
            .map_err(DomainError::Config)?
            .unwrap_or_default();
        let embedding = get("INDEX_SYNC_EMBEDDING_PROVIDER")
            .map(|s| s.parse::<EmbeddingKind>())
            .transpose()
            .map_err(DomainError::Config)?
            .unwrap_or_default();

        let environment =
            get("PINECONE_ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let mut serverless =
            ServerlessSpec::from_environment(&environment).map_err(DomainError::Config)?;
        if let Some(cloud) = get("PINECONE_CLOUD") {
            serverless.cloud = cloud.parse::<Cloud>().map_err(DomainError::Config)?;
        }
        if let Some(region) = get("PINECONE_REGION") {
            serverless.region = region;
        }

        let embed_concurrency = match get("INDEX_SYNC_EMBED_CONCURRENCY") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DomainError::Config(format!(
                        "INDEX_SYNC_EMBED_CONCURRENCY must be a positive integer: {v}"
                    ))
                })?,
            None => DEFAULT_EMBED_CONCURRENCY,
        };
        let ready_timeout = match get("INDEX_SYNC_READY_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse::<u64>().map_err(|_| {
                DomainError::Config(format!(
                    "INDEX_SYNC_READY_TIMEOUT_SECS must be a number of seconds: {v}"
                ))
            })?),
            None => Duration::from_secs(DEFAULT_READY_TIMEOUT_SECS),
        };

        Ok(Self {
            store,
            embedding,
            pinecone_api_key: get("PINECONE_API_KEY"),
            controller_host: get("PINECONE_CONTROLLER_HOST")
                .unwrap_or_else(|| DEFAULT_CONTROLLER_HOST.to_string()),
            serverless,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_EMBEDDING_MODEL"),
            openai_base_url: get("OPENAI_BASE_URL"),
            embed_concurrency,
            ready_timeout,
        })
    }
}
