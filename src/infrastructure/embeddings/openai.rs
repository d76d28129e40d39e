use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self::with_optional_key(Some(api_key), model, base_url)
    }

    /// A provider whose credential may be absent. Construction always
    /// succeeds; embedding fails with `Config` until a key is supplied.
    pub fn with_optional_key(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    fn api_key(&self) -> Result<&str, DomainError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DomainError::Config("OPENAI_API_KEY is not set".into()))
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1/embeddings", self.base_url);
        debug!(model = %self.model, count = texts.len(), "Requesting embeddings");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&OpenAiRequest {
                input: texts,
                model: &self.model,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("OpenAI API {status}: {body}")));
        }

        let mut result: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        if result.data.len() != texts.len() {
            return Err(DomainError::Embedding(format!(
                "OpenAI returned {} embeddings for {} inputs",
                result.data.len(),
                texts.len()
            )));
        }
        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        self.api_key().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let provider = OpenAiProvider::new("key".into(), None, None);
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.dimension(), 1536);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert!(provider.ensure_configured().is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenAiProvider::new(
            "key".into(),
            Some("text-embedding-3-large".into()),
            Some("http://localhost:8080/".into()),
        );
        assert_eq!(provider.base_url, "http://localhost:8080");
        assert_eq!(provider.dimension(), 3072);
    }

    #[tokio::test]
    async fn test_missing_key_fails_on_use_not_construction() {
        let provider = OpenAiProvider::with_optional_key(None, None, None);
        assert!(matches!(provider.ensure_configured(), Err(DomainError::Config(_))));
        let err = provider.embed(&["text".to_string()]).await.unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
