use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;

/// Embeds a single text and checks it against the index dimension.
/// All-zero vectors are rejected: they have no direction under cosine
/// similarity and the remote store refuses them.
pub(crate) async fn embed_one(
    embedder: &dyn EmbeddingProvider,
    text: &str,
    dimension: usize,
) -> Result<Vec<f32>, DomainError> {
    let vector = embedder
        .embed(&[text.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Embedding("Provider returned no embedding".into()))?;

    if vector.len() != dimension {
        return Err(DomainError::DimensionMismatch {
            expected: dimension,
            actual: vector.len(),
        });
    }
    if vector.iter().all(|v| *v == 0.0) {
        return Err(DomainError::Embedding(format!(
            "Embedding of {text:?} is all zeros"
        )));
    }
    Ok(vector)
}
