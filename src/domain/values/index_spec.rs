use crate::domain::values::metric::Metric;
use crate::domain::values::serverless::ServerlessSpec;
use crate::domain::values::vector_type::VectorType;
use serde::{Deserialize, Serialize};

/// Dimension of every index this client creates (text-embedding-3-small).
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Everything needed to create an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    pub vector_type: VectorType,
    pub serverless: ServerlessSpec,
}

impl IndexSpec {
    pub fn dense_cosine(name: impl Into<String>, serverless: ServerlessSpec) -> Self {
        Self {
            name: name.into(),
            dimension: EMBEDDING_DIMENSION,
            metric: Metric::Cosine,
            vector_type: VectorType::Dense,
            serverless,
        }
    }
}
