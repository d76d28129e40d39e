//! JSON bodies exchanged with the Pinecone REST API.

use crate::domain::entities::vector_record::{ScoredMatch, VectorRecord};
use crate::domain::values::metric::Metric;
use crate::domain::values::serverless::ServerlessSpec;
use crate::domain::values::vector_type::VectorType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateIndexRequest<'a> {
    pub name: &'a str,
    pub dimension: usize,
    pub metric: Metric,
    pub vector_type: VectorType,
    pub spec: IndexPlacement<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IndexPlacement<'a> {
    pub serverless: &'a ServerlessSpec,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndexList {
    #[serde(default)]
    pub indexes: Vec<IndexModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexModel {
    pub name: String,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub metric: Option<Metric>,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub status: IndexStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertRequest<'a> {
    pub vectors: &'a [VectorRecord],
    pub namespace: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpsertResponse {
    #[serde(default)]
    pub upserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub namespace: &'a str,
    pub include_metadata: bool,
    pub include_values: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<ScoredMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_shape() {
        let serverless = ServerlessSpec::default();
        let body = serde_json::to_value(CreateIndexRequest {
            name: "docs",
            dimension: 1536,
            metric: Metric::Cosine,
            vector_type: VectorType::Dense,
            spec: IndexPlacement {
                serverless: &serverless,
            },
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "name": "docs",
                "dimension": 1536,
                "metric": "cosine",
                "vector_type": "dense",
                "spec": { "serverless": { "cloud": "aws", "region": "us-east-1" } }
            })
        );
    }

    #[test]
    fn test_query_request_uses_camel_case() {
        let body = serde_json::to_value(QueryRequest {
            vector: &[0.5],
            top_k: 3,
            namespace: "",
            include_metadata: true,
            include_values: false,
        })
        .unwrap();
        assert_eq!(body["topK"], 3);
        assert_eq!(body["includeMetadata"], true);
    }

    #[test]
    fn test_query_response_tolerates_missing_metadata() {
        let resp: QueryResponse = serde_json::from_value(json!({
            "matches": [
                { "id": "1", "score": 0.8, "values": [] },
                { "id": "0", "score": 0.5, "metadata": { "chunk_text": "hello" } }
            ],
            "namespace": ""
        }))
        .unwrap();
        assert_eq!(resp.matches.len(), 2);
        assert_eq!(resp.matches[0].chunk_text(), None);
        assert_eq!(resp.matches[1].chunk_text(), Some("hello"));
    }

    #[test]
    fn test_index_model_status() {
        let model: IndexModel = serde_json::from_value(json!({
            "name": "docs",
            "dimension": 1536,
            "metric": "cosine",
            "host": "docs-abc.svc.pinecone.io",
            "status": { "ready": false, "state": "Initializing" }
        }))
        .unwrap();
        assert!(!model.status.ready);
        assert_eq!(model.metric, Some(Metric::Cosine));
    }
}
