use crate::domain::entities::chunk::Chunk;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding the original chunk text.
pub const CHUNK_TEXT_KEY: &str = "chunk_text";

pub type Metadata = Map<String, Value>;

/// The unit persisted to a vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Metadata,
}

impl VectorRecord {
    pub fn from_chunk(chunk: &Chunk, values: Vec<f32>) -> Self {
        let mut metadata = Map::new();
        metadata.insert(CHUNK_TEXT_KEY.to_string(), Value::String(chunk.text.clone()));
        Self {
            id: chunk.id.clone(),
            values,
            metadata,
        }
    }

    pub fn chunk_text(&self) -> Option<&str> {
        self.metadata.get(CHUNK_TEXT_KEY).and_then(Value::as_str)
    }
}

/// One hit from a similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl ScoredMatch {
    pub fn chunk_text(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(CHUNK_TEXT_KEY))
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_carries_chunk_text() {
        let chunk = Chunk::new(2, "dogs are great");
        let record = VectorRecord::from_chunk(&chunk, vec![0.1, 0.2]);
        assert_eq!(record.id, "2");
        assert_eq!(record.chunk_text(), Some("dogs are great"));
    }

    #[test]
    fn test_match_without_metadata() {
        let m = ScoredMatch {
            id: "0".into(),
            score: 0.9,
            metadata: None,
        };
        assert_eq!(m.chunk_text(), None);
    }
}
