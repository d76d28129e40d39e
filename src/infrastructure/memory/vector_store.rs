//! In-process vector store with exact (brute-force) similarity search.
//!
//! Mirrors the remote service's contract closely enough to substitute for it
//! in tests and offline runs: indexes are named, records are upserted per
//! namespace, and queries rank every stored vector by the index metric.

use crate::domain::entities::vector_record::{ScoredMatch, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{IndexHandle, VectorStore};
use crate::domain::values::index_spec::IndexSpec;
use crate::domain::values::metric::Metric;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

type Namespaces = HashMap<String, BTreeMap<String, VectorRecord>>;

#[derive(Default)]
pub struct MemoryStore {
    indexes: Mutex<HashMap<String, Arc<MemoryIndex>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryIndex {
    spec: IndexSpec,
    namespaces: Mutex<Namespaces>,
}

impl MemoryIndex {
    fn new(spec: IndexSpec) -> Self {
        Self {
            spec,
            namespaces: Mutex::new(HashMap::new()),
        }
    }

    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// Number of records stored in `namespace`.
    pub fn len(&self, namespace: &str) -> usize {
        self.namespaces
            .lock()
            .map(|ns| ns.get(namespace).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, namespace: &str) -> bool {
        self.len(namespace) == 0
    }

    /// Stored record by id, if any.
    pub fn fetch(&self, id: &str, namespace: &str) -> Option<VectorRecord> {
        self.namespaces
            .lock()
            .ok()?
            .get(namespace)
            .and_then(|records| records.get(id).cloned())
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 { 0.0 } else { dot / denom }
    }

    fn dot_product(a: &[f32], b: &[f32]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum()
    }

    fn squared_distance(a: &[f32], b: &[f32]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = *x as f64 - *y as f64;
                d * d
            })
            .sum()
    }

    fn score(&self, query: &[f32], stored: &[f32]) -> f64 {
        match self.spec.metric {
            Metric::Cosine => Self::cosine_similarity(query, stored),
            Metric::DotProduct => Self::dot_product(query, stored),
            Metric::Euclidean => Self::squared_distance(query, stored),
        }
    }

    fn check_dimension(&self, len: usize) -> Result<(), DomainError> {
        if len != self.spec.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.spec.dimension,
                actual: len,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IndexHandle for MemoryIndex {
    async fn upsert(
        &self,
        records: &[VectorRecord],
        namespace: &str,
    ) -> Result<usize, DomainError> {
        for record in records {
            self.check_dimension(record.values.len())?;
        }
        let mut namespaces = self
            .namespaces
            .lock()
            .map_err(|e| DomainError::VectorStore(e.to_string()))?;
        let target = namespaces.entry(namespace.to_string()).or_default();
        for record in records {
            target.insert(record.id.clone(), record.clone());
        }
        Ok(records.len())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: &str,
        include_metadata: bool,
    ) -> Result<Vec<ScoredMatch>, DomainError> {
        self.check_dimension(vector.len())?;
        let namespaces = self
            .namespaces
            .lock()
            .map_err(|e| DomainError::VectorStore(e.to_string()))?;
        let Some(records) = namespaces.get(namespace) else {
            return Ok(vec![]);
        };

        let mut scored: Vec<(f64, &VectorRecord)> = records
            .values()
            .map(|r| (self.score(vector, &r.values), r))
            .collect();

        // Distance ranks ascending, similarity descending.
        match self.spec.metric {
            Metric::Euclidean => {
                scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            }
            _ => scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal)),
        }
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(score, r)| ScoredMatch {
                id: r.id.clone(),
                score: score as f32,
                metadata: include_metadata.then(|| r.metadata.clone()),
            })
            .collect())
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn list_indexes(&self) -> Result<Vec<String>, DomainError> {
        let indexes = self.indexes.lock().map_err(|e| DomainError::VectorStore(e.to_string()))?;
        Ok(indexes.keys().cloned().collect())
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError> {
        let mut indexes = self.indexes.lock().map_err(|e| DomainError::VectorStore(e.to_string()))?;
        if indexes.contains_key(&spec.name) {
            return Err(DomainError::VectorStore(format!("Index '{}' already exists", spec.name)));
        }
        indexes.insert(spec.name.clone(), Arc::new(MemoryIndex::new(spec.clone())));
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> Result<(), DomainError> {
        let mut indexes = self.indexes.lock().map_err(|e| DomainError::VectorStore(e.to_string()))?;
        indexes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Index '{name}'")))
    }

    async fn index(&self, name: &str) -> Result<Arc<dyn IndexHandle>, DomainError> {
        self.memory_index(name).map(|i| i as Arc<dyn IndexHandle>)
    }
}

impl MemoryStore {
    /// Concrete handle, for inspecting stored records.
    pub fn memory_index(&self, name: &str) -> Result<Arc<MemoryIndex>, DomainError> {
        let indexes = self.indexes.lock().map_err(|e| DomainError::VectorStore(e.to_string()))?;
        indexes
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Index '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::serverless::ServerlessSpec;

    fn spec(name: &str, dimension: usize, metric: Metric) -> IndexSpec {
        IndexSpec {
            dimension,
            metric,
            ..IndexSpec::dense_cosine(name, ServerlessSpec::default())
        }
    }

    fn record(id: &str, values: Vec<f32>) -> VectorRecord {
        VectorRecord {
            id: id.into(),
            values,
            metadata: Default::default(),
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((MemoryIndex::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(MemoryIndex::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert_eq!(MemoryIndex::cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(MemoryIndex::cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_id() {
        let store = MemoryStore::new();
        store.create_index(&spec("idx", 2, Metric::Cosine)).await.unwrap();
        let index = store.memory_index("idx").unwrap();

        index.upsert(&[record("0", vec![1.0, 0.0])], "").await.unwrap();
        index.upsert(&[record("0", vec![0.0, 1.0])], "").await.unwrap();

        assert_eq!(index.len(""), 1);
        assert_eq!(index.fetch("0", "").unwrap().values, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = MemoryStore::new();
        store.create_index(&spec("idx", 2, Metric::Cosine)).await.unwrap();
        let index = store.index("idx").await.unwrap();

        index.upsert(&[record("0", vec![1.0, 0.0])], "a").await.unwrap();
        assert_eq!(index.query(&[1.0, 0.0], 5, "a", true).await.unwrap().len(), 1);
        assert!(index.query(&[1.0, 0.0], 5, "b", true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_euclidean_ranks_nearest_first() {
        let store = MemoryStore::new();
        store.create_index(&spec("idx", 2, Metric::Euclidean)).await.unwrap();
        let index = store.index("idx").await.unwrap();
        index
            .upsert(&[record("far", vec![10.0, 10.0]), record("near", vec![1.0, 1.0])], "")
            .await
            .unwrap();

        let matches = index.query(&[0.0, 0.0], 2, "", false).await.unwrap();
        assert_eq!(matches[0].id, "near");
        assert!(matches[0].metadata.is_none());
    }

    #[tokio::test]
    async fn test_rejects_wrong_dimension() {
        let store = MemoryStore::new();
        store.create_index(&spec("idx", 3, Metric::Cosine)).await.unwrap();
        let index = store.index("idx").await.unwrap();
        let err = index.upsert(&[record("0", vec![1.0])], "").await.unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch { expected: 3, actual: 1 }));
    }

    #[tokio::test]
    async fn test_duplicate_create_and_missing_delete() {
        let store = MemoryStore::new();
        store.create_index(&spec("idx", 2, Metric::Cosine)).await.unwrap();
        assert!(store.create_index(&spec("idx", 2, Metric::Cosine)).await.is_err());
        store.delete_index("idx").await.unwrap();
        assert!(matches!(store.delete_index("idx").await, Err(DomainError::NotFound(_))));
        assert!(matches!(store.index("idx").await, Err(DomainError::NotFound(_))));
    }
}
