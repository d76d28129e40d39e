use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use std::sync::Arc;
use tracing::info;

pub struct ManageIndexUseCase {
    store: Arc<dyn VectorStore>,
}

impl ManageIndexUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Deletes the index if present. Returns whether anything was deleted.
    pub async fn delete(&self, index_name: &str) -> Result<bool, DomainError> {
        if !self.store.has_index(index_name).await? {
            info!(index = index_name, "Index does not exist, nothing to delete");
            return Ok(false);
        }
        info!(index = index_name, "Deleting index");
        self.store.delete_index(index_name).await?;
        info!(index = index_name, "Index deleted");
        Ok(true)
    }

    pub async fn list(&self) -> Result<Vec<String>, DomainError> {
        let mut names = self.store.list_indexes().await?;
        names.sort();
        Ok(names)
    }
}
