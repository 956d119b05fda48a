use async_trait::async_trait;

use crate::domain::errors::DocumentError;

/// Source of planning documents, addressed by an opaque identifier.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn document_text(&self, id: &str) -> Result<String, DocumentError>;
}
