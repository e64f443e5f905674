use crate::errors::LogsiftResult;

/// Source of the raw documents used for lexical retrieval.
pub trait CorpusProvider: Send + Sync {
    /// All documents, in a stable order. Sparse hits refer to positions in this list.
    fn list_documents(&self) -> LogsiftResult<Vec<String>>;
}
