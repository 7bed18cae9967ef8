//! Evidence chunks and source attribution

use serde::{Deserialize, Serialize};

/// Reference to the source document a chunk came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Stable identifier of the source document
    pub source_id: String,

    /// Document title, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document URL, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page number within the document, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SourceRef {
    /// Create a source reference with only an identifier
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            title: None,
            url: None,
            page: None,
        }
    }

    /// The URL with a page anchor appended when both are known.
    ///
    /// `https://example.com/doc.pdf` with page 3 resolves to
    /// `https://example.com/doc.pdf#page=3`.
    pub fn resolved_url(&self) -> Option<String> {
        let url = self.url.as_ref()?;
        match self.page {
            Some(page) => Some(format!("{}#page={}", url, page)),
            None => Some(url.clone()),
        }
    }
}

/// A chunk as it lives in the document store, before ranking.
///
/// Chunks without an embedding are skipped by the retriever; they exist when
/// ingestion stored text ahead of the embedding pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Owning tenant
    pub tenant_id: String,

    /// Chunk text
    pub text: String,

    /// Embedding vector, when the embedding pass has run
    pub embedding: Option<Vec<f32>>,

    /// Originating source record
    pub source: SourceRef,
}

/// A ranked unit of retrieved evidence.
///
/// `ordinal` is the 1-based position in the ranked list of one retrieval
/// call. Its rendering `chunk_N` is the only identifier claims may cite; it
/// is not stable across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceChunk {
    /// 1-based rank within this retrieval call
    pub ordinal: usize,

    /// Chunk text
    pub text: String,

    /// Embedding vector the similarity was computed against
    pub embedding: Vec<f32>,

    /// Cosine similarity to the query embedding
    pub similarity: f32,

    /// Resolved source attribution
    pub source: SourceRef,

    /// Owning tenant
    pub tenant_id: String,
}

impl EvidenceChunk {
    /// The citation key for this chunk (`chunk_1`, `chunk_2`, ...)
    pub fn ordinal_id(&self) -> String {
        format!("chunk_{}", self.ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_url_with_page_anchor() {
        let mut source = SourceRef::new("doc-1");
        source.url = Some("https://example.com/doc.pdf".to_string());
        source.page = Some(3);
        assert_eq!(
            source.resolved_url().unwrap(),
            "https://example.com/doc.pdf#page=3"
        );
    }

    #[test]
    fn test_resolved_url_without_page() {
        let mut source = SourceRef::new("doc-1");
        source.url = Some("https://example.com/doc.pdf".to_string());
        assert_eq!(
            source.resolved_url().unwrap(),
            "https://example.com/doc.pdf"
        );
    }

    #[test]
    fn test_resolved_url_without_url() {
        let mut source = SourceRef::new("doc-1");
        source.page = Some(9);
        assert_eq!(source.resolved_url(), None);
    }

    #[test]
    fn test_ordinal_id_is_one_based() {
        let chunk = EvidenceChunk {
            ordinal: 1,
            text: "text".to_string(),
            embedding: vec![0.0; 4],
            similarity: 0.9,
            source: SourceRef::new("doc-1"),
            tenant_id: "tenant-a".to_string(),
        };
        assert_eq!(chunk.ordinal_id(), "chunk_1");
    }
}
