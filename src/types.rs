//! Core types: messages, uploads, processing summaries, and the error
//! taxonomy shared across the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// A single entry in a session's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message timestamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message timestamped now.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

// ============= Upload Types =============

/// An uploaded document: raw bytes plus a display name.
///
/// Inputs only; not retained after text extraction.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub name: String,
    pub data: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Declared byte size of the upload.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

// ============= Processing Types =============

/// Outcome of a successful document-processing action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSummary {
    /// Number of documents in the accepted batch.
    pub documents: usize,
    /// Number of chunks indexed.
    pub chunks: usize,
    /// Documents that could not be parsed and were skipped.
    pub skipped_documents: usize,
    /// Pages that yielded no extractable text or failed extraction.
    pub skipped_pages: usize,
}

// ============= Error Types =============

/// Errors surfaced by the RAG pipeline.
///
/// Each variant maps to a distinct user-facing advisory via
/// [`RagError::advisory`]; the pipeline boundaries append that advisory
/// to the conversation log before propagating the error.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// No documents were supplied to the Process action.
    #[error("no documents supplied")]
    NoDocuments,

    /// Extraction produced no text across the whole batch.
    #[error("no extractable text found in the supplied documents")]
    NoExtractableText,

    /// Chunking produced zero chunks.
    #[error("chunking produced no chunks")]
    NoChunks,

    /// One or more files exceed the per-file size limit.
    #[error("files exceed the {limit_bytes} byte limit: {}", .names.join(", "))]
    OversizedFiles {
        limit_bytes: u64,
        names: Vec<String>,
    },

    /// The embedding service call failed.
    #[error("embedding service error: {0}")]
    Embedding(String),

    /// The completion service call failed.
    #[error("completion service error: {0}")]
    Completion(String),

    /// Vector index construction or search failed.
    #[error("vector index error: {0}")]
    Index(#[from] tome_vector::Error),

    /// Configuration problem (missing or malformed environment).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RagError {
    /// The user-facing advisory text for this error.
    pub fn advisory(&self) -> String {
        match self {
            RagError::NoDocuments => "Please upload at least one PDF file.".to_string(),
            RagError::NoExtractableText => {
                "No readable text found in the PDFs. Please check that they are text-based, \
                 not scanned images."
                    .to_string()
            }
            RagError::NoChunks => {
                "Could not create text chunks. The documents might be empty.".to_string()
            }
            RagError::OversizedFiles { limit_bytes, names } => format!(
                "Files too large (max {}): {}. Try splitting large PDFs or using smaller files.",
                format_size(*limit_bytes),
                names.join(", ")
            ),
            RagError::Embedding(_)
            | RagError::Completion(_)
            | RagError::Index(_)
            | RagError::Configuration(_) => format!("Error: {}", self),
        }
    }
}

/// Render a byte count with the largest unit that keeps it non-zero.
fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;
    if bytes >= MIB {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, RagError>;
