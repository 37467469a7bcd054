//! # Tome - PDF Retrieval-Augmented Chat
//!
//! A retrieval-augmented chat library for PDF collections: extract text,
//! chunk it, embed the chunks with OpenAI, index them for nearest-neighbor
//! search, and answer questions grounded in the retrieved passages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tome::{Config, DocumentUpload, RagPipeline, Session};
//!
//! #[tokio::main]
//! async fn main() -> tome::Result<()> {
//!     let pipeline = RagPipeline::from_config(Config::from_env()?);
//!     let session = Session::new();
//!
//!     let upload = DocumentUpload::new("manual.pdf", std::fs::read("manual.pdf")?);
//!     let summary = pipeline.process_documents(&session, vec![upload]).await?;
//!     println!("indexed {} chunks", summary.chunks);
//!
//!     let answer = pipeline.ask(&session, "What does chapter 2 cover?").await?;
//!     println!("{:?}", answer);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`] - The two boundary operations: process documents, ask
//! - [`session`] - Conversation log and atomically published corpus
//! - [`extract`] - Per-page PDF text extraction
//! - [`chunker`] - Paragraph-accumulating text chunker
//! - [`embeddings`] - Batched OpenAI embedding client
//! - [`retriever`] - Nearest-neighbor retrieval and context formatting
//! - [`llm`] - Chat-completion client
//! - [`config`] - Environment-driven configuration
//! - [`types`] - Messages, uploads, summaries, and the error taxonomy

/// Paragraph-accumulating text chunker.
pub mod chunker;
/// Environment-driven configuration.
pub mod config;
/// Embedding service trait and OpenAI implementation.
pub mod embeddings;
/// PDF text extraction.
pub mod extract;
/// Chat-completion service trait and OpenAI implementation.
pub mod llm;
/// Document processing and question answering boundaries.
pub mod pipeline;
/// Query-time retrieval and context formatting.
pub mod retriever;
mod retry;
/// Conversation state and corpus publication.
pub mod session;
/// Common types and error handling.
pub mod types;

// Re-export commonly used types
pub use chunker::TextChunker;
pub use config::{Config, RetryConfig};
pub use embeddings::{Embedder, OpenAiEmbedder};
pub use llm::{CompletionClient, OpenAiCompletion};
pub use pipeline::{Answer, RagPipeline};
pub use session::{Corpus, Session, SessionState, GREETING};
pub use types::{
    DocumentUpload, Message, MessageRole, ProcessSummary, RagError, Result,
};
