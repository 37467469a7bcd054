//! Pipeline boundaries: document processing and question answering.
//!
//! These two operations are the only entry points a frontend needs. Both
//! mirror their outcome into the session's conversation log, so the log
//! alone tells the full story of what happened.

use std::sync::Arc;

use tracing::{error, info};

use crate::chunker::TextChunker;
use crate::config::Config;
use crate::embeddings::{Embedder, OpenAiEmbedder};
use crate::extract;
use crate::llm::{CompletionClient, OpenAiCompletion};
use crate::retriever;
use crate::session::{Corpus, Session};
use crate::types::{DocumentUpload, Message, ProcessSummary, RagError, Result};
use tome_vector::FlatIndex;

const SYSTEM_PROMPT: &str = "\
You are an expert AI assistant. ALWAYS reply in clean, well-structured **Markdown**, using:

- Clear section headings (##)
- Bullet points
- Numbered lists when explaining steps
- Bold for key concepts
- Code blocks when showing examples
- Tables when helpful
- Short paragraphs (2-3 sentences max)

NEVER produce long unformatted paragraphs.
NEVER mix everything into one block.

Your answers **must follow this structure**:

## Direct Answer
(A short, clear answer in 2-3 sentences.)

## Detailed Explanation
(Concepts broken into subsections with bullets.)

## Examples
(Add relevant examples or code.)

## Source References
(List the context sources used: [Source 1], [Source 2], ...)

If context does not contain enough info, clearly say:
\"Not enough information in the provided PDF context.\"";

/// Outcome of [`RagPipeline::ask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// No corpus is published yet; no service call was made.
    NotReady,
    /// Retrieval found nothing relevant to the question.
    NoContext,
    /// A grounded answer was generated.
    Answered(String),
}

/// The document-chat pipeline: ingestion on one side, retrieval-augmented
/// answering on the other.
pub struct RagPipeline {
    config: Config,
    embedder: Arc<dyn Embedder>,
    completion: Arc<dyn CompletionClient>,
}

impl RagPipeline {
    /// Build a pipeline backed by the OpenAI embedding and chat services.
    pub fn from_config(config: Config) -> Self {
        let embedder = Arc::new(OpenAiEmbedder::new(&config.openai, config.retry.clone()));
        let completion = Arc::new(OpenAiCompletion::new(&config.openai, config.retry.clone()));
        Self {
            config,
            embedder,
            completion,
        }
    }

    /// Build a pipeline with injected service clients. Used by tests and
    /// by callers wiring alternative backends.
    pub fn new(
        config: Config,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            embedder,
            completion,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingest a batch of uploads into the session's corpus.
    ///
    /// Runs the full chain: validation, text extraction, chunking,
    /// embedding, index construction, and a single atomic corpus swap.
    /// On any failure the session keeps its previous corpus untouched and
    /// the failure's advisory is appended to the conversation log.
    pub async fn process_documents(
        &self,
        session: &Session,
        documents: Vec<DocumentUpload>,
    ) -> Result<ProcessSummary> {
        match self.process_inner(session, documents).await {
            Ok(summary) => {
                session.push_message(Message::assistant(format!(
                    "Processed {} file(s) into {} chunks.",
                    summary.documents, summary.chunks
                )));
                info!(
                    session = %session.id(),
                    documents = summary.documents,
                    chunks = summary.chunks,
                    skipped_documents = summary.skipped_documents,
                    skipped_pages = summary.skipped_pages,
                    "Document processing complete"
                );
                Ok(summary)
            }
            Err(err) => {
                error!(session = %session.id(), error = %err, "Document processing failed");
                session.push_message(Message::assistant(err.advisory()));
                Err(err)
            }
        }
    }

    async fn process_inner(
        &self,
        session: &Session,
        documents: Vec<DocumentUpload>,
    ) -> Result<ProcessSummary> {
        if documents.is_empty() {
            return Err(RagError::NoDocuments);
        }

        let limit = self.config.limits.max_file_bytes;
        let oversized: Vec<String> = documents
            .iter()
            .filter(|doc| doc.size() > limit)
            .map(|doc| doc.name.clone())
            .collect();
        if !oversized.is_empty() {
            // One oversized file rejects the whole batch
            return Err(RagError::OversizedFiles {
                limit_bytes: limit,
                names: oversized,
            });
        }

        let extraction = extract::extract_text(&documents);
        if extraction.text.trim().is_empty() {
            return Err(RagError::NoExtractableText);
        }

        let chunker = TextChunker::new(self.config.chunking.max_chunk_size);
        let chunks = chunker.chunk(&extraction.text);
        if chunks.is_empty() {
            return Err(RagError::NoChunks);
        }

        let vectors = self.embedder.embed(&chunks).await?;
        let index = FlatIndex::build(vectors)?;

        let summary = ProcessSummary {
            documents: documents.len(),
            chunks: chunks.len(),
            skipped_documents: extraction.skipped_documents,
            skipped_pages: extraction.skipped_pages,
        };

        session.publish_corpus(Corpus { chunks, index });
        Ok(summary)
    }

    /// Answer a question against the session's published corpus.
    ///
    /// The question always lands in the conversation log first. A session
    /// with no corpus gets an advisory without any service call being made.
    pub async fn ask(&self, session: &Session, question: &str) -> Result<Answer> {
        session.push_message(Message::user(question));

        let Some(corpus) = session.corpus_snapshot() else {
            session.push_message(Message::assistant("Please process PDFs first."));
            return Ok(Answer::NotReady);
        };

        match self.answer_inner(&corpus, question).await {
            Ok(None) => {
                session.push_message(Message::assistant("No relevant information found."));
                Ok(Answer::NoContext)
            }
            Ok(Some(text)) => {
                session.push_message(Message::assistant(text.clone()));
                Ok(Answer::Answered(text))
            }
            Err(err) => {
                error!(session = %session.id(), error = %err, "Question answering failed");
                session.push_message(Message::assistant(err.advisory()));
                Err(err)
            }
        }
    }

    /// `None` means retrieval matched nothing; that is a normal outcome,
    /// not an error.
    async fn answer_inner(&self, corpus: &Corpus, question: &str) -> Result<Option<String>> {
        let retrieved = retriever::retrieve(
            self.embedder.as_ref(),
            &corpus.index,
            &corpus.chunks,
            question,
            self.config.retrieval.top_k,
        )
        .await?;

        if retrieved.is_empty() {
            return Ok(None);
        }

        let context = retriever::format_context(&retrieved, self.config.retrieval.snippet_budget);
        let prompt = format!(
            "CONTEXT:\n{}\n\nQUESTION:\n{}\n\nGenerate a clean, structured answer using the \
             required markdown format.",
            context, question
        );

        let answer = self
            .completion
            .generate_with_system(SYSTEM_PROMPT, &prompt)
            .await?;

        info!(
            sources = retrieved.len(),
            answer_len = answer.len(),
            "Generated grounded answer"
        );
        Ok(Some(answer))
    }
}
