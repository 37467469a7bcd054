//! Per-user conversation state.
//!
//! A [`Session`] owns two things: the append-only message log and the
//! currently published corpus (chunk sequence plus vector index). The
//! corpus is replaced atomically as one unit — readers always observe a
//! matched (chunks, index) pair, never a half-updated one.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tome_vector::FlatIndex;
use uuid::Uuid;

use crate::types::Message;

/// Greeting seeded into every fresh or cleared message log.
pub const GREETING: &str = "Hi! Upload a PDF to begin chatting.";

/// An indexed document corpus: the chunk texts and the vector index built
/// over them, in lockstep (vector i embeds chunk i).
#[derive(Debug)]
pub struct Corpus {
    pub chunks: Vec<String>,
    pub index: FlatIndex,
}

/// Pipeline-availability state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No corpus yet; queries get a "process documents first" advisory.
    Empty,
    /// A corpus is published; queries run the retrieval pipeline.
    Ready,
}

/// One user's conversation and document state.
///
/// Lives only in memory for the duration of the process; never persisted.
pub struct Session {
    id: Uuid,
    messages: Mutex<Vec<Message>>,
    corpus: ArcSwapOption<Corpus>,
}

impl Session {
    /// Create a session with a seeded greeting and no corpus.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Mutex::new(vec![Message::assistant(GREETING)]),
            corpus: ArcSwapOption::const_empty(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append a message to the log.
    pub fn push_message(&self, message: Message) {
        self.messages.lock().push(message);
    }

    /// Snapshot of the full message log, in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Reset the message log to the seeded greeting.
    ///
    /// The corpus is deliberately retained: clearing the chat does not
    /// force the user to re-upload documents.
    pub fn clear_chat(&self) {
        let mut messages = self.messages.lock();
        messages.clear();
        messages.push(Message::assistant(GREETING));
    }

    /// Publish a freshly built corpus, replacing any previous one as a
    /// single atomic swap. In-flight readers keep their old snapshot.
    pub fn publish_corpus(&self, corpus: Corpus) {
        self.corpus.store(Some(Arc::new(corpus)));
    }

    /// Take a consistent snapshot of the current corpus, if any.
    pub fn corpus_snapshot(&self) -> Option<Arc<Corpus>> {
        self.corpus.load_full()
    }

    pub fn state(&self) -> SessionState {
        if self.corpus.load().is_some() {
            SessionState::Ready
        } else {
            SessionState::Empty
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
