/// Canned questions the user can copy into the draft.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "What is this document about?",
    "What are the main requirements?",
    "What are the key deliverables?",
    "What is the timeline mentioned?",
];

/// One retrieved passage backing an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExcerpt {
    pub content: String,
    /// Backend-provided metadata, kept as compact JSON text.
    pub metadata: Option<String>,
}

impl SourceExcerpt {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<SourceExcerpt>,
}

/// A successfully answered question, kept for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub document: String,
    pub question: String,
    pub answer: String,
    pub source_count: usize,
    pub elapsed_ms: u64,
    pub received_utc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct QaConversation {
    draft: String,
    answer: Option<AnswerResult>,
    in_flight: Option<String>,
    history: Vec<HistoryEntry>,
}

impl QaConversation {
    pub(crate) fn edit(&mut self, text: String) {
        self.draft = text;
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    /// The draft with surrounding whitespace removed, or `None` if it is blank.
    pub(crate) fn question(&self) -> Option<&str> {
        let trimmed = self.draft.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub(crate) fn answer(&self) -> Option<&AnswerResult> {
        self.answer.as_ref()
    }

    pub(crate) fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Resets the answer and draft. Returns whether anything changed.
    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.answer.is_some() || !self.draft.is_empty();
        self.answer = None;
        self.draft.clear();
        changed
    }

    pub(crate) fn discard_answer(&mut self) {
        self.answer = None;
    }

    pub(crate) fn clear_history(&mut self) -> bool {
        let changed = !self.history.is_empty();
        self.history.clear();
        changed
    }

    pub(crate) fn begin(&mut self, question: String) {
        self.in_flight = Some(question);
    }

    pub(crate) fn abandon(&mut self) {
        self.in_flight = None;
    }

    pub(crate) fn record_answer(
        &mut self,
        document: &str,
        answer: AnswerResult,
        elapsed_ms: u64,
        received_utc: String,
    ) {
        let question = self.in_flight.take().unwrap_or_default();
        self.history.push(HistoryEntry {
            document: document.to_string(),
            question,
            answer: answer.answer.clone(),
            source_count: answer.sources.len(),
            elapsed_ms,
            received_utc,
        });
        self.answer = Some(answer);
    }
}
