#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl SelectedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            media_type: media_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadOutcome {
    #[default]
    NotAttempted,
    Succeeded { filename: String },
    Failed { reason: String },
}

impl UploadOutcome {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded { .. })
    }
}

/// What the backend reported back for a processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub filename: String,
    pub message: Option<String>,
    pub document_chunks: Option<u64>,
}

impl UploadReceipt {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            message: None,
            document_chunks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadSession {
    document: Option<SelectedDocument>,
    outcome: UploadOutcome,
    receipt: Option<UploadReceipt>,
}

impl UploadSession {
    /// Replaces the selection and forgets everything learned about the old one.
    pub(crate) fn select(&mut self, document: Option<SelectedDocument>) {
        self.document = document;
        self.outcome = UploadOutcome::NotAttempted;
        self.receipt = None;
    }

    pub(crate) fn document(&self) -> Option<&SelectedDocument> {
        self.document.as_ref()
    }

    pub(crate) fn outcome(&self) -> &UploadOutcome {
        &self.outcome
    }

    pub(crate) fn receipt(&self) -> Option<&UploadReceipt> {
        self.receipt.as_ref()
    }

    /// Remote filename of the processed document, if the last upload succeeded.
    pub(crate) fn remote_filename(&self) -> Option<&str> {
        match &self.outcome {
            UploadOutcome::Succeeded { filename } => Some(filename),
            _ => None,
        }
    }

    pub(crate) fn record_success(&mut self, receipt: UploadReceipt) {
        self.outcome = UploadOutcome::Succeeded {
            filename: receipt.filename.clone(),
        };
        self.receipt = Some(receipt);
    }

    pub(crate) fn record_failure(&mut self, reason: impl Into<String>) {
        self.outcome = UploadOutcome::Failed {
            reason: reason.into(),
        };
        self.receipt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_resets_outcome() {
        let mut session = UploadSession::default();
        session.select(Some(SelectedDocument::new("a.txt", b"a".to_vec(), "text/plain")));
        session.record_success(UploadReceipt::new("a.txt"));
        assert_eq!(session.remote_filename(), Some("a.txt"));

        session.select(Some(SelectedDocument::new("b.txt", b"b".to_vec(), "text/plain")));
        assert_eq!(session.outcome(), &UploadOutcome::NotAttempted);
        assert!(session.receipt().is_none());
    }
}
