use docqa_core::{Activity, AppViewModel, BackendStatus, HistoryEntry, Severity, UploadOutcome};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("{:-^65}", " DocQA ")];

    lines.push(format!("Backend : {}", backend_label(&view.backend)));
    lines.push(format!("Status  : {}", activity_label(view.activity)));
    lines.push(match &view.document {
        Some(document) => format!(
            "Document: {} ({}, {} bytes)",
            document.name,
            document.media_type,
            format_with_commas(document.size_bytes)
        ),
        None => "Document: none, use `open <path>`".to_string(),
    });
    lines.push(format!("Upload  : {}", upload_label(view)));
    if view.document_ready {
        lines.push("          Document ready for questions!".to_string());
    }
    lines.push(format!("Question: {:?}", view.question));
    lines.push(format!(
        "Actions : upload {} | ask {}",
        enabled_label(view.can_upload),
        enabled_label(view.can_ask)
    ));

    if let Some(answer) = &view.answer {
        lines.push(String::new());
        lines.push("Answer:".to_string());
        lines.extend(answer.answer.lines().map(|line| format!("  {line}")));
        if !answer.sources.is_empty() {
            lines.push(format!("Source references ({}):", answer.sources.len()));
            for (index, source) in answer.sources.iter().enumerate() {
                lines.push(format!("  Chunk {}: {}", index + 1, single_line(&source.content)));
                if let Some(metadata) = &source.metadata {
                    lines.push(format!("           {metadata}"));
                }
            }
        }
    }

    if let Some(notification) = &view.notification {
        lines.push(String::new());
        lines.push(format!(
            "[{}] {}",
            severity_label(notification.severity),
            notification.message
        ));
    }

    lines
}

/// Answered questions, most recent first.
pub fn history_lines(history: &[HistoryEntry]) -> Vec<String> {
    if history.is_empty() {
        return vec!["No questions answered yet.".to_string()];
    }

    let total = history.len();
    let mut lines = Vec::with_capacity(total * 3);
    for (offset, entry) in history.iter().rev().enumerate() {
        lines.push(format!("Q{}: {}", total - offset, single_line(&entry.question)));
        lines.push(format!("    {}", single_line(&entry.answer)));
        lines.push(format!(
            "    {} | {} | {:.2}s | {} source(s)",
            entry.document,
            entry.received_utc,
            entry.elapsed_ms as f64 / 1000.0,
            entry.source_count
        ));
    }
    lines
}

fn backend_label(status: &BackendStatus) -> String {
    match status {
        BackendStatus::Unknown => "not checked, use `status`".to_string(),
        BackendStatus::Connected { message } if message.is_empty() => "connected".to_string(),
        BackendStatus::Connected { message } => format!("connected ({message})"),
        BackendStatus::Unreachable { reason } => format!("not reachable ({reason})"),
    }
}

fn activity_label(activity: Activity) -> &'static str {
    match activity {
        Activity::Idle => "Idle",
        Activity::Uploading => "Processing...",
        Activity::Asking => "Thinking...",
        Activity::CheckingBackend => "Checking backend...",
    }
}

fn upload_label(view: &AppViewModel) -> String {
    match &view.upload_outcome {
        UploadOutcome::NotAttempted => "not uploaded".to_string(),
        UploadOutcome::Failed { reason } => format!("failed ({reason})"),
        UploadOutcome::Succeeded { filename } => {
            match view.upload_receipt.as_ref().and_then(|r| r.document_chunks) {
                Some(chunks) => format!("processed as {filename} ({chunks} chunks)"),
                None => format!("processed as {filename}"),
            }
        }
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "[on]"
    } else {
        "[off]"
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "INFO",
        Severity::Success => "OK",
        Severity::Warning => "WARN",
        Severity::Error => "ERROR",
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
