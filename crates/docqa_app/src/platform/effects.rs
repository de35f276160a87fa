use std::sync::mpsc;
use std::thread;

use docqa_core::{AnswerResult, Effect, Msg, RequestFailure, SourceExcerpt, UploadReceipt};
use docqa_engine::{
    BackendError, EngineConfig, EngineError, EngineEvent, EngineHandle, FailureKind,
    LocalDocument, SourceDocument,
};
use docqa_logging::{docqa_debug, docqa_info, docqa_warn};

use super::app::LoopEvent;

/// Executes core effects against the engine and feeds settlements back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    events: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, events: mpsc::Sender<LoopEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config)?;
        let runner = Self { engine, events };
        runner.spawn_event_loop();
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload { document } => {
                    docqa_info!(
                        "Upload filename={} bytes={} media_type={}",
                        document.name,
                        document.bytes.len(),
                        document.media_type
                    );
                    self.engine.upload(LocalDocument {
                        filename: document.name,
                        bytes: document.bytes,
                        media_type: document.media_type,
                    });
                }
                Effect::Ask { question } => {
                    docqa_info!("Ask question_len={}", question.len());
                    self.engine.ask(question);
                }
                Effect::CheckBackend => {
                    docqa_debug!("CheckBackend");
                    self.engine.check_health();
                }
                Effect::ScheduleDismiss { id, after } => {
                    let events = self.events.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = events.send(LoopEvent::Dispatch(Msg::NotificationExpired { id }));
                    });
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let events = self.events.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if events.send(LoopEvent::Dispatch(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { result } => Msg::UploadFinished(
            result
                .map(|response| UploadReceipt {
                    filename: response.filename,
                    message: response.message,
                    document_chunks: response.document_chunks,
                })
                .map_err(map_failure),
        ),
        EngineEvent::AnswerCompleted {
            result,
            elapsed,
            received_utc,
        } => Msg::AnswerFinished {
            result: result
                .map(|response| AnswerResult {
                    answer: response.answer,
                    sources: response
                        .source_documents
                        .into_iter()
                        .map(map_source)
                        .collect(),
                })
                .map_err(map_failure),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            received_utc,
        },
        EngineEvent::HealthChecked { result } => Msg::BackendChecked(
            result
                .map(|status| status.message)
                .map_err(map_failure),
        ),
    }
}

fn map_source(source: SourceDocument) -> SourceExcerpt {
    SourceExcerpt {
        content: source.content,
        metadata: source
            .metadata
            .filter(|metadata| !metadata.is_null())
            .map(|metadata| metadata.to_string()),
    }
}

fn map_failure(err: BackendError) -> RequestFailure {
    match err.kind {
        FailureKind::Rejected { status } => RequestFailure::backend(status, err.message),
        kind => {
            docqa_warn!("Transport failure ({}): {}", kind, err.message);
            RequestFailure::transport(err.message)
        }
    }
}
