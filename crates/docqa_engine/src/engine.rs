use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use docqa_logging::{docqa_debug, docqa_warn};
use thiserror::Error;

use crate::client::{BackendSettings, RagBackend, ReqwestBackend};
use crate::{BackendError, EngineEvent, LocalDocument};

/// Produces the timestamp stamped on each answer.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub settings: BackendSettings,
    pub received_utc: Clock,
}

impl EngineConfig {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            settings,
            received_utc: Arc::new(String::new),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid backend configuration: {0}")]
    Backend(#[from] BackendError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Upload { document: LocalDocument },
    Ask { question: String },
    CheckHealth,
}

/// Handle to the background thread that talks to the backend.
///
/// Commands are fire-and-forget; every command produces exactly one
/// [`EngineEvent`] once its request settles.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(config.settings)?;
        Self::with_backend(Arc::new(backend), config.received_utc)
    }

    pub fn with_backend(backend: Arc<dyn RagBackend>, clock: Clock) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("docqa-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let clock = clock.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(backend.as_ref(), clock.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        docqa_warn!("engine event dropped; receiver is gone");
                    }
                });
            }
            docqa_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn upload(&self, document: LocalDocument) {
        self.send(EngineCommand::Upload { document });
    }

    pub fn ask(&self, question: impl Into<String>) {
        self.send(EngineCommand::Ask {
            question: question.into(),
        });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next event, or returns `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            docqa_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn RagBackend,
    clock: &(dyn Fn() -> String + Send + Sync),
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Upload { document } => EngineEvent::UploadCompleted {
            result: backend.upload(&document).await,
        },
        EngineCommand::Ask { question } => {
            let started = Instant::now();
            let result = backend.ask(&question).await;
            EngineEvent::AnswerCompleted {
                result,
                elapsed: started.elapsed(),
                received_utc: clock(),
            }
        }
        EngineCommand::CheckHealth => EngineEvent::HealthChecked {
            result: backend.health().await,
        },
    }
}
