use std::sync::{Arc, Mutex};
use std::time::Duration;

use docqa_engine::{
    AnswerResponse, BackendError, EngineConfig, EngineEvent, EngineHandle, LocalDocument,
    RagBackend, ServiceStatus, UploadResponse,
};

#[derive(Default)]
struct ScriptedBackend {
    questions: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl RagBackend for ScriptedBackend {
    async fn upload(&self, document: &LocalDocument) -> Result<UploadResponse, BackendError> {
        Ok(UploadResponse {
            filename: document.filename.clone(),
            message: None,
            document_chunks: Some(1),
        })
    }

    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(AnswerResponse {
            answer: format!("echo: {question}"),
            source_documents: Vec::new(),
        })
    }

    async fn health(&self) -> Result<ServiceStatus, BackendError> {
        Ok(ServiceStatus {
            message: "up".to_string(),
        })
    }
}

const WAIT: Duration = Duration::from_secs(5);

fn engine(backend: Arc<ScriptedBackend>) -> EngineHandle {
    EngineHandle::with_backend(backend, Arc::new(|| "2026-10-16T10:00:00Z".to_string()))
        .expect("engine starts")
}

#[test]
fn upload_command_produces_upload_event() {
    let handle = engine(Arc::new(ScriptedBackend::default()));
    handle.upload(LocalDocument {
        filename: "a.txt".to_string(),
        bytes: b"hello".to_vec(),
        media_type: "text/plain".to_string(),
    });

    match handle.recv_timeout(WAIT) {
        Some(EngineEvent::UploadCompleted { result }) => {
            assert_eq!(result.unwrap().filename, "a.txt");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn ask_event_is_stamped_with_clock() {
    let backend = Arc::new(ScriptedBackend::default());
    let handle = engine(backend.clone());
    handle.ask("When?");

    match handle.recv_timeout(WAIT) {
        Some(EngineEvent::AnswerCompleted {
            result,
            received_utc,
            ..
        }) => {
            assert_eq!(result.unwrap().answer, "echo: When?");
            assert_eq!(received_utc, "2026-10-16T10:00:00Z");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(*backend.questions.lock().unwrap(), vec!["When?".to_string()]);
}

#[test]
fn health_command_produces_health_event() {
    let handle = engine(Arc::new(ScriptedBackend::default()));
    handle.check_health();

    match handle.recv_timeout(WAIT) {
        Some(EngineEvent::HealthChecked { result }) => {
            assert_eq!(result.unwrap().message, "up");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(handle.try_recv().is_none());
}

#[test]
fn default_config_rejects_bad_url() {
    let mut config = EngineConfig::new(Default::default());
    config.settings.base_url = "::not-a-url::".to_string();

    assert!(EngineHandle::new(config).is_err());
}
