//! DocQA engine: backend client, local document intake and effect execution.
mod client;
mod document;
mod engine;
mod types;

pub use client::{BackendSettings, RagBackend, ReqwestBackend, DEFAULT_BACKEND_URL};
pub use document::{is_supported_document, read_document, DocumentError, SUPPORTED_EXTENSIONS};
pub use engine::{Clock, EngineConfig, EngineError, EngineHandle};
pub use types::{
    AnswerResponse, BackendError, EngineEvent, FailureKind, LocalDocument, ServiceStatus,
    SourceDocument, UploadResponse,
};
