//! Autoreq engine: talks to the analysis service and executes IO effects.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{
    AnalysisClient, ClientSettings, ReqwestAnalysisClient, DEFAULT_ENDPOINT, MANIFEST_FIELD,
    URL_FIELD,
};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, MANIFEST_FILENAME};
pub use types::{AnalysisError, EngineEvent, FailureKind, RequestId};
