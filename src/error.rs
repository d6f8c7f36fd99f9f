//! Error types for buffer validation and configuration parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{name} buffer needs {expected} values, got {actual}")]
    BufferLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Point buffer length {0} is not a multiple of 3")]
    RaggedPoints(usize),

    #[error("Invalid worker assignment: worker {worker_id} of {worker_count}")]
    WorkerAssignment { worker_id: u32, worker_count: u32 },

    #[error("Parse params: {0}")]
    Params(#[from] serde_json::Error),
}

impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
