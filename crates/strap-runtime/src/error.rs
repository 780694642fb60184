//! Runtime error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
