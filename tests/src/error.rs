//! Errors raised by the scenario framework itself, as opposed to the
//! failures a step is expected to produce.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse operations {path}: {message}")]
    OperationsParse { path: PathBuf, message: String },

    #[error("failed to load graph {path}: {message}")]
    GraphLoad { path: PathBuf, message: String },

    #[error("scenario has no {0}")]
    Missing(&'static str),

    #[error("step '{0}' not found in operations")]
    StepNotFound(String),

    #[error("step '{step}': invalid @{name} '{value}'")]
    InvalidParam {
        step: String,
        name: String,
        value: String,
    },

    #[error("step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn file_read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn operations_parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::OperationsParse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn graph_load(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::GraphLoad {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound(step.into())
    }

    pub fn invalid_param(step: &str, name: &str, value: &str) -> Self {
        Self::InvalidParam {
            step: step.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
