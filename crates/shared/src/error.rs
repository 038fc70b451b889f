use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::BlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Navigation,
    BlockLimit,
    Persistence,
    MalformedDraft,
    Configuration,
    Submission,
}

/// A user-facing problem report, as handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub code: ErrorCode,
    pub message: String,
}

impl Problem {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("unknown flow '{0}'")]
    UnknownFlow(String),
    #[error("unknown block kind '{0}'")]
    UnknownBlockKind(String),
    #[error("Maximum {max} {} allowed.", .kind.plural_noun())]
    BlockLimitReached { kind: BlockKind, max: usize },
    #[error("no {kind} block #{index}")]
    UnknownBlock { kind: BlockKind, index: usize },
    #[error("at least one {kind} block is required")]
    LastBlock { kind: BlockKind },
    #[error("step {step} is outside 1..={total}")]
    StepOutOfRange { step: usize, total: usize },
    #[error("submission is only possible from the final step (on step {step} of {total})")]
    NotOnFinalStep { step: usize, total: usize },
    #[error("step {step} has {failures} invalid field(s)")]
    StepInvalid { step: usize, failures: usize },
    #[error("malformed draft: {0}")]
    MalformedDraft(String),
    #[error("invalid slot key '{0}'")]
    InvalidSlotKey(String),
    #[error("There was an error submitting your form: {0}")]
    SubmissionFailed(String),
}

impl WizardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::UnknownFlow(_)
            | WizardError::UnknownBlockKind(_)
            | WizardError::InvalidSlotKey(_) => ErrorCode::Configuration,
            WizardError::BlockLimitReached { .. }
            | WizardError::UnknownBlock { .. }
            | WizardError::LastBlock { .. } => ErrorCode::BlockLimit,
            WizardError::StepOutOfRange { .. } | WizardError::NotOnFinalStep { .. } => {
                ErrorCode::Navigation
            }
            WizardError::StepInvalid { .. } => ErrorCode::Validation,
            WizardError::MalformedDraft(_) => ErrorCode::MalformedDraft,
            WizardError::SubmissionFailed(_) => ErrorCode::Submission,
        }
    }
}

impl From<WizardError> for Problem {
    fn from(value: WizardError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
