use shared::{
    domain::{AnswerSet, AnswerValue, BlockKind, WizardState},
    error::Problem,
    protocol::SummaryGroup,
};

use crate::controller::FieldReport;

/// Inputs accepted by [`StepController::dispatch`](crate::controller::StepController::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FieldChanged { name: String, value: AnswerValue },
    Advance,
    Retreat,
    JumpToStep(usize),
    AddBlock(BlockKind),
    RemoveBlock { kind: BlockKind, index: usize },
    Submit,
    /// The endpoint accepted the answers handed out by [`Effect::Submit`].
    SubmissionAccepted,
    SubmissionFailed(String),
}

impl Command {
    pub fn field(name: impl Into<String>, value: AnswerValue) -> Self {
        Command::FieldChanged {
            name: name.into(),
            value,
        }
    }
}

/// Side effects requested by the controller. The controller itself never
/// touches storage or the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StepChanged {
        step: usize,
        total: usize,
        progress: u8,
    },
    FieldValidated(FieldReport),
    StepBlocked {
        step: usize,
        failures: usize,
    },
    PersistDraft(WizardState),
    ClearDraft,
    ShowSummary(Vec<SummaryGroup>),
    /// Hand the answers to the submission endpoint, then report back with
    /// [`Command::SubmissionAccepted`] or [`Command::SubmissionFailed`].
    Submit(AnswerSet),
    BlockAdded {
        kind: BlockKind,
        index: usize,
    },
    BlockRemoved {
        kind: BlockKind,
        index: usize,
    },
    Notice(Problem),
}
