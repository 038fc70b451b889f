use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AnswerSet, FlowKind, WizardState};

pub const DRAFT_FORMAT_VERSION: u32 = 1;

/// Combined on-disk encoding of a draft: answers and step in one JSON record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub version: u32,
    pub flow: FlowKind,
    pub current_step: usize,
    pub total_steps: usize,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: AnswerSet,
}

impl DraftRecord {
    pub fn from_state(flow: FlowKind, state: &WizardState, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: DRAFT_FORMAT_VERSION,
            flow,
            current_step: state.current_step,
            total_steps: state.total_steps,
            saved_at,
            answers: state.answers.clone(),
        }
    }

    pub fn into_state(self) -> WizardState {
        WizardState {
            current_step: self.current_step,
            total_steps: self.total_steps,
            answers: self.answers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryGroup {
    pub title: String,
    pub items: Vec<SummaryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub flow: FlowKind,
    pub submitted_at: DateTime<Utc>,
    pub field_count: usize,
}

impl SubmissionReceipt {
    pub fn issue(flow: FlowKind, answers: &AnswerSet) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            flow,
            submitted_at: Utc::now(),
            field_count: answers.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnswerValue, FileMeta};

    #[test]
    fn draft_record_keeps_value_kinds_apart() {
        let mut state = WizardState::new(6);
        state.current_step = 4;
        state.answers.set("salutation", AnswerValue::choice("Dr"));
        state.answers.set("first_name", AnswerValue::text("Asha"));
        state.answers.set(
            "file_upload_1",
            AnswerValue::Files(vec![FileMeta::new("lease.pdf", 2048, "application/pdf")]),
        );

        let record = DraftRecord::from_state(FlowKind::Rent, &state, Utc::now());
        let raw = serde_json::to_string(&record).expect("encode");
        let decoded: DraftRecord = serde_json::from_str(&raw).expect("decode");

        assert_eq!(decoded.flow, FlowKind::Rent);
        assert_eq!(decoded.into_state(), state);
    }
}
