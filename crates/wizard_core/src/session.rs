use std::collections::VecDeque;

use anyhow::Result;
use chrono::NaiveDate;
use shared::{
    domain::{AnswerSet, BlockKind, FlowKind},
    error::Problem,
    protocol::{SubmissionReceipt, SummaryGroup},
};
use storage::{DraftSlot, DraftStore};
use tracing::{info, warn};

use crate::{
    controller::{FieldReport, StepController},
    effects::{Command, Effect},
    flows::FlowDefinition,
};

/// Rendering surface driven by a [`WizardSession`].
pub trait View {
    fn current_step_changed(&mut self, step: usize, total: usize, progress: u8);
    fn validation_result(&mut self, report: &FieldReport);
    fn summary_data(&mut self, groups: &[SummaryGroup]);
    fn notice(&mut self, problem: &Problem);

    fn step_blocked(&mut self, _step: usize, _failures: usize) {}
    fn block_added(&mut self, _kind: BlockKind, _index: usize) {}
    fn block_removed(&mut self, _kind: BlockKind, _index: usize) {}
    fn submitted(&mut self, _receipt: &SubmissionReceipt) {}
}

/// Destination of a completed form.
pub trait SubmitHandler {
    fn submit(&mut self, flow: FlowKind, answers: &AnswerSet) -> Result<SubmissionReceipt>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(FlowKind, &AnswerSet) -> Result<SubmissionReceipt>,
{
    fn submit(&mut self, flow: FlowKind, answers: &AnswerSet) -> Result<SubmissionReceipt> {
        self(flow, answers)
    }
}

/// Accepts every submission and only records it in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmitter;

impl SubmitHandler for LoggingSubmitter {
    fn submit(&mut self, flow: FlowKind, answers: &AnswerSet) -> Result<SubmissionReceipt> {
        let receipt = SubmissionReceipt::issue(flow, answers);
        info!(
            flow = %flow,
            submission_id = %receipt.submission_id,
            fields = receipt.field_count,
            "form submitted"
        );
        Ok(receipt)
    }
}

/// Wires a [`StepController`] to draft storage, a view and a submit handler,
/// carrying out the effects each command produces.
pub struct WizardSession<S, V, H> {
    controller: StepController,
    drafts: DraftStore<S>,
    view: V,
    submitter: H,
}

impl<S, V, H> WizardSession<S, V, H>
where
    S: DraftSlot,
    V: View,
    H: SubmitHandler,
{
    /// Restores any stored draft for `flow` and shows its current step.
    pub fn start(
        flow: FlowDefinition,
        drafts: DraftStore<S>,
        view: V,
        submitter: H,
        today: NaiveDate,
    ) -> Self {
        let draft = drafts.load(flow.kind);
        let controller = StepController::restore(flow, draft, today);
        let mut session = Self {
            controller,
            drafts,
            view,
            submitter,
        };
        let opening = session.controller.announce();
        session.apply(opening);
        session
    }

    pub fn dispatch(&mut self, command: Command) {
        let effects = self.controller.dispatch(command);
        self.apply(effects);
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (StepController, V) {
        (self.controller, self.view)
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        let flow = self.controller.flow().kind;
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::StepChanged {
                    step,
                    total,
                    progress,
                } => self.view.current_step_changed(step, total, progress),
                Effect::FieldValidated(report) => self.view.validation_result(&report),
                Effect::StepBlocked { step, failures } => self.view.step_blocked(step, failures),
                Effect::PersistDraft(state) => {
                    self.drafts.save(flow, &state);
                }
                Effect::ClearDraft => {
                    self.drafts.clear(flow);
                }
                Effect::ShowSummary(groups) => self.view.summary_data(&groups),
                Effect::Submit(answers) => {
                    let outcome = match self.submitter.submit(flow, &answers) {
                        Ok(receipt) => {
                            self.view.submitted(&receipt);
                            Command::SubmissionAccepted
                        }
                        Err(err) => {
                            warn!(flow = %flow, error = %format!("{err:#}"), "submit handler failed");
                            Command::SubmissionFailed(err.to_string())
                        }
                    };
                    queue.extend(self.controller.dispatch(outcome));
                }
                Effect::BlockAdded { kind, index } => self.view.block_added(kind, index),
                Effect::BlockRemoved { kind, index } => self.view.block_removed(kind, index),
                Effect::Notice(problem) => self.view.notice(&problem),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
