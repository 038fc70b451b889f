use super::*;
use crate::test_support::{education_step, today};
use anyhow::anyhow;
use shared::domain::AnswerValue;
use storage::MemorySlot;

#[derive(Default)]
struct RecordingView {
    steps: Vec<(usize, u8)>,
    failures: Vec<String>,
    summaries: usize,
    notices: Vec<Problem>,
    receipts: Vec<SubmissionReceipt>,
}

impl View for RecordingView {
    fn current_step_changed(&mut self, step: usize, _total: usize, progress: u8) {
        self.steps.push((step, progress));
    }

    fn validation_result(&mut self, report: &FieldReport) {
        if !report.ok {
            self.failures.push(report.field.clone());
        }
    }

    fn summary_data(&mut self, _groups: &[SummaryGroup]) {
        self.summaries += 1;
    }

    fn notice(&mut self, problem: &Problem) {
        self.notices.push(problem.clone());
    }

    fn submitted(&mut self, receipt: &SubmissionReceipt) {
        self.receipts.push(receipt.clone());
    }
}

fn start<H: SubmitHandler>(
    slot: MemorySlot,
    submitter: H,
) -> WizardSession<MemorySlot, RecordingView, H> {
    WizardSession::start(
        FlowDefinition::for_kind(FlowKind::EducationFees),
        DraftStore::new(slot),
        RecordingView::default(),
        submitter,
        today(),
    )
}

fn complete_all_steps<H: SubmitHandler>(session: &mut WizardSession<MemorySlot, RecordingView, H>) {
    for step in 1..=5 {
        for (name, value) in education_step(step) {
            session.dispatch(Command::field(name, value));
        }
        session.dispatch(Command::Advance);
    }
}

#[test]
fn start_announces_the_first_step() {
    let session = start(MemorySlot::new(), LoggingSubmitter);
    assert_eq!(session.view().steps, vec![(1, 0)]);
}

#[test]
fn advancing_writes_a_draft_that_a_new_session_resumes() {
    let slot = MemorySlot::new();
    let mut session = start(slot.clone(), LoggingSubmitter);
    for (name, value) in education_step(1) {
        session.dispatch(Command::field(name, value));
    }
    session.dispatch(Command::Advance);
    assert!(session.view().failures.is_empty());
    assert_eq!(slot.len(), 1);

    let reloaded = start(slot, LoggingSubmitter);
    assert_eq!(reloaded.controller().current_step(), 2);
    assert_eq!(
        reloaded.controller().answers().str_value("first_name"),
        Some("Meera")
    );
    assert_eq!(reloaded.view().steps, vec![(2, 20)]);
}

#[test]
fn blocked_advance_reports_failures_and_saves_nothing() {
    let slot = MemorySlot::new();
    let mut session = start(slot.clone(), LoggingSubmitter);
    session.dispatch(Command::field("mobile", AnswerValue::text("12345")));
    session.dispatch(Command::Advance);

    assert!(session.view().failures.contains(&"mobile".to_string()));
    assert!(slot.is_empty());
    assert_eq!(session.controller().current_step(), 1);
}

#[test]
fn successful_submission_clears_the_draft_and_resets() {
    let slot = MemorySlot::new();
    let mut session = start(slot.clone(), LoggingSubmitter);
    complete_all_steps(&mut session);
    assert_eq!(session.controller().current_step(), 6);
    assert_eq!(session.view().summaries, 1);
    assert_eq!(slot.len(), 1);

    session.dispatch(Command::Submit);

    assert_eq!(session.view().receipts.len(), 1);
    assert_eq!(session.view().receipts[0].flow, FlowKind::EducationFees);
    assert!(slot.is_empty());
    assert_eq!(session.controller().current_step(), 1);
    assert_eq!(session.view().steps.last(), Some(&(1, 0)));
    assert!(session.controller().answers().is_empty());
}

#[test]
fn failed_submission_keeps_the_draft() {
    let slot = MemorySlot::new();
    let failing = |_flow: FlowKind, _answers: &AnswerSet| -> Result<SubmissionReceipt> {
        Err(anyhow!("endpoint unreachable"))
    };
    let mut session = start(slot.clone(), failing);
    complete_all_steps(&mut session);
    session.dispatch(Command::Submit);

    let notice = session.view().notices.last().expect("notice");
    assert!(notice.message.contains("endpoint unreachable"));
    assert_eq!(session.controller().current_step(), 6);
    assert_eq!(slot.len(), 1);
}

#[test]
fn closures_receive_the_answers() {
    let mut seen = 0usize;
    {
        let counting = |flow: FlowKind, answers: &AnswerSet| -> Result<SubmissionReceipt> {
            seen = answers.len();
            Ok(SubmissionReceipt::issue(flow, answers))
        };
        let mut session = start(MemorySlot::new(), counting);
        complete_all_steps(&mut session);
        session.dispatch(Command::Submit);
    }
    assert_eq!(seen, 38);
}
