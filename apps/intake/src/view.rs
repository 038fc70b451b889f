use std::io::Write;

use shared::{
    domain::BlockKind,
    error::Problem,
    protocol::{SubmissionReceipt, SummaryGroup},
};
use tracing::warn;
use wizard_core::{FieldReport, FlowDefinition, View};

/// Plain-text rendering of session effects.
pub struct TerminalView<W> {
    out: W,
    titles: Vec<&'static str>,
    /// Only failures are echoed unless set.
    verbose: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, flow: &FlowDefinition) -> Self {
        let titles = (1..=flow.total_steps())
            .map(|step| flow.step_title(step))
            .collect();
        Self {
            out,
            titles,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            warn!(error = %err, "terminal write failed");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn current_step_changed(&mut self, step: usize, total: usize, progress: u8) {
        let title = step
            .checked_sub(1)
            .and_then(|slot| self.titles.get(slot))
            .copied()
            .unwrap_or("");
        self.say(&format!("== step {step}/{total}: {title} [{progress}%]"));
    }

    fn validation_result(&mut self, report: &FieldReport) {
        match (&report.message, report.ok) {
            (Some(message), false) => self.say(&format!("  x {}: {message}", report.field)),
            (None, false) => self.say(&format!("  x {}", report.field)),
            (_, true) if self.verbose => self.say(&format!("  ok {}", report.field)),
            _ => {}
        }
    }

    fn summary_data(&mut self, groups: &[SummaryGroup]) {
        for group in groups {
            self.say(&format!("-- {}", group.title));
            for item in &group.items {
                self.say(&format!("   {}: {}", item.label, item.value));
            }
        }
    }

    fn notice(&mut self, problem: &Problem) {
        self.say(&format!("! {}", problem.message));
    }

    fn step_blocked(&mut self, step: usize, failures: usize) {
        self.say(&format!("step {step} has {failures} field(s) to fix"));
    }

    fn block_added(&mut self, kind: BlockKind, index: usize) {
        self.say(&format!("+ {kind} #{index}"));
    }

    fn block_removed(&mut self, kind: BlockKind, index: usize) {
        self.say(&format!("- {kind} #{index}"));
    }

    fn submitted(&mut self, receipt: &SubmissionReceipt) {
        self.say(&format!(
            "Form submitted successfully! reference {} ({} fields)",
            receipt.submission_id, receipt.field_count
        ));
    }
}
