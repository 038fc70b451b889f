use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    domain::{AnswerSet, AnswerValue, BlockKind, WizardState},
    error::{ErrorCode, Problem, WizardError},
    protocol::SummaryGroup,
};
use tracing::{debug, info, warn};

use crate::{
    blocks::BlockArena,
    effects::{Command, Effect},
    flows::FlowDefinition,
    rules::RuleRegistry,
    summary,
    validator::{ValidResult, ValidationContext},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: String,
    pub ok: bool,
    pub message: Option<String>,
    /// Reported for a radio group as a whole rather than one control.
    pub step_level: bool,
}

impl FieldReport {
    fn new(field: &str, result: ValidResult, step_level: bool) -> Self {
        Self {
            field: field.to_string(),
            ok: result.ok,
            message: result.message,
            step_level,
        }
    }
}

/// Outcome of validating every control on one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub fields: Vec<FieldReport>,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|report| report.ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|report| !report.ok)
    }
}

/// Step state machine for one flow. Every state change goes through
/// [`StepController::dispatch`], which returns the side effects to perform.
#[derive(Debug, Clone)]
pub struct StepController {
    flow: FlowDefinition,
    registry: RuleRegistry,
    blocks: BlockArena,
    state: WizardState,
    today: NaiveDate,
    submission_pending: bool,
}

impl StepController {
    pub fn new(flow: FlowDefinition, today: NaiveDate) -> Self {
        Self::restore(flow, None, today)
    }

    /// Resumes from a stored draft; drafts that do not fit the flow are dropped.
    pub fn restore(flow: FlowDefinition, draft: Option<WizardState>, today: NaiveDate) -> Self {
        let total = flow.total_steps();
        let state = match draft {
            Some(state)
                if state.total_steps == total && (1..=total).contains(&state.current_step) =>
            {
                state
            }
            Some(state) => {
                warn!(
                    flow = %flow.kind,
                    step = state.current_step,
                    total = state.total_steps,
                    expected_total = total,
                    "draft does not fit this flow; starting over"
                );
                WizardState::new(total)
            }
            None => WizardState::new(total),
        };
        let mut controller = Self {
            registry: flow.registry(),
            blocks: flow.arena(),
            flow,
            state,
            today,
            submission_pending: false,
        };
        controller
            .blocks
            .restore_from_answers(&mut controller.state.answers, &controller.flow.templates);
        controller.sync_rules();
        controller
    }

    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.state.answers
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn blocks(&self) -> &BlockArena {
        &self.blocks
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_submission_pending(&self) -> bool {
        self.submission_pending
    }

    pub fn validate_field(&self, name: &str) -> FieldReport {
        self.report(name, false)
    }

    /// Validates every control on step `number` without stopping at the
    /// first failure.
    pub fn validate_step(&self, number: usize) -> StepReport {
        let choices: Vec<&str> = self
            .flow
            .step(number)
            .map(|step| step.choices.iter().map(|spec| spec.name).collect())
            .unwrap_or_default();
        let fields = self
            .flow
            .field_names(number, &self.blocks)
            .iter()
            .map(|name| self.report(name, choices.contains(&name.as_str())))
            .collect();
        StepReport {
            step: number,
            fields,
        }
    }

    pub fn summary(&self) -> Vec<SummaryGroup> {
        summary::project(&self.state.answers, &self.flow.summary, &self.flow.templates)
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        debug!(flow = %self.flow.kind, step = self.state.current_step, ?command, "dispatch");
        match command {
            Command::FieldChanged { name, value } => self.field_changed(name, value),
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
            Command::JumpToStep(step) => self.jump_to_step(step),
            Command::AddBlock(kind) => self.add_block(kind),
            Command::RemoveBlock { kind, index } => self.remove_block(kind, index),
            Command::Submit => self.submit(),
            Command::SubmissionAccepted => self.submission_accepted(),
            Command::SubmissionFailed(reason) => self.submission_failed(reason),
        }
    }

    /// Stores the value, validates it, and re-validates filled-in fields
    /// whose rule reads it.
    pub fn field_changed(&mut self, name: String, value: AnswerValue) -> Vec<Effect> {
        if let Some((kind, index)) = self.flow.block_slot(&name) {
            if index > self.blocks.count(kind) {
                debug!(flow = %self.flow.kind, field = %name, kind = %kind, index, "value for a missing block");
                return vec![Effect::Notice(WizardError::UnknownBlock { kind, index }.into())];
            }
        }
        self.state.answers.set(name.clone(), value);
        let mut effects = vec![Effect::FieldValidated(self.validate_field(&name))];
        for dependent in self.registry.dependents_of(&name) {
            if !self.state.answers.is_blank(&dependent) {
                effects.push(Effect::FieldValidated(self.validate_field(&dependent)));
            }
        }
        effects
    }

    pub fn advance(&mut self) -> Vec<Effect> {
        if self.state.is_final_step() {
            return Vec::new();
        }
        let report = self.validate_step(self.state.current_step);
        let valid = report.is_valid();
        let failures = report.failures().count();
        let mut effects: Vec<Effect> = report.fields.into_iter().map(Effect::FieldValidated).collect();
        if !valid {
            info!(flow = %self.flow.kind, step = report.step, failures, "advance blocked");
            effects.push(Effect::StepBlocked {
                step: report.step,
                failures,
            });
            return effects;
        }
        self.state.current_step += 1;
        effects.push(Effect::PersistDraft(self.state.clone()));
        effects.extend(self.step_entered());
        effects
    }

    pub fn retreat(&mut self) -> Vec<Effect> {
        if self.state.is_first_step() {
            return Vec::new();
        }
        self.state.current_step -= 1;
        self.step_entered()
    }

    /// Moves straight to `step` without validating, as the review page's
    /// edit links do.
    pub fn jump_to_step(&mut self, step: usize) -> Vec<Effect> {
        let total = self.state.total_steps;
        if !(1..=total).contains(&step) {
            return vec![Effect::Notice(WizardError::StepOutOfRange { step, total }.into())];
        }
        self.state.current_step = step;
        self.step_entered()
    }

    pub fn add_block(&mut self, kind: BlockKind) -> Vec<Effect> {
        let index = match self.blocks.add_block(kind) {
            Ok(index) => index,
            Err(err) => return vec![Effect::Notice(err.into())],
        };
        if let Some(template) = self.registry.template(kind) {
            for field in &template.fields {
                self.state.answers.remove(&field.name(index));
            }
        }
        if let Err(err) = self.registry.register_group_rules(kind, index) {
            return vec![Effect::Notice(err.into())];
        }
        info!(flow = %self.flow.kind, kind = %kind, index, "block added");
        vec![Effect::BlockAdded { kind, index }]
    }

    /// Removes block `index`; later blocks shift down to close the gap.
    pub fn remove_block(&mut self, kind: BlockKind, index: usize) -> Vec<Effect> {
        let renumbering = match self.blocks.remove_block(kind, index) {
            Ok(renumbering) => renumbering,
            Err(err) => return vec![Effect::Notice(err.into())],
        };
        if let Some(template) = self.registry.template(kind) {
            renumbering.apply(&mut self.state.answers, template);
        }
        if let Err(err) = self.registry.sync_group(kind, self.blocks.indices(kind)) {
            return vec![Effect::Notice(err.into())];
        }
        info!(flow = %self.flow.kind, kind = %kind, index, remaining = self.blocks.count(kind), "block removed");
        vec![Effect::BlockRemoved { kind, index }]
    }

    /// First half of submission: re-checks every step, then hands the answers
    /// out via [`Effect::Submit`]. State is only reset once the outcome comes
    /// back.
    pub fn submit(&mut self) -> Vec<Effect> {
        let step = self.state.current_step;
        let total = self.state.total_steps;
        if !self.state.is_final_step() {
            return vec![Effect::Notice(WizardError::NotOnFinalStep { step, total }.into())];
        }
        if self.submission_pending {
            debug!(flow = %self.flow.kind, "submission already in flight");
            return Vec::new();
        }
        if let Some(report) = (1..=total)
            .map(|number| self.validate_step(number))
            .find(|report| !report.is_valid())
        {
            let failed = report.step;
            let failures = report.failures().count();
            info!(flow = %self.flow.kind, step = failed, failures, "submit blocked");
            let mut effects: Vec<Effect> =
                report.fields.into_iter().map(Effect::FieldValidated).collect();
            effects.push(Effect::StepBlocked {
                step: failed,
                failures,
            });
            effects.push(Effect::Notice(Problem::new(
                ErrorCode::Validation,
                format!("Validation failed in Step {failed}. Please review and correct the errors."),
            )));
            return effects;
        }
        self.submission_pending = true;
        info!(flow = %self.flow.kind, fields = self.state.answers.len(), "submitting");
        vec![Effect::Submit(self.state.answers.clone())]
    }

    pub fn submission_accepted(&mut self) -> Vec<Effect> {
        if !self.submission_pending {
            warn!(flow = %self.flow.kind, "submission outcome without a pending submission");
            return Vec::new();
        }
        self.submission_pending = false;
        self.state.reset();
        self.blocks.reset();
        self.sync_rules();
        let mut effects = vec![Effect::ClearDraft];
        effects.extend(self.step_entered());
        effects
    }

    pub fn submission_failed(&mut self, reason: String) -> Vec<Effect> {
        if !self.submission_pending {
            warn!(flow = %self.flow.kind, "submission outcome without a pending submission");
            return Vec::new();
        }
        self.submission_pending = false;
        warn!(flow = %self.flow.kind, %reason, "submission failed; answers kept");
        vec![Effect::Notice(WizardError::SubmissionFailed(reason).into())]
    }

    fn step_entered(&self) -> Vec<Effect> {
        let mut effects = vec![Effect::StepChanged {
            step: self.state.current_step,
            total: self.state.total_steps,
            progress: self.state.progress_percent(),
        }];
        if self.state.is_final_step() {
            effects.push(Effect::ShowSummary(self.summary()));
        }
        effects
    }

    /// Effects that bring a freshly attached view up to date.
    pub fn announce(&self) -> Vec<Effect> {
        self.step_entered()
    }

    fn report(&self, name: &str, step_level: bool) -> FieldReport {
        let ctx = ValidationContext::new(&self.state.answers, self.today);
        let result = self.registry.validate(name, self.state.answers.get(name), &ctx);
        FieldReport::new(name, result, step_level)
    }

    fn sync_rules(&mut self) {
        let kinds: Vec<BlockKind> = self.blocks.kinds().collect();
        for kind in kinds {
            if let Err(err) = self.registry.sync_group(kind, self.blocks.indices(kind)) {
                warn!(flow = %self.flow.kind, kind = %kind, error = %err, "block rules out of sync");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
