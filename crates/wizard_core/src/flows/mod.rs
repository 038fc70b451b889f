//! Static descriptions of the three payment flows.

use shared::domain::{parse_indexed_key, BlockKind, FlowKind};

use crate::{
    blocks::BlockArena,
    rules::{BlockTemplate, InputKind, RuleRegistry},
    validator::{Check, FieldRule, FilePolicy},
};

mod common;
mod education;
mod rent;
mod society;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, input: InputKind, rule: FieldRule) -> Self {
        Self {
            name,
            label,
            input,
            rule,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Radio groups where exactly one option must be chosen. Judged as a
    /// whole step-level check rather than per control.
    pub choices: Vec<FieldSpec>,
    pub blocks: Vec<BlockKind>,
}

impl StepDefinition {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            fields: Vec::new(),
            choices: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn choice(mut self, choice: FieldSpec) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn blocks(mut self, kind: BlockKind) -> Self {
        self.blocks.push(kind);
        self
    }
}

/// One line of the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: &'static str,
    /// Values of these keys are joined with a space, skipping blanks.
    pub keys: Vec<&'static str>,
}

impl SummaryEntry {
    pub fn field(label: &'static str, key: &'static str) -> Self {
        Self {
            label,
            keys: vec![key],
        }
    }

    pub fn joined(label: &'static str, keys: &[&'static str]) -> Self {
        Self {
            label,
            keys: keys.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySection {
    Fields {
        title: &'static str,
        entries: Vec<SummaryEntry>,
    },
    /// Every block of `kind` found in the answers.
    Blocks { title: &'static str, kind: BlockKind },
    /// Names of the files attached under `{stem}_{n}`.
    Files { title: &'static str, stem: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowDefinition {
    pub kind: FlowKind,
    pub title: &'static str,
    /// Input steps, in order. The review step follows the last of them.
    pub steps: Vec<StepDefinition>,
    pub templates: Vec<BlockTemplate>,
    pub summary: Vec<SummarySection>,
}

impl FlowDefinition {
    pub fn for_kind(kind: FlowKind) -> Self {
        match kind {
            FlowKind::EducationFees => education::definition(),
            FlowKind::Rent => rent::definition(),
            FlowKind::SocietyCharges => society::definition(),
        }
    }

    /// Input steps plus the review step.
    pub fn total_steps(&self) -> usize {
        self.steps.len() + 1
    }

    /// `None` for the review step and out-of-range numbers.
    pub fn step(&self, number: usize) -> Option<&StepDefinition> {
        number.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn step_title(&self, number: usize) -> &'static str {
        match self.step(number) {
            Some(step) => step.title,
            None if number == self.total_steps() => "Review",
            None => "",
        }
    }

    pub fn template(&self, kind: BlockKind) -> Option<&BlockTemplate> {
        self.templates.iter().find(|template| template.kind == kind)
    }

    /// Registry holding every static field rule plus rules for block #1.
    pub fn registry(&self) -> RuleRegistry {
        let base = self
            .steps
            .iter()
            .flat_map(|step| step.fields.iter().chain(&step.choices))
            .map(|spec| (spec.name.to_string(), spec.rule.clone()));
        let first_blocks = self.templates.iter().flat_map(|template| {
            template
                .fields
                .iter()
                .map(|field| (field.name(1), field.rule_for(1)))
        });
        RuleRegistry::new(base.chain(first_blocks), self.templates.iter().cloned())
    }

    pub fn arena(&self) -> BlockArena {
        BlockArena::new(&self.templates)
    }

    /// Names of every control on step `number` given the live blocks: plain
    /// fields, then block fields, then radio groups.
    pub fn field_names(&self, number: usize, arena: &BlockArena) -> Vec<String> {
        let Some(step) = self.step(number) else {
            return Vec::new();
        };
        let mut names: Vec<String> = step.fields.iter().map(|spec| spec.name.to_string()).collect();
        for kind in &step.blocks {
            if let Some(template) = self.template(*kind) {
                for index in arena.indices(*kind) {
                    names.extend(template.fields.iter().map(|field| field.name(index)));
                }
            }
        }
        names.extend(step.choices.iter().map(|spec| spec.name.to_string()));
        names
    }

    /// Block group and index addressed by a repeatable field key such as
    /// `re_account_number_2`.
    pub fn block_slot(&self, name: &str) -> Option<(BlockKind, usize)> {
        self.templates.iter().find_map(|template| {
            template
                .fields
                .iter()
                .find_map(|field| parse_indexed_key(name, field.stem))
                .map(|index| (template.kind, index))
        })
    }

    pub fn file_policy(&self) -> Option<FilePolicy> {
        self.template(BlockKind::FileSlot).and_then(|template| {
            template.fields.iter().find_map(|field| match &field.check {
                Check::Files(policy) => Some(*policy),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
#[path = "../tests/flows_tests.rs"]
mod tests;
