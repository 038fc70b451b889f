use std::collections::{BTreeMap, BTreeSet};

use shared::{
    domain::{parse_indexed_key, AnswerValue, BlockKind},
    error::WizardError,
};
use tracing::debug;

use crate::{
    blocks::field_name,
    validator::{Check, FieldRule, ValidResult, ValidationContext},
};

/// How a form control is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Url,
    TextArea,
    Select(&'static [&'static str]),
    Radio(&'static [&'static str]),
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Required in block #1 only.
    FirstBlockOnly,
}

impl Presence {
    fn applies_to(self, index: usize) -> bool {
        match self {
            Presence::Required => true,
            Presence::FirstBlockOnly => index == 1,
        }
    }
}

/// A field repeated once per block. Sibling references in `check` name
/// stems and resolve to the same block index; `{index}` in `message` is
/// replaced by the block number.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockField {
    pub stem: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub presence: Presence,
    pub check: Check,
    pub message: &'static str,
    /// Shown in the review step.
    pub summarized: bool,
}

impl BlockField {
    pub fn new(
        stem: &'static str,
        label: &'static str,
        input: InputKind,
        check: Check,
        message: &'static str,
    ) -> Self {
        Self {
            stem,
            label,
            input,
            presence: Presence::Required,
            check,
            message,
            summarized: true,
        }
    }

    pub fn presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn hidden_in_summary(mut self) -> Self {
        self.summarized = false;
        self
    }

    pub fn name(&self, index: usize) -> String {
        field_name(self.stem, index)
    }

    pub fn rule_for(&self, index: usize) -> FieldRule {
        let check = match &self.check {
            Check::MatchesField { field } => Check::MatchesField {
                field: field_name(field, index),
            },
            Check::DateAfter { field } => Check::DateAfter {
                field: field_name(field, index),
            },
            other => other.clone(),
        };
        FieldRule {
            required: self.presence.applies_to(index),
            check,
            message: self.message.replace("{index}", &index.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate {
    pub kind: BlockKind,
    pub title: &'static str,
    pub max_blocks: Option<usize>,
    pub fields: Vec<BlockField>,
}

/// Field rules of one flow, owned per session. Static fields are fixed at
/// construction; block fields come and go with their blocks.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, FieldRule>,
    templates: BTreeMap<BlockKind, BlockTemplate>,
}

impl RuleRegistry {
    pub fn new(
        base: impl IntoIterator<Item = (String, FieldRule)>,
        templates: impl IntoIterator<Item = BlockTemplate>,
    ) -> Self {
        Self {
            rules: base.into_iter().collect(),
            templates: templates
                .into_iter()
                .map(|template| (template.kind, template))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    pub fn template(&self, kind: BlockKind) -> Option<&BlockTemplate> {
        self.templates.get(&kind)
    }

    pub fn templates(&self) -> impl Iterator<Item = &BlockTemplate> {
        self.templates.values()
    }

    pub fn all_rules(&self) -> &BTreeMap<String, FieldRule> {
        &self.rules
    }

    /// Adds the rules of block `index`. Registering twice overwrites.
    pub fn register_group_rules(&mut self, kind: BlockKind, index: usize) -> Result<(), WizardError> {
        let template = self
            .templates
            .get(&kind)
            .ok_or_else(|| WizardError::UnknownBlockKind(kind.to_string()))?;
        let materialized: Vec<_> = template
            .fields
            .iter()
            .map(|field| (field.name(index), field.rule_for(index)))
            .collect();
        debug!(kind = %kind, index, fields = materialized.len(), "block rules registered");
        self.rules.extend(materialized);
        Ok(())
    }

    pub fn unregister_group_rules(&mut self, kind: BlockKind, index: usize) {
        if let Some(template) = self.templates.get(&kind) {
            for field in &template.fields {
                self.rules.remove(&field.name(index));
            }
        }
    }

    /// Makes the block rules of `kind` match exactly `live` indices.
    pub fn sync_group(
        &mut self,
        kind: BlockKind,
        live: impl IntoIterator<Item = usize>,
    ) -> Result<(), WizardError> {
        let live: BTreeSet<usize> = live.into_iter().collect();
        let stems: Vec<&'static str> = self
            .templates
            .get(&kind)
            .ok_or_else(|| WizardError::UnknownBlockKind(kind.to_string()))?
            .fields
            .iter()
            .map(|field| field.stem)
            .collect();
        self.rules.retain(|name, _| {
            !stems.iter().any(|stem| {
                parse_indexed_key(name, stem).is_some_and(|index| !live.contains(&index))
            })
        });
        for index in live {
            self.register_group_rules(kind, index)?;
        }
        Ok(())
    }

    /// Runs the rule for `name`. Fields without a rule always pass.
    pub fn validate(
        &self,
        name: &str,
        value: Option<&AnswerValue>,
        ctx: &ValidationContext<'_>,
    ) -> ValidResult {
        match self.rules.get(name) {
            Some(rule) => rule.evaluate(value, ctx),
            None => ValidResult::pass(),
        }
    }

    /// Fields whose rule reads `name`.
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.check.sibling() == Some(name))
            .map(|(field, _)| field.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod tests;
