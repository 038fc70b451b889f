use std::{
    collections::{btree_map, BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    EducationFees,
    Rent,
    SocietyCharges,
}

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [
        FlowKind::EducationFees,
        FlowKind::Rent,
        FlowKind::SocietyCharges,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlowKind::EducationFees => "education_fees",
            FlowKind::Rent => "rent",
            FlowKind::SocietyCharges => "society_charges",
        }
    }

    /// Durable slot key for the in-progress draft of this flow.
    pub fn draft_key(self) -> &'static str {
        match self {
            FlowKind::EducationFees => "educationFormData",
            FlowKind::Rent => "rentFormData",
            FlowKind::SocietyCharges => "maintenanceFormData",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = WizardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "education" | "education_fees" | "fees" => Ok(FlowKind::EducationFees),
            "rent" => Ok(FlowKind::Rent),
            "society" | "society_charges" | "maintenance" => Ok(FlowKind::SocietyCharges),
            _ => Err(WizardError::UnknownFlow(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    BankAccount,
    FileSlot,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::BankAccount => "account",
            BlockKind::FileSlot => "file",
        }
    }

    pub fn plural_noun(self) -> &'static str {
        match self {
            BlockKind::BankAccount => "accounts",
            BlockKind::FileSlot => "file uploads",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = WizardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "account" | "accounts" | "bank_account" => Ok(BlockKind::BankAccount),
            "file" | "files" | "file_slot" | "upload" => Ok(BlockKind::FileSlot),
            _ => Err(WizardError::UnknownBlockKind(raw.to_string())),
        }
    }
}

/// Metadata of an attached file. The binary payload is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    Files(Vec<FileMeta>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        AnswerValue::Choice(value.into())
    }

    /// Blank text or choice, or no attached files.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(v) | AnswerValue::Choice(v) => v.trim().is_empty(),
            AnswerValue::Files(files) => files.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(v) | AnswerValue::Choice(v) => Some(v),
            AnswerValue::Files(_) => None,
        }
    }

    pub fn files(&self) -> &[FileMeta] {
        match self {
            AnswerValue::Files(files) => files,
            _ => &[],
        }
    }
}

/// Accumulated answers of one flow, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    /// Overwrites any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: AnswerValue) -> Option<AnswerValue> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<AnswerValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(AnswerValue::as_str)
    }

    pub fn files(&self, key: &str) -> &[FileMeta] {
        self.values.get(key).map(AnswerValue::files).unwrap_or(&[])
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.values.get(key).map_or(true, AnswerValue::is_empty)
    }

    /// Moves a value to a new key; a value already stored under `to` is replaced.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) {
        if let Some(value) = self.values.remove(from) {
            self.values.insert(to.into(), value);
        }
    }

    /// Indices `n` for which a key `{stem}_{n}` is present.
    pub fn indices_with_stem(&self, stem: &str) -> BTreeSet<usize> {
        self.values
            .keys()
            .filter_map(|key| parse_indexed_key(key, stem))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AnswerValue> {
        self.values.iter()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parses `{stem}_{n}` with `n >= 1`.
pub fn parse_indexed_key(key: &str, stem: &str) -> Option<usize> {
    let index = key
        .strip_prefix(stem)?
        .strip_prefix('_')?
        .parse::<usize>()
        .ok()?;
    (index >= 1).then_some(index)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub total_steps: usize,
    pub answers: AnswerSet,
}

impl WizardState {
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
            answers: AnswerSet::new(),
        }
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step <= 1
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step >= self.total_steps
    }

    pub fn progress_percent(&self) -> u8 {
        if self.total_steps <= 1 {
            return 100;
        }
        let done = self.current_step.saturating_sub(1) as f64;
        let span = (self.total_steps - 1) as f64;
        ((done / span) * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_keys_require_exact_stem() {
        assert_eq!(parse_indexed_key("account_number_2", "account_number"), Some(2));
        assert_eq!(parse_indexed_key("re_account_number_2", "account_number"), None);
        assert_eq!(parse_indexed_key("account_number_0", "account_number"), None);
        assert_eq!(parse_indexed_key("account_number_x", "account_number"), None);
    }

    #[test]
    fn answer_set_scans_indices_by_stem() {
        let mut answers = AnswerSet::new();
        answers.set("account_number_1", AnswerValue::text("123456789"));
        answers.set("account_number_3", AnswerValue::text("987654321"));
        answers.set("re_account_number_1", AnswerValue::text("123456789"));
        let indices: Vec<_> = answers.indices_with_stem("account_number").into_iter().collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn blank_values_count_as_empty() {
        assert!(AnswerValue::text("   ").is_empty());
        assert!(AnswerValue::Files(Vec::new()).is_empty());
        assert!(!AnswerValue::choice("Mr").is_empty());
    }

    #[test]
    fn progress_spans_first_to_last_step() {
        let mut state = WizardState::new(6);
        assert_eq!(state.progress_percent(), 0);
        state.current_step = 3;
        assert_eq!(state.progress_percent(), 40);
        state.current_step = 6;
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn flow_names_parse_leniently() {
        assert_eq!("Education".parse::<FlowKind>().ok(), Some(FlowKind::EducationFees));
        assert_eq!("society-charges".parse::<FlowKind>().ok(), Some(FlowKind::SocietyCharges));
        assert!("lease".parse::<FlowKind>().is_err());
    }

    #[test]
    fn file_meta_serializes_mime_as_type() {
        let json = serde_json::to_value(FileMeta::new("a.pdf", 10, "application/pdf"))
            .expect("serialize");
        assert_eq!(json["type"], "application/pdf");
    }
}
