use std::sync::LazyLock;

use chrono::{Months, NaiveDate};
use regex::Regex;
use serde::Serialize;
use shared::domain::{AnswerSet, AnswerValue, FileMeta};

/// Largest accepted size of a single attached file.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub const UPLOAD_MIME_TYPES: &[&str] = &[
    "image/png",
    "application/pdf",
    "image/jpeg",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

static MOBILE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[6-9][0-9]{9}$"));
static TEN_DIGITS: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{10}$"));
static PAN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z]{5}[0-9]{4}[A-Z]$"));
static GSTIN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$"));
static PIN_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{6}$"));
static IFSC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z]{4}0[A-Z0-9]{6}$"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static WEBSITE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(https?://)?([\w-]+\.)+[\w-]{2,4}/?$"));
static NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z]{1,50}$"));
static SPACED_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z\s]{1,50}$"));
static LETTERS: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z\s]{1,100}$"));
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9\s-]{1,50}$"));
static ACCOUNT_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{9,18}$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in field pattern compiles")
}

/// Textual formats with a fixed pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Indian mobile number: ten digits starting with 6-9.
    Mobile,
    TenDigitPhone,
    Pan,
    Gstin,
    PinCode,
    Ifsc,
    Email,
    Website,
    Name,
    SpacedName,
    Letters,
    Identifier,
    AccountNumber,
}

impl Format {
    pub fn regex(self) -> &'static Regex {
        match self {
            Format::Mobile => &MOBILE,
            Format::TenDigitPhone => &TEN_DIGITS,
            Format::Pan => &PAN,
            Format::Gstin => &GSTIN,
            Format::PinCode => &PIN_CODE,
            Format::Ifsc => &IFSC,
            Format::Email => &EMAIL,
            Format::Website => &WEBSITE,
            Format::Name => &NAME,
            Format::SpacedName => &SPACED_NAME,
            Format::Letters => &LETTERS,
            Format::Identifier => &IDENTIFIER,
            Format::AccountNumber => &ACCOUNT_NUMBER,
        }
    }

    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    pub max_files: Option<usize>,
    pub max_file_bytes: u64,
    pub allowed_types: &'static [&'static str],
}

impl FilePolicy {
    pub const fn uploads(max_files: Option<usize>) -> Self {
        Self {
            max_files,
            max_file_bytes: MAX_FILE_BYTES,
            allowed_types: UPLOAD_MIME_TYPES,
        }
    }

    pub fn accepts(&self, files: &[FileMeta]) -> bool {
        if files.is_empty() {
            return false;
        }
        if self.max_files.is_some_and(|max| files.len() > max) {
            return false;
        }
        files.iter().all(|file| {
            file.size <= self.max_file_bytes && self.allowed_types.contains(&file.mime_type.as_str())
        })
    }
}

/// The predicate half of a field rule, consulted for non-empty values only.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Any non-empty value.
    Present,
    Format(Format),
    OneOf(&'static [&'static str]),
    /// Character count within `min..=max`.
    Length { min: usize, max: usize },
    PositiveAmount,
    Date,
    DateInPast,
    MinimumAge { years: u32 },
    /// Date strictly after the date stored under `field`. Passes when that
    /// sibling is absent or unparseable.
    DateAfter { field: String },
    /// Equal to the value stored under `field`.
    MatchesField { field: String },
    Files(FilePolicy),
}

impl Check {
    /// Name of another field this check reads, if any.
    pub fn sibling(&self) -> Option<&str> {
        match self {
            Check::DateAfter { field } | Check::MatchesField { field } => Some(field),
            _ => None,
        }
    }

    fn accepts(&self, value: &AnswerValue, ctx: &ValidationContext<'_>) -> bool {
        if let Check::Files(policy) = self {
            return policy.accepts(value.files());
        }
        let Some(raw) = value.as_str() else {
            return false;
        };
        match self {
            Check::Present => true,
            Check::Format(format) => format.matches(raw),
            Check::OneOf(options) => options.contains(&raw),
            Check::Length { min, max } => (*min..=*max).contains(&raw.chars().count()),
            Check::PositiveAmount => parse_amount(raw).is_some_and(|amount| amount > 0.0),
            Check::Date => parse_date(raw).is_some(),
            Check::DateInPast => parse_date(raw).is_some_and(|date| date < ctx.today),
            Check::MinimumAge { years } => {
                let Some(born) = parse_date(raw) else {
                    return false;
                };
                ctx.today
                    .checked_sub_months(Months::new(years.saturating_mul(12)))
                    .is_some_and(|latest| born <= latest)
            }
            Check::DateAfter { field } => {
                let Some(date) = parse_date(raw) else {
                    return false;
                };
                match ctx.answers.str_value(field).and_then(parse_date) {
                    Some(other) => date > other,
                    None => true,
                }
            }
            Check::MatchesField { field } => ctx.answers.str_value(field) == Some(raw),
            Check::Files(_) => false,
        }
    }
}

/// Declarative constraint for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub required: bool,
    pub check: Check,
    pub message: String,
}

impl FieldRule {
    pub fn required(check: Check, message: impl Into<String>) -> Self {
        Self {
            required: true,
            check,
            message: message.into(),
        }
    }

    pub fn optional(check: Check, message: impl Into<String>) -> Self {
        Self {
            required: false,
            check,
            message: message.into(),
        }
    }

    pub fn evaluate(&self, value: Option<&AnswerValue>, ctx: &ValidationContext<'_>) -> ValidResult {
        let passed = match value {
            Some(value) if !value.is_empty() => self.check.accepts(value, ctx),
            _ => !self.required,
        };
        if passed {
            ValidResult::pass()
        } else {
            ValidResult::fail(self.message.clone())
        }
    }
}

/// Everything a rule may consult besides its own value.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub answers: &'a AnswerSet,
    pub today: NaiveDate,
}

impl<'a> ValidationContext<'a> {
    pub fn new(answers: &'a AnswerSet, today: NaiveDate) -> Self {
        Self { answers, today }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidResult {
    pub ok: bool,
    pub message: Option<String>,
}

impl ValidResult {
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
