use shared::domain::BlockKind;

use super::FieldSpec;
use crate::{
    rules::{BlockField, BlockTemplate, InputKind, Presence},
    validator::{Check, FieldRule, FilePolicy, Format},
};

pub(super) const SALUTATIONS: &[&str] = &["Mr", "Ms", "Dr"];

pub(super) fn required(
    name: &'static str,
    label: &'static str,
    input: InputKind,
    check: Check,
    message: &'static str,
) -> FieldSpec {
    FieldSpec::new(name, label, input, FieldRule::required(check, message))
}

pub(super) fn optional(
    name: &'static str,
    label: &'static str,
    input: InputKind,
    check: Check,
    message: &'static str,
) -> FieldSpec {
    FieldSpec::new(name, label, input, FieldRule::optional(check, message))
}

pub(super) fn text(
    name: &'static str,
    label: &'static str,
    format: Format,
    message: &'static str,
) -> FieldSpec {
    required(name, label, InputKind::Text, Check::Format(format), message)
}

pub(super) fn email(name: &'static str, label: &'static str, message: &'static str) -> FieldSpec {
    required(name, label, InputKind::Email, Check::Format(Format::Email), message)
}

pub(super) fn phone(
    name: &'static str,
    label: &'static str,
    format: Format,
    message: &'static str,
) -> FieldSpec {
    required(name, label, InputKind::Phone, Check::Format(format), message)
}

pub(super) fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    message: &'static str,
) -> FieldSpec {
    required(name, label, InputKind::Select(options), Check::OneOf(options), message)
}

pub(super) fn radio(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    message: &'static str,
) -> FieldSpec {
    required(name, label, InputKind::Radio(options), Check::OneOf(options), message)
}

pub(super) fn date(name: &'static str, label: &'static str, check: Check, message: &'static str) -> FieldSpec {
    required(name, label, InputKind::Date, check, message)
}

pub(super) fn amount(name: &'static str, label: &'static str, message: &'static str) -> FieldSpec {
    required(name, label, InputKind::Number, Check::PositiveAmount, message)
}

pub(super) fn address(
    name: &'static str,
    label: &'static str,
    min: usize,
    max: usize,
    message: &'static str,
) -> FieldSpec {
    let check = Check::Length { min, max };
    if min == 0 {
        optional(name, label, InputKind::TextArea, check, message)
    } else {
        required(name, label, InputKind::TextArea, check, message)
    }
}

pub(super) fn pin_code(name: &'static str, label: &'static str) -> FieldSpec {
    text(name, label, Format::PinCode, "Please enter a valid 6-digit pin code")
}

pub(super) fn pan(name: &'static str, label: &'static str, message: &'static str) -> FieldSpec {
    text(name, label, Format::Pan, message)
}

pub(super) fn gstin(name: &'static str, label: &'static str) -> FieldSpec {
    optional(
        name,
        label,
        InputKind::Text,
        Check::Format(Format::Gstin),
        "Please enter a valid 15-character GSTIN",
    )
}

/// Account number, its confirmation and the branch IFSC.
pub(super) fn account_number_fields() -> [BlockField; 3] {
    [
        BlockField::new(
            "account_number",
            "Account Number",
            InputKind::Text,
            Check::Format(Format::AccountNumber),
            "Please enter a valid account number (9–18 digits)",
        ),
        BlockField::new(
            "re_account_number",
            "Re-enter Account Number",
            InputKind::Text,
            Check::MatchesField {
                field: "account_number".to_string(),
            },
            "Account numbers do not match",
        )
        .hidden_in_summary(),
        BlockField::new(
            "bank_ifsc",
            "IFSC Code",
            InputKind::Text,
            Check::Format(Format::Ifsc),
            "Please enter a valid 11-character IFSC code",
        ),
    ]
}

/// Attachment slots; only the first one must be filled.
pub(super) fn upload_template(
    max_slots: Option<usize>,
    max_files: Option<usize>,
    message: &'static str,
) -> BlockTemplate {
    BlockTemplate {
        kind: BlockKind::FileSlot,
        title: "Upload Documents",
        max_blocks: max_slots,
        fields: vec![BlockField::new(
            "file_upload",
            "Upload",
            InputKind::Files,
            Check::Files(FilePolicy::uploads(max_files)),
            message,
        )
        .presence(Presence::FirstBlockOnly)],
    }
}
