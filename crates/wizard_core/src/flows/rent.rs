use shared::domain::{BlockKind, FlowKind};

use super::{
    common::{
        account_number_fields, address, amount, date, email, gstin, optional, pan, phone, pin_code,
        radio, required, select, text, upload_template,
    },
    FieldSpec, FlowDefinition, StepDefinition, SummaryEntry, SummarySection,
};
use crate::{
    rules::{BlockField, BlockTemplate, InputKind},
    validator::{Check, Format},
};

const TENANT_TYPES: &[&str] = &["Individual", "Company"];
const TITLES: &[&str] = &["Mr", "Ms", "Mrs", "Dr"];
const PAYMENT_FREQUENCIES: &[&str] = &["monthly", "yearly"];
const ACCOUNT_STATES: &[&str] = &["active", "inactive"];

pub(super) fn definition() -> FlowDefinition {
    FlowDefinition {
        kind: FlowKind::Rent,
        title: "Pay Rent",
        steps: vec![tenant_step(), rental_step(), owner_step(), accounts_step(), uploads_step()],
        templates: vec![
            account_template(),
            upload_template(
                None,
                None,
                "Please upload at least one valid file (PNG, PDF, JPG, DOCX, max 5MB)",
            ),
        ],
        summary: summary(),
    }
}

fn title(name: &'static str, message: &'static str) -> FieldSpec {
    required(name, "Title", InputKind::Select(TITLES), Check::Present, message)
}

fn tenant_step() -> StepDefinition {
    StepDefinition::new("Tenant Details")
        .choice(radio(
            "tenant_type",
            "User Type",
            TENANT_TYPES,
            "Please select tenant type (Individual or Company)",
        ))
        .fields(vec![
            title("salutation", "Please select your title"),
            text(
                "tenant_first_name",
                "First Name",
                Format::SpacedName,
                "Please enter a valid first name (letters only, max 50 characters)",
            ),
            optional(
                "tenant_middle_name",
                "Middle Name",
                InputKind::Text,
                Check::Format(Format::SpacedName),
                "Please enter a valid middle name (letters only, max 50 characters)",
            ),
            text(
                "tenant_last_name",
                "Last Name",
                Format::SpacedName,
                "Please enter a valid last name (letters only, max 50 characters)",
            ),
            date(
                "tenant_dob",
                "Date of Birth",
                Check::DateInPast,
                "Please enter a valid date of birth in the past",
            ),
            phone(
                "tenant_mobile",
                "Mobile Number",
                Format::TenDigitPhone,
                "Please enter a valid 10-digit mobile number",
            ),
            email("tenant_email", "Email", "Please enter a valid email address"),
            pan("tenant_pan", "PAN Number", "Please enter a valid 10-character PAN number"),
        ])
}

fn rental_step() -> StepDefinition {
    StepDefinition::new("Rental Details").fields(vec![
        address(
            "tenant_address",
            "Address Line 1",
            5,
            200,
            "Please enter a valid address (5–200 characters)",
        ),
        text(
            "tenant_city",
            "City",
            Format::Letters,
            "Please enter a valid city name (letters only, max 100 characters)",
        ),
        pin_code("tenant_pin", "Pin Code"),
        amount("rent_amount", "Rent Amount", "Please enter a valid rent amount"),
        select(
            "payment_frequency",
            "Payment Frequency",
            PAYMENT_FREQUENCIES,
            "Please select payment frequency",
        ),
        gstin("gstin", "GSTIN"),
        date("due_date", "Due Date", Check::Date, "Please enter a valid due date"),
        date(
            "agreement_expiry",
            "Agreement Expiry",
            Check::DateAfter {
                field: "due_date".to_string(),
            },
            "Please enter a valid expiry date after the due date",
        ),
        text(
            "card_issuing_bank",
            "Card Issuing Bank",
            Format::Letters,
            "Please enter a valid bank name (letters only, max 100 characters)",
        ),
    ])
}

fn owner_step() -> StepDefinition {
    StepDefinition::new("Owner Details").fields(vec![
        title("owner_salutation", "Please select owner title"),
        text(
            "owner_first_name",
            "First Name",
            Format::SpacedName,
            "Please enter a valid owner first name (letters only, max 50 characters)",
        ),
        optional(
            "owner_middle_name",
            "Middle Name",
            InputKind::Text,
            Check::Format(Format::SpacedName),
            "Please enter a valid owner middle name (letters only, max 50 characters)",
        ),
        text(
            "owner_last_name",
            "Last Name",
            Format::SpacedName,
            "Please enter a valid owner last name (letters only, max 50 characters)",
        ),
        phone(
            "owner_mobile",
            "Mobile Number",
            Format::TenDigitPhone,
            "Please enter a valid 10-digit owner mobile number",
        ),
        email("owner_email", "Email", "Please enter a valid owner email address"),
        pan(
            "owner_pan",
            "PAN Number",
            "Please enter a valid 10-character owner PAN number",
        ),
    ])
}

fn accounts_step() -> StepDefinition {
    StepDefinition::new("Owner Accounts").blocks(BlockKind::BankAccount)
}

fn uploads_step() -> StepDefinition {
    StepDefinition::new("Upload Documents").blocks(BlockKind::FileSlot)
}

fn account_template() -> BlockTemplate {
    let mut fields = vec![
        BlockField::new(
            "account_holder_name",
            "Account Holder Name",
            InputKind::Text,
            Check::Format(Format::Letters),
            "Please enter a valid account holder name (letters only, max 100 characters)",
        ),
        BlockField::new(
            "account_rent_amount",
            "Rent Amount",
            InputKind::Number,
            Check::PositiveAmount,
            "Please enter a valid rent amount",
        ),
        BlockField::new(
            "account_type",
            "Account Type",
            InputKind::Select(ACCOUNT_STATES),
            Check::OneOf(ACCOUNT_STATES),
            "Please select account type",
        ),
        BlockField::new(
            "account_pan",
            "PAN Number",
            InputKind::Text,
            Check::Format(Format::Pan),
            "Please enter a valid 10-character PAN number",
        ),
    ];
    fields.extend(account_number_fields());
    BlockTemplate {
        kind: BlockKind::BankAccount,
        title: "Owner Accounts",
        max_blocks: None,
        fields,
    }
}

fn summary() -> Vec<SummarySection> {
    vec![
        SummarySection::Fields {
            title: "Tenant Details",
            entries: vec![
                SummaryEntry::field("User Type", "tenant_type"),
                SummaryEntry::field("Mobile Number", "tenant_mobile"),
                SummaryEntry::joined(
                    "Name",
                    &[
                        "salutation",
                        "tenant_first_name",
                        "tenant_middle_name",
                        "tenant_last_name",
                    ],
                ),
                SummaryEntry::field("Email", "tenant_email"),
                SummaryEntry::field("PAN Number", "tenant_pan"),
                SummaryEntry::field("DOB", "tenant_dob"),
            ],
        },
        SummarySection::Fields {
            title: "Rental Details",
            entries: vec![
                SummaryEntry::field("Address Line 1", "tenant_address"),
                SummaryEntry::field("City", "tenant_city"),
                SummaryEntry::field("Pin Code", "tenant_pin"),
                SummaryEntry::field("Rent Amount", "rent_amount"),
                SummaryEntry::field("Payment Frequency", "payment_frequency"),
            ],
        },
        SummarySection::Fields {
            title: "Owner Details",
            entries: vec![
                SummaryEntry::joined(
                    "Name",
                    &[
                        "owner_salutation",
                        "owner_first_name",
                        "owner_middle_name",
                        "owner_last_name",
                    ],
                ),
                SummaryEntry::field("Mobile Number", "owner_mobile"),
                SummaryEntry::field("Email", "owner_email"),
                SummaryEntry::field("PAN Number", "owner_pan"),
            ],
        },
        SummarySection::Blocks {
            title: "Owner Accounts",
            kind: BlockKind::BankAccount,
        },
        SummarySection::Files {
            title: "Uploaded Files",
            stem: "file_upload",
        },
    ]
}
