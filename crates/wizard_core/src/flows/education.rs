use shared::domain::{BlockKind, FlowKind};

use super::{
    common::{
        account_number_fields, address, amount, date, email, gstin, optional, pan, phone, pin_code,
        radio, required, select, text, upload_template, SALUTATIONS,
    },
    FlowDefinition, StepDefinition, SummaryEntry, SummarySection,
};
use crate::{
    rules::{BlockField, BlockTemplate, InputKind},
    validator::{Check, Format},
};

const INSTITUTE_TYPES: &[&str] = &["School", "College", "University"];
const RELATIONSHIPS: &[&str] = &["Mother", "Father", "Grandparent", "Uncle", "Aunt", "Other"];
const CLASSES: &[&str] = &[
    "Nursery", "KG", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "Undergraduate",
    "Postgraduate",
];
const FEE_FREQUENCIES: &[&str] = &["Monthly", "Quarterly", "Semi-Annually", "Annually", "Other"];
const CARD_BANKS: &[&str] = &[
    "HDFC",
    "HSBC",
    "Payzapp",
    "Kotak Mahindra",
    "Yes Bank",
    "Standard Chartered",
    "RBL",
    "IndusInd",
    "ICICI",
];
const ACCOUNT_TYPES: &[&str] = &["Savings", "Current"];

const MOBILE_MESSAGE: &str = "Please enter a valid 10-digit Indian mobile number (starting with 6-9)";

pub(super) fn definition() -> FlowDefinition {
    FlowDefinition {
        kind: FlowKind::EducationFees,
        title: "Pay Education Fees",
        steps: vec![payer_step(), student_step(), institute_step(), accounts_step(), uploads_step()],
        templates: vec![
            account_template(),
            upload_template(
                Some(5),
                Some(5),
                "Please upload at least one valid file (PNG, PDF, JPG, DOCX, max 5MB, max 5 files) for upload #{index}",
            ),
        ],
        summary: summary(),
    }
}

fn payer_step() -> StepDefinition {
    StepDefinition::new("Payer Details").fields(vec![
        select("salutation", "Title", SALUTATIONS, "Please select a valid title (Mr, Ms, Dr)"),
        text(
            "first_name",
            "First Name",
            Format::Name,
            "Please enter a valid first name (letters only, max 50 characters)",
        ),
        optional(
            "middle_name",
            "Middle Name",
            InputKind::Text,
            Check::Format(Format::Name),
            "Please enter a valid middle name (letters only, max 50 characters)",
        ),
        text(
            "last_name",
            "Last Name",
            Format::Name,
            "Please enter a valid last name (letters only, max 50 characters)",
        ),
        date(
            "dob",
            "Date of Birth",
            Check::MinimumAge { years: 18 },
            "Please enter a valid date of birth (must be at least 18 years old)",
        ),
        phone("mobile", "Mobile Number", Format::Mobile, MOBILE_MESSAGE),
        email("email", "Email", "Please enter a valid email address"),
        pan("pan_number", "PAN Number", "Please enter a valid 10-character PAN number"),
        gstin("gstin", "GSTIN"),
        optional(
            "alternate_number",
            "Alternate Number",
            InputKind::Phone,
            Check::Format(Format::Mobile),
            MOBILE_MESSAGE,
        ),
        phone("whatsapp_number", "WhatsApp Number", Format::Mobile, MOBILE_MESSAGE),
        address(
            "address_line_1",
            "Address Line 1",
            5,
            200,
            "Please enter a valid address (5–200 characters)",
        ),
        address(
            "address_line_2",
            "Address Line 2",
            0,
            200,
            "Please enter a valid address (max 200 characters)",
        ),
        text(
            "state",
            "State",
            Format::Letters,
            "Please enter a valid state name (letters only, max 100 characters)",
        ),
        text(
            "city",
            "City",
            Format::Letters,
            "Please enter a valid city name (letters only, max 100 characters)",
        ),
        pin_code("pin_code", "Pin Code"),
    ])
}

fn student_step() -> StepDefinition {
    StepDefinition::new("Student Details")
        .choice(radio(
            "institute_type",
            "Institute Type",
            INSTITUTE_TYPES,
            "Please select an institute type",
        ))
        .fields(vec![
            text(
                "student_full_name",
                "Student Name",
                Format::Letters,
                "Please enter a valid name (letters only, max 100 characters)",
            ),
            text(
                "student_id",
                "Student ID",
                Format::Identifier,
                "Please enter a valid student ID (alphanumeric, max 50 characters)",
            ),
            date("student_dob", "Student DOB", Check::Date, "Please enter a valid date of birth"),
            select(
                "relationship",
                "Relationship",
                RELATIONSHIPS,
                "Please select a valid relationship",
            ),
            required(
                "class",
                "Class",
                InputKind::Select(CLASSES),
                Check::Present,
                "Please select a valid class",
            ),
            amount("fees", "Fees", "Please enter a valid fee amount (greater than 0)"),
            select(
                "fees_frequency",
                "Fees Frequency",
                FEE_FREQUENCIES,
                "Please select a valid frequency",
            ),
            date("fees_due_date", "Fees Due Date", Check::Date, "Please enter a valid due date"),
            date(
                "session_end_date",
                "Session End Date",
                Check::Date,
                "Please enter a valid session end date",
            ),
            select("card_bank", "Card Bank", CARD_BANKS, "Please select a valid bank"),
        ])
}

fn institute_step() -> StepDefinition {
    StepDefinition::new("Institute Details").fields(vec![
        text(
            "institute_name",
            "Institute Name",
            Format::Letters,
            "Please enter a valid institute name (letters only, max 100 characters)",
        ),
        email("institute_email", "Institute Email", "Please enter a valid email address"),
        optional(
            "institute_website",
            "Website",
            InputKind::Url,
            Check::Format(Format::Website),
            "Please enter a valid URL",
        ),
        phone("institute_contact", "Contact Number", Format::Mobile, MOBILE_MESSAGE),
        address(
            "institute_address_line_1",
            "Address Line 1",
            5,
            200,
            "Please enter a valid address (5–200 characters)",
        ),
        address(
            "institute_address_line_2",
            "Address Line 2",
            0,
            200,
            "Please enter a valid address (max 200 characters)",
        ),
        text(
            "institute_state",
            "State",
            Format::Letters,
            "Please enter a valid state name (letters only, max 100 characters)",
        ),
        text(
            "institute_city",
            "City",
            Format::Letters,
            "Please enter a valid city name (letters only, max 100 characters)",
        ),
        pin_code("institute_pin_code", "Pin Code"),
        pan("institute_pan", "PAN Number", "Please enter a valid 10-character PAN number"),
        gstin("institute_gstin", "GSTIN"),
        optional(
            "institute_reg_number",
            "Registration Number",
            InputKind::Text,
            Check::Format(Format::Identifier),
            "Please enter a valid registration number (alphanumeric, max 50 characters)",
        ),
    ])
}

fn accounts_step() -> StepDefinition {
    StepDefinition::new("Account Details").blocks(BlockKind::BankAccount)
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
            "Please enter a valid name (letters only, max 100 characters)",
        ),
        BlockField::new(
            "account_fee_amount",
            "Fee Amount",
            InputKind::Number,
            Check::PositiveAmount,
            "Please enter a valid fee amount (greater than 0)",
        ),
        BlockField::new(
            "account_type",
            "Account Type",
            InputKind::Select(ACCOUNT_TYPES),
            Check::OneOf(ACCOUNT_TYPES),
            "Please select a valid account type",
        ),
    ];
    fields.extend(account_number_fields());
    BlockTemplate {
        kind: BlockKind::BankAccount,
        title: "Account Details",
        max_blocks: None,
        fields,
    }
}

fn summary() -> Vec<SummarySection> {
    vec![
        SummarySection::Fields {
            title: "Payer Details",
            entries: vec![
                SummaryEntry::joined("Name", &["salutation", "first_name", "middle_name", "last_name"]),
                SummaryEntry::field("Date of Birth", "dob"),
                SummaryEntry::field("Mobile Number", "mobile"),
                SummaryEntry::field("Email", "email"),
                SummaryEntry::field("PAN Number", "pan_number"),
                SummaryEntry::field("GSTIN", "gstin"),
                SummaryEntry::field("Alternate Number", "alternate_number"),
                SummaryEntry::field("WhatsApp Number", "whatsapp_number"),
                SummaryEntry::field("Address Line 1", "address_line_1"),
                SummaryEntry::field("Address Line 2", "address_line_2"),
                SummaryEntry::field("State", "state"),
                SummaryEntry::field("City", "city"),
                SummaryEntry::field("Pin Code", "pin_code"),
            ],
        },
        SummarySection::Fields {
            title: "Student Details",
            entries: vec![
                SummaryEntry::field("Institute Type", "institute_type"),
                SummaryEntry::field("Student Name", "student_full_name"),
                SummaryEntry::field("Student ID", "student_id"),
                SummaryEntry::field("Student DOB", "student_dob"),
                SummaryEntry::field("Relationship", "relationship"),
                SummaryEntry::field("Class", "class"),
                SummaryEntry::field("Fees", "fees"),
                SummaryEntry::field("Fees Frequency", "fees_frequency"),
                SummaryEntry::field("Fees Due Date", "fees_due_date"),
                SummaryEntry::field("Session End Date", "session_end_date"),
                SummaryEntry::field("Card Bank", "card_bank"),
            ],
        },
        SummarySection::Fields {
            title: "Institute Details",
            entries: vec![
                SummaryEntry::field("Institute Name", "institute_name"),
                SummaryEntry::field("Email", "institute_email"),
                SummaryEntry::field("Website", "institute_website"),
                SummaryEntry::field("Contact Number", "institute_contact"),
                SummaryEntry::joined(
                    "Address",
                    &["institute_address_line_1", "institute_address_line_2"],
                ),
                SummaryEntry::field("State", "institute_state"),
                SummaryEntry::field("City", "institute_city"),
                SummaryEntry::field("Pin Code", "institute_pin_code"),
                SummaryEntry::field("PAN Number", "institute_pan"),
                SummaryEntry::field("GSTIN", "institute_gstin"),
                SummaryEntry::field("Registration Number", "institute_reg_number"),
            ],
        },
        SummarySection::Blocks {
            title: "Account Details",
            kind: BlockKind::BankAccount,
        },
        SummarySection::Files {
            title: "Uploaded Files",
            stem: "file_upload",
        },
    ]
}
