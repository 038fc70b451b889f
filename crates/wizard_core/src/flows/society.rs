use shared::domain::{BlockKind, FlowKind};

use super::{
    common::{
        account_number_fields, address, amount, date, email, gstin, optional, pan, phone, pin_code,
        radio, select, text, upload_template, SALUTATIONS,
    },
    FlowDefinition, StepDefinition, SummaryEntry, SummarySection,
};
use crate::{
    rules::{BlockField, BlockTemplate, InputKind},
    validator::{Check, Format},
};

const USER_TYPES: &[&str] = &["Tenant", "Owner"];
const PAYER_TYPES: &[&str] = &["Company", "Individual"];

pub(super) fn definition() -> FlowDefinition {
    FlowDefinition {
        kind: FlowKind::SocietyCharges,
        title: "Pay Society Charges",
        steps: vec![
            payer_step(),
            property_address_step(),
            property_details_step(),
            agency_step(),
            uploads_step(),
        ],
        templates: vec![
            agency_template(),
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
    StepDefinition::new("Payer Details")
        .choice(radio(
            "user_type",
            "User Type",
            USER_TYPES,
            "Please select whether you are a Tenant or Owner",
        ))
        .choice(radio(
            "payer_type",
            "Payer Type",
            PAYER_TYPES,
            "Please select Payer Type (Company or Individual)",
        ))
        .fields(vec![
            select("salutation", "Title", SALUTATIONS, "Please select a valid title (Mr, Ms, Dr)"),
            text(
                "first_name",
                "First Name",
                Format::Name,
                "First name must contain only letters (max 50 characters)",
            ),
            optional(
                "middle_name",
                "Middle Name",
                InputKind::Text,
                Check::Format(Format::Name),
                "Middle name must contain only letters (max 50 characters)",
            ),
            text(
                "last_name",
                "Last Name",
                Format::Name,
                "Last name must contain only letters (max 50 characters)",
            ),
            date(
                "dob",
                "Date of Birth",
                Check::MinimumAge { years: 18 },
                "Please enter a valid date of birth (must be at least 18 years old)",
            ),
            phone(
                "mobile",
                "Mobile Number",
                Format::Mobile,
                "Please enter a valid 10-digit Indian mobile number (starting with 6-9)",
            ),
            email("email", "Email", "Please enter a valid email address"),
            text(
                "city",
                "City",
                Format::Letters,
                "Please enter a valid city name (letters only, max 100 characters)",
            ),
            pin_code("pin", "Pin Code"),
            address(
                "address",
                "Address",
                5,
                200,
                "Please enter a valid address (5–200 characters)",
            ),
        ])
}

fn property_address_step() -> StepDefinition {
    StepDefinition::new("Property Address").fields(vec![
        text(
            "apartment_number",
            "Apartment Number",
            Format::Identifier,
            "Please enter a valid apartment number (alphanumeric, max 50 characters)",
        ),
        address(
            "address_line_1",
            "Address Line 1",
            5,
            100,
            "Please enter a valid address line 1 (5–100 characters)",
        ),
        address(
            "address_line_2",
            "Address Line 2",
            0,
            100,
            "Please enter a valid address line 2 (max 100 characters)",
        ),
        address(
            "street_landmark",
            "Street Landmark",
            0,
            100,
            "Please enter a valid street landmark (max 100 characters)",
        ),
        text(
            "state",
            "State",
            Format::Letters,
            "Please enter a valid state name (letters only, max 100 characters)",
        ),
        text(
            "property_city",
            "City",
            Format::Letters,
            "Please enter a valid city name (letters only, max 100 characters)",
        ),
        pin_code("property_pin", "Pin Code"),
    ])
}

fn property_details_step() -> StepDefinition {
    StepDefinition::new("Property Details").fields(vec![
        amount(
            "maintenance_amount",
            "Maintenance Amount",
            "Please enter a valid maintenance amount",
        ),
        pan("pan_number", "PAN Number", "Please enter a valid 10-character PAN number"),
        gstin("gstin", "GSTIN"),
    ])
}

fn agency_step() -> StepDefinition {
    StepDefinition::new("Society/Agency Details").blocks(BlockKind::BankAccount)
}

fn uploads_step() -> StepDefinition {
    StepDefinition::new("Upload Documents").blocks(BlockKind::FileSlot)
}

fn agency_template() -> BlockTemplate {
    let mut fields = vec![
        BlockField::new(
            "agency_name",
            "Society/Agency Name",
            InputKind::Text,
            Check::Format(Format::Letters),
            "Please enter a valid society/agency name (letters only, max 100 characters)",
        ),
        BlockField::new(
            "agency_phone",
            "Phone Number",
            InputKind::Phone,
            Check::Format(Format::Mobile),
            "Please enter a valid 10-digit Indian phone number (starting with 6-9)",
        ),
        BlockField::new(
            "agency_email",
            "Email",
            InputKind::Email,
            Check::Format(Format::Email),
            "Please enter a valid email address",
        ),
        BlockField::new(
            "agency_pan",
            "PAN Number",
            InputKind::Text,
            Check::Format(Format::Pan),
            "Please enter a valid 10-character PAN number",
        ),
    ];
    fields.extend(account_number_fields());
    BlockTemplate {
        kind: BlockKind::BankAccount,
        title: "Society/Agency Details",
        max_blocks: Some(3),
        fields,
    }
}

fn summary() -> Vec<SummarySection> {
    vec![
        SummarySection::Fields {
            title: "Payer Details",
            entries: vec![
                SummaryEntry::field("User Type", "user_type"),
                SummaryEntry::field("Payer Type", "payer_type"),
                SummaryEntry::joined("Name", &["salutation", "first_name", "middle_name", "last_name"]),
                SummaryEntry::field("Email", "email"),
                SummaryEntry::field("Mobile Number", "mobile"),
                SummaryEntry::field("Date of Birth", "dob"),
                SummaryEntry::field("City", "city"),
                SummaryEntry::field("Pin Code", "pin"),
                SummaryEntry::field("Address", "address"),
            ],
        },
        SummarySection::Fields {
            title: "Property Address",
            entries: vec![
                SummaryEntry::field("Apartment Number", "apartment_number"),
                SummaryEntry::field("Address Line 1", "address_line_1"),
                SummaryEntry::field("Address Line 2", "address_line_2"),
                SummaryEntry::field("Street Landmark", "street_landmark"),
                SummaryEntry::field("State", "state"),
                SummaryEntry::field("City", "property_city"),
                SummaryEntry::field("Pin Code", "property_pin"),
            ],
        },
        SummarySection::Fields {
            title: "Property Details",
            entries: vec![
                SummaryEntry::field("Maintenance Amount", "maintenance_amount"),
                SummaryEntry::field("PAN Number", "pan_number"),
                SummaryEntry::field("GSTIN", "gstin"),
            ],
        },
        SummarySection::Blocks {
            title: "Society/Agency Details",
            kind: BlockKind::BankAccount,
        },
        SummarySection::Files {
            title: "Uploaded Files",
            stem: "file_upload",
        },
    ]
}
