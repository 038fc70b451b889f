use super::*;
use crate::flows::FlowDefinition;
use shared::domain::{FileMeta, FlowKind};

fn group<'a>(groups: &'a [SummaryGroup], title: &str) -> &'a SummaryGroup {
    groups
        .iter()
        .find(|group| group.title == title)
        .expect("group present")
}

fn value<'a>(group: &'a SummaryGroup, label: &str) -> Option<&'a str> {
    group
        .items
        .iter()
        .find(|item| item.label == label)
        .map(|item| item.value.as_str())
}

#[test]
fn rent_name_joins_title_and_name_parts() {
    let flow = FlowDefinition::for_kind(FlowKind::Rent);
    let mut answers = AnswerSet::new();
    answers.set("salutation", AnswerValue::choice("Mr"));
    answers.set("tenant_first_name", AnswerValue::text("Arjun"));
    answers.set("tenant_middle_name", AnswerValue::text(""));
    answers.set("tenant_last_name", AnswerValue::text("Rao"));
    answers.set("tenant_type", AnswerValue::choice("Individual"));

    let groups = project(&answers, &flow.summary, &flow.templates);
    let tenant = group(&groups, "Tenant Details");
    assert_eq!(value(tenant, "Name"), Some("Mr Arjun Rao"));
    assert_eq!(value(tenant, "User Type"), Some("Individual"));
    assert_eq!(value(tenant, "Email"), None);
}

#[test]
fn empty_values_are_omitted() {
    let flow = FlowDefinition::for_kind(FlowKind::SocietyCharges);
    let mut answers = AnswerSet::new();
    answers.set("gstin", AnswerValue::text("  "));
    answers.set("pan_number", AnswerValue::text("ABCDE1234F"));

    let groups = project(&answers, &flow.summary, &flow.templates);
    let details = group(&groups, "Property Details");
    assert_eq!(details.items.len(), 1);
    assert_eq!(value(details, "PAN Number"), Some("ABCDE1234F"));
}

#[test]
fn blocks_are_found_by_scanning_keys() {
    let flow = FlowDefinition::for_kind(FlowKind::EducationFees);
    let mut answers = AnswerSet::new();
    answers.set("account_holder_name_1", AnswerValue::text("Meera Iyer"));
    answers.set("account_number_1", AnswerValue::text("123456789"));
    answers.set("re_account_number_1", AnswerValue::text("123456789"));
    answers.set("account_holder_name_3", AnswerValue::text("Ravi Iyer"));

    let groups = project(&answers, &flow.summary, &flow.templates);
    let accounts = group(&groups, "Account Details");
    assert_eq!(value(accounts, "Account Holder Name #1"), Some("Meera Iyer"));
    assert_eq!(value(accounts, "Account Number #1"), Some("123456789"));
    assert_eq!(value(accounts, "Account Holder Name #3"), Some("Ravi Iyer"));
    assert!(accounts
        .items
        .iter()
        .all(|item| !item.label.starts_with("Re-enter")));
}

#[test]
fn uploads_show_file_names_only() {
    let flow = FlowDefinition::for_kind(FlowKind::EducationFees);
    let mut answers = AnswerSet::new();
    answers.set(
        "file_upload_1",
        AnswerValue::Files(vec![
            FileMeta::new("fees.pdf", 2048, "application/pdf"),
            FileMeta::new("id.png", 1024, "image/png"),
        ]),
    );
    answers.set(
        "file_upload_2",
        AnswerValue::Files(vec![FileMeta::new("receipt.jpeg", 512, "image/jpeg")]),
    );

    let groups = project(&answers, &flow.summary, &flow.templates);
    let files = group(&groups, "Uploaded Files");
    let listed: Vec<_> = files
        .items
        .iter()
        .map(|item| (item.label.as_str(), item.value.as_str()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Upload #1", "fees.pdf"),
            ("Upload #1", "id.png"),
            ("Upload #2", "receipt.jpeg"),
        ]
    );
}

#[test]
fn groups_follow_flow_order() {
    let flow = FlowDefinition::for_kind(FlowKind::EducationFees);
    let groups = project(&AnswerSet::new(), &flow.summary, &flow.templates);
    let titles: Vec<_> = groups.iter().map(|group| group.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Payer Details",
            "Student Details",
            "Institute Details",
            "Account Details",
            "Uploaded Files"
        ]
    );
    assert!(groups.iter().all(|group| group.items.is_empty()));
}
