use shared::domain::{AnswerValue, FileMeta, FlowKind, WizardState};
use storage::{DraftStore, FileSlot};

#[test]
fn draft_survives_reopening_the_directory() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut state = WizardState::new(6);
    state.current_step = 4;
    state.answers.set("tenant_type", AnswerValue::choice("Individual"));
    state.answers.set("tenant_first_name", AnswerValue::text("Kiran"));
    state.answers.set("account_number_1", AnswerValue::text("123456789012"));
    state.answers.set("account_number_2", AnswerValue::text("987654321098"));
    state.answers.set(
        "file_upload_1",
        AnswerValue::Files(vec![FileMeta::new("agreement.pdf", 1_048_576, "application/pdf")]),
    );

    {
        let store = DraftStore::new(FileSlot::open(dir.path()).expect("open"));
        assert!(store.save(FlowKind::Rent, &state));
    }

    let reopened = DraftStore::new(FileSlot::open(dir.path()).expect("reopen"));
    let restored = reopened.load(FlowKind::Rent).expect("draft restored");
    assert_eq!(restored, state);

    assert!(reopened.clear(FlowKind::Rent));
    assert!(reopened.load(FlowKind::Rent).is_none());
}

#[test]
fn truncated_file_degrades_to_no_draft() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("maintenanceFormData.json"), "{\"version\": 1, \"fl")
        .expect("write garbage");

    let store = DraftStore::new(FileSlot::open(dir.path()).expect("open"));
    assert!(store.load(FlowKind::SocietyCharges).is_none());
}
