use super::*;
use shared::domain::{AnswerValue, FileMeta};

struct BrokenSlot;

impl DraftSlot for BrokenSlot {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable"))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("quota exceeded"))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
}

fn sample_state() -> WizardState {
    let mut state = WizardState::new(6);
    state.current_step = 3;
    state.answers.set("salutation", AnswerValue::choice("Ms"));
    state.answers.set("first_name", AnswerValue::text("Meera"));
    state.answers.set("mobile", AnswerValue::text("9876543210"));
    state.answers.set(
        "file_upload_1",
        AnswerValue::Files(vec![FileMeta::new("fees.pdf", 4096, "application/pdf")]),
    );
    state
}

#[test]
fn memory_slot_round_trips_state() {
    let store = DraftStore::new(MemorySlot::new());
    let state = sample_state();
    assert!(store.save(FlowKind::EducationFees, &state));

    let restored = store.load(FlowKind::EducationFees).expect("draft present");
    assert_eq!(restored, state);
}

#[test]
fn missing_draft_loads_as_none() {
    let store = DraftStore::new(MemorySlot::new());
    assert!(store.load(FlowKind::Rent).is_none());
    assert!(store.try_load(FlowKind::Rent).expect("read").is_none());
}

#[test]
fn flows_use_distinct_keys() {
    let slot = MemorySlot::new();
    let store = DraftStore::new(slot.clone());
    store.save(FlowKind::Rent, &sample_state());

    assert!(store.load(FlowKind::SocietyCharges).is_none());
    assert_eq!(slot.len(), 1);
}

#[test]
fn corrupt_json_falls_back_to_none() {
    let slot = MemorySlot::new();
    slot.write(FlowKind::Rent.draft_key(), "{\"version\":1,\"flow\":")
        .expect("write");
    let store = DraftStore::new(slot);

    assert!(store.load(FlowKind::Rent).is_none());
    let err = store.try_load(FlowKind::Rent).expect_err("malformed");
    assert!(err.to_string().contains("malformed draft"));
}

#[test]
fn draft_from_another_flow_is_rejected() {
    let slot = MemorySlot::new();
    let store = DraftStore::new(slot.clone());
    store.save(FlowKind::Rent, &sample_state());
    let raw = slot
        .read(FlowKind::Rent.draft_key())
        .expect("read")
        .expect("raw");
    slot.write(FlowKind::SocietyCharges.draft_key(), &raw)
        .expect("copy");

    assert!(store.load(FlowKind::SocietyCharges).is_none());
}

#[test]
fn out_of_range_step_is_rejected() {
    let mut state = sample_state();
    state.current_step = 9;
    let store = DraftStore::new(MemorySlot::new());
    store.save(FlowKind::EducationFees, &state);

    assert!(store.load(FlowKind::EducationFees).is_none());
}

#[test]
fn failing_slot_is_swallowed() {
    let store = DraftStore::new(BrokenSlot);
    assert!(!store.save(FlowKind::Rent, &sample_state()));
    assert!(store.load(FlowKind::Rent).is_none());
    assert!(!store.clear(FlowKind::Rent));
}

#[test]
fn clear_removes_the_draft() {
    let store = DraftStore::new(MemorySlot::new());
    store.save(FlowKind::SocietyCharges, &sample_state());
    assert!(store.clear(FlowKind::SocietyCharges));
    assert!(store.load(FlowKind::SocietyCharges).is_none());
    assert!(store.clear(FlowKind::SocietyCharges));
}

#[test]
fn last_writer_wins_across_handles() {
    let slot = MemorySlot::new();
    let first_tab = DraftStore::new(slot.clone());
    let second_tab = DraftStore::new(slot);

    let mut older = sample_state();
    older.current_step = 2;
    let mut newer = sample_state();
    newer.current_step = 5;
    newer.answers.set("first_name", AnswerValue::text("Ravi"));

    first_tab.save(FlowKind::EducationFees, &older);
    second_tab.save(FlowKind::EducationFees, &newer);

    let restored = first_tab.load(FlowKind::EducationFees).expect("draft");
    assert_eq!(restored, newer);
}

#[test]
fn file_slot_round_trips_and_removes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let slot = FileSlot::open(dir.path().join("drafts")).expect("open");
    slot.health_check().expect("healthy");

    slot.write("rentFormData", "{\"a\":1}").expect("write");
    assert_eq!(
        slot.read("rentFormData").expect("read").as_deref(),
        Some("{\"a\":1}")
    );
    assert!(dir.path().join("drafts").join("rentFormData.json").exists());

    slot.remove("rentFormData").expect("remove");
    assert!(slot.read("rentFormData").expect("read").is_none());
    slot.remove("rentFormData").expect("remove missing is fine");
}

#[test]
fn file_slot_rejects_path_like_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let slot = FileSlot::open(dir.path()).expect("open");

    assert!(slot.write("../escape", "x").is_err());
    assert!(slot.read("").is_err());
    assert!(validate_slot_key("maintenanceFormData").is_ok());
}

#[test]
fn file_slot_creates_nested_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b");
    let slot = FileSlot::open(&nested).expect("open");

    assert!(nested.is_dir());
    assert_eq!(slot.root(), nested.as_path());
}
