use chrono::NaiveDate;
use shared::domain::{AnswerValue, FileMeta};

use crate::{controller::StepController, effects::Command};

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("date")
}

fn text(name: &'static str, value: &str) -> (&'static str, AnswerValue) {
    (name, AnswerValue::text(value))
}

fn choice(name: &'static str, value: &str) -> (&'static str, AnswerValue) {
    (name, AnswerValue::choice(value))
}

/// Valid answers for one step of the education flow.
pub(crate) fn education_step(step: usize) -> Vec<(&'static str, AnswerValue)> {
    match step {
        1 => vec![
            choice("salutation", "Ms"),
            text("first_name", "Meera"),
            text("last_name", "Iyer"),
            text("dob", "1990-04-12"),
            text("mobile", "9876543210"),
            text("email", "meera@example.in"),
            text("pan_number", "ABCDE1234F"),
            text("whatsapp_number", "9876543210"),
            text("address_line_1", "12 MG Road"),
            text("state", "Karnataka"),
            text("city", "Bengaluru"),
            text("pin_code", "560001"),
        ],
        2 => vec![
            choice("institute_type", "School"),
            text("student_full_name", "Anika Iyer"),
            text("student_id", "STU-1024"),
            text("student_dob", "2015-08-01"),
            choice("relationship", "Mother"),
            choice("class", "4"),
            text("fees", "25000"),
            choice("fees_frequency", "Quarterly"),
            text("fees_due_date", "2024-07-10"),
            text("session_end_date", "2025-03-31"),
            choice("card_bank", "HDFC"),
        ],
        3 => vec![
            text("institute_name", "Greenwood High"),
            text("institute_email", "office@greenwood.edu.in"),
            text("institute_contact", "9123456780"),
            text("institute_address_line_1", "Sarjapur Road"),
            text("institute_state", "Karnataka"),
            text("institute_city", "Bengaluru"),
            text("institute_pin_code", "560035"),
            text("institute_pan", "AAACG1234K"),
        ],
        4 => vec![
            text("account_holder_name_1", "Greenwood Trust"),
            text("account_fee_amount_1", "25000"),
            choice("account_type_1", "Current"),
            text("account_number_1", "123456789012"),
            text("re_account_number_1", "123456789012"),
            text("bank_ifsc_1", "HDFC0001234"),
        ],
        5 => vec![(
            "file_upload_1",
            AnswerValue::Files(vec![FileMeta::new("fees.pdf", 2048, "application/pdf")]),
        )],
        _ => Vec::new(),
    }
}

pub(crate) fn fill(controller: &mut StepController, answers: Vec<(&'static str, AnswerValue)>) {
    for (name, value) in answers {
        controller.dispatch(Command::field(name, value));
    }
}

/// Fills and advances through input steps until `target` is current.
pub(crate) fn walk_education_to(controller: &mut StepController, target: usize) {
    while controller.current_step() < target {
        let step = controller.current_step();
        fill(controller, education_step(step));
        controller.dispatch(Command::Advance);
        assert_eq!(controller.current_step(), step + 1, "step {step} should be valid");
    }
}
