use super::*;

#[test]
fn set_keeps_the_whole_value() {
    assert_eq!(
        parse_line("set address_line_1 12 MG Road, Indiranagar").expect("parse"),
        Line::Dispatch(Command::field(
            "address_line_1",
            AnswerValue::text("12 MG Road, Indiranagar")
        ))
    );
}

#[test]
fn set_without_value_clears_the_field() {
    assert_eq!(
        parse_line("set middle_name").expect("parse"),
        Line::Dispatch(Command::field("middle_name", AnswerValue::text("")))
    );
    assert_eq!(
        parse_line("set"),
        Err(LineError::Usage("set <field> <value...>"))
    );
}

#[test]
fn choose_records_a_choice() {
    assert_eq!(
        parse_line("choose institute_type School").expect("parse"),
        Line::Dispatch(Command::field("institute_type", AnswerValue::choice("School")))
    );
}

#[test]
fn attach_reads_file_metadata() {
    let line = parse_line("attach file_upload_1 fees.pdf:application/pdf:2048 id.png:image/png:512")
        .expect("parse");
    assert_eq!(
        line,
        Line::Dispatch(Command::field(
            "file_upload_1",
            AnswerValue::Files(vec![
                FileMeta::new("fees.pdf", 2048, "application/pdf"),
                FileMeta::new("id.png", 512, "image/png"),
            ])
        ))
    );
    assert_eq!(
        parse_line("attach file_upload_1 fees.pdf:2048"),
        Err(LineError::BadFile("fees.pdf:2048".to_string()))
    );
}

#[test]
fn navigation_words() {
    assert_eq!(parse_line("next").expect("parse"), Line::Dispatch(Command::Advance));
    assert_eq!(parse_line("  BACK ").expect("parse"), Line::Dispatch(Command::Retreat));
    assert_eq!(
        parse_line("jump 4").expect("parse"),
        Line::Dispatch(Command::JumpToStep(4))
    );
    assert_eq!(parse_line("jump four"), Err(LineError::BadStep("four".to_string())));
    assert_eq!(parse_line("submit").expect("parse"), Line::Dispatch(Command::Submit));
}

#[test]
fn block_commands_name_a_kind() {
    assert_eq!(
        parse_line("add account").expect("parse"),
        Line::Dispatch(Command::AddBlock(BlockKind::BankAccount))
    );
    assert_eq!(
        parse_line("remove file 3").expect("parse"),
        Line::Dispatch(Command::RemoveBlock {
            kind: BlockKind::FileSlot,
            index: 3
        })
    );
    assert!(matches!(parse_line("add locker"), Err(LineError::Domain(_))));
    assert_eq!(
        parse_line("remove account"),
        Err(LineError::Usage("remove <account|file> <index>"))
    );
}

#[test]
fn local_commands_and_unknown_words() {
    assert_eq!(parse_line("").expect("parse"), Line::Blank);
    assert_eq!(parse_line("summary").expect("parse"), Line::Summary);
    assert_eq!(parse_line("status").expect("parse"), Line::Status);
    assert_eq!(parse_line("exit").expect("parse"), Line::Quit);
    assert_eq!(
        parse_line("reset"),
        Err(LineError::UnknownCommand("reset".to_string()))
    );
}
