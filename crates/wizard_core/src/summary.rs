use std::collections::BTreeSet;

use shared::{
    domain::{AnswerSet, AnswerValue},
    protocol::{SummaryGroup, SummaryItem},
};

use crate::{
    flows::{SummaryEntry, SummarySection},
    rules::BlockTemplate,
};

/// Builds the review page from the current answers. Blank values are left
/// out and attachments are listed by file name only.
pub fn project(
    answers: &AnswerSet,
    sections: &[SummarySection],
    templates: &[BlockTemplate],
) -> Vec<SummaryGroup> {
    sections
        .iter()
        .map(|section| match section {
            SummarySection::Fields { title, entries } => SummaryGroup {
                title: title.to_string(),
                items: entries
                    .iter()
                    .filter_map(|entry| entry_item(answers, entry))
                    .collect(),
            },
            SummarySection::Blocks { title, kind } => {
                let template = templates.iter().find(|template| template.kind == *kind);
                SummaryGroup {
                    title: title.to_string(),
                    items: template
                        .map(|template| block_items(answers, template))
                        .unwrap_or_default(),
                }
            }
            SummarySection::Files { title, stem } => SummaryGroup {
                title: title.to_string(),
                items: file_items(answers, stem),
            },
        })
        .collect()
}

fn entry_item(answers: &AnswerSet, entry: &SummaryEntry) -> Option<SummaryItem> {
    let value = entry
        .keys
        .iter()
        .filter_map(|key| display_value(answers.get(key)?))
        .collect::<Vec<_>>()
        .join(" ");
    (!value.is_empty()).then(|| SummaryItem {
        label: entry.label.to_string(),
        value,
    })
}

/// Blocks are found by scanning the answer keys, not by the live block count.
fn block_items(answers: &AnswerSet, template: &BlockTemplate) -> Vec<SummaryItem> {
    let indices: BTreeSet<usize> = template
        .fields
        .iter()
        .flat_map(|field| answers.indices_with_stem(field.stem))
        .collect();
    indices
        .into_iter()
        .flat_map(|index| {
            template
                .fields
                .iter()
                .filter(|field| field.summarized)
                .filter_map(move |field| {
                    let value = display_value(answers.get(&field.name(index))?)?;
                    Some(SummaryItem {
                        label: format!("{} #{index}", field.label),
                        value,
                    })
                })
        })
        .collect()
}

fn file_items(answers: &AnswerSet, stem: &str) -> Vec<SummaryItem> {
    answers
        .indices_with_stem(stem)
        .into_iter()
        .flat_map(|index| {
            answers
                .files(&format!("{stem}_{index}"))
                .iter()
                .map(move |file| SummaryItem {
                    label: format!("Upload #{index}"),
                    value: file.name.clone(),
                })
        })
        .collect()
}

fn display_value(value: &AnswerValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match value {
        AnswerValue::Text(text) | AnswerValue::Choice(text) => Some(text.trim().to_string()),
        AnswerValue::Files(files) => Some(
            files
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

#[cfg(test)]
#[path = "tests/summary_tests.rs"]
mod tests;
