use std::{collections::BTreeMap, ops::RangeInclusive};

use shared::{
    domain::{AnswerSet, BlockKind},
    error::WizardError,
};
use tracing::warn;

use crate::rules::BlockTemplate;

/// Answer key of a repeatable field: `{stem}_{index}`.
pub fn field_name(stem: &str, index: usize) -> String {
    format!("{stem}_{index}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockGroup {
    count: usize,
    max: Option<usize>,
}

/// Live block indices per repeatable group. Indices are always `1..=count`:
/// removing a block shifts the ones after it down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockArena {
    groups: BTreeMap<BlockKind, BlockGroup>,
}

/// Key moves needed to close the gap left by a removed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renumbering {
    pub kind: BlockKind,
    pub removed: usize,
    /// `(from, to)` pairs in ascending order.
    pub moves: Vec<(usize, usize)>,
}

impl Renumbering {
    pub fn apply(&self, answers: &mut AnswerSet, template: &BlockTemplate) {
        for field in &template.fields {
            answers.remove(&field_name(field.stem, self.removed));
            for &(from, to) in &self.moves {
                answers.rename(&field_name(field.stem, from), field_name(field.stem, to));
            }
        }
    }
}

impl BlockArena {
    /// One block per template.
    pub fn new<'a>(templates: impl IntoIterator<Item = &'a BlockTemplate>) -> Self {
        let groups = templates
            .into_iter()
            .map(|template| {
                (
                    template.kind,
                    BlockGroup {
                        count: 1,
                        max: template.max_blocks,
                    },
                )
            })
            .collect();
        Self { groups }
    }

    pub fn kinds(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.groups.keys().copied()
    }

    pub fn count(&self, kind: BlockKind) -> usize {
        self.groups.get(&kind).map_or(0, |group| group.count)
    }

    pub fn max(&self, kind: BlockKind) -> Option<usize> {
        self.groups.get(&kind).and_then(|group| group.max)
    }

    pub fn indices(&self, kind: BlockKind) -> RangeInclusive<usize> {
        1..=self.count(kind)
    }

    pub fn add_block(&mut self, kind: BlockKind) -> Result<usize, WizardError> {
        let group = self.group_mut(kind)?;
        if let Some(max) = group.max {
            if group.count >= max {
                return Err(WizardError::BlockLimitReached { kind, max });
            }
        }
        group.count += 1;
        Ok(group.count)
    }

    pub fn remove_block(&mut self, kind: BlockKind, index: usize) -> Result<Renumbering, WizardError> {
        let group = self.group_mut(kind)?;
        if index == 0 || index > group.count {
            return Err(WizardError::UnknownBlock { kind, index });
        }
        if group.count == 1 {
            return Err(WizardError::LastBlock { kind });
        }
        let moves = ((index + 1)..=group.count)
            .map(|from| (from, from - 1))
            .collect();
        group.count -= 1;
        Ok(Renumbering {
            kind,
            removed: index,
            moves,
        })
    }

    /// Sizes each group from the highest index present in `answers`. Keys of
    /// blocks beyond a group's cap are dropped so every stored block key
    /// belongs to a live block.
    pub fn restore_from_answers<'a>(
        &mut self,
        answers: &mut AnswerSet,
        templates: impl IntoIterator<Item = &'a BlockTemplate>,
    ) {
        for template in templates {
            let Some(group) = self.groups.get_mut(&template.kind) else {
                continue;
            };
            let highest = template
                .fields
                .iter()
                .filter_map(|field| answers.indices_with_stem(field.stem).last().copied())
                .max()
                .unwrap_or(1);
            let count = match group.max {
                Some(max) if highest > max => {
                    warn!(kind = %template.kind, found = highest, max, "draft holds more blocks than allowed; dropping the extra blocks");
                    max
                }
                _ => highest,
            };
            group.count = count.max(1);

            for field in &template.fields {
                let stale: Vec<usize> = answers
                    .indices_with_stem(field.stem)
                    .into_iter()
                    .filter(|index| *index > group.count)
                    .collect();
                for index in stale {
                    answers.remove(&field_name(field.stem, index));
                }
            }
        }
    }

    pub fn reset(&mut self) {
        for group in self.groups.values_mut() {
            group.count = 1;
        }
    }

    fn group_mut(&mut self, kind: BlockKind) -> Result<&mut BlockGroup, WizardError> {
        self.groups
            .get_mut(&kind)
            .ok_or_else(|| WizardError::UnknownBlockKind(kind.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/blocks_tests.rs"]
mod tests;
