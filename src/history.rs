use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::types::DrawResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    draws: Vec<DrawResult>,
    duplicates_dropped: usize,
}

impl History {
    /// Keys every record by date. The first record seen for a date is kept and
    /// later ones are dropped, so the caller's iteration order decides ties.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DrawResult>,
    {
        let mut by_date: BTreeMap<String, DrawResult> = BTreeMap::new();
        let mut duplicates_dropped = 0;

        for record in records {
            match by_date.entry(record.date.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(_) => duplicates_dropped += 1,
            }
        }

        Self {
            draws: by_date.into_values().rev().collect(),
            duplicates_dropped,
        }
    }

    pub fn draws(&self) -> &[DrawResult] {
        &self.draws
    }

    pub fn recent(&self, limit: usize) -> &[DrawResult] {
        &self.draws[..self.draws.len().min(limit)]
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    pub fn latest(&self) -> Option<&DrawResult> {
        self.draws.first()
    }
}
