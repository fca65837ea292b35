use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

use super::criteria::SortKey;
use crate::workflows::applications::ApplicationRecord;

/// Ordered copy of `records`; the input is left untouched.
///
/// A missing `created_at` counts as the earliest possible instant: first under `oldest`,
/// last under `recent`, and last among equal names.
pub fn sort_applications(records: &[ApplicationRecord], key: SortKey) -> Vec<ApplicationRecord> {
    let mut sorted = records.to_vec();
    let mut names = NameCollator::new();
    sorted.sort_by(|a, b| compare(&mut names, a, b, key));
    sorted
}

pub fn compare(
    names: &mut NameCollator,
    a: &ApplicationRecord,
    b: &ApplicationRecord,
    key: SortKey,
) -> Ordering {
    let newest_first = || b.created_at.cmp(&a.created_at);
    match key {
        SortKey::Recent => newest_first(),
        SortKey::Oldest => a.created_at.cmp(&b.created_at),
        SortKey::Az => names.compare(&a.name, &b.name).then_with(newest_first),
        SortKey::Za => names.compare(&b.name, &a.name).then_with(newest_first),
    }
}

/// Unicode collation (CLDR root order) over case-folded, trimmed names.
///
/// Names differing only in case compare equal, so the caller's tie-break decides.
pub struct NameCollator {
    collator: Collator,
}

impl NameCollator {
    pub fn new() -> Self {
        Self {
            collator: Collator::new(Tailoring::Cldr(Locale::Root), false, false),
        }
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        self.collator.collate(a.as_str(), b.as_str())
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}
