use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::workflows::applications::{ApplicationRecord, ApplicationStatus};

/// Dashboard counters over a set of applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatistics {
    pub total: usize,
    /// Records created on the reference UTC date.
    pub today: usize,
    /// Every status is present, zero when unused.
    pub status_counts: BTreeMap<ApplicationStatus, usize>,
}

pub fn statistics(records: &[ApplicationRecord], today: NaiveDate) -> ApplicationStatistics {
    let mut status_counts: BTreeMap<_, _> = ApplicationStatus::ALL
        .into_iter()
        .map(|status| (status, 0))
        .collect();

    let mut created_today = 0;
    for record in records {
        *status_counts.entry(record.status).or_insert(0) += 1;
        if record
            .created_at
            .is_some_and(|at| at.date_naive() == today)
        {
            created_today += 1;
        }
    }

    ApplicationStatistics {
        total: records.len(),
        today: created_today,
        status_counts,
    }
}
