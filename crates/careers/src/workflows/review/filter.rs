use super::criteria::FilterCriteria;
use crate::workflows::applications::ApplicationRecord;

/// Keep the records matching every active predicate, preserving their relative order.
pub fn filter_applications(
    records: &[ApplicationRecord],
    criteria: &FilterCriteria,
) -> Vec<ApplicationRecord> {
    let term = criteria.search_term();
    records
        .iter()
        .filter(|record| matches_with_term(record, criteria, term.as_deref()))
        .cloned()
        .collect()
}

pub fn matches_criteria(record: &ApplicationRecord, criteria: &FilterCriteria) -> bool {
    matches_with_term(record, criteria, criteria.search_term().as_deref())
}

fn matches_with_term(
    record: &ApplicationRecord,
    criteria: &FilterCriteria,
    term: Option<&str>,
) -> bool {
    if let Some(vacancy_id) = &criteria.vacancy_id {
        if record.vacancy_id.as_deref() != Some(vacancy_id.as_str()) {
            return false;
        }
    }

    if let Some(status) = criteria.status {
        if record.status != status {
            return false;
        }
    }

    // Records without a timestamp never satisfy a date bound.
    if let Some(from) = criteria.from {
        if !record.created_at.is_some_and(|at| at >= from) {
            return false;
        }
    }

    if let Some(to) = criteria.to {
        if !record.created_at.is_some_and(|at| at <= to) {
            return false;
        }
    }

    match term {
        Some(term) => [&record.name, &record.email, &record.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(term)),
        None => true,
    }
}
