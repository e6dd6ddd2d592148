//! First-appearance grouping of record indices by provider and date.
//!
//! Audit passes walk (provider, date) groups in the order they first appear
//! in the input so finding order is stable and hash-independent.

use chrono::NaiveDate;

use crate::models::TimesheetRecord;

/// Groups the given record indices by (provider_id, date_of_service).
///
/// Providers are ordered by first appearance among the indices; dates are
/// ordered by first appearance within each provider; indices within a group
/// keep input order.
pub(crate) fn provider_date_order(
    records: &[TimesheetRecord],
    indices: &[usize],
) -> Vec<(String, NaiveDate, Vec<usize>)> {
    let mut groups: Vec<(String, NaiveDate, Vec<usize>)> = Vec::new();

    for &index in indices {
        let record = &records[index];
        match groups.iter_mut().find(|(provider_id, date, _)| {
            *provider_id == record.provider_id && *date == record.date_of_service
        }) {
            Some((_, _, members)) => members.push(index),
            None => groups.push((
                record.provider_id.clone(),
                record.date_of_service,
                vec![index],
            )),
        }
    }

    // Stable sort: keep provider first-appearance order, but gather all of a
    // provider's dates together the way the source data is usually shaped.
    let provider_rank = |provider_id: &str| -> usize {
        indices
            .iter()
            .position(|&i| records[i].provider_id == provider_id)
            .unwrap_or(usize::MAX)
    };
    groups.sort_by_key(|(provider_id, _, members)| {
        (provider_rank(provider_id), members[0])
    });

    groups
}
