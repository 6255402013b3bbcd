//! Aggregate statistics over a filtered facility subset.

use facility_map_search_models::{FacilityMatch, SearchSummary};

/// Computes the summary statistics for `matches`.
///
/// Only the given subset is considered. Means over nothing are `None`
/// rather than NaN; mean capacity averages only facilities that report a
/// capacity, while the total treats unreported capacity as zero.
#[must_use]
pub fn summarize(matches: &[FacilityMatch]) -> SearchSummary {
    let count = matches.len();

    let mean_distance_miles = mean(matches.iter().map(|m| m.distance_miles));

    let with_capacity_count = matches
        .iter()
        .filter(|m| m.facility.has_inpatient_capacity())
        .count();

    let total_capacity = matches
        .iter()
        .map(|m| u64::from(m.facility.capacity_or_zero()))
        .sum();

    let mean_capacity = mean(
        matches
            .iter()
            .filter_map(|m| m.facility.capacity)
            .map(f64::from),
    );

    SearchSummary {
        count,
        mean_distance_miles,
        with_capacity_count,
        total_capacity,
        mean_capacity,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
