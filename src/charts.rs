//! Descriptive chart computations over the record set. Everything here is a
//! pure function from records to rows; the UI layer turns the rows into
//! Ratatui bar charts. The store is consumed read-only and nothing feeds
//! back into it.

use std::collections::BTreeMap;

use crate::models::Patient;

/// Width of each age histogram bucket, in years.
const BUCKET_WIDTH: u32 = 5;

/// One bar of the age histogram: the inclusive `lower..=upper` year span and
/// how many patients fall inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBucket {
    pub lower: u32,
    pub upper: u32,
    pub count: u64,
}

impl AgeBucket {
    /// Axis label, e.g. `"20-24"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.lower, self.upper)
    }
}

/// One bar of the health-problem frequency chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSlice {
    pub label: String,
    pub count: u64,
    /// Share of the counted sample, in percent.
    pub percent: f64,
}

/// Bucket the patients' ages into spans of five years covering the observed
/// minimum through maximum. Records whose age never parsed are excluded
/// from the sample without comment; that mirrors the store's best-effort
/// policy for malformed numeric fields. An empty sample yields no buckets.
pub fn age_histogram<'a>(records: impl IntoIterator<Item = &'a Patient>) -> Vec<AgeBucket> {
    let ages: Vec<u32> = records
        .into_iter()
        .filter_map(|patient| patient.age.years())
        .collect();
    let Some(&min) = ages.iter().min() else {
        return Vec::new();
    };
    let max = *ages.iter().max().unwrap_or(&min);

    let bucket_count = ((max - min) / BUCKET_WIDTH + 1) as usize;
    let mut buckets: Vec<AgeBucket> = (0..bucket_count)
        .map(|index| {
            let lower = min + BUCKET_WIDTH * index as u32;
            AgeBucket {
                lower,
                upper: lower + BUCKET_WIDTH - 1,
                count: 0,
            }
        })
        .collect();

    for age in ages {
        let index = ((age - min) / BUCKET_WIDTH) as usize;
        buckets[index].count += 1;
    }
    buckets
}

/// Count patients per distinct health problem. Blank problems mean "not
/// recorded" and are left out of both the bars and the percentage base.
/// Bars come back sorted by descending count, then label, so the display is
/// stable across runs.
pub fn health_problem_frequencies<'a>(
    records: impl IntoIterator<Item = &'a Patient>,
) -> Vec<ProblemSlice> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for patient in records {
        let problem = patient.health_problem.trim();
        if !problem.is_empty() {
            *counts.entry(problem).or_insert(0) += 1;
        }
    }

    let total: u64 = counts.values().sum();
    let mut slices: Vec<ProblemSlice> = counts
        .into_iter()
        .map(|(label, count)| ProblemSlice {
            label: label.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Age, PatientId};

    fn patient(age: &str, problem: &str) -> Patient {
        Patient {
            id: PatientId::new(age.to_string() + problem),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            age: Age::new(age),
            health_problem: problem.to_string(),
        }
    }

    #[test]
    fn histogram_spans_observed_min_to_max_in_fives() {
        let records = [
            patient("20", ""),
            patient("21", ""),
            patient("24", ""),
            patient("30", ""),
            patient("33", ""),
        ];
        let buckets = age_histogram(records.iter());

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label(), "20-24");
        assert_eq!(buckets[0].count, 3);
        assert_eq!(buckets[1].label(), "25-29");
        assert_eq!(buckets[1].count, 0);
        assert_eq!(buckets[2].label(), "30-34");
        assert_eq!(buckets[2].count, 2);
    }

    #[test]
    fn histogram_excludes_unparseable_ages() {
        let records = [patient("40", ""), patient("unknown", ""), patient("", "")];
        let buckets = age_histogram(records.iter());

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn histogram_of_no_numeric_ages_is_empty() {
        let records = [patient("n/a", "")];
        assert!(age_histogram(records.iter()).is_empty());
    }

    #[test]
    fn frequencies_exclude_blank_problems_and_sort_by_count() {
        let records = [
            patient("1", "Flu"),
            patient("2", "Asthma"),
            patient("3", "Flu"),
            patient("4", "  "),
            patient("5", ""),
        ];
        let slices = health_problem_frequencies(records.iter());

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Flu");
        assert_eq!(slices[0].count, 2);
        assert!((slices[0].percent - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(slices[1].label, "Asthma");
        assert_eq!(slices[1].count, 1);
    }

    #[test]
    fn equal_counts_fall_back_to_label_order() {
        let records = [patient("1", "Flu"), patient("2", "Asthma")];
        let labels: Vec<_> = health_problem_frequencies(records.iter())
            .into_iter()
            .map(|slice| slice.label)
            .collect();
        assert_eq!(labels, vec!["Asthma", "Flu"]);
    }
}
