//! Reductions over an already filtered collection.

use std::collections::BTreeMap;

/// Counts records per category.
pub fn aggregate<'a, R, K, F>(
    records: impl IntoIterator<Item = &'a R>,
    classifier: F,
) -> BTreeMap<K, usize>
where
    R: 'a,
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(classifier(record)).or_insert(0) += 1;
    }
    counts
}

/// Sums a numeric value per category. Non-finite values count as zero.
pub fn aggregate_sum<'a, R, K, F, V>(
    records: impl IntoIterator<Item = &'a R>,
    classifier: F,
    value: V,
) -> BTreeMap<K, f64>
where
    R: 'a,
    K: Ord,
    F: Fn(&R) -> K,
    V: Fn(&R) -> f64,
{
    let mut sums = BTreeMap::new();
    for record in records {
        let amount = value(record);
        let amount = if amount.is_finite() { amount } else { 0.0 };
        *sums.entry(classifier(record)).or_insert(0.0) += amount;
    }
    sums
}

/// Sum of one value over every record.
pub fn total<'a, R, V>(records: impl IntoIterator<Item = &'a R>, value: V) -> f64
where
    R: 'a,
    V: Fn(&R) -> f64,
{
    aggregate_sum(records, |_| (), value)
        .into_values()
        .next()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_sums_by_category() {
        let rows = [("a", 1.0), ("b", 2.0), ("a", 3.5), ("c", f64::NAN)];
        let counts = aggregate(&rows, |r| r.0);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.len(), 3);

        let sums = aggregate_sum(&rows, |r| r.0, |r| r.1);
        assert_eq!(sums.get("a"), Some(&4.5));
        assert_eq!(sums.get("c"), Some(&0.0));
        assert_eq!(total(&rows, |r| r.1), 6.5);
        assert_eq!(total(&rows[..0], |r| r.1), 0.0);
    }
}
