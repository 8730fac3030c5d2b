//! Aggregate statistics over a review dataset.
//!
//! Every statistic is implemented twice: a `*_fold` variant that accumulates
//! manually in a single pass over the records, and a `*_grouped` variant
//! built on the bulk primitives in [`crate::aggregate`]. Both variants
//! consume the same dataset and are required to agree — means within
//! floating-point tolerance, key/count sets exactly.

use std::collections::HashMap;

use crate::{
    aggregate::{column_mean, group_count, group_mean, top_n},
    dataset::ReviewDataset,
    error::{Error, Result},
};

/// Number of products kept in the ranked statistics.
pub const TOP_N: usize = 10;

/// A product needs strictly more reviews than this to be ranked by mean
/// rating.
pub const MIN_REVIEWS: u64 = 50;

/// Overall mean star rating, accumulation strategy.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] when the dataset has no records.
pub fn mean_rating_fold(dataset: &ReviewDataset) -> Result<f64> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut sum = 0u64;
    for review in dataset {
        sum += u64::from(review.star_rating);
    }
    Ok(sum as f64 / dataset.len() as f64)
}

/// Overall mean star rating, grouped strategy (bulk column mean).
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] when the dataset has no records.
pub fn mean_rating_grouped(dataset: &ReviewDataset) -> Result<f64> {
    column_mean(dataset.iter().map(|r| f64::from(r.star_rating))).ok_or(Error::EmptyDataset)
}

/// Count of records per star rating value, accumulation strategy.
///
/// Rating values absent from the dataset are omitted, not zero-filled.
pub fn rating_distribution_fold(dataset: &ReviewDataset) -> HashMap<u8, u64> {
    let mut distribution: HashMap<u8, u64> = HashMap::new();
    for review in dataset {
        *distribution.entry(review.star_rating).or_insert(0) += 1;
    }
    distribution
}

/// Count of records per star rating value, grouped strategy.
pub fn rating_distribution_grouped(dataset: &ReviewDataset) -> HashMap<u8, u64> {
    group_count(dataset.iter(), |r| r.star_rating)
}

/// Count of verified vs. unverified purchases, accumulation strategy.
pub fn verified_distribution_fold(dataset: &ReviewDataset) -> HashMap<bool, u64> {
    let mut distribution: HashMap<bool, u64> = HashMap::new();
    for review in dataset {
        *distribution.entry(review.verified_purchase).or_insert(0) += 1;
    }
    distribution
}

/// Count of verified vs. unverified purchases, grouped strategy.
pub fn verified_distribution_grouped(dataset: &ReviewDataset) -> HashMap<bool, u64> {
    group_count(dataset.iter(), |r| r.verified_purchase)
}

/// The [`TOP_N`] products with the most reviews, descending by count,
/// accumulation strategy.
///
/// Equal counts are ordered by product id so that both strategies select
/// the same top set.
pub fn top_products_by_count_fold(dataset: &ReviewDataset) -> Vec<(String, u64)> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for review in dataset {
        *counts.entry(review.product_id.clone()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_N);
    ranked
}

/// The [`TOP_N`] products with the most reviews, grouped strategy.
pub fn top_products_by_count_grouped(dataset: &ReviewDataset) -> Vec<(String, u64)> {
    top_n(
        group_count(dataset.iter(), |r| r.product_id.clone()),
        TOP_N,
    )
}

/// The [`TOP_N`] highest mean ratings among products with strictly more than
/// [`MIN_REVIEWS`] reviews, accumulation strategy.
///
/// A product with exactly [`MIN_REVIEWS`] reviews is excluded.
pub fn top_products_by_mean_fold(dataset: &ReviewDataset) -> Vec<(String, f64)> {
    let mut totals: HashMap<String, (u64, u64)> = HashMap::new();
    for review in dataset {
        let entry = totals.entry(review.product_id.clone()).or_insert((0, 0));
        entry.0 += u64::from(review.star_rating);
        entry.1 += 1;
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .filter(|(_, (_, count))| *count > MIN_REVIEWS)
        .map(|(product, (sum, count))| (product, sum as f64 / count as f64))
        .collect();
    ranked.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(TOP_N);
    ranked
}

/// The [`TOP_N`] highest mean ratings among products with strictly more than
/// [`MIN_REVIEWS`] reviews, grouped strategy.
pub fn top_products_by_mean_grouped(dataset: &ReviewDataset) -> Vec<(String, f64)> {
    let qualified: HashMap<String, f64> = group_mean(
        dataset.iter(),
        |r| r.product_id.clone(),
        |r| f64::from(r.star_rating),
    )
    .into_iter()
    .filter_map(|(product, state)| {
        let mean = state.mean()?;
        (state.count() > MIN_REVIEWS).then_some((product, mean))
    })
    .collect();

    top_n(qualified, TOP_N)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Review;

    fn review(product_id: &str, star_rating: u8, verified_purchase: bool) -> Review {
        Review {
            product_id: product_id.to_string(),
            star_rating,
            verified_purchase,
            ..Review::default()
        }
    }

    fn dataset(reviews: Vec<Review>) -> ReviewDataset {
        ReviewDataset::from_records(reviews)
    }

    #[test]
    fn test_mean_rating_two_records() {
        // Worked example: ratings 5 and 1 on the same product average to 3.0
        let ds = dataset(vec![review("A", 5, true), review("A", 1, false)]);

        assert_eq!(mean_rating_fold(&ds).unwrap(), 3.0);
        assert_eq!(mean_rating_grouped(&ds).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_rating_empty_dataset() {
        let ds = dataset(vec![]);

        assert!(matches!(mean_rating_fold(&ds), Err(Error::EmptyDataset)));
        assert!(matches!(mean_rating_grouped(&ds), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_rating_distribution_omits_absent_values() {
        let ds = dataset(vec![
            review("A", 5, true),
            review("B", 5, true),
            review("C", 1, false),
        ]);

        let fold = rating_distribution_fold(&ds);
        let grouped = rating_distribution_grouped(&ds);

        assert_eq!(fold[&5], 2);
        assert_eq!(fold[&1], 1);
        assert!(!fold.contains_key(&3));
        assert_eq!(fold, grouped);
    }

    #[test]
    fn test_verified_distribution() {
        let ds = dataset(vec![
            review("A", 5, true),
            review("B", 4, true),
            review("C", 1, false),
        ]);

        let fold = verified_distribution_fold(&ds);
        let grouped = verified_distribution_grouped(&ds);

        assert_eq!(fold[&true], 2);
        assert_eq!(fold[&false], 1);
        assert_eq!(fold, grouped);
    }

    #[test]
    fn test_top_products_by_count() {
        let mut reviews = Vec::new();
        for i in 0..12 {
            reviews.push(review(&format!("P{i:02}"), 3, true));
            reviews.push(review(&format!("P{i:02}"), 4, true));
        }
        // P00 gets two extra reviews so the winner is unambiguous
        reviews.push(review("P00", 5, true));
        reviews.push(review("P00", 5, true));

        let fold = top_products_by_count_fold(&dataset(reviews.clone()));
        let grouped = top_products_by_count_grouped(&dataset(reviews));

        assert_eq!(fold.len(), TOP_N);
        assert_eq!(grouped.len(), TOP_N);
        assert_eq!(fold[0], ("P00".to_string(), 4));
        assert_eq!(grouped[0], ("P00".to_string(), 4));

        // Same membership and counts regardless of tie order
        let mut fold_sorted = fold.clone();
        fold_sorted.sort();
        let mut grouped_sorted = grouped.clone();
        grouped_sorted.sort();
        assert_eq!(fold_sorted, grouped_sorted);
    }

    #[test]
    fn test_top_by_count_minimum_dominates_excluded() {
        let mut reviews = Vec::new();
        for i in 0..15 {
            for _ in 0..=i {
                reviews.push(review(&format!("P{i:02}"), 3, true));
            }
        }
        let ds = dataset(reviews);

        let ranked = top_products_by_count_fold(&ds);
        let included_min = ranked.iter().map(|(_, c)| *c).min().unwrap();
        let included: Vec<&str> = ranked.iter().map(|(p, _)| p.as_str()).collect();

        // Products P05..P14 have counts 6..15; the excluded P00..P04 all have
        // counts below the included minimum.
        assert_eq!(included.len(), TOP_N);
        assert_eq!(included_min, 6);
        for i in 0..5 {
            assert!(!included.contains(&format!("P{i:02}").as_str()));
        }
    }

    #[test]
    fn test_top_products_by_mean_threshold_is_strict() {
        let mut reviews = Vec::new();
        // "exactly" has exactly MIN_REVIEWS reviews: excluded
        for _ in 0..MIN_REVIEWS {
            reviews.push(review("exactly", 5, true));
        }
        // "above" has MIN_REVIEWS + 1 reviews: included
        for _ in 0..=MIN_REVIEWS {
            reviews.push(review("above", 4, true));
        }
        let ds = dataset(reviews);

        let fold = top_products_by_mean_fold(&ds);
        let grouped = top_products_by_mean_grouped(&ds);

        assert_eq!(fold.len(), 1);
        assert_eq!(fold[0].0, "above");
        assert_eq!(fold[0].1, 4.0);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].0, "above");
        assert_eq!(grouped[0].1, 4.0);
    }

    #[test]
    fn test_top_products_by_mean_ranks_descending() {
        let mut reviews = Vec::new();
        for (product, rating) in [("low", 2u8), ("mid", 3), ("high", 5)] {
            for _ in 0..60 {
                reviews.push(review(product, rating, true));
            }
        }
        let ds = dataset(reviews);

        for ranked in [top_products_by_mean_fold(&ds), top_products_by_mean_grouped(&ds)] {
            let products: Vec<&str> = ranked.iter().map(|(p, _)| p.as_str()).collect();
            assert_eq!(products, ["high", "mid", "low"]);
        }
    }

    #[test]
    fn test_strategies_agree_on_mixed_dataset() {
        let mut reviews = Vec::new();
        for i in 0..200u32 {
            let product = format!("P{}", i % 3);
            let rating = (i % 5 + 1) as u8;
            reviews.push(review(&product, rating, i % 2 == 0));
        }
        let ds = dataset(reviews);

        let fold_mean = mean_rating_fold(&ds).unwrap();
        let grouped_mean = mean_rating_grouped(&ds).unwrap();
        assert!((fold_mean - grouped_mean).abs() < 1e-9);

        assert_eq!(rating_distribution_fold(&ds), rating_distribution_grouped(&ds));
        assert_eq!(
            verified_distribution_fold(&ds),
            verified_distribution_grouped(&ds)
        );

        let mut by_count_fold = top_products_by_count_fold(&ds);
        let mut by_count_grouped = top_products_by_count_grouped(&ds);
        by_count_fold.sort();
        by_count_grouped.sort();
        assert_eq!(by_count_fold, by_count_grouped);

        let mut by_mean_fold = top_products_by_mean_fold(&ds);
        let mut by_mean_grouped = top_products_by_mean_grouped(&ds);
        by_mean_fold.sort_by(|a, b| a.0.cmp(&b.0));
        by_mean_grouped.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(by_mean_fold.len(), by_mean_grouped.len());
        for ((pa, ma), (pb, mb)) in by_mean_fold.iter().zip(&by_mean_grouped) {
            assert_eq!(pa, pb);
            assert!((ma - mb).abs() < 1e-9);
        }
    }
}
