//! Ranking policy shared by the SQL text and the in-process store.
//!
//! Rows are ordered by a single mixed key: the rating for spots closer than
//! [`NEAR_THRESHOLD`], the distance otherwise, both ascending. The tie-break
//! depends on the area kind:
//!
//! * `circle`: NULL for near spots, the rating for far ones, NULLs last;
//! * `square`: the rating regardless of distance, NULLs last.
//!
//! The divergence between the two tie-breaks is kept as served today.

use std::cmp::Ordering;

use crate::area::AreaKind;

/// Distance below which a spot is ranked by rating instead of distance.
pub(crate) const NEAR_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RankKey {
    pub(crate) primary: Option<f64>,
    pub(crate) secondary: Option<f64>,
}

impl RankKey {
    pub(crate) fn new(kind: AreaKind, distance: f64, rating: Option<f64>) -> Self {
        let near = distance < NEAR_THRESHOLD;
        let primary = if near { rating } else { Some(distance) };
        let secondary = match kind {
            AreaKind::Circle if near => None,
            AreaKind::Circle | AreaKind::Square => rating,
        };

        Self { primary, secondary }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        asc_nulls_last(self.primary, other.primary)
            .then_with(|| asc_nulls_last(self.secondary, other.secondary))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for RankKey {}

/// PostgreSQL's default for `ORDER BY x ASC`.
fn asc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `rows` by their rank key; equal keys keep input order.
pub(crate) fn rank_by_key<T, F>(kind: AreaKind, rows: &mut [T], distance_and_rating: F)
where
    F: Fn(&T) -> (f64, Option<f64>),
{
    rows.sort_by_cached_key(|row| {
        let (distance, rating) = distance_and_rating(row);
        RankKey::new(kind, distance, rating)
    });
}
