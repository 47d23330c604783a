use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::{FieldValue, ListingStore};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Summary – count and average price per bedroom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// `None` when no listing has both a price and a non-zero bedroom count.
    pub avg_price_per_room: Option<f64>,
}

// ---------------------------------------------------------------------------
// Host ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRank {
    pub host_id: String,
    pub host_listings_count: usize,
}

// ---------------------------------------------------------------------------
// ColumnStatistics
// ---------------------------------------------------------------------------

/// Per-field summary. The numeric members are only filled for numeric fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStatistics {
    pub count: usize,
    pub distinct: usize,
    pub missing: usize,
    pub numeric: Option<NumericSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Field name → statistics, for every field present in at least one listing.
pub type Description = BTreeMap<String, ColumnStatistics>;

/// Formula behind [`NumericSummary::std`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dispersion {
    /// Square root of the raw sum of squared deviations (no division).
    /// Matches previously published description files.
    #[default]
    SumOfSquares,
    /// Divide by N.
    Population,
    /// Divide by N - 1; zero for a single value.
    Sample,
}

impl Dispersion {
    pub fn std(self, values: &[f64], mean: f64) -> f64 {
        let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        let n = values.len() as f64;
        match self {
            Dispersion::SumOfSquares => squares.sqrt(),
            Dispersion::Population => (squares / n).sqrt(),
            Dispersion::Sample if values.len() > 1 => (squares / (n - 1.0)).sqrt(),
            Dispersion::Sample => 0.0,
        }
    }
}

/// Mean of the values at `floor(p·n)` and `ceil(p·n)`; both indices are
/// clamped to the last element. `sorted` must be ascending and non-empty.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = p * sorted.len() as f64;
    let lo = (pos.floor() as usize).min(last);
    let hi = (pos.ceil() as usize).min(last);
    (sorted[lo] + sorted[hi]) / 2.0
}

fn numeric_summary(values: &[f64], dispersion: Dispersion) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(NumericSummary {
        mean,
        std: dispersion.std(values, mean),
        min: sorted[0],
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.50),
        p75: percentile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Numeric columns count distinct values by `f64` equality, so `0.0` and
/// `-0.0` are one value; other columns compare their `Display` text.
fn column_statistics(values: &[FieldValue], total: usize, dispersion: Dispersion) -> ColumnStatistics {
    let count = values.len();
    let missing = total - count;

    // The first value decides how the whole column is treated.
    if values.first().is_some_and(FieldValue::is_numeric) {
        let numbers: Vec<f64> = values.iter().filter_map(FieldValue::as_f64).collect();
        let mut unique = numbers.clone();
        unique.sort_by(f64::total_cmp);
        unique.dedup();
        return ColumnStatistics {
            count,
            distinct: unique.len(),
            missing,
            numeric: numeric_summary(&numbers, dispersion),
        };
    }

    let distinct = values
        .iter()
        .map(ToString::to_string)
        .collect::<HashSet<_>>()
        .len();
    ColumnStatistics {
        count,
        distinct,
        missing,
        numeric: None,
    }
}

// ---------------------------------------------------------------------------
// Operations on a store
// ---------------------------------------------------------------------------

impl ListingStore {
    /// Listing count and the mean of `price / bedrooms` over listings that
    /// have both, skipping zero bedrooms.
    pub fn summary(&self) -> Result<Summary> {
        let listings = self.loaded()?;
        let per_room: Vec<f64> = listings
            .iter()
            .filter_map(|l| match (l.price, l.bedrooms) {
                (Some(price), Some(bedrooms)) if bedrooms != 0 => Some(price / bedrooms as f64),
                _ => None,
            })
            .collect();

        let avg_price_per_room =
            (!per_room.is_empty()).then(|| per_room.iter().sum::<f64>() / per_room.len() as f64);
        debug!(
            "summary: {} listings, {} priced per room",
            listings.len(),
            per_room.len()
        );
        Ok(Summary {
            count: listings.len(),
            avg_price_per_room,
        })
    }

    /// Listings per host, most listings first. Hosts with equal counts keep
    /// the order in which they first appear.
    pub fn rank_hosts(&self) -> Result<Vec<HostRank>> {
        let listings = self.loaded()?;
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut ranking: Vec<HostRank> = Vec::new();

        for listing in listings {
            let slot = *index.entry(listing.host_id.as_str()).or_insert_with(|| {
                ranking.push(HostRank {
                    host_id: listing.host_id.clone(),
                    host_listings_count: 0,
                });
                ranking.len() - 1
            });
            ranking[slot].host_listings_count += 1;
        }

        // `sort_by` is stable, which keeps first-seen order among ties.
        ranking.sort_by(|a, b| b.host_listings_count.cmp(&a.host_listings_count));
        debug!("rank_hosts: {} hosts", ranking.len());
        Ok(ranking)
    }

    /// Column statistics with the default [`Dispersion`].
    pub fn describe(&self) -> Result<Description> {
        self.describe_with(Dispersion::default())
    }

    pub fn describe_with(&self, dispersion: Dispersion) -> Result<Description> {
        let listings = self.loaded()?;
        let mut columns: BTreeMap<&'static str, Vec<FieldValue>> = BTreeMap::new();

        for listing in listings {
            for (name, value) in listing.fields() {
                if let Some(value) = value {
                    columns.entry(name).or_default().push(value);
                }
            }
        }

        let total = listings.len();
        let description: Description = columns
            .into_iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    column_statistics(&values, total, dispersion),
                )
            })
            .collect();
        debug!(
            "describe: {} columns over {} listings ({dispersion:?})",
            description.len(),
            total
        );
        Ok(description)
    }
}
