use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};
use log::debug;

use super::model::{Listing, ListingStore};
use crate::error::Result;

// ---------------------------------------------------------------------------
// NumericRange – closed interval [min, max]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Parses the shell's `min,max` notation.
impl FromStr for NumericRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [min, max] = parts.as_slice() else {
            bail!("expected 'min,max', got '{s}'");
        };
        let min: f64 = min.parse().with_context(|| format!("'{min}' is not a number"))?;
        let max: f64 = max.parse().with_context(|| format!("'{max}' is not a number"))?;
        if !min.is_finite() || !max.is_finite() {
            bail!("range bounds must be finite");
        }
        Ok(Self { min, max })
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – conjunctive set of optional range constraints
// ---------------------------------------------------------------------------

/// Listing attribute a criterion is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Price,
    ReviewScore,
}

impl Attribute {
    fn value(self, listing: &Listing) -> Option<f64> {
        match self {
            Attribute::Price => listing.price,
            Attribute::ReviewScore => listing.review_scores_rating,
        }
    }
}

/// Named range constraints; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub price: Option<NumericRange>,
    /// Matched against the price attribute, not a bedroom count. Existing
    /// exports depend on this, so it is kept until the intended meaning is
    /// confirmed.
    pub rooms: Option<NumericRange>,
    pub review_score: Option<NumericRange>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// The supplied constraints with the attribute each one reads.
    pub fn active(&self) -> impl Iterator<Item = (&'static str, Attribute, NumericRange)> + '_ {
        [
            ("price", Attribute::Price, self.price),
            ("rooms", Attribute::Price, self.rooms),
            ("review_score", Attribute::ReviewScore, self.review_score),
        ]
        .into_iter()
        .filter_map(|(name, attr, range)| range.map(|r| (name, attr, r)))
    }

    /// A listing passes when the attribute of every active criterion is
    /// present and inside its range.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.active().all(|(_, attr, range)| {
            attr.value(listing).is_some_and(|v| range.contains(v))
        })
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .active()
            .map(|(name, _, range)| format!("{name} in {range}"))
            .collect();
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

impl ListingStore {
    /// Return a new store holding the listings that pass all `criteria`,
    /// in their original order. `self` is left untouched.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<ListingStore> {
        let listings = self.loaded()?;
        let kept: Vec<_> = listings
            .iter()
            .filter(|l| criteria.matches(l))
            .cloned()
            .collect();
        debug!(
            "filter ({criteria}): kept {} of {} listings",
            kept.len(),
            listings.len()
        );
        Ok(ListingStore::from_shared(kept))
    }
}
