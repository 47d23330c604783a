use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::codec;

// ---------------------------------------------------------------------------
// FieldValue – a single present cell of a listing
// ---------------------------------------------------------------------------

/// A typed view of one listing field, used by column statistics.
/// Absent fields are `None` at the call site, never a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    List(Vec<String>),
}

impl FieldValue {
    /// Numeric view of the value; `None` for every non-numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

/// Canonical textual form; distinct counting compares these strings.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Date(d) => write!(f, "{}", d.format(codec::DATE_FORMAT)),
            FieldValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<&Vec<String>> for FieldValue {
    fn from(items: &Vec<String>) -> Self {
        FieldValue::List(items.clone())
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the listings file
// ---------------------------------------------------------------------------

/// One rental unit, as published in the Inside Airbnb `listings.csv` layout.
///
/// Optional columns default to absent when the column is missing from the
/// file; required columns must be present and well-formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub listing_url: String,
    pub scrape_id: String,
    #[serde(with = "codec::date")]
    pub last_scraped: NaiveDate,
    pub source: String,
    pub name: String,
    #[serde(default, with = "codec::opt_text")]
    pub description: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub neighborhood_overview: Option<String>,
    pub picture_url: String,

    // -- host --
    pub host_id: String,
    pub host_url: String,
    pub host_name: String,
    #[serde(default, with = "codec::opt_date")]
    pub host_since: Option<NaiveDate>,
    #[serde(default, with = "codec::opt_text")]
    pub host_location: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub host_about: Option<String>,
    #[serde(default, with = "codec::opt_text")]
    pub host_response_time: Option<String>,
    /// Fraction in 0–1.
    #[serde(default, with = "codec::opt_percent")]
    pub host_response_rate: Option<f64>,
    /// Fraction in 0–1.
    #[serde(default, with = "codec::opt_percent")]
    pub host_acceptance_rate: Option<f64>,
    #[serde(default, with = "codec::opt_flag")]
    pub host_is_superhost: Option<bool>,
    pub host_thumbnail_url: String,
    pub host_picture_url: String,
    #[serde(default, with = "codec::opt_text")]
    pub host_neighbourhood: Option<String>,
    #[serde(default, with = "codec::opt_int")]
    pub host_listings_count: Option<i64>,
    #[serde(default, with = "codec::opt_int")]
    pub host_total_listings_count: Option<i64>,
    #[serde(with = "codec::list")]
    pub host_verifications: Vec<String>,
    #[serde(with = "codec::flag")]
    pub host_has_profile_pic: bool,
    #[serde(with = "codec::flag")]
    pub host_identity_verified: bool,

    // -- location & unit --
    #[serde(default, with = "codec::opt_text")]
    pub neighbourhood: Option<String>,
    pub neighbourhood_cleansed: String,
    #[serde(default, with = "codec::opt_text")]
    pub neighbourhood_group_cleansed: Option<String>,
    #[serde(with = "codec::float")]
    pub latitude: f64,
    #[serde(with = "codec::float")]
    pub longitude: f64,
    pub property_type: String,
    pub room_type: String,
    pub accommodates: i64,
    #[serde(default, with = "codec::opt_float")]
    pub bathrooms: Option<f64>,
    #[serde(default, with = "codec::opt_text")]
    pub bathrooms_text: Option<String>,
    #[serde(default, with = "codec::opt_int")]
    pub bedrooms: Option<i64>,
    #[serde(default, with = "codec::opt_int")]
    pub beds: Option<i64>,
    #[serde(with = "codec::list")]
    pub amenities: Vec<String>,
    #[serde(default, with = "codec::opt_currency")]
    pub price: Option<f64>,

    // -- booking rules & calendar --
    pub minimum_nights: i64,
    pub maximum_nights: i64,
    #[serde(default, with = "codec::opt_int")]
    pub minimum_minimum_nights: Option<i64>,
    #[serde(default, with = "codec::opt_int")]
    pub maximum_minimum_nights: Option<i64>,
    #[serde(default, with = "codec::opt_int")]
    pub minimum_maximum_nights: Option<i64>,
    #[serde(default, with = "codec::opt_int")]
    pub maximum_maximum_nights: Option<i64>,
    #[serde(default, with = "codec::opt_float")]
    pub minimum_nights_avg_ntm: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub maximum_nights_avg_ntm: Option<f64>,
    #[serde(default, with = "codec::opt_date")]
    pub calendar_updated: Option<NaiveDate>,
    #[serde(default, with = "codec::opt_flag")]
    pub has_availability: Option<bool>,
    pub availability_30: i64,
    pub availability_60: i64,
    pub availability_90: i64,
    pub availability_365: i64,
    #[serde(with = "codec::date")]
    pub calendar_last_scraped: NaiveDate,

    // -- reviews --
    pub number_of_reviews: i64,
    pub number_of_reviews_ltm: i64,
    pub number_of_reviews_l30d: i64,
    #[serde(default, with = "codec::opt_date")]
    pub first_review: Option<NaiveDate>,
    #[serde(default, with = "codec::opt_date")]
    pub last_review: Option<NaiveDate>,
    /// Overall rating, 0–100 in older exports and 0–5 in newer ones.
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_rating: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_accuracy: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_cleanliness: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_checkin: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_communication: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_location: Option<f64>,
    #[serde(default, with = "codec::opt_float")]
    pub review_scores_value: Option<f64>,
    #[serde(default, with = "codec::opt_text")]
    pub license: Option<String>,
    #[serde(with = "codec::flag")]
    pub instant_bookable: bool,
    pub calculated_host_listings_count: i64,
    pub calculated_host_listings_count_entire_homes: i64,
    pub calculated_host_listings_count_private_rooms: i64,
    pub calculated_host_listings_count_shared_rooms: i64,
    #[serde(default, with = "codec::opt_float")]
    pub reviews_per_month: Option<f64>,
}

fn present<T: Into<FieldValue>>(v: T) -> Option<FieldValue> {
    Some(v.into())
}

fn optional<T: Into<FieldValue>>(v: Option<T>) -> Option<FieldValue> {
    v.map(Into::into)
}

impl Listing {
    /// Every field as `(column name, value)` in file column order.
    pub fn fields(&self) -> Vec<(&'static str, Option<FieldValue>)> {
        vec![
            ("id", present(&self.id)),
            ("listing_url", present(&self.listing_url)),
            ("scrape_id", present(&self.scrape_id)),
            ("last_scraped", present(self.last_scraped)),
            ("source", present(&self.source)),
            ("name", present(&self.name)),
            ("description", optional(self.description.as_ref())),
            ("neighborhood_overview", optional(self.neighborhood_overview.as_ref())),
            ("picture_url", present(&self.picture_url)),
            ("host_id", present(&self.host_id)),
            ("host_url", present(&self.host_url)),
            ("host_name", present(&self.host_name)),
            ("host_since", optional(self.host_since)),
            ("host_location", optional(self.host_location.as_ref())),
            ("host_about", optional(self.host_about.as_ref())),
            ("host_response_time", optional(self.host_response_time.as_ref())),
            ("host_response_rate", optional(self.host_response_rate)),
            ("host_acceptance_rate", optional(self.host_acceptance_rate)),
            ("host_is_superhost", optional(self.host_is_superhost)),
            ("host_thumbnail_url", present(&self.host_thumbnail_url)),
            ("host_picture_url", present(&self.host_picture_url)),
            ("host_neighbourhood", optional(self.host_neighbourhood.as_ref())),
            ("host_listings_count", optional(self.host_listings_count)),
            ("host_total_listings_count", optional(self.host_total_listings_count)),
            ("host_verifications", present(&self.host_verifications)),
            ("host_has_profile_pic", present(self.host_has_profile_pic)),
            ("host_identity_verified", present(self.host_identity_verified)),
            ("neighbourhood", optional(self.neighbourhood.as_ref())),
            ("neighbourhood_cleansed", present(&self.neighbourhood_cleansed)),
            ("neighbourhood_group_cleansed", optional(self.neighbourhood_group_cleansed.as_ref())),
            ("latitude", present(self.latitude)),
            ("longitude", present(self.longitude)),
            ("property_type", present(&self.property_type)),
            ("room_type", present(&self.room_type)),
            ("accommodates", present(self.accommodates)),
            ("bathrooms", optional(self.bathrooms)),
            ("bathrooms_text", optional(self.bathrooms_text.as_ref())),
            ("bedrooms", optional(self.bedrooms)),
            ("beds", optional(self.beds)),
            ("amenities", present(&self.amenities)),
            ("price", optional(self.price)),
            ("minimum_nights", present(self.minimum_nights)),
            ("maximum_nights", present(self.maximum_nights)),
            ("minimum_minimum_nights", optional(self.minimum_minimum_nights)),
            ("maximum_minimum_nights", optional(self.maximum_minimum_nights)),
            ("minimum_maximum_nights", optional(self.minimum_maximum_nights)),
            ("maximum_maximum_nights", optional(self.maximum_maximum_nights)),
            ("minimum_nights_avg_ntm", optional(self.minimum_nights_avg_ntm)),
            ("maximum_nights_avg_ntm", optional(self.maximum_nights_avg_ntm)),
            ("calendar_updated", optional(self.calendar_updated)),
            ("has_availability", optional(self.has_availability)),
            ("availability_30", present(self.availability_30)),
            ("availability_60", present(self.availability_60)),
            ("availability_90", present(self.availability_90)),
            ("availability_365", present(self.availability_365)),
            ("calendar_last_scraped", present(self.calendar_last_scraped)),
            ("number_of_reviews", present(self.number_of_reviews)),
            ("number_of_reviews_ltm", present(self.number_of_reviews_ltm)),
            ("number_of_reviews_l30d", present(self.number_of_reviews_l30d)),
            ("first_review", optional(self.first_review)),
            ("last_review", optional(self.last_review)),
            ("review_scores_rating", optional(self.review_scores_rating)),
            ("review_scores_accuracy", optional(self.review_scores_accuracy)),
            ("review_scores_cleanliness", optional(self.review_scores_cleanliness)),
            ("review_scores_checkin", optional(self.review_scores_checkin)),
            ("review_scores_communication", optional(self.review_scores_communication)),
            ("review_scores_location", optional(self.review_scores_location)),
            ("review_scores_value", optional(self.review_scores_value)),
            ("license", optional(self.license.as_ref())),
            ("instant_bookable", present(self.instant_bookable)),
            ("calculated_host_listings_count", present(self.calculated_host_listings_count)),
            (
                "calculated_host_listings_count_entire_homes",
                present(self.calculated_host_listings_count_entire_homes),
            ),
            (
                "calculated_host_listings_count_private_rooms",
                present(self.calculated_host_listings_count_private_rooms),
            ),
            (
                "calculated_host_listings_count_shared_rooms",
                present(self.calculated_host_listings_count_shared_rooms),
            ),
            ("reviews_per_month", optional(self.reviews_per_month)),
        ]
    }
}

// ---------------------------------------------------------------------------
// ListingStore – the loaded (or filtered) collection
// ---------------------------------------------------------------------------

/// An immutable, ordered collection of listings.
///
/// `ListingStore::default()` is the never-loaded state: every operation on it
/// reports [`DataError::NoData`](crate::error::DataError::NoData). A store
/// built from an empty vector is loaded and simply has zero listings.
/// Derived stores share the `Arc<Listing>` values of their parent.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Option<Vec<Arc<Listing>>>,
}

impl ListingStore {
    /// Wrap exactly these listings, order preserved.
    pub fn new(listings: Vec<Listing>) -> Self {
        Self::from_shared(listings.into_iter().map(Arc::new).collect())
    }

    pub(crate) fn from_shared(listings: Vec<Arc<Listing>>) -> Self {
        Self {
            listings: Some(listings),
        }
    }

    /// The listings, or `None` when nothing was ever loaded.
    pub fn listings(&self) -> Option<&[Arc<Listing>]> {
        self.listings.as_deref()
    }

    pub(crate) fn loaded(&self) -> crate::error::Result<&[Arc<Listing>]> {
        self.listings().ok_or(crate::error::DataError::NoData)
    }

    pub fn is_loaded(&self) -> bool {
        self.listings.is_some()
    }

    /// Number of listings (0 when not loaded).
    pub fn len(&self) -> usize {
        self.listings.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Listing>> for ListingStore {
    fn from(listings: Vec<Listing>) -> Self {
        Self::new(listings)
    }
}
