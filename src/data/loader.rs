use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use super::model::{Listing, ListingStore};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings file into a fresh store.
///
/// The file is a header-bearing CSV in the Inside Airbnb layout. Columns are
/// matched by name; unknown columns are ignored and optional columns may be
/// left out entirely.
pub fn load_listings(path: &Path) -> crate::error::Result<ListingStore> {
    let listings = load_csv(path).map_err(|cause| DataError::Load {
        path: path.to_path_buf(),
        cause,
    })?;
    info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(ListingStore::new(listings))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Listing>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_listings(file)
}

/// Parse listings from any reader. Row numbers in errors are 1-based data
/// rows (the header is not counted).
pub fn read_listings<R: Read>(input: R) -> Result<Vec<Listing>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    debug!("CSV header has {} columns", headers.len());

    let mut listings = Vec::new();
    for (row_no, result) in reader.deserialize::<Listing>().enumerate() {
        let listing = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        listings.push(listing);
    }
    Ok(listings)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    /// Header of a minimal but complete listings file.
    pub(crate) const HEADER: &str = "id,listing_url,scrape_id,last_scraped,source,name,description,\
neighborhood_overview,picture_url,host_id,host_url,host_name,host_since,host_location,host_about,\
host_response_time,host_response_rate,host_acceptance_rate,host_is_superhost,host_thumbnail_url,\
host_picture_url,host_neighbourhood,host_listings_count,host_total_listings_count,host_verifications,\
host_has_profile_pic,host_identity_verified,neighbourhood,neighbourhood_cleansed,\
neighbourhood_group_cleansed,latitude,longitude,property_type,room_type,accommodates,bathrooms,\
bathrooms_text,bedrooms,beds,amenities,price,minimum_nights,maximum_nights,minimum_minimum_nights,\
maximum_minimum_nights,minimum_maximum_nights,maximum_maximum_nights,minimum_nights_avg_ntm,\
maximum_nights_avg_ntm,calendar_updated,has_availability,availability_30,availability_60,\
availability_90,availability_365,calendar_last_scraped,number_of_reviews,number_of_reviews_ltm,\
number_of_reviews_l30d,first_review,last_review,review_scores_rating,review_scores_accuracy,\
review_scores_cleanliness,review_scores_checkin,review_scores_communication,review_scores_location,\
review_scores_value,license,instant_bookable,calculated_host_listings_count,\
calculated_host_listings_count_entire_homes,calculated_host_listings_count_private_rooms,\
calculated_host_listings_count_shared_rooms,reviews_per_month";

    /// Build one data row from the parts that vary between tests.
    pub(crate) fn row(id: &str, host_id: &str, price: &str, bedrooms: &str, rating: &str) -> String {
        format!(
            "{id},https://example.com/rooms/{id},2024,2024-03-15,city scrape,Flat {id},,,\
https://example.com/p.jpg,{host_id},https://example.com/users/{host_id},Ann,2019-05-01,,,\
within an hour,95%,N/A,t,https://example.com/t.jpg,https://example.com/h.jpg,,3,4,\
\"['email', 'phone']\",t,f,,Centrum,,52.37,4.89,Entire rental unit,Entire home/apt,4,1.5,\
1.5 baths,{bedrooms},2,\"[\"\"Wifi\"\", \"\"Kitchen\"\"]\",{price},2,30,,,,,2.0,30.0,,t,\
5,10,20,100,2024-03-15,12,3,1,2021-06-01,2024-02-20,{rating},4.9,4.8,4.9,5.0,4.7,4.6,,f,\
1,1,0,0,0.85"
        )
    }

    pub(crate) fn write_fixture(rows: &[String]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for r in rows {
            writeln!(file, "{r}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_coerces_fields() {
        let file = write_fixture(&[row("1", "h1", "\"$1,250.00\"", "2", "4.85")]);
        let store = load_listings(file.path()).unwrap();
        assert_eq!(store.len(), 1);

        let l = &store.listings().unwrap()[0];
        assert_eq!(l.id, "1");
        assert_eq!(l.price, Some(1250.0));
        assert_eq!(l.bedrooms, Some(2));
        assert_eq!(l.review_scores_rating, Some(4.85));
        assert_eq!(l.host_response_rate, Some(0.95));
        assert_eq!(l.host_acceptance_rate, None);
        assert_eq!(l.host_is_superhost, Some(true));
        assert!(l.host_has_profile_pic);
        assert!(!l.host_identity_verified);
        assert_eq!(l.host_verifications, vec!["email", "phone"]);
        assert_eq!(l.amenities, vec!["Wifi", "Kitchen"]);
        assert_eq!(l.description, None);
        assert_eq!(l.first_review, NaiveDate::from_ymd_opt(2021, 6, 1));
        assert_eq!(l.calendar_updated, None);
        assert_eq!(l.license, None);
        assert!(!l.instant_bookable);
    }

    #[test]
    fn empty_cells_become_absent() {
        let file = write_fixture(&[row("1", "h1", "", "", "")]);
        let store = load_listings(file.path()).unwrap();
        let l = &store.listings().unwrap()[0];
        assert_eq!(l.price, None);
        assert_eq!(l.bedrooms, None);
        assert_eq!(l.review_scores_rating, None);
    }

    #[test]
    fn header_only_file_is_an_empty_store() {
        let file = write_fixture(&[]);
        let store = load_listings(file.path()).unwrap();
        assert!(store.is_loaded());
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_number_names_the_row() {
        let file = write_fixture(&[
            row("1", "h1", "$10.00", "1", "4.0"),
            row("2", "h1", "$cheap", "1", "4.0"),
        ]);
        let err = load_listings(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, DataError::Load { .. }));
        assert!(msg.contains("CSV row 2"), "{msg}");
    }

    #[test]
    fn missing_required_column_fails() {
        let data = "id,host_id\n1,h1\n";
        let err = read_listings(data.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("missing field"), "{err:#}");
    }

    #[test]
    fn missing_file_fails_with_path() {
        let err = load_listings(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
