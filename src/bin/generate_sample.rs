use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use rusty_bnb::Listing;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.next_u64() as usize % items.len()]
    }
}

const NEIGHBOURHOODS: [&str; 5] = ["Centrum-West", "De Pijp", "Oud-Oost", "Westerpark", "Noord-Oost"];
const ROOM_TYPES: [(&str, &str); 3] = [
    ("Entire rental unit", "Entire home/apt"),
    ("Private room in home", "Private room"),
    ("Shared room in hostel", "Shared room"),
];
const AMENITIES: [&str; 8] = [
    "Wifi",
    "Kitchen",
    "Washer",
    "Heating",
    "Hair dryer",
    "Children's books and toys",
    "Dedicated workspace",
    "Coffee maker",
];
const VERIFICATIONS: [&str; 3] = ["email", "phone", "work_email"];
const HOSTS: usize = 40;

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/listings.csv"));
    let count: usize = std::env::args()
        .nth(2)
        .map(|n| n.parse().expect("listing count must be a number"))
        .unwrap_or(500);

    let mut rng = SimpleRng::new(42);
    let scraped = NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date");

    // A few prolific hosts so the ranking has a visible head.
    let host_for = |rng: &mut SimpleRng| -> usize {
        if rng.chance(0.3) {
            rng.range(0, 2) as usize
        } else {
            rng.range(0, HOSTS as i64 - 1) as usize
        }
    };

    let mut listings = Vec::with_capacity(count);
    for i in 0..count {
        let id = format!("{}", 100_000 + i);
        let host = host_for(&mut rng);
        let host_id = format!("{}", 9_000 + host);
        let (property_type, room_type) = ROOM_TYPES[rng.range(0, 2) as usize];
        let accommodates = rng.range(1, 8);
        let bedrooms = rng.chance(0.9).then(|| rng.range(0, 4));
        let reviews = rng.range(0, 300);
        let rated = reviews > 0;

        let amenities: Vec<String> = AMENITIES
            .iter()
            .filter(|_| rng.chance(0.6))
            .map(|a| a.to_string())
            .collect();
        let verifications: Vec<String> = VERIFICATIONS
            .iter()
            .filter(|_| rng.chance(0.7))
            .map(|v| v.to_string())
            .collect();

        let score =
            |rng: &mut SimpleRng| rated.then(|| ((3.0 + rng.next_f64() * 2.0) * 100.0).round() / 100.0);
        let first_review = rated.then(|| scraped - Duration::days(rng.range(200, 2000)));

        listings.push(Listing {
            listing_url: format!("https://www.example.com/rooms/{id}"),
            scrape_id: "20240315000000".to_string(),
            last_scraped: scraped,
            source: "city scrape".to_string(),
            name: format!("{room_type} in {}", rng.pick(&NEIGHBOURHOODS)),
            description: rng.chance(0.8).then(|| "Bright and quiet.".to_string()),
            picture_url: format!("https://www.example.com/pictures/{id}.jpg"),
            host_url: format!("https://www.example.com/users/{host_id}"),
            host_name: format!("Host {host}"),
            host_since: Some(scraped - Duration::days(2500 + host as i64 * 17)),
            host_response_time: rng.chance(0.7).then(|| "within an hour".to_string()),
            host_response_rate: rng.chance(0.7).then(|| rng.range(50, 100) as f64 / 100.0),
            host_acceptance_rate: rng.chance(0.6).then(|| rng.range(20, 100) as f64 / 100.0),
            host_is_superhost: Some(rng.chance(0.2)),
            host_thumbnail_url: "https://www.example.com/t.jpg".to_string(),
            host_picture_url: "https://www.example.com/p.jpg".to_string(),
            host_listings_count: Some(rng.range(1, 5)),
            host_total_listings_count: Some(rng.range(1, 8)),
            host_verifications: verifications,
            host_has_profile_pic: rng.chance(0.95),
            host_identity_verified: rng.chance(0.85),
            neighbourhood_cleansed: rng.pick(&NEIGHBOURHOODS).to_string(),
            latitude: 52.33 + rng.next_f64() * 0.1,
            longitude: 4.85 + rng.next_f64() * 0.1,
            property_type: property_type.to_string(),
            room_type: room_type.to_string(),
            accommodates,
            bathrooms: Some(rng.range(1, 3) as f64 / 2.0 + 0.5),
            bedrooms,
            beds: bedrooms.map(|b| b.max(1)),
            amenities,
            price: rng.chance(0.92).then(|| (40 + rng.range(0, 460)) as f64),
            minimum_nights: rng.range(1, 5),
            maximum_nights: rng.range(30, 365),
            has_availability: Some(true),
            availability_30: rng.range(0, 30),
            availability_60: rng.range(0, 60),
            availability_90: rng.range(0, 90),
            availability_365: rng.range(0, 365),
            calendar_last_scraped: scraped,
            number_of_reviews: reviews,
            number_of_reviews_ltm: reviews / 4,
            number_of_reviews_l30d: reviews / 40,
            first_review,
            last_review: rated.then(|| scraped - Duration::days(rng.range(1, 150))),
            review_scores_rating: score(&mut rng),
            review_scores_accuracy: score(&mut rng),
            review_scores_cleanliness: score(&mut rng),
            review_scores_checkin: score(&mut rng),
            review_scores_communication: score(&mut rng),
            review_scores_location: score(&mut rng),
            review_scores_value: score(&mut rng),
            instant_bookable: rng.chance(0.3),
            calculated_host_listings_count: 1,
            reviews_per_month: rated.then(|| (reviews as f64 / 36.0 * 100.0).round() / 100.0),
            id,
            host_id,
            ..Default::default()
        });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create output directory");
    }
    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
    for listing in &listings {
        writer.serialize(listing).expect("Failed to write listing");
    }
    writer.flush().expect("Failed to flush output file");

    println!(
        "Wrote {} listings from up to {HOSTS} hosts to {}",
        listings.len(),
        output_path.display()
    );
}
