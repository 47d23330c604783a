use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use super::model::ListingStore;
use super::stats::{Description, HostRank};
use crate::error::DataError;

pub const LISTINGS_FILE: &str = "listings(filtered).csv";
pub const HOST_RANK_FILE: &str = "host_rank.csv";
pub const DESCRIPTION_FILE: &str = "description.csv";

/// One row of `description.csv`. Numeric cells stay empty for
/// non-numeric features.
#[derive(Debug, Serialize)]
struct DescriptionRow<'a> {
    feature: &'a str,
    count: usize,
    missing: usize,
    distinct: usize,
    mean: Option<f64>,
    std: Option<f64>,
    min: Option<f64>,
    #[serde(rename = "25%")]
    p25: Option<f64>,
    #[serde(rename = "50%")]
    p50: Option<f64>,
    #[serde(rename = "75%")]
    p75: Option<f64>,
    max: Option<f64>,
}

/// Write the store's listings, the host ranking and the column description
/// as three CSV files under `dir`, creating it if needed. Returns the
/// written paths in that order.
pub fn save(
    dir: &Path,
    store: &ListingStore,
    rankings: &[HostRank],
    description: &Description,
) -> crate::error::Result<[PathBuf; 3]> {
    write_all(dir, store, rankings, description).map_err(|cause| DataError::Export {
        path: dir.to_path_buf(),
        cause,
    })
}

fn write_all(
    dir: &Path,
    store: &ListingStore,
    rankings: &[HostRank],
    description: &Description,
) -> Result<[PathBuf; 3]> {
    let listings = store.loaded().context("nothing to export")?;
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let listings_path = dir.join(LISTINGS_FILE);
    write_rows(&listings_path, listings.iter().map(|l| &**l))?;

    let rank_path = dir.join(HOST_RANK_FILE);
    write_rows(&rank_path, rankings.iter())?;

    let description_path = dir.join(DESCRIPTION_FILE);
    write_rows(
        &description_path,
        description.iter().map(|(feature, stats)| {
            let num = stats.numeric;
            DescriptionRow {
                feature,
                count: stats.count,
                missing: stats.missing,
                distinct: stats.distinct,
                mean: num.map(|n| n.mean),
                std: num.map(|n| n.std),
                min: num.map(|n| n.min),
                p25: num.map(|n| n.p25),
                p50: num.map(|n| n.p50),
                p75: num.map(|n| n.p75),
                max: num.map(|n| n.max),
            }
        }),
    )?;

    info!(
        "Exported {} listings, {} hosts, {} features to {}",
        listings.len(),
        rankings.len(),
        description.len(),
        dir.display()
    );
    Ok([listings_path, rank_path, description_path])
}

/// Serialize `rows` with a header row. An empty iterator still produces a
/// file (without header, as the csv writer only learns the header from the
/// first record).
fn write_rows<T, I>(path: &Path, rows: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::{row, write_fixture};
    use crate::data::loader::{load_listings, read_listings};

    fn sample_store() -> ListingStore {
        let file = write_fixture(&[
            row("1", "h1", "$100.00", "2", "4.5"),
            row("2", "h2", "", "1", ""),
            row("3", "h1", "$80.00", "", "3.9"),
        ]);
        load_listings(file.path()).unwrap()
    }

    #[test]
    fn writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let store = sample_store();
        let ranking = store.rank_hosts().unwrap();
        let description = store.describe().unwrap();

        let paths = save(&out, &store, &ranking, &description).unwrap();
        assert_eq!(paths[0], out.join("listings(filtered).csv"));
        assert!(paths.iter().all(|p| p.exists()));

        let ranks = std::fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(ranks, "host_id,host_listings_count\nh1,2\nh2,1\n");

        let desc = std::fs::read_to_string(&paths[2]).unwrap();
        let mut lines = desc.lines();
        assert_eq!(
            lines.next(),
            Some("feature,count,missing,distinct,mean,std,min,25%,50%,75%,max")
        );
        let price_line = desc.lines().find(|l| l.starts_with("price,")).unwrap();
        assert!(price_line.starts_with("price,2,1,2,90"), "{price_line}");
        let room_line = desc.lines().find(|l| l.starts_with("room_type,")).unwrap();
        assert_eq!(room_line, "room_type,3,0,1,,,,,,,");
    }

    #[test]
    fn exported_listings_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = sample_store();
        let paths = save(dir.path(), &store, &[], &Description::new()).unwrap();

        let file = std::fs::File::open(&paths[0]).unwrap();
        let reloaded = read_listings(file).unwrap();
        let original: Vec<_> = store
            .listings()
            .unwrap()
            .iter()
            .map(|l| (**l).clone())
            .collect();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn unloaded_store_cannot_be_exported() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(dir.path(), &ListingStore::default(), &[], &Description::new()).unwrap_err();
        assert!(matches!(err, DataError::Export { .. }));
    }
}
