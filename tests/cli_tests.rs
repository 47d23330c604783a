use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper to get path to fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_cli_help_flag() {
    cargo_bin_cmd!("rusty-bnb")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rental listings"));
}

#[test]
fn test_cli_with_nonexistent_file_prompts_again() {
    let input = format!("{}\nstats\nexit\n", fixture_path("listings.csv").display());
    cargo_bin_cmd!("rusty-bnb")
        .arg("nonexistent.csv")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("> Error loading nonexistent.csv."))
        .stdout(predicate::str::contains("Failed to load nonexistent.csv"))
        .stdout(predicate::str::contains("Successfully loaded 4 listings."))
        .stdout(predicate::str::contains("> Count: 4"));
}

#[test]
fn test_cli_with_nonexistent_file_and_no_input() {
    cargo_bin_cmd!("rusty-bnb")
        .arg("nonexistent.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("> Error loading nonexistent.csv."));
}

#[test]
fn test_cli_stats_and_host_rank() {
    cargo_bin_cmd!("rusty-bnb")
        .arg(fixture_path("listings.csv"))
        .write_stdin("stats\nhostRank\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully loaded 4 listings."))
        .stdout(predicate::str::contains("> Count: 4"))
        .stdout(predicate::str::contains("> Average Price Per Room: 245.00"))
        .stdout(predicate::str::contains("> h1, 2\n> h2, 1\n> h3, 1\n"));
}

#[test]
fn test_cli_filter_narrows_store() {
    cargo_bin_cmd!("rusty-bnb")
        .arg(fixture_path("listings.csv"))
        .write_stdin("filter\n100,2000\n\n\nstats\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 4 listings kept"))
        .stdout(predicate::str::contains("> Count: 2"))
        .stdout(predicate::str::contains("> Average Price Per Room: 400.00"));
}

#[test]
fn test_cli_prompts_for_path() {
    let input = format!("{}\nexit\n", fixture_path("listings.csv").display());
    cargo_bin_cmd!("rusty-bnb")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("< Enter listings filepath"))
        .stdout(predicate::str::contains("Successfully loaded 4 listings."));
}

#[test]
fn test_cli_export_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("rusty-bnb")
        .arg(fixture_path("listings.csv"))
        .arg("--export-dir")
        .arg(dir.path())
        .write_stdin("export\n\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully exported"));

    let ranks = std::fs::read_to_string(dir.path().join("host_rank.csv")).unwrap();
    assert_eq!(ranks, "host_id,host_listings_count\nh1,2\nh2,1\nh3,1\n");
    assert!(dir.path().join("listings(filtered).csv").exists());
    assert!(dir.path().join("description.csv").exists());
}

#[test]
fn test_cli_invalid_config_warns() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "report = 3\n").unwrap();

    cargo_bin_cmd!("rusty-bnb")
        .arg(fixture_path("listings.csv"))
        .arg("--config")
        .arg(&config)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid config"));
}
