use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn mention_report() -> Command {
    let mut cmd = cargo_bin_cmd!("mention_report");
    cmd.env_remove("MENTION_WPM")
        .env_remove("MENTION_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

/// Two transcripts: 8 and 3 words.
fn fixtures() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let jan = write(dir.path(), "jan.txt", "The FOMC met today. Rate hike? Rate hike!");
    let feb = write(dir.path(), "feb.txt", "CPI ran hot");
    (dir, jan, feb)
}

fn json_report(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run mention_report");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn human_output_lists_keywords_and_transcripts() {
    let (_dir, jan, feb) = fixtures();

    mention_report()
        .args(["-k", "rate hike, fomc"])
        .arg(&jan)
        .arg(&feb)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcripts : 2"))
        .stdout(predicate::str::contains("Words (avg) : 5.5"))
        .stdout(predicate::str::contains("at 150 wpm"))
        .stdout(predicate::str::contains("rate hike"))
        .stdout(predicate::str::contains("jan"))
        .stdout(predicate::str::contains("2, 1"));
}

#[test]
fn json_output_matches_engine_semantics() {
    let (_dir, jan, feb) = fixtures();

    let report = json_report(
        mention_report()
            .args(["--format", "json", "-k", "rate hike", "-k", "fomc,cpi"])
            .arg(&jan)
            .arg(&feb),
    );

    let keywords = report["keywords"].as_array().expect("keywords array");
    let names: Vec<&str> = keywords.iter().filter_map(|k| k["keyword"].as_str()).collect();
    assert_eq!(names, ["rate hike", "fomc", "cpi"]);

    assert_eq!(keywords[0]["total_mentions"], 2);
    assert_eq!(keywords[0]["average_mentions"], 1.0);
    assert_eq!(keywords[0]["pct_with_mention"], 50.0);
    assert_eq!(keywords[1]["average_relative_position"], 12.5);

    assert_eq!(report["summary"]["transcript_count"], 2);
    assert_eq!(report["summary"]["total_word_count"], 11);
    assert_eq!(report["transcripts"][0]["label"], "jan");
    assert_eq!(report["transcripts"][1]["mentions"], serde_json::json!([0, 0, 1]));
    assert_eq!(report["words_per_minute"], 150.0);
}

#[test]
fn wpm_from_environment() {
    let (_dir, jan, _feb) = fixtures();

    let report = json_report(
        mention_report()
            .env("MENTION_WPM", "4")
            .args(["--format", "json", "-k", "fomc"])
            .arg(&jan),
    );
    assert_eq!(report["words_per_minute"], 4.0);
    assert_eq!(report["transcripts"][0]["estimated_minutes"], 2.0);
}

#[test]
fn wpm_flag_overrides_environment() {
    let (_dir, jan, _feb) = fixtures();

    let report = json_report(
        mention_report()
            .env("MENTION_WPM", "3")
            .args(["--format", "json", "--wpm", "8", "-k", "fomc"])
            .arg(&jan),
    );
    assert_eq!(report["summary"]["average_minutes"], 1.0);
}

#[test]
fn ranked_reorders_keywords_and_mentions() {
    let (_dir, jan, feb) = fixtures();

    let report = json_report(
        mention_report()
            .args(["--format", "json", "--ranked", "-k", "powell, fomc, rate hike"])
            .arg(&jan)
            .arg(&feb),
    );
    let names: Vec<&str> = report["keywords"]
        .as_array()
        .expect("keywords array")
        .iter()
        .filter_map(|k| k["keyword"].as_str())
        .collect();
    assert_eq!(names, ["rate hike", "fomc", "powell"]);
    assert_eq!(report["transcripts"][0]["mentions"], serde_json::json!([2, 1, 0]));
}

#[test]
fn keywords_file_is_merged_without_duplicates() {
    let (dir, jan, _feb) = fixtures();
    let list = write(dir.path(), "keywords.txt", "FOMC\nrate hike\n\ncpi, Fomc\n");

    let report = json_report(
        mention_report()
            .args(["--format", "json", "-k", "fomc"])
            .arg("--keywords-file")
            .arg(&list)
            .arg(&jan),
    );
    let names: Vec<&str> = report["keywords"]
        .as_array()
        .expect("keywords array")
        .iter()
        .filter_map(|k| k["keyword"].as_str())
        .collect();
    assert_eq!(names, ["fomc", "rate hike", "cpi"]);
}

#[test]
fn invalid_utf8_is_read_lossily() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("raw.txt");
    fs::write(&path, b"cpi \xff\xfe cpi").expect("write fixture");

    let report = json_report(mention_report().args(["--format", "json", "-k", "cpi"]).arg(&path));
    assert_eq!(report["keywords"][0]["total_mentions"], 2);
}

#[test]
fn missing_keywords_fails() {
    let (_dir, jan, _feb) = fixtures();

    mention_report()
        .args(["-k", " , "])
        .arg(&jan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no keywords given"));
}

#[test]
fn missing_file_fails_with_path() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.txt");

    mention_report()
        .args(["-k", "cpi"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"))
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn non_positive_wpm_fails() {
    let (_dir, jan, _feb) = fixtures();

    mention_report()
        .args(["-k", "cpi", "--wpm", "0"])
        .arg(&jan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("words per minute"));

    mention_report()
        .args(["-k", "cpi", "--wpm", "-5"])
        .arg(&jan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("words per minute"));
}

#[test]
fn requires_at_least_one_file() {
    mention_report()
        .args(["-k", "cpi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILE"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let (_dir, jan, _feb) = fixtures();

    let output = mention_report()
        .args(["--format", "json", "--verbose", "-k", "fomc"])
        .arg(&jan)
        .output()
        .expect("run mention_report");
    assert!(output.status.success());
    serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("stdout stays JSON");
    assert!(String::from_utf8_lossy(&output.stderr).contains("computing keyword metrics"));
}
