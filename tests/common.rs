#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sk() -> Command {
    cargo_bin_cmd!("shiftkeeper")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftkeeper.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a private configuration file so tests never read ~/.shiftkeeper
pub fn write_config(name: &str, db_path: &str, policy: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftkeeper.conf", name));

    let yaml = format!(
        "database: {db_path}\n\
         default_start: \"09:00\"\n\
         default_end: \"18:00\"\n\
         standard_daily_hours: 8.0\n\
         overlap_policy: {policy}\n\
         separator_char: \"-\"\n"
    );
    fs::write(&path, yaml).expect("write test config");

    path.to_string_lossy().to_string()
}

/// Fresh database + config with one admin (`boss`) and two employees
/// (`alice`, `bob`). Returns (db, config).
pub fn init_team(name: &str, policy: &str) -> (String, String) {
    let db = setup_test_db(name);
    let cfg = write_config(name, &db, policy);

    sk().args(["--db", &db, "--config", &cfg, "--test", "init"])
        .assert()
        .success();

    sk().args([
        "--db", &db, "--config", &cfg, "employee", "add", "boss", "--name", "The Boss", "--admin",
    ])
    .assert()
    .success();

    for who in ["alice", "bob"] {
        sk().args(["--db", &db, "--config", &cfg, "employee", "add", who])
            .assert()
            .success();
    }

    (db, cfg)
}
