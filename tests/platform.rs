#![cfg(not(target_os = "emscripten"))]

use std::ffi::OsString;
use std::path::PathBuf;

use dreamwalk::constants::leaderboard::DEFAULT_FILE;
use dreamwalk::platform::leaderboard_path_from;
use speculoos::prelude::*;

#[test]
fn test_leaderboard_path_defaults_to_working_directory() {
    assert_that(&leaderboard_path_from(None)).is_equal_to(PathBuf::from(DEFAULT_FILE));
    assert_that(&leaderboard_path_from(None)).is_equal_to(PathBuf::from("dreamwalk-leaderboard.json"));
}

#[test]
fn test_leaderboard_path_override() {
    let path = leaderboard_path_from(Some(OsString::from("/tmp/runs/board.json")));
    assert_that(&path).is_equal_to(PathBuf::from("/tmp/runs/board.json"));
}

#[test]
fn test_empty_leaderboard_override_is_ignored() {
    assert_that(&leaderboard_path_from(Some(OsString::new()))).is_equal_to(PathBuf::from(DEFAULT_FILE));
}
