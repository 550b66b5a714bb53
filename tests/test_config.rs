use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use arcade_engine::config::*;

// ── Args ──────────────────────────────────────────────────────────────────────

#[test]
fn defaults_without_flags() {
    let args = Args::try_parse_from(["arcade_engine"]).expect("parse");
    assert_eq!(args.seed, None);
    assert!(!args.mute);
    assert_eq!(args.fps, DEFAULT_FPS);
    assert_eq!(args.data_dir, None);
}

#[test]
fn flags_resolve_into_config() {
    let args = Args::try_parse_from([
        "arcade_engine",
        "--seed",
        "7",
        "--mute",
        "--fps",
        "45",
        "--data-dir",
        "/tmp/arcade",
    ])
    .expect("parse");
    let config = GameConfig::from(args);
    assert_eq!(config.seed, Some(7));
    assert!(config.muted);
    assert_eq!(config.fps, 45);
    assert_eq!(config.data_dir, PathBuf::from("/tmp/arcade"));
    assert_eq!(config.log_file, PathBuf::from("/tmp/arcade/arcade.log"));
}

#[test]
fn explicit_log_file_wins() {
    let args = Args::try_parse_from(["arcade_engine", "--log-file", "/tmp/x.log"]).expect("parse");
    assert_eq!(GameConfig::from(args).log_file, PathBuf::from("/tmp/x.log"));
}

#[test]
fn fps_is_clamped() {
    let fast = Args::try_parse_from(["arcade_engine", "--fps", "500"]).expect("parse");
    assert_eq!(GameConfig::from(fast).fps, 60);
    let zero = Args::try_parse_from(["arcade_engine", "--fps", "0"]).expect("parse");
    assert_eq!(GameConfig::from(zero).fps, 1);
}

#[test]
fn bad_flags_are_rejected() {
    assert!(Args::try_parse_from(["arcade_engine", "--fps", "fast"]).is_err());
    assert!(Args::try_parse_from(["arcade_engine", "--bogus"]).is_err());
}

// ── GameConfig ────────────────────────────────────────────────────────────────

#[test]
fn durations() {
    let config = GameConfig::default();
    assert_eq!(config.tick_duration(), Duration::from_secs(1) / 60);
    assert_eq!(config.frame_duration(), Duration::from_secs(1) / DEFAULT_FPS);
    assert!(config.log_file.starts_with(&config.data_dir));
}
