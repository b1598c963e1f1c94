// File: crates/story-core/tests/story.rs
// Purpose: Whole-story render against the fixture data directory.
// Behavior:
// - Copies tests/fixtures into a temp dir so files can be removed per test.
// - Renders every chart and checks the written SVGs and the report.
// - Breaks single inputs to confirm failures stay isolated to their chart.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use story_core::data::PLAYER_PER_GAME_FILE;
use story_core::options::comparison_options;
use story_core::{ChartId, Story, StoryConfig, StoryError};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn setup() -> (tempfile::TempDir, StoryConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).expect("data dir");
    for entry in std::fs::read_dir(fixtures()).expect("fixtures") {
        let entry = entry.expect("entry");
        std::fs::copy(entry.path(), data.join(entry.file_name())).expect("copy fixture");
    }
    let config = StoryConfig {
        data_dir: data,
        output_dir: dir.path().join("out"),
        ..StoryConfig::default()
    };
    (dir, config)
}

fn rendered_ids(report: &story_core::StoryReport) -> Vec<ChartId> {
    report.rendered.iter().map(|c| c.id).collect()
}

#[test]
fn renders_all_six_charts() {
    let (_dir, config) = setup();
    let out = config.output_dir.clone();
    let report = Story::new(config).render_all();

    assert!(report.is_success(), "failures: {:?}", report.failed);
    assert_eq!(rendered_ids(&report), ChartId::ALL.to_vec());
    for id in ChartId::ALL {
        let path = out.join(format!("{}.svg", id.slug()));
        let svg = std::fs::read_to_string(&path).expect("svg written");
        assert!(svg.starts_with("<svg"), "{} is not svg", path.display());
        assert!(svg.contains(id.source().file), "{} lacks its caption", path.display());
    }
}

#[test]
fn configured_players_are_preselected() {
    let (_dir, mut config) = setup();
    config.comparison_players = vec!["James Harden".into(), "Nobody".into()];
    config.position_players = vec!["Reggie Miller".into()];
    let story = Story::new(config);

    let comparison = story.comparison().expect("comparison chart");
    assert_eq!(comparison.selection().names(), &["James Harden"]);
    let chips = comparison.scene().find("chips").expect("chips");
    assert!(chips.keyed_child("chip", "James Harden").is_some());

    let position = story.position().expect("position chart");
    assert_eq!(position.selection().names(), &["Reggie Miller"]);
}

#[test]
fn one_missing_file_fails_only_its_chart() {
    let (_dir, config) = setup();
    std::fs::remove_file(config.data_dir.join(PLAYER_PER_GAME_FILE)).expect("remove csv");
    let report = Story::new(config).render_all();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, ChartId::CurryComparison);
    assert_eq!(report.rendered.len(), 5);
}

#[test]
fn bad_number_names_file_and_line() {
    let (_dir, config) = setup();
    let csv = config.data_dir.join(PLAYER_PER_GAME_FILE);
    let mut text = std::fs::read_to_string(&csv).expect("read csv");
    text.push_str("2014,Stephen Curry,PG,GSW,80,lots,0.42\n");
    std::fs::write(&csv, text).expect("write csv");

    let err = Story::new(config).comparison_series().expect_err("invalid number");
    match err {
        StoryError::InvalidNumber { path, column, value, .. } => {
            assert!(path.ends_with(Path::new(PLAYER_PER_GAME_FILE)));
            assert_eq!(column, "x3pa_per_game");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn missing_and_disabled_targets() {
    let (_dir, mut config) = setup();
    let mut charts = BTreeMap::new();
    for (id, target) in config.charts.iter() {
        if *id != ChartId::ShotProfile {
            charts.insert(*id, target.clone());
        }
    }
    if let Some(t) = charts.get_mut(&ChartId::TeamAdoption) {
        t.enabled = false;
    }
    config.charts = charts;
    let report = Story::new(config).render_all();

    assert_eq!(report.skipped, vec![ChartId::TeamAdoption]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, ChartId::ShotProfile);
    assert!(report.failed[0].1.contains("shotProfile"));
    assert_eq!(report.rendered.len(), 4);
}

#[test]
fn catalog_drives_comparison_options() {
    let (_dir, config) = setup();
    let story = Story::new(config);
    let series = story.comparison_series().expect("series");
    let options = comparison_options(&series, "Stephen Curry");
    assert!(options.iter().all(|o| o.value != "Stephen Curry"));
    assert!(options.iter().any(|o| o.value == "James Harden"));
    // Korver's NA season is dropped but 2012 remains
    assert_eq!(series.get("Kyle Korver").map(|s| s.len()), Some(1));
    assert_eq!(series.get("James Harden").and_then(|s| s.get(2013)).map(|r| r.attempts), Some(6.2));
}
