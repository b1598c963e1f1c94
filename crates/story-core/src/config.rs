// File: crates/story-core/src/config.rs
// Summary: TOML story configuration: directories, chart size, players and per-chart output targets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::AGGREGATE_TEAM;
use crate::chart::comparison::{COMPARISON_SINCE, FEATURED_PLAYER};
use crate::chart::position::POSITION_SINCE;
use crate::error::{StoryError, StoryResult};
use crate::selection::POSITION_CAPACITY;
use crate::sources::ChartId;
use crate::theme::{self, Theme};
use crate::types::{Season, WIDTH};

/// Where one chart is written, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// File name of the SVG; a PNG, when requested, swaps the extension.
    pub file: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl TargetConfig {
    pub fn for_chart(id: ChartId) -> Self {
        Self { file: format!("{}.svg", id.slug()), enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub width: u32,
    /// Overrides every chart's default height.
    pub height: Option<u32>,
    /// Theme preset name; unknown names fall back to the light theme.
    pub theme: String,
    pub featured_player: String,
    pub aggregate_team: String,
    pub comparison_since: Season,
    pub position_since: Season,
    pub position_capacity: usize,
    pub charts: BTreeMap<ChartId, TargetConfig>,
    /// Players added to the comparison chart before it is written.
    pub comparison_players: Vec<String>,
    /// Players added to the position chart before it is written.
    pub position_players: Vec<String>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("out"),
            width: WIDTH,
            height: None,
            theme: "light".to_string(),
            featured_player: FEATURED_PLAYER.to_string(),
            aggregate_team: AGGREGATE_TEAM.to_string(),
            comparison_since: COMPARISON_SINCE,
            position_since: POSITION_SINCE,
            position_capacity: POSITION_CAPACITY,
            charts: ChartId::ALL.into_iter().map(|id| (id, TargetConfig::for_chart(id))).collect(),
            comparison_players: Vec::new(),
            position_players: Vec::new(),
        }
    }
}

impl StoryConfig {
    /// Read and validate a TOML file. Fields left out keep their defaults;
    /// a `[charts]` table replaces the default targets entirely.
    pub fn load(path: &Path) -> StoryResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| StoryError::Load { path: path.to_path_buf(), source })?;
        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), charts = config.charts.len(), "loaded story config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> StoryResult<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, path: &Path) -> StoryResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StoryError::Config { path: path.to_path_buf(), message: e.to_string() })?;
        config.validate().map_err(|message| StoryError::Config { path: path.to_path_buf(), message })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.width == 0 {
            return Err("width must be positive".into());
        }
        if self.height == Some(0) {
            return Err("height must be positive".into());
        }
        if self.position_capacity == 0 {
            return Err("position_capacity must be at least 1".into());
        }
        if self.featured_player.trim().is_empty() {
            return Err("featured_player must not be empty".into());
        }
        if let Some((id, _)) = self.charts.iter().find(|(_, t)| t.file.trim().is_empty()) {
            return Err(format!("chart `{id}` has an empty file name"));
        }
        Ok(())
    }

    /// Output target of `id`; `Ok(None)` when the chart is disabled.
    pub fn target(&self, id: ChartId) -> StoryResult<Option<&TargetConfig>> {
        let target = self.charts.get(&id).ok_or(StoryError::MissingTarget(id))?;
        Ok(target.enabled.then_some(target))
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_chart() {
        let config = StoryConfig::default();
        for id in ChartId::ALL {
            let target = config.target(id).expect("target").expect("enabled");
            assert_eq!(target.file, format!("{}.svg", id.slug()));
        }
        assert_eq!(config.position_capacity, 5);
        assert_eq!(config.featured_player, "Stephen Curry");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = StoryConfig::from_toml_str(
            r#"
            width = 1024
            comparison_players = ["James Harden"]

            [charts.leagueTrend]
            file = "trend.svg"

            [charts.position-share]
            file = "positions.svg"
            enabled = false
            "#,
        )
        .expect("config");
        assert_eq!(config.width, 1024);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.comparison_players, vec!["James Harden".to_string()]);
        assert_eq!(config.target(ChartId::LeagueTrend).expect("ok").map(|t| t.file.as_str()), Some("trend.svg"));
        assert_eq!(config.target(ChartId::PositionShare).expect("ok"), None);
        assert!(matches!(
            config.target(ChartId::ShotProfile),
            Err(StoryError::MissingTarget(ChartId::ShotProfile))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(StoryConfig::from_toml_str("width = 0"), Err(StoryError::Config { .. })));
        assert!(matches!(StoryConfig::from_toml_str("[charts.pie]\nfile = \"x.svg\""), Err(StoryError::Config { .. })));
        assert!(matches!(StoryConfig::from_toml_str("width = \"wide\""), Err(StoryError::Config { .. })));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("story.toml");
        fs::write(&path, "theme = \"dark\"\nposition_capacity = 3\n").expect("write");
        let config = StoryConfig::load(&path).expect("load");
        assert_eq!(config.position_capacity, 3);
        assert_eq!(config.theme().name, "dark");
        assert!(matches!(StoryConfig::load(&dir.path().join("missing.toml")), Err(StoryError::Load { .. })));
    }
}
