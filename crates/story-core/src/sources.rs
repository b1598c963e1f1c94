// File: crates/story-core/src/sources.rs
// Summary: Typed chart identifiers and the data-source note printed under each chart.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// One chart of the story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    LeagueTrend,
    VolumeEfficiency,
    CurryComparison,
    PositionShare,
    ShotProfile,
    TeamAdoption,
}

impl ChartId {
    /// Story order.
    pub const ALL: [ChartId; 6] = [
        ChartId::LeagueTrend,
        ChartId::VolumeEfficiency,
        ChartId::CurryComparison,
        ChartId::PositionShare,
        ChartId::ShotProfile,
        ChartId::TeamAdoption,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartId::LeagueTrend => "leagueTrend",
            ChartId::VolumeEfficiency => "volumeEfficiency",
            ChartId::CurryComparison => "curryComparison",
            ChartId::PositionShare => "positionShare",
            ChartId::ShotProfile => "shotProfile",
            ChartId::TeamAdoption => "teamAdoption",
        }
    }

    /// Kebab-case form used on the command line and for output file stems.
    pub fn slug(self) -> &'static str {
        match self {
            ChartId::LeagueTrend => "league-trend",
            ChartId::VolumeEfficiency => "volume-efficiency",
            ChartId::CurryComparison => "curry-comparison",
            ChartId::PositionShare => "position-share",
            ChartId::ShotProfile => "shot-profile",
            ChartId::TeamAdoption => "team-adoption",
        }
    }

    pub fn source(self) -> DataSource {
        let (file, fields): (&str, &[&str]) = match self {
            ChartId::LeagueTrend => ("Team Stats Per Game.csv", &["season", "x3pa_per_game", "x3p_percent"]),
            ChartId::VolumeEfficiency => {
                ("Team Stats Per Game.csv", &["season", "team", "x3pa_per_game", "x3p_percent"])
            }
            ChartId::CurryComparison => {
                ("Player Per Game.csv", &["season", "player", "team", "x3pa_per_game", "x3p_percent"])
            }
            ChartId::PositionShare => ("Player Totals.csv", &["season", "pos", "x3pa"]),
            ChartId::ShotProfile => (
                "Player Shooting.csv",
                &[
                    "season",
                    "percent_fga_from_x3p_range",
                    "percent_fga_from_x10_16_range",
                    "percent_fga_from_x16_3p_range",
                    "avg_dist_fga",
                ],
            ),
            ChartId::TeamAdoption => ("Team Summaries.csv", &["season", "team", "x3p_ar", "n_rtg", "w", "l"]),
        };
        DataSource { file, fields }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownChart(pub String);

impl fmt::Display for UnknownChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chart `{}`", self.0)
    }
}

impl std::error::Error for UnknownChart {}

/// Accepts the camelCase name or the kebab-case slug.
impl FromStr for ChartId {
    type Err = UnknownChart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartId::ALL
            .into_iter()
            .find(|id| id.as_str() == s || id.slug() == s)
            .ok_or_else(|| UnknownChart(s.to_string()))
    }
}

impl Serialize for ChartId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Upstream table a chart's pre-aggregated file was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataSource {
    pub file: &'static str,
    pub fields: &'static [&'static str],
}

impl DataSource {
    pub fn caption(&self) -> String {
        format!("Data: {} \u{2192} fields used: {}", self.file, self.fields.join(", "))
    }
}
