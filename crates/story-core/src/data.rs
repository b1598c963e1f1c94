// File: crates/story-core/src/data.rs
// Summary: Serde shapes of the pre-aggregated JSON documents.
// Notes:
// - Numeric fields accept JSON numbers or numeric strings. `null`, absent, "" and "NA"
//   read as missing; any other text is a parse error rather than a silent NaN.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::types::Season;

pub const LEAGUE_TREND_FILE: &str = "league_3pa_trend.json";
pub const VOLUME_FILE: &str = "volume_vs_efficiency.json";
pub const CURRY_FILE: &str = "curry_vs_league.json";
pub const POSITION_SHARES_FILE: &str = "position_3pa_shares.json";
pub const PLAYER_SHARE_FILE: &str = "player_league_share.json";
pub const SHOT_PROFILE_FILE: &str = "shot_profile_trends.json";
pub const ADOPTION_FILE: &str = "team_adoption_threshold.json";
pub const PLAYER_PER_GAME_FILE: &str = "Player Per Game.csv";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LeagueTrendRow {
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub avg_3pa_per_game: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub avg_3p_percent: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TeamVolume {
    pub team: String,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub x3pa_per_game: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub x3p_percent: Option<f64>,
}

/// Teams per season year, keyed by the year as text ("2000", "2010", ...).
pub type VolumeDoc = BTreeMap<String, Vec<TeamVolume>>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LeagueAverageRow {
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub avg_player_3pa_per_game: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurryVsLeague {
    #[serde(default)]
    pub league_avg_player_3pa_per_game: Vec<LeagueAverageRow>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PositionSharesRow {
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(rename = "share_PG", default, deserialize_with = "de_opt_number")]
    pub pg: Option<f64>,
    #[serde(rename = "share_SG", default, deserialize_with = "de_opt_number")]
    pub sg: Option<f64>,
    #[serde(rename = "share_SF", default, deserialize_with = "de_opt_number")]
    pub sf: Option<f64>,
    #[serde(rename = "share_PF", default, deserialize_with = "de_opt_number")]
    pub pf: Option<f64>,
    #[serde(rename = "share_C", default, deserialize_with = "de_opt_number")]
    pub c: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShareEntry {
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub share: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlayerShareRecord {
    pub player: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub avg_share: Option<f64>,
    #[serde(default)]
    pub seasons: Vec<ShareEntry>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShotProfileRow {
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub percent_fga_from_x3p_range: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub percent_fga_from_x10_16_range: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub percent_fga_from_x16_3p_range: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdoptionRow {
    pub team: String,
    #[serde(deserialize_with = "de_season")]
    pub season: Season,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub net_rating: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(f64),
    Text(String),
}

/// A cell that is neither blank, "NA", nor a finite number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotANumber;

/// Missing-value aware number parse shared by JSON and CSV input.
/// `Ok(None)` for blank or "NA".
pub fn parse_number(raw: &str) -> Result<Option<f64>, NotANumber> {
    let s = raw.trim();
    if s.is_empty() || s == "NA" {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(NotANumber),
    }
}

/// Seasons accepted on load, from the first league season to a far horizon.
pub const SEASONS: RangeInclusive<Season> = 1947..=2100;

/// Whole-number season within [`SEASONS`] from an integer, an integral
/// float, or numeric text.
pub fn parse_season(raw: &str) -> Option<Season> {
    season_from_f64(raw.trim().parse::<f64>().ok()?)
}

fn season_from_f64(v: f64) -> Option<Season> {
    let season = v as Season;
    (v.is_finite() && v.fract() == 0.0 && SEASONS.contains(&season)).then_some(season)
}

pub(crate) fn de_opt_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumOrText>::deserialize(d)? {
        None => Ok(None),
        Some(NumOrText::Num(v)) => Ok(Some(v).filter(|v| v.is_finite())),
        Some(NumOrText::Text(s)) => {
            parse_number(&s).map_err(|NotANumber| de::Error::custom(format!("`{s}` is not a number")))
        }
    }
}

pub(crate) fn de_season<'de, D>(d: D) -> Result<Season, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match NumOrText::deserialize(d)? {
        NumOrText::Num(v) => season_from_f64(v),
        NumOrText::Text(s) => parse_season(&s),
    };
    parsed.ok_or_else(|| {
        de::Error::custom(format!("season must be a whole number in {}..={}", SEASONS.start(), SEASONS.end()))
    })
}
