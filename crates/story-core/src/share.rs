// File: crates/story-core/src/share.rs
// Summary: Per-player league share of three-point attempts, for the position view.

use std::collections::BTreeMap;

use crate::data::PlayerShareRecord;
use crate::series::EntityLookup;
use crate::types::Season;

/// Position used when a record has none.
pub const UNKNOWN_POSITION: &str = "UNK";

#[derive(Clone, Debug, PartialEq)]
pub struct ShareSeries {
    pub player: String,
    pub position: String,
    pub avg_share: f64,
    /// Ascending by season; shares are fractions of league attempts.
    pub points: Vec<(Season, f64)>,
}

#[derive(Clone, Debug, Default)]
pub struct ShareSet {
    by_player: BTreeMap<String, ShareSeries>,
    /// Input order.
    order: Vec<String>,
}

impl ShareSet {
    /// Keep seasons from `since` on with a defined share; players left with no
    /// seasons are dropped. A later record for the same player replaces the earlier one.
    pub fn from_records(records: &[PlayerShareRecord], since: Season) -> Self {
        let mut set = ShareSet::default();
        for record in records {
            let mut points: Vec<(Season, f64)> = record
                .seasons
                .iter()
                .filter(|e| e.season >= since)
                .filter_map(|e| e.share.filter(|s| s.is_finite()).map(|s| (e.season, s)))
                .collect();
            if points.is_empty() {
                continue;
            }
            points.sort_by_key(|p| p.0);
            points.dedup_by_key(|p| p.0);
            let position = record
                .position
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(UNKNOWN_POSITION)
                .to_string();
            let series = ShareSeries {
                player: record.player.clone(),
                position,
                avg_share: record.avg_share.unwrap_or(0.0),
                points,
            };
            if set.by_player.insert(record.player.clone(), series).is_none() {
                set.order.push(record.player.clone());
            }
        }
        set
    }

    pub fn get(&self, player: &str) -> Option<&ShareSeries> {
        self.by_player.get(player)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Series in input order.
    pub fn iter(&self) -> impl Iterator<Item = &ShareSeries> {
        self.order.iter().filter_map(|p| self.by_player.get(p))
    }
}

impl EntityLookup for ShareSet {
    fn contains_entity(&self, name: &str) -> bool {
        self.by_player.contains_key(name)
    }
}
