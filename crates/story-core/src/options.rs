// File: crates/story-core/src/options.rs
// Summary: Entity lists offered by the two interactive charts' pickers.

use std::cmp::Ordering;

use crate::series::SeriesSet;
use crate::share::{ShareSet, UNKNOWN_POSITION};

/// Players listed first in the position picker, when present.
pub const FEATURED_PLAYERS: [&str; 13] = [
    "Stephen Curry",
    "Damian Lillard",
    "James Harden",
    "Klay Thompson",
    "Paul George",
    "LeBron James",
    "Kevin Durant",
    "Giannis Antetokounmpo",
    "Dirk Nowitzki",
    "Karl-Anthony Towns",
    "Nikola Jokic",
    "Joel Embiid",
    "Kristaps Porzingis",
];

/// Per-position groups in picker order with their labels.
pub const POSITION_GROUPS: [(&str, &str); 6] = [
    ("PG", "Point Guards"),
    ("SG", "Shooting Guards"),
    ("SF", "Small Forwards"),
    ("PF", "Power Forwards"),
    ("C", "Centers"),
    (UNKNOWN_POSITION, "Other / Unknown"),
];

pub const GROUP_LIMIT: usize = 150;

#[derive(Clone, Debug, PartialEq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionGroup {
    pub label: String,
    pub items: Vec<OptionItem>,
}

/// Search-box suggestions: every catalog entity but the featured one, by
/// average attempts descending.
pub fn comparison_options(series: &SeriesSet, featured: &str) -> Vec<OptionItem> {
    series
        .catalog()
        .iter()
        .filter(|c| c.entity != featured)
        .map(|c| OptionItem { value: c.entity.clone(), label: c.entity.clone() })
        .collect()
}

/// Dropdown groups: featured players, then one group per position sorted by
/// average share and capped at [`GROUP_LIMIT`]. Empty groups are omitted and
/// featured players are not repeated.
pub fn position_options(shares: &ShareSet) -> Vec<OptionGroup> {
    let mut groups = Vec::new();

    let featured: Vec<OptionItem> = FEATURED_PLAYERS
        .iter()
        .filter_map(|name| shares.get(name))
        .map(|s| OptionItem { value: s.player.clone(), label: format!("{} ({})", s.player, s.position) })
        .collect();
    if !featured.is_empty() {
        groups.push(OptionGroup { label: "Featured Players".to_string(), items: featured });
    }

    for (pos, label) in POSITION_GROUPS {
        let mut members: Vec<_> = shares
            .iter()
            .filter(|s| !FEATURED_PLAYERS.contains(&s.player.as_str()))
            .filter(|s| group_of(&s.position) == pos)
            .collect();
        if members.is_empty() {
            continue;
        }
        // stable sort keeps input order among equal shares
        members.sort_by(|a, b| b.avg_share.partial_cmp(&a.avg_share).unwrap_or(Ordering::Equal));
        let items = members
            .into_iter()
            .take(GROUP_LIMIT)
            .map(|s| OptionItem { value: s.player.clone(), label: format!("{} ({pos})", s.player) })
            .collect();
        groups.push(OptionGroup { label: label.to_string(), items });
    }
    groups
}

fn group_of(position: &str) -> &str {
    POSITION_GROUPS
        .iter()
        .map(|(p, _)| *p)
        .find(|p| *p == position)
        .unwrap_or(UNKNOWN_POSITION)
}
