// File: crates/story-core/src/builder.rs
// Summary: Groups raw per-team rows into chronological per-entity series and a ranking catalog.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::series::{CatalogEntry, EntitySeries, RawRow, SeasonRecord, SeriesSet};
use crate::types::Season;

/// Team code of the row that sums a player's stats across teams.
pub const AGGREGATE_TEAM: &str = "TOT";

#[derive(Clone, Debug)]
pub struct SeriesBuilder {
    aggregate_team: String,
    since: Option<Season>,
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self { aggregate_team: AGGREGATE_TEAM.to_string(), since: None }
    }
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Team code treated as the aggregate-total row.
    pub fn aggregate_team(mut self, team: impl Into<String>) -> Self {
        self.aggregate_team = team.into();
        self
    }

    /// Ignore rows before `season`.
    pub fn since(mut self, season: Season) -> Self {
        self.since = Some(season);
        self
    }

    /// Build one series per entity.
    ///
    /// Rows without attempts never take part. For every (entity, season) the
    /// aggregate-total row wins; without one the first row in input order is
    /// used. The season is dropped when that row lacks a percentage. Entities
    /// left with no seasons are omitted.
    pub fn build(&self, rows: &[RawRow]) -> SeriesSet {
        let mut grouped: BTreeMap<&str, BTreeMap<Season, Vec<&RawRow>>> = BTreeMap::new();
        for row in rows {
            if self.since.is_some_and(|s| row.season < s) || finite(row.attempts).is_none() {
                continue;
            }
            grouped
                .entry(row.entity.as_str())
                .or_default()
                .entry(row.season)
                .or_default()
                .push(row);
        }

        let mut series = BTreeMap::new();
        let mut catalog = Vec::new();
        let mut dropped = 0usize;
        for (entity, seasons) in grouped {
            let mut records = Vec::with_capacity(seasons.len());
            for (season, entries) in seasons {
                let Some(preferred) = self.preferred(&entries) else { continue };
                match (finite(preferred.attempts), finite(preferred.percentage)) {
                    (Some(attempts), Some(percentage)) => {
                        records.push(SeasonRecord { season, attempts, percentage })
                    }
                    _ => dropped += 1,
                }
            }
            let built = EntitySeries::from_records(entity, records);
            let Some(average_attempts) = built.average_attempts() else { continue };
            catalog.push(CatalogEntry { entity: entity.to_string(), average_attempts });
            series.insert(entity.to_string(), built);
        }

        catalog.sort_by(|a, b| {
            b.average_attempts
                .partial_cmp(&a.average_attempts)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        debug!(rows = rows.len(), entities = series.len(), dropped_seasons = dropped, "built series");
        SeriesSet::from_parts(series, catalog)
    }

    fn preferred<'r>(&self, entries: &[&'r RawRow]) -> Option<&'r RawRow> {
        entries
            .iter()
            .find(|r| r.team.as_deref() == Some(self.aggregate_team.as_str()))
            .or_else(|| entries.first())
            .copied()
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_row_wins_multi_team_season() {
        let rows = vec![
            RawRow::new("A", 2015, Some("TOT"), Some(5.0), Some(0.4)),
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        let a = set.get("A").expect("series for A");
        assert_eq!(a.len(), 1);
        assert_eq!(a.records()[0], SeasonRecord { season: 2015, attempts: 5.0, percentage: 0.4 });
    }

    #[test]
    fn aggregate_row_wins_regardless_of_position() {
        let rows = vec![
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, Some("Y"), Some(2.0), Some(0.2)),
            RawRow::new("A", 2015, Some("TOT"), Some(5.0), Some(0.4)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        assert_eq!(set.get("A").and_then(|s| s.get(2015)).map(|r| r.attempts), Some(5.0));
    }

    #[test]
    fn first_row_without_aggregate_marker() {
        let rows = vec![
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, Some("Y"), Some(2.0), Some(0.2)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        assert_eq!(set.get("A").and_then(|s| s.get(2015)).map(|r| r.attempts), Some(3.0));
    }

    #[test]
    fn custom_aggregate_marker() {
        let rows = vec![
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, Some("2TM"), Some(5.0), Some(0.4)),
        ];
        let set = SeriesBuilder::new().aggregate_team("2TM").build(&rows);
        assert_eq!(set.get("A").and_then(|s| s.get(2015)).map(|r| r.attempts), Some(5.0));
    }

    #[test]
    fn null_percentage_drops_season() {
        let rows = vec![
            RawRow::new("A", 2014, Some("X"), Some(2.0), Some(0.35)),
            RawRow::new("A", 2015, Some("X"), Some(1.0), None),
        ];
        let set = SeriesBuilder::new().build(&rows);
        let a = set.get("A").expect("A kept");
        assert!(a.get(2015).is_none());
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn null_on_aggregate_row_drops_season() {
        // the aggregate row is chosen first, then found incomplete
        let rows = vec![
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, Some("TOT"), Some(5.0), None),
        ];
        let set = SeriesBuilder::new().build(&rows);
        assert!(set.get("A").is_none());
    }

    #[test]
    fn aggregate_row_without_attempts_falls_back_to_team_row() {
        let rows = vec![
            RawRow::new("A", 2015, Some("X"), Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, Some("TOT"), None, Some(0.4)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        let a = set.get("A").expect("A kept");
        assert_eq!(a.get(2015), Some(&SeasonRecord { season: 2015, attempts: 3.0, percentage: 0.3 }));
    }

    #[test]
    fn seasons_sorted_and_entities_without_seasons_excluded() {
        let rows = vec![
            RawRow::new("A", 2017, None, Some(3.0), Some(0.3)),
            RawRow::new("A", 2015, None, Some(1.0), Some(0.1)),
            RawRow::new("B", 2015, None, None, Some(0.1)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        let seasons: Vec<_> = set.get("A").map(|s| s.records().iter().map(|r| r.season).collect()).unwrap_or_default();
        assert_eq!(seasons, vec![2015, 2017]);
        assert!(!set.contains("B"));
        assert!(set.catalog().iter().all(|c| c.entity != "B"));
    }

    #[test]
    fn catalog_ranked_by_average_attempts() {
        let rows = vec![
            RawRow::new("Low", 2015, None, Some(1.0), Some(0.3)),
            RawRow::new("High", 2015, None, Some(8.0), Some(0.4)),
            RawRow::new("High", 2016, None, Some(10.0), Some(0.4)),
            RawRow::new("Mid", 2015, None, Some(4.0), Some(0.3)),
        ];
        let set = SeriesBuilder::new().build(&rows);
        let order: Vec<_> = set.catalog().iter().map(|c| c.entity.as_str()).collect();
        assert_eq!(order, vec!["High", "Mid", "Low"]);
        assert_eq!(set.catalog()[0].average_attempts, 9.0);
    }

    #[test]
    fn since_filters_early_seasons() {
        let rows = vec![
            RawRow::new("A", 2009, None, Some(1.0), Some(0.3)),
            RawRow::new("A", 2010, None, Some(2.0), Some(0.3)),
        ];
        let set = SeriesBuilder::new().since(2010).build(&rows);
        assert_eq!(set.get("A").map(EntitySeries::len), Some(1));
    }
}
