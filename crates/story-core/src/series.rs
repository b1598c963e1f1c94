// File: crates/story-core/src/series.rs
// Summary: Per-entity season series (attempts + percentage), raw rows, and the ranking catalog.
// Notes:
// - `EntitySeries` is always sorted by season with no duplicates and only finite values;
//   the constructors enforce this so renderers can rely on it.

use std::collections::BTreeMap;

use crate::types::Season;

/// One CSV row keyed by (entity, season, team).
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub entity: String,
    pub season: Season,
    pub team: Option<String>,
    pub attempts: Option<f64>,
    pub percentage: Option<f64>,
}

impl RawRow {
    pub fn new(
        entity: impl Into<String>,
        season: Season,
        team: Option<&str>,
        attempts: Option<f64>,
        percentage: Option<f64>,
    ) -> Self {
        Self { entity: entity.into(), season, team: team.map(str::to_string), attempts, percentage }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeasonRecord {
    pub season: Season,
    pub attempts: f64,
    /// Fraction in 0..=1.
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntitySeries {
    name: String,
    records: Vec<SeasonRecord>,
}

impl EntitySeries {
    /// Sorts by season, keeps the first record of any duplicated season and
    /// drops records with non-finite values.
    pub fn from_records(name: impl Into<String>, mut records: Vec<SeasonRecord>) -> Self {
        records.retain(|r| r.attempts.is_finite() && r.percentage.is_finite());
        records.sort_by_key(|r| r.season); // stable: first duplicate wins
        records.dedup_by_key(|r| r.season);
        Self { name: name.into(), records }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn records(&self) -> &[SeasonRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, season: Season) -> Option<&SeasonRecord> {
        self.records
            .binary_search_by_key(&season, |r| r.season)
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn seasons(&self) -> Option<(Season, Season)> {
        Some((self.records.first()?.season, self.records.last()?.season))
    }

    pub fn average_attempts(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.records.iter().map(|r| r.attempts).sum::<f64>() / self.records.len() as f64)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub entity: String,
    pub average_attempts: f64,
}

/// Built series keyed by entity, plus the catalog ranked by average attempts.
#[derive(Clone, Debug, Default)]
pub struct SeriesSet {
    series: BTreeMap<String, EntitySeries>,
    catalog: Vec<CatalogEntry>,
}

impl SeriesSet {
    pub(crate) fn from_parts(series: BTreeMap<String, EntitySeries>, catalog: Vec<CatalogEntry>) -> Self {
        Self { series, catalog }
    }

    pub fn get(&self, name: &str) -> Option<&EntitySeries> { self.series.get(name) }
    pub fn contains(&self, name: &str) -> bool { self.series.contains_key(name) }
    pub fn len(&self) -> usize { self.series.len() }
    pub fn is_empty(&self) -> bool { self.series.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &EntitySeries> { self.series.values() }

    /// Entities sorted by average attempts, highest first.
    pub fn catalog(&self) -> &[CatalogEntry] { &self.catalog }
}

/// Membership test used to validate selections.
pub trait EntityLookup {
    fn contains_entity(&self, name: &str) -> bool;
}

impl EntityLookup for SeriesSet {
    fn contains_entity(&self, name: &str) -> bool { self.contains(name) }
}

impl EntityLookup for BTreeMap<String, EntitySeries> {
    fn contains_entity(&self, name: &str) -> bool { self.contains_key(name) }
}

impl EntityLookup for [&str] {
    fn contains_entity(&self, name: &str) -> bool { self.iter().any(|n| *n == name) }
}
