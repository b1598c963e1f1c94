// File: crates/story-core/src/loader.rs
// Summary: Reads the JSON documents and the per-game CSV from the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::data::{parse_number, parse_season};
use crate::error::{StoryError, StoryResult};
use crate::series::RawRow;

const COL_SEASON: &str = "season";
const COL_PLAYER: &str = "player";
const COL_TEAM: &str = "team";
const COL_ATTEMPTS: &str = "x3pa_per_game";
const COL_PERCENT: &str = "x3p_percent";

/// Deserialize `<dir>/<name>`.
pub fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> StoryResult<T> {
    read_json(&dir.join(name))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoryResult<T> {
    let text = fs::read_to_string(path).map_err(|e| StoryError::Load { path: path.to_path_buf(), source: e })?;
    let value = serde_json::from_str(&text).map_err(|e| StoryError::Parse { path: path.to_path_buf(), source: e })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded json");
    Ok(value)
}

/// Read player rows from the per-game CSV.
///
/// Columns are found by (case-insensitive) header name. Blank and `NA` cells
/// are missing values; any other non-numeric value fails with its line and column.
pub fn load_player_rows(path: &Path) -> StoryResult<Vec<RawRow>> {
    let csv_err = |e: csv::Error| csv_error(path, e);
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).map_err(csv_err)?;

    let headers = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    let idx = |name: &str| -> StoryResult<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StoryError::MissingColumn { path: path.to_path_buf(), column: name.to_string() })
    };
    let i_season = idx(COL_SEASON)?;
    let i_player = idx(COL_PLAYER)?;
    let i_team = idx(COL_TEAM)?;
    let i_attempts = idx(COL_ATTEMPTS)?;
    let i_percent = idx(COL_PERCENT)?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec.map_err(csv_err)?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| rec.get(i).unwrap_or("").trim();
        let invalid = |column: &str, value: &str| StoryError::InvalidNumber {
            path: path.to_path_buf(),
            line,
            column: column.to_string(),
            value: value.to_string(),
        };
        let number = |i: usize, column: &str| parse_number(cell(i)).map_err(|_| invalid(column, cell(i)));

        let player = cell(i_player);
        if player.is_empty() {
            skipped += 1;
            continue;
        }
        let season = parse_season(cell(i_season)).ok_or_else(|| invalid(COL_SEASON, cell(i_season)))?;
        let team = Some(cell(i_team)).filter(|t| !t.is_empty() && *t != "NA");
        out.push(RawRow::new(
            player,
            season,
            team,
            number(i_attempts, COL_ATTEMPTS)?,
            number(i_percent, COL_PERCENT)?,
        ));
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "rows without a player name skipped");
    }
    debug!(path = %path.display(), rows = out.len(), "loaded player rows");
    Ok(out)
}

fn csv_error(path: &Path, e: csv::Error) -> StoryError {
    if !e.is_io_error() {
        return StoryError::Csv { path: path.to_path_buf(), source: e };
    }
    let source = match e.into_kind() {
        csv::ErrorKind::Io(io) => io,
        kind => std::io::Error::other(format!("{kind:?}")),
    };
    StoryError::Load { path: path.to_path_buf(), source }
}

/// Loader rooted at one data directory.
#[derive(Clone, Debug)]
pub struct DataLoader {
    dir: PathBuf,
}

impl DataLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn json<T: DeserializeOwned>(&self, name: &str) -> StoryResult<T> {
        load_json(&self.dir, name)
    }

    pub fn player_rows(&self, name: &str) -> StoryResult<Vec<RawRow>> {
        load_player_rows(&self.path(name))
    }
}
