//! Record store: one JSON file per finished game, plus the leaderboard.
//!
//! The ranked directory keeps the `top_n` longest games under the names
//! `TOP 1.json`, `TOP 2.json`, ...; everything else ranking pushes out is
//! moved to the history directory as `game<k>.json`.

use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::PersistenceError;
use crate::record::StoredGame;

const RECORD_EXTENSION: &str = "json";
const RANK_PREFIX: &str = "TOP ";
const STAGING_PREFIX: &str = ".staging-";
const STAGING_SUFFIX: &str = ".tmp";

/// A record found in the ranked directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    /// File stem, accepted by [`RecordStore::load`]
    pub identifier: String,
    pub path: PathBuf,
    pub game: StoredGame,
}

/// One leaderboard position after ranking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedGame {
    pub rank: usize,
    pub path: PathBuf,
    pub elapsed_seconds: u64,
    pub date: String,
    pub move_count: usize,
}

impl RankedGame {
    fn new(rank: usize, path: PathBuf, game: &StoredGame) -> Self {
        RankedGame {
            rank,
            path,
            elapsed_seconds: game.elapsed_seconds,
            date: game.date.clone(),
            move_count: game.moves.len(),
        }
    }
}

/// Outcome of [`RecordStore::rank_and_prune`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankingReport {
    /// Ranked records, best first
    pub ranked: Vec<RankedGame>,
    /// New paths of records moved to the history directory
    pub relocated: Vec<PathBuf>,
    /// Records that could not be read and were left out of the ranking
    pub skipped: Vec<PathBuf>,
    /// Staging files of an interrupted pass, made visible again before ranking
    pub recovered: Vec<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RecordStore {
    config: StorageConfig,
}

impl RecordStore {
    pub fn new(config: StorageConfig) -> Self {
        RecordStore { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Write `game` into the ranked directory, creating it if needed.
    ///
    /// The file is written under a hidden temporary name and renamed into
    /// place, so a failed save never leaves a partial record behind.
    pub fn save(&self, game: &StoredGame) -> Result<PathBuf, PersistenceError> {
        let dir = &self.config.ranked_dir;
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;

        let json = game.to_json()?;
        let path = free_path(dir, &game.file_stem());
        write_atomic(&path, json.as_bytes())?;

        log::info!("saved game record {} ({} moves)", path.display(), game.moves.len());
        Ok(path)
    }

    /// Path of a record in the ranked directory; the extension is optional
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        if Path::new(identifier).extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
            self.config.ranked_dir.join(identifier)
        } else {
            self.config.ranked_dir.join(format!("{identifier}.{RECORD_EXTENSION}"))
        }
    }

    /// Load a record from the ranked directory by identifier
    pub fn load(&self, identifier: &str) -> Result<StoredGame, PersistenceError> {
        Self::load_file(&self.resolve(identifier))
    }

    /// Load a record from any path
    pub fn load_file(path: &Path) -> Result<StoredGame, PersistenceError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PersistenceError::NotFound(path.to_path_buf()),
            _ => PersistenceError::io(path, e),
        })?;
        StoredGame::from_json(&text).map_err(|e| PersistenceError::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Readable records in the ranked directory, in rank order then by name.
    /// Unreadable files are skipped with a warning.
    pub fn list(&self) -> Result<Vec<RecordEntry>, PersistenceError> {
        let dir = &self.config.ranked_dir;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for path in record_files(dir)? {
            match Self::load_file(&path) {
                Ok(game) => entries.push(RecordEntry {
                    identifier: file_stem(&path),
                    path,
                    game,
                }),
                Err(err) => log::warn!("skipping record: {err}"),
            }
        }
        Ok(entries)
    }

    /// Rank every record in the ranked directory, longest game first.
    ///
    /// The best `top_n` are renamed `TOP <rank>.json`; the rest move to the
    /// history directory. Records already carrying their label are left
    /// alone, so a second run changes nothing. Unreadable records are skipped;
    /// one sitting on a label a ranked record needs is renamed `<stem>.corrupt`.
    /// Records stranded under staging names by an interrupted pass are
    /// recovered first.
    pub fn rank_and_prune(&self) -> Result<RankingReport, PersistenceError> {
        let ranked_dir = &self.config.ranked_dir;
        let history_dir = &self.config.history_dir;
        fs::create_dir_all(ranked_dir).map_err(|e| PersistenceError::io(ranked_dir, e))?;
        fs::create_dir_all(history_dir).map_err(|e| PersistenceError::io(history_dir, e))?;

        let mut report = RankingReport {
            recovered: recover_staged(ranked_dir)?,
            ..RankingReport::default()
        };
        let mut games = Vec::new();
        for path in record_files(ranked_dir)? {
            match Self::load_file(&path) {
                Ok(game) => games.push((path, game)),
                Err(err) => {
                    log::warn!("skipping record during ranking: {err}");
                    report.skipped.push(path);
                }
            }
        }
        games.sort_by(|(a_path, a), (b_path, b)| {
            ranking_order(a, b).then_with(|| natural_key(a_path).cmp(&natural_key(b_path)))
        });

        // Move every record not already at its label out of the way first,
        // so labels can be permuted freely
        let mut staged = Vec::new();
        for (index, (path, game)) in games.into_iter().enumerate() {
            let rank = index + 1;
            let label = rank_path(ranked_dir, rank);
            if rank <= self.config.top_n && path == label {
                report.ranked.push(RankedGame::new(rank, label, &game));
                continue;
            }
            let staging = staging_path(ranked_dir, rank);
            rename(&path, &staging)?;
            staged.push((rank, staging, game));
        }

        for (rank, staging, game) in staged {
            if rank <= self.config.top_n {
                let label = rank_path(ranked_dir, rank);
                if label.exists() {
                    let moved = quarantine(&label)?;
                    for skipped in report.skipped.iter_mut().filter(|p| **p == label) {
                        *skipped = moved.clone();
                    }
                }
                rename(&staging, &label)?;
                report.ranked.push(RankedGame::new(rank, label, &game));
            } else {
                let target = history_path(history_dir);
                rename(&staging, &target)?;
                log::debug!("moved record ranked {rank} to {}", target.display());
                report.relocated.push(target);
            }
        }

        report.ranked.sort_by_key(|g| g.rank);
        log::info!(
            "ranked {} records, moved {} to {}, skipped {}",
            report.ranked.len(),
            report.relocated.len(),
            history_dir.display(),
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Leaderboard order: longer games first, then earlier date, then fewer
/// moves, then move text
fn ranking_order(a: &StoredGame, b: &StoredGame) -> Ordering {
    b.elapsed_seconds
        .cmp(&a.elapsed_seconds)
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.moves.len().cmp(&b.moves.len()))
        .then_with(|| a.move_text().cmp(&b.move_text()))
}

fn rank_path(dir: &Path, rank: usize) -> PathBuf {
    dir.join(format!("{RANK_PREFIX}{rank}.{RECORD_EXTENSION}"))
}

/// Rank encoded in a `TOP <n>.json` file name
fn rank_label(path: &Path) -> Option<usize> {
    path.file_stem()?.to_str()?.strip_prefix(RANK_PREFIX)?.parse().ok()
}

/// Ranked files by rank number, then everything else by name
fn natural_key(path: &Path) -> (usize, String) {
    (rank_label(path).unwrap_or(usize::MAX), file_stem(path))
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Visible `*.json` files in `dir`, in natural order
fn record_files(dir: &Path) -> Result<Vec<PathBuf>, PersistenceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, e))? {
        let path = entry.map_err(|e| PersistenceError::io(dir, e))?.path();
        let hidden = path.file_name().and_then(|n| n.to_str()).is_none_or(|n| n.starts_with('.'));
        if path.is_file() && !hidden && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort_by_key(|path| natural_key(path));
    Ok(files)
}

/// Unused hidden staging name for the record ranked `rank`
fn staging_path(dir: &Path, rank: usize) -> PathBuf {
    let mut path = dir.join(format!("{STAGING_PREFIX}{rank}{STAGING_SUFFIX}"));
    let mut n = 2;
    while path.exists() {
        path = dir.join(format!("{STAGING_PREFIX}{rank}_{n}{STAGING_SUFFIX}"));
        n += 1;
    }
    path
}

/// Rename staging files left by an interrupted ranking pass to visible
/// `staging-<rank>.json` names so the pass ranks them like any other record
fn recover_staged(dir: &Path) -> Result<Vec<PathBuf>, PersistenceError> {
    let mut stranded = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, e))? {
        let path = entry.map_err(|e| PersistenceError::io(dir, e))?.path();
        let is_staging = path.file_name().and_then(|n| n.to_str()).is_some_and(|n| {
            n.starts_with(STAGING_PREFIX) && n.ends_with(STAGING_SUFFIX)
        });
        if is_staging && path.is_file() {
            stranded.push(path);
        }
    }
    stranded.sort();

    let mut recovered = Vec::with_capacity(stranded.len());
    for path in stranded {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let stem = name.trim_start_matches('.').trim_end_matches(STAGING_SUFFIX);
        let target = free_path(dir, stem);
        log::warn!("recovering stranded record {} as {}", path.display(), target.display());
        rename(&path, &target)?;
        recovered.push(target);
    }
    Ok(recovered)
}

/// `<stem>.json`, or `<stem>_2.json`, `<stem>_3.json`, ... when taken
fn free_path(dir: &Path, stem: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.{RECORD_EXTENSION}"));
    let mut n = 2;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.{RECORD_EXTENSION}"));
        n += 1;
    }
    path
}

/// First free `game<k>.json` in the history directory, `k >= 1`
fn history_path(dir: &Path) -> PathBuf {
    let mut k = 1;
    loop {
        let path = dir.join(format!("game{k}.{RECORD_EXTENSION}"));
        if !path.exists() {
            return path;
        }
        k += 1;
    }
}

/// Rename an unreadable record to `<stem>.corrupt` (numbered when taken)
fn quarantine(path: &Path) -> Result<PathBuf, PersistenceError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let stem = file_stem(path);
    let mut target = dir.join(format!("{stem}.corrupt"));
    let mut n = 2;
    while target.exists() {
        target = dir.join(format!("{stem}_{n}.corrupt"));
        n += 1;
    }
    log::warn!("moving unreadable record {} to {}", path.display(), target.display());
    rename(path, &target)?;
    Ok(target)
}

fn rename(from: &Path, to: &Path) -> Result<(), PersistenceError> {
    fs::rename(from, to).map_err(|e| PersistenceError::io(from, e))
}

/// Write to a hidden temporary file next to `path`, then rename it into place
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let temp = dir.join(format!(".{name}.tmp"));

    let written = (|| -> io::Result<()> {
        let mut file = fs::File::create(&temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&temp, path)
    })();

    written.map_err(|e| {
        let _ = fs::remove_file(&temp);
        PersistenceError::io(path, e)
    })
}
