pub mod csv;
pub mod rows;

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// One row of a tracker table. Implementations declare the fixed column
/// set and how a record maps to and from a line of fields.
pub trait TableRow: Sized {
    /// Persisted column names, in file order.
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    /// Rebuild a record from a parsed line. Short rows are padded with
    /// empty fields by the store before this is called.
    fn from_row(row: &[String]) -> Self;

    /// Display/selection title of the row.
    fn title(&self) -> &str;

    /// Natural key used for duplicate rejection on append. `None` means
    /// the table accepts duplicates (the simple tracker does).
    fn key(&self) -> Option<&str> {
        None
    }
}

/// Outcome of an append attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Added,
    /// A row with the same key already exists; nothing was written.
    Duplicate,
}

/// File-backed table of records. The whole table is rewritten on every
/// mutation; there is no locking, this is a single-user tool.
pub struct Store<R: TableRow> {
    path: PathBuf,
    _row: PhantomData<R>,
}

impl<R: TableRow> Store<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            path: path.into(),
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted table; a missing file is an empty table.
    pub fn load(&self) -> Result<Vec<R>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;

        let mut lines = csv::parse(&text);
        if !lines.is_empty() {
            // header row
            lines.remove(0);
        }

        let width = R::HEADERS.len();
        let records = lines
            .into_iter()
            .map(|mut row| {
                // short rows come back from spreadsheet edits; pad so every
                // text column reloads as empty rather than missing
                row.resize(width, String::new());
                R::from_row(&row)
            })
            .collect();
        Ok(records)
    }

    /// Overwrite the persisted file from the full table contents. The
    /// write goes through a temp file and a rename so a crash mid-write
    /// never leaves a truncated table.
    pub fn save(&self, table: &[R]) -> Result<()> {
        let rows: Vec<Vec<String>> = table.iter().map(|r| r.to_row()).collect();
        let body = csv::render(R::HEADERS, &rows);

        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        debug!(rows = table.len(), file = %self.path.display(), "table saved");
        Ok(())
    }

    /// Append a record unless its key is already present, then persist.
    pub fn append(&self, table: &mut Vec<R>, record: R) -> Result<AppendOutcome> {
        if let Some(key) = record.key() {
            if table.iter().any(|r| r.key() == Some(key)) {
                warn!(link = key, "listing already tracked, not added");
                return Ok(AppendOutcome::Duplicate);
            }
        }
        table.push(record);
        self.save(table)?;
        Ok(AppendOutcome::Added)
    }

    /// Remove every record whose title matches, persist, and report how
    /// many went away. Titles are not unique; a shared title removes all
    /// of its rows.
    pub fn delete_by_title(&self, table: &mut Vec<R>, title: &str) -> Result<usize> {
        let before = table.len();
        table.retain(|r| r.title() != title);
        let removed = before - table.len();
        if removed > 0 {
            self.save(table)?;
        }
        Ok(removed)
    }

    /// Delete the persisted file. The in-memory table is the caller's to
    /// clear. Missing file is a no-op.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("removing {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Serialize the table to the same encoding as `save`, for the
    /// download affordance. Leaves the persisted file alone.
    pub fn export(&self, table: &[R]) -> Vec<u8> {
        let rows: Vec<Vec<String>> = table.iter().map(|r| r.to_row()).collect();
        csv::render(R::HEADERS, &rows).into_bytes()
    }
}
