/// File organization: moving the files of a folder into category subfolders.
///
/// This module holds the collision-safe name resolver, the single-file mover
/// and the [`Organizer`] that drives scan, classify and move for one folder.
/// Runs are sequential and fail fast by default. Files moved before a failure
/// stay where they were moved; nothing is rolled back.
use serde::Serialize;
use serde::ser::SerializeMap;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::config::{CompiledFilters, OrganizeMode};
use crate::error::{MoveError, OrganizeError};
use crate::file_category::{Category, Classifier};
use crate::report::CATEGORY_SUMMARY_FILE;
use crate::scanner;

/// Returns `path` if nothing exists there, otherwise the first free
/// `stem_N.ext` sibling for N = 1, 2, ...
///
/// The probe is not atomic: two resolvers racing on the same stem can pick
/// the same name.
///
/// # Examples
///
/// ```no_run
/// use foldsort::file_organizer::unique_path;
/// use std::path::Path;
///
/// // With "report.pdf" already present this yields "report_1.pdf".
/// let free = unique_path(Path::new("/data/Documents/report.pdf"));
/// ```
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    numbered_path(path)
}

/// First free `stem_N.ext` sibling of `path`, ignoring `path` itself.
fn numbered_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path.file_stem().unwrap_or_default();
    let extension = path.extension();

    let mut counter: u64 = 1;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!("_{counter}"));
        if let Some(ext) = extension {
            name.push(".");
            name.push(ext);
        }
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves `source` to `destination`, renaming on collision.
///
/// The destination is resolved through [`unique_path`], its parent directory
/// is created if needed, then the file is renamed. A rename across storage
/// volumes falls back to copy and delete. Returns the path actually used.
///
/// On failure nothing is undone: a directory created for the move stays.
pub fn move_file(source: &Path, destination: &Path) -> Result<PathBuf, MoveError> {
    let failed = |e: io::Error| MoveError::MoveFailed {
        filename: display_name(source),
        reason: e.to_string(),
    };

    let destination = unique_path(destination);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(failed)?;
    }

    match fs::rename(source, &destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(source = %source.display(), "rename crosses devices, copying instead");
            copy_then_remove(source, &destination).map_err(failed)?;
        }
        Err(e) => return Err(failed(e)),
    }

    Ok(destination)
}

/// Copies `source` to `destination` and deletes `source`.
///
/// Whatever was written to `destination` is removed again if either step
/// fails, so a failed move leaves only the source behind.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let outcome = fs::copy(source, destination).and_then(|_| fs::remove_file(source));
    if outcome.is_err() {
        let _ = fs::remove_file(destination);
    }
    outcome
}

/// Where `filename` goes inside `folder`.
///
/// The category listing name is reserved for the report step, so a user file
/// with that name always gets a numbered name.
fn destination_for(folder: &Path, category: Category, filename: &str) -> PathBuf {
    let destination = folder.join(category.name()).join(filename);
    if filename.eq_ignore_ascii_case(CATEGORY_SUMMARY_FILE) {
        numbered_path(&destination)
    } else {
        destination
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A file that could not be moved during a best-effort run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub filename: String,
    pub reason: String,
}

/// The files relocated by one organize run, grouped by category.
///
/// Every category is present, possibly empty, and iterates in the fixed
/// category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeResult {
    files: BTreeMap<Category, Vec<String>>,
    failures: Vec<FileFailure>,
}

impl OrganizeResult {
    /// A result with every category present and empty.
    pub fn new() -> Self {
        Self {
            files: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
            failures: Vec::new(),
        }
    }

    fn record(&mut self, category: Category, filename: String) {
        self.files.entry(category).or_default().push(filename);
    }

    /// Files moved into `category`, in move order.
    pub fn files(&self, category: Category) -> &[String] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All categories with their files, in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.files.iter().map(|(c, files)| (*c, files.as_slice()))
    }

    /// Categories that received at least one file.
    pub fn non_empty_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(c, _)| c)
    }

    pub fn total_files(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }

    /// Files skipped because of move failures (best-effort runs only).
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }
}

impl Default for OrganizeResult {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for OrganizeResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len() + 1))?;
        for (category, files) in &self.files {
            map.serialize_entry(category.name(), files)?;
        }
        map.serialize_entry("failures", &self.failures)?;
        map.end()
    }
}

/// Where a file would go, as computed by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMove {
    pub filename: String,
    pub category: Category,
}

/// Receives progress notifications from a run. Every method defaults to a no-op.
pub trait OrganizeObserver {
    /// The snapshot has been taken; `total` files will be processed.
    fn scanned(&mut self, _total: usize) {}

    /// `filename` was moved into `category` as `final_name`.
    fn moved(&mut self, _filename: &str, _category: Category, _final_name: &str) {}

    /// `filename` could not be moved.
    fn failed(&mut self, _filename: &str, _reason: &str) {}

    /// `filename` was left in place by the configured filters.
    fn skipped(&mut self, _filename: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl OrganizeObserver for NoopObserver {}

/// Cooperative cancellation flag, checked between file moves.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Organizes the files of a folder into category subfolders.
///
/// # Examples
///
/// ```no_run
/// use foldsort::file_organizer::Organizer;
/// use foldsort::file_category::Category;
/// use std::path::Path;
///
/// let result = Organizer::default().organize(Path::new("/home/user/Downloads"))?;
/// for name in result.files(Category::Images) {
///     println!("Images/{name}");
/// }
/// # Ok::<(), foldsort::OrganizeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    classifier: Classifier,
    filters: CompiledFilters,
    mode: OrganizeMode,
    cancel: CancelToken,
}

impl Organizer {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_mode(mut self, mode: OrganizeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn mode(&self) -> OrganizeMode {
        self.mode
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Moves every file of `folder` into `<folder>/<category>/`.
    ///
    /// See [`Organizer::organize_with_observer`].
    pub fn organize(&self, folder: &Path) -> Result<OrganizeResult, OrganizeError> {
        self.organize_with_observer(folder, &mut NoopObserver)
    }

    /// Moves every file of `folder` into `<folder>/<category>/`, reporting
    /// progress to `observer`.
    ///
    /// The file list is a snapshot taken once before the first move. In
    /// fail-fast mode the first move failure aborts the run with
    /// `OrganizeFailed`; in best-effort mode it is recorded in the result and
    /// the run continues. Files already moved are never moved back.
    ///
    /// # Errors
    ///
    /// Scan errors are returned before anything is touched. `Cancelled` is
    /// returned when the cancel token is set between two moves.
    pub fn organize_with_observer(
        &self,
        folder: &Path,
        observer: &mut dyn OrganizeObserver,
    ) -> Result<OrganizeResult, OrganizeError> {
        let mut result = OrganizeResult::new();
        let files = scanner::list_files(folder)?;
        observer.scanned(files.len());
        info!(folder = %folder.display(), files = files.len(), mode = ?self.mode, "organizing folder");

        let mut moved = 0usize;
        for filename in files {
            if self.cancel.is_cancelled() {
                warn!(moved, "organization cancelled");
                return Err(OrganizeError::Cancelled { moved });
            }

            if !self.filters.should_include(&filename) {
                debug!(file = %filename, "excluded by filters");
                observer.skipped(&filename);
                continue;
            }

            let category = self.classifier.categorize(&filename);
            let source = folder.join(&filename);
            let destination = destination_for(folder, category, &filename);

            match move_file(&source, &destination) {
                Ok(final_path) => {
                    let final_name = display_name(&final_path);
                    debug!(file = %filename, %category, final_name = %final_name, "moved");
                    observer.moved(&filename, category, &final_name);
                    result.record(category, final_name);
                    moved += 1;
                }
                Err(err) => {
                    observer.failed(err.filename(), err.reason());
                    match self.mode {
                        OrganizeMode::FailFast => {
                            warn!(file = %filename, reason = %err.reason(), "move failed, aborting");
                            return Err(err.into());
                        }
                        OrganizeMode::BestEffort => {
                            warn!(file = %filename, reason = %err.reason(), "move failed, continuing");
                            result.failures.push(FileFailure {
                                filename,
                                reason: err.reason().to_string(),
                            });
                        }
                    }
                }
            }
        }

        info!(moved, failed = result.failures.len(), "organization complete");
        Ok(result)
    }

    /// Computes where each file would go without touching the filesystem.
    pub fn plan(&self, folder: &Path) -> Result<Vec<PlannedMove>, OrganizeError> {
        let files = scanner::list_files(folder)?;
        Ok(files
            .into_iter()
            .filter(|name| self.filters.should_include(name))
            .map(|filename| PlannedMove {
                category: self.classifier.categorize(&filename),
                filename,
            })
            .collect())
    }
}
