/// File categorization by extension.
///
/// This module maps a filename to one of a fixed set of categories using an
/// ordered extension table. The table is an immutable value handed to the
/// [`Classifier`] at construction, so tests can substitute their own.
///
/// # Examples
///
/// ```
/// use foldsort::file_category::{Category, Classifier};
///
/// let classifier = Classifier::default();
/// assert_eq!(classifier.categorize("photo.JPG"), Category::Images);
/// assert_eq!(classifier.categorize("notes.txt"), Category::Documents);
/// assert_eq!(classifier.categorize("weird.xyz"), Category::Others);
/// ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Represents a broad file category.
///
/// The declaration order is the lookup order of the classifier and the
/// iteration order of every per-category listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, etc.)
    Images,
    /// Video files (MP4, MKV, AVI, etc.)
    Videos,
    /// Document files (PDF, DOCX, TXT, etc.)
    Documents,
    /// Spreadsheet files (XLSX, CSV, ODS, etc.)
    Spreadsheets,
    /// Presentation files (PPTX, KEY, ODP, etc.)
    Presentations,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Source code files (Python, JavaScript, HTML, etc.)
    Code,
    /// Installers and executables (EXE, MSI, DMG, etc.)
    Executables,
    /// Anything no other category claims.
    Others,
}

impl Category {
    /// Every category, in lookup order.
    pub const ALL: [Category; 10] = [
        Category::Images,
        Category::Videos,
        Category::Documents,
        Category::Spreadsheets,
        Category::Presentations,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Executables,
        Category::Others,
    ];

    /// Returns the label of this category, which is also its subfolder name.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.name(), "Images");
    /// assert_eq!(Category::Others.name(), "Others");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Documents => "Documents",
            Category::Spreadsheets => "Spreadsheets",
            Category::Presentations => "Presentations",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Executables => "Executables",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered mapping from category to its extension set.
///
/// Extensions are stored lowercase with their leading dot. `Others` never
/// owns extensions; it is the fallback when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    entries: Vec<(Category, Vec<String>)>,
}

impl ClassificationTable {
    /// Creates an empty table. Every filename classifies as `Others`.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns a copy of this table with `extensions` assigned to `category`.
    ///
    /// Entries are matched in the order they were added. Extensions may be
    /// given with or without the leading dot and in any case.
    pub fn with(mut self, category: Category, extensions: &[&str]) -> Self {
        if category == Category::Others {
            return self;
        }
        let normalized = extensions.iter().map(|ext| normalize(ext)).collect();
        self.entries.push((category, normalized));
        self
    }

    /// The built-in table.
    pub fn standard() -> Self {
        Self::empty()
            .with(
                Category::Images,
                &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".svg", ".webp"],
            )
            .with(
                Category::Videos,
                &[".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv", ".webm", ".m4v"],
            )
            .with(
                Category::Documents,
                &[".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".pages"],
            )
            .with(
                Category::Spreadsheets,
                &[".xls", ".xlsx", ".csv", ".ods", ".numbers"],
            )
            .with(Category::Presentations, &[".ppt", ".pptx", ".key", ".odp"])
            .with(
                Category::Audio,
                &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"],
            )
            .with(
                Category::Archives,
                &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
            )
            .with(
                Category::Code,
                &[
                    ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".php", ".rb", ".go",
                ],
            )
            .with(
                Category::Executables,
                &[".exe", ".msi", ".app", ".dmg", ".deb", ".rpm"],
            )
    }

    /// Returns the first category owning `extension`, if any.
    pub fn lookup(&self, extension: &str) -> Option<Category> {
        if extension.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| e == extension))
            .map(|(category, _)| *category)
    }

    /// Returns the extensions assigned to `category`.
    pub fn extensions(&self, category: Category) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(c, _)| *c == category)
            .flat_map(|(_, exts)| exts.iter().map(String::as_str))
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Returns the lowercase extension of `filename`, including the leading dot.
///
/// Files without an extension yield an empty string. A dotfile such as
/// `.bashrc` has no extension.
///
/// # Examples
///
/// ```
/// use foldsort::file_category::extension_of;
///
/// assert_eq!(extension_of("Report.PDF"), ".pdf");
/// assert_eq!(extension_of("backup.tar.gz"), ".gz");
/// assert_eq!(extension_of("Makefile"), "");
/// assert_eq!(extension_of(".bashrc"), "");
/// ```
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Maps filenames to categories using a [`ClassificationTable`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: ClassificationTable,
}

impl Classifier {
    /// Creates a classifier over the given table.
    pub fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    /// The table this classifier consults.
    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Determines the category of a file from its name alone.
    ///
    /// Matching is case-insensitive and the first table entry owning the
    /// extension wins. Unknown or missing extensions fall back to `Others`.
    pub fn categorize(&self, filename: &str) -> Category {
        self.table
            .lookup(&extension_of(filename))
            .unwrap_or(Category::Others)
    }
}
