//! Integration tests for foldsort
//!
//! These tests drive the public API end to end against real temporary
//! folders.
//!
//! Test categories:
//! 1. Basic organization workflows
//! 2. Collisions and repeated runs
//! 3. Report generation
//! 4. Failure handling
//! 5. CLI front end
use foldsort::cli::{CliOptions, CliOutcome, OrganizeCommand, run_cli_with_options};
use foldsort::{
    Category, OrganizeError, OrganizeMode, Organizer, ScanError, generate_reports, organize,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary folder with helpers for building and inspecting its contents.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn create_file(&self, name: &str, content: &[u8]) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content)
            .expect("Failed to write file content");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, name.as_bytes());
        }
    }

    fn create_subdir(&self, name: &str) {
        fs::create_dir(self.path().join(name)).expect("Failed to create subdirectory");
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_dir(), "Directory should exist: {}", path.display());
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    fn read(&self, rel_path: &str) -> String {
        fs::read_to_string(self.path().join(rel_path)).expect("Failed to read file")
    }

    /// Names of the subdirectories of the fixture root, sorted.
    fn dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| {
                let entry = entry.ok()?;
                if entry.file_type().ok()?.is_dir() {
                    Some(entry.file_name().to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        dirs.sort();
        dirs
    }
}

fn quiet() -> CliOptions {
    // point at a config file that does not override anything so a stray
    // .foldsortrc.toml in the working directory cannot leak in
    let dir = std::env::temp_dir().join("foldsort-it-empty-config.toml");
    fs::write(&dir, "").expect("Failed to write config");
    CliOptions {
        config: Some(dir),
        ..Default::default()
    }
}

// ============================================================================
// Test Suite 1: Basic Organization
// ============================================================================

#[test]
fn test_organize_mixed_folder() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.jpg", "notes.txt", "archive.zip", "weird.xyz"]);

    let result = organize(fixture.path()).expect("organize failed");

    assert_eq!(result.files(Category::Images), ["photo.jpg"]);
    assert_eq!(result.files(Category::Documents), ["notes.txt"]);
    assert_eq!(result.files(Category::Archives), ["archive.zip"]);
    assert_eq!(result.files(Category::Others), ["weird.xyz"]);
    for category in [
        Category::Videos,
        Category::Spreadsheets,
        Category::Presentations,
        Category::Audio,
        Category::Code,
        Category::Executables,
    ] {
        assert!(result.files(category).is_empty(), "{category} should be empty");
    }
    assert_eq!(
        fixture.dirs(),
        vec!["Archives", "Documents", "Images", "Others"]
    );
}

#[test]
fn test_organized_files_live_under_their_category() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "a.JPG", "b.mov", "c.docx", "d.numbers", "e.key", "f.ogg", "g.bz2", "h.rb", "i.deb",
        "j", ".profile",
    ]);

    let result = organize(fixture.path()).unwrap();

    assert_eq!(result.total_files(), 11);
    for (category, files) in result.iter() {
        for name in files {
            fixture.assert_file_exists(&format!("{}/{}", category.name(), name));
            fixture.assert_file_not_exists(name);
        }
    }
    let mut others = result.files(Category::Others).to_vec();
    others.sort();
    assert_eq!(others, vec![".profile".to_string(), "j".to_string()]);
}

#[test]
fn test_organize_empty_folder() {
    let fixture = TestFixture::new();

    let result = organize(fixture.path()).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.iter().count(), Category::ALL.len());
    assert!(fixture.dirs().is_empty(), "no subfolders should be created");
}

#[test]
fn test_organize_ignores_subfolders() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Images");
    fixture.create_subdir("projects");
    fixture.create_file("projects/readme.txt", b"nested");
    fixture.create_file("song.mp3", b"mp3");

    let result = organize(fixture.path()).unwrap();

    assert_eq!(result.total_files(), 1);
    fixture.assert_file_exists("projects/readme.txt");
    fixture.assert_file_exists("Audio/song.mp3");
}

#[test]
fn test_organize_preserves_file_content() {
    let fixture = TestFixture::new();
    fixture.create_file("data.csv", b"a,b,c\n1,2,3\n");

    organize(fixture.path()).unwrap();

    assert_eq!(fixture.read("Spreadsheets/data.csv"), "a,b,c\n1,2,3\n");
}

#[test]
fn test_organize_special_characters_in_filename() {
    let fixture = TestFixture::new();
    fixture.create_files(&["my photo (1).png", "résumé final.pdf"]);

    let result = organize(fixture.path()).unwrap();

    assert_eq!(result.files(Category::Images), ["my photo (1).png"]);
    fixture.assert_file_exists("Documents/résumé final.pdf");
}

// ============================================================================
// Test Suite 2: Collisions and Repeated Runs
// ============================================================================

#[test]
fn test_collision_with_existing_category_file() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Documents");
    fixture.create_file("Documents/report.pdf", b"old");
    fixture.create_file("report.pdf", b"new");

    let result = organize(fixture.path()).unwrap();

    assert_eq!(result.files(Category::Documents), ["report_1.pdf"]);
    assert_eq!(fixture.read("Documents/report.pdf"), "old");
    assert_eq!(fixture.read("Documents/report_1.pdf"), "new");
}

#[test]
fn test_second_run_renames_new_arrivals() {
    let fixture = TestFixture::new();
    fixture.create_file("clip.mp4", b"first");
    organize(fixture.path()).unwrap();

    fixture.create_file("clip.mp4", b"second");
    let result = organize(fixture.path()).unwrap();

    assert_eq!(result.files(Category::Videos), ["clip_1.mp4"]);
    assert_eq!(fixture.read("Videos/clip.mp4"), "first");
    assert_eq!(fixture.read("Videos/clip_1.mp4"), "second");
}

#[test]
fn test_second_run_on_organized_folder_is_a_no_op() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.txt"]);
    organize(fixture.path()).unwrap();

    let result = organize(fixture.path()).unwrap();

    assert!(result.is_empty());
    fixture.assert_file_exists("Images/a.jpg");
    fixture.assert_file_exists("Documents/b.txt");
}

// ============================================================================
// Test Suite 3: Reports
// ============================================================================

#[test]
fn test_reports_after_organize() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.jpg", &[0u8; 1536]);
    fixture.create_file("notes.txt", b"");

    let result = organize(fixture.path()).unwrap();
    generate_reports(fixture.path(), &result).expect("reports failed");

    let images = fixture.read("Images/summary.txt");
    assert!(images.contains("Images - File Summary"));
    assert!(images.contains("Total files: 1"));
    assert!(images.contains("photo.jpg"));
    assert!(images.contains("(1.5 KB)"));

    let documents = fixture.read("Documents/summary.txt");
    assert!(documents.contains("(0 B)"));

    let master = fixture.read("MASTER_SUMMARY.txt");
    assert!(master.contains("Total files organized: 2"));
    assert!(master.contains("Categories created: 2"));
    assert!(master.contains("Images: 1 files"));
    assert!(master.contains("Documents: 1 files"));

    let detailed = fixture.read("DETAILED_REPORT.txt");
    assert!(detailed.contains("Total files: 2"));
    assert!(detailed.contains("Total size: 1.5 KB"));
}

#[test]
fn test_reports_for_empty_folder() {
    let fixture = TestFixture::new();

    let result = organize(fixture.path()).unwrap();
    generate_reports(fixture.path(), &result).unwrap();

    assert!(fixture.dirs().is_empty());
    assert!(fixture.read("MASTER_SUMMARY.txt").contains("Total files organized: 0"));
    assert!(fixture.read("DETAILED_REPORT.txt").contains("Total files: 0"));
}

#[test]
fn test_reports_are_overwritten() {
    let fixture = TestFixture::new();
    fixture.create_file("MASTER_SUMMARY.txt", b"stale");
    fixture.create_subdir("Images");
    fixture.create_file("Images/summary.txt", b"stale");
    fixture.create_file("a.png", b"png");

    // the stale summary sits in the base folder and is itself organized
    let result = organize(fixture.path()).unwrap();
    generate_reports(fixture.path(), &result).unwrap();

    assert!(fixture.read("Images/summary.txt").contains("a.png"));
    assert!(fixture.read("MASTER_SUMMARY.txt").contains("Total files organized: 2"));
}

#[test]
fn test_reports_keep_user_file_named_summary() {
    let fixture = TestFixture::new();
    fixture.create_file("summary.txt", b"meeting notes");

    let result = organize(fixture.path()).unwrap();
    generate_reports(fixture.path(), &result).unwrap();

    assert_eq!(result.files(Category::Documents), ["summary_1.txt"]);
    assert_eq!(fixture.read("Documents/summary_1.txt"), "meeting notes");
    assert!(fixture.read("Documents/summary.txt").contains("Documents - File Summary"));
}

// ============================================================================
// Test Suite 4: Failure Handling
// ============================================================================

#[test]
fn test_missing_folder_fails_without_side_effects() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("does-not-exist");

    let err = organize(&missing).unwrap_err();

    assert!(matches!(err, OrganizeError::Scan(ScanError::NotFound { .. })));
    assert!(!missing.exists());
    assert!(fixture.dirs().is_empty());
}

#[test]
fn test_file_instead_of_folder() {
    let fixture = TestFixture::new();
    fixture.create_file("plain.txt", b"x");

    let err = organize(&fixture.path().join("plain.txt")).unwrap_err();

    assert!(matches!(
        err,
        OrganizeError::Scan(ScanError::NotADirectory { .. })
    ));
    fixture.assert_file_exists("plain.txt");
}

#[test]
fn test_fail_fast_leaves_earlier_moves_in_place() {
    let fixture = TestFixture::new();
    // a regular file called "Others" cannot become the Others folder
    fixture.create_file("Others", b"blocker");
    fixture.create_files(&["a.txt", "b.jpg"]);

    let err = organize(fixture.path()).unwrap_err();

    match err {
        OrganizeError::OrganizeFailed { filename, .. } => assert_eq!(filename, "Others"),
        other => panic!("unexpected error: {other}"),
    }
    fixture.assert_file_exists("Others");
    // whatever moved before the failure stays moved
    let moved_txt = fixture.path().join("Documents/a.txt").exists();
    let stayed_txt = fixture.path().join("a.txt").exists();
    assert!(moved_txt ^ stayed_txt);
}

#[test]
fn test_best_effort_moves_everything_it_can() {
    let fixture = TestFixture::new();
    fixture.create_file("Others", b"blocker");
    fixture.create_files(&["a.txt", "b.jpg"]);

    let result = Organizer::default()
        .with_mode(OrganizeMode::BestEffort)
        .organize(fixture.path())
        .unwrap();

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.failures().len(), 1);
    fixture.assert_file_exists("Documents/a.txt");
    fixture.assert_file_exists("Images/b.jpg");

    generate_reports(fixture.path(), &result).unwrap();
    assert!(fixture.read("MASTER_SUMMARY.txt").contains("Not moved:"));
}

// ============================================================================
// Test Suite 5: CLI
// ============================================================================

#[test]
fn test_cli_organize_writes_reports() {
    let fixture = TestFixture::new();
    fixture.create_files(&["deck.pptx", "tool.exe"]);

    let outcome =
        run_cli_with_options(OrganizeCommand::Organize, fixture.path(), &quiet()).unwrap();

    match outcome {
        CliOutcome::Organized(result) => assert_eq!(result.total_files(), 2),
        other => panic!("unexpected outcome: {other:?}"),
    }
    fixture.assert_file_exists("Presentations/deck.pptx");
    fixture.assert_file_exists("Executables/tool.exe");
    fixture.assert_file_exists("Presentations/summary.txt");
    fixture.assert_file_exists("MASTER_SUMMARY.txt");
    fixture.assert_file_exists("DETAILED_REPORT.txt");
}

#[test]
fn test_cli_dry_run_moves_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.gif", "b.wav"]);

    let outcome = run_cli_with_options(OrganizeCommand::DryRun, fixture.path(), &quiet()).unwrap();

    match outcome {
        CliOutcome::Planned(plan) => assert_eq!(plan.len(), 2),
        other => panic!("unexpected outcome: {other:?}"),
    }
    fixture.assert_file_exists("a.gif");
    fixture.assert_file_exists("b.wav");
    assert!(fixture.dirs().is_empty());
    fixture.assert_file_not_exists("MASTER_SUMMARY.txt");
}

#[test]
fn test_cli_no_reports() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.gif"]);
    let options = CliOptions {
        no_reports: true,
        ..quiet()
    };

    run_cli_with_options(OrganizeCommand::Organize, fixture.path(), &options).unwrap();

    fixture.assert_file_exists("Images/a.gif");
    fixture.assert_file_not_exists("Images/summary.txt");
    fixture.assert_file_not_exists("MASTER_SUMMARY.txt");
}

#[test]
fn test_cli_missing_folder_is_an_error() {
    let fixture = TestFixture::new();

    let err = run_cli_with_options(
        OrganizeCommand::Organize,
        &fixture.path().join("nope"),
        &quiet(),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("Folder not found"));
}

#[test]
fn test_cli_best_effort_still_reports_failure() {
    let fixture = TestFixture::new();
    fixture.create_file("Others", b"blocker");
    fixture.create_files(&["a.txt"]);
    let options = CliOptions {
        best_effort: true,
        ..quiet()
    };

    let err =
        run_cli_with_options(OrganizeCommand::Organize, fixture.path(), &options).unwrap_err();

    assert!(err.to_string().contains("could not be moved"));
    fixture.assert_file_exists("Documents/a.txt");
    fixture.assert_file_exists("MASTER_SUMMARY.txt");
}

#[test]
fn test_cli_config_filters() {
    let fixture = TestFixture::new();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("foldsort.toml");
    fs::write(
        &config_path,
        "[filters]\nenable_hidden_files = false\n\n[filters.exclude]\nextensions = [\"part\"]\n",
    )
    .unwrap();
    fixture.create_files(&[".hidden.txt", "movie.part", "movie.mkv"]);
    let options = CliOptions {
        config: Some(config_path),
        no_reports: true,
        ..Default::default()
    };

    run_cli_with_options(OrganizeCommand::Organize, fixture.path(), &options).unwrap();

    fixture.assert_file_exists(".hidden.txt");
    fixture.assert_file_exists("movie.part");
    fixture.assert_file_exists("Videos/movie.mkv");
    fixture.assert_dir_exists("Videos");
    assert_eq!(fixture.dirs(), vec!["Videos"]);
}
