#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const SAMPLE_FILE: &str = "steam_games_sample.csv";

pub const GAME_HEADER: &str = "Name,Release date,Price,Positive,Recommendations,Genres";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// One row of a minimal storefront export using [`GAME_HEADER`].
pub struct GameRow<'a> {
    pub name: &'a str,
    pub release_date: &'a str,
    pub price: &'a str,
    pub positive: &'a str,
    pub recommendations: &'a str,
    pub genres: &'a str,
}

impl GameRow<'_> {
    fn to_csv_line(&self) -> String {
        format!(
            "{},\"{}\",{},{},{},\"{}\"",
            self.name,
            self.release_date,
            self.price,
            self.positive,
            self.recommendations,
            self.genres
        )
    }
}

pub fn games_csv(rows: &[GameRow<'_>]) -> String {
    let mut contents = String::from(GAME_HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.to_csv_line());
        contents.push('\n');
    }
    contents
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` under the workspace, creating parent directories.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// Lays out the bundled fixture as the full dataset and as sample 01.
    pub fn with_standard_layout(&self) -> PathBuf {
        let fixture = fs::read(fixture_path(SAMPLE_FILE)).expect("read fixture");
        self.write("data/dataset/steam_games.csv", &fixture);
        self.write("data/samples/steam_games_sample_01.csv", &fixture);
        self.path().join("data")
    }
}
