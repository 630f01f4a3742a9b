use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;
use std::process::Command;
use log::warn;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Recursively find JSON files under a directory, sorted by path
    pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_json_file(path) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// List the JSON files directly inside a directory (non-recursive)
    ///
    /// A missing or unreadable directory yields an empty list.
    pub fn json_files_in_dir<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir.as_ref()) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Self::is_json_file(path))
            .collect();
        files.sort();
        files
    }

    // @checks: .json extension, case-insensitive
    pub fn is_json_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Get current timestamp
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        // Open file in append mode, create if it doesn't exist
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// JSON files added or modified on this branch relative to `origin/<base_branch>`
    pub fn changed_json_files(base_branch: &str) -> Result<Vec<PathBuf>> {
        let output = Command::new("git")
            .arg("diff")
            .arg("--name-only")
            // files deleted on the branch have nothing left to validate
            .arg("--diff-filter=d")
            .arg(format!("origin/{}...HEAD", base_branch))
            .output()
            .context("Failed to run git diff")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git diff failed: {}", stderr.trim()));
        }

        Ok(Self::parse_changed_files(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Like `changed_json_files`, but an unavailable git history means "nothing changed"
    pub fn changed_json_files_or_empty(base_branch: &str) -> Vec<PathBuf> {
        match Self::changed_json_files(base_branch) {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not determine changed files: {}", e);
                Vec::new()
            }
        }
    }

    /// Parse `git diff --name-only` output into JSON paths
    pub fn parse_changed_files(output: &str) -> Vec<PathBuf> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && Self::is_json_file(line))
            .map(PathBuf::from)
            .collect()
    }
}
