use bo_kernel::domain::constants::TOUR_FILE_EXTENSION;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Read-only view of the directories the catalog scans.
///
/// Listings are shallow (direct children only) and come back in no particular order.
pub trait TourFileSystem: Debug + Send + Sync {
    fn dir_exists(&self, path: &Path) -> bool;

    /// Regular files ending in `.json` directly inside `dir`.
    ///
    /// # Errors
    /// Returns an error if `dir` cannot be listed.
    fn json_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Directories directly inside `dir`.
    ///
    /// # Errors
    /// Returns an error if `dir` cannot be listed.
    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// # Errors
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The local disk. Symlinks are followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Direct children of `dir` accepted by `keep`.
    ///
    /// Only a failure to list `dir` itself is an error. A child that cannot be resolved (a
    /// dangling symlink, a link loop) is handed to `keep_broken`; if rejected it is skipped.
    fn children(
        dir: &Path,
        keep: impl Fn(&walkdir::DirEntry) -> bool,
        keep_broken: impl Fn(&Path) -> bool,
    ) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            match entry {
                Ok(entry) if keep(&entry) => out.push(entry.into_path()),
                Ok(_) => {},
                Err(err) if err.depth() > 0 => match err.path() {
                    Some(path) if keep_broken(path) => out.push(path.to_path_buf()),
                    path => warn!(path = ?path, error = %err, "Skipping unresolvable entry"),
                },
                Err(err) => return Err(err.into()),
            }
        }
        Ok(out)
    }
}

impl TourFileSystem for LocalFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// A broken `*.json` link is still listed so that reading it reports the file.
    fn json_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::children(
            dir,
            |entry| entry.file_type().is_file() && has_tour_extension(entry.path()),
            has_tour_extension,
        )
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::children(dir, |entry| entry.file_type().is_dir(), |_| false)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

fn has_tour_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TOUR_FILE_EXTENSION))
}
