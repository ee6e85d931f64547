//! Directory walker for model-file discovery.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree with [`walkdir`] on the calling
//! thread and yields the paths of regular files whose extension is in the
//! configured set. Children are visited in file-name order, so output is
//! reproducible.
//!
//! # Features
//!
//! - Optional recursion (`recursive = false` visits direct children only)
//! - Case-insensitive extension filtering
//! - Gitignore-style pattern matching via the `ignore` crate
//! - Hidden file filtering
//! - Symlinks skipped unless `follow_symlinks` is set
//!
//! Errors while reading a directory entry are yielded as
//! [`IntegrityError`] values rather than stopping iteration.
//!
//! # Example
//!
//! ```no_run
//! use modelsum::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/srv/models"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::{DirEntry, WalkDir};

use super::WalkerConfig;
use crate::error::IntegrityError;
use crate::formats::matches_extension;

/// Directory walker yielding matching model files.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Build the ignore matcher from configured patterns.
    fn build_gitignore(&self) -> Option<Gitignore> {
        if self.config.ignore_patterns.is_empty() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(&self.root);
        for pattern in &self.config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(gitignore) if !gitignore.is_empty() => Some(gitignore),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Whether an entry is excluded by the hidden or ignore filters.
    ///
    /// Applied before descending, so excluded directories are pruned whole.
    fn is_excluded(
        root: &Path,
        config: &WalkerConfig,
        gitignore: Option<&Gitignore>,
        entry: &DirEntry,
    ) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        if config.skip_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            log::trace!("Skipping hidden entry: {}", entry.path().display());
            return true;
        }

        if let Some(gi) = gitignore {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let normalized = relative.to_string_lossy().replace('\\', "/");
            if gi.matched(normalized, entry.file_type().is_dir()).is_ignore() {
                log::trace!("Ignoring: {}", entry.path().display());
                return true;
            }
        }

        false
    }

    /// Walk the directory tree, yielding matching file paths.
    ///
    /// The root itself is never yielded. Paths are `root.join(relative)`.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, IntegrityError>> + '_ {
        let gitignore = self.build_gitignore();
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };

        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .filter_entry(move |entry| {
                !Self::is_excluded(&self.root, &self.config, gitignore.as_ref(), entry)
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Decide whether a walked entry is a model file to hash.
    fn process_entry(&self, entry: DirEntry) -> Option<Result<PathBuf, IntegrityError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        // With follow_links enabled walkdir reports the target's type, so a
        // symlink type here means we are not following links.
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() {
            return None;
        }

        if !matches_extension(entry.path(), &self.config.extensions) {
            log::trace!("Skipping non-model file: {}", entry.path().display());
            return None;
        }

        Some(Ok(entry.into_path()))
    }

    /// Convert a walkdir error into an [`IntegrityError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> IntegrityError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        let message = error.to_string();
        match error.into_io_error() {
            Some(io_error) => IntegrityError::from_read(&path, io_error),
            // Symlink loops carry no I/O error.
            None => IntegrityError::Unreadable {
                path,
                source: std::io::Error::other(message),
            },
        }
    }
}
