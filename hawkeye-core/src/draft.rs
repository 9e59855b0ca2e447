//! The edit-in-progress configuration draft.
//!
//! [`ConfigDraft`] is a deep copy of the backend's canonical configuration
//! that accumulates a user's pending edits. It owns every mutation rule and
//! every structural invariant; nothing it rejects can reach the backend.
//!
//! Two invariants with different enforcement points:
//! - watch paths are unique, enforced at every add/replace
//! - conversion mappings are unique as `(src, dst)` pairs, enforced only at
//!   submission - duplicates are expected transiently while the user edits a
//!   freshly added mapping

use thiserror::Error;

use hawkeye_types::{Config, ConversionMap, ImageFormat, WatchPath};

/// Errors that block a draft from being submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Two mappings declare the same conversion.
    #[error("duplicate conversion mapping {src} -> {dst} at positions {first} and {second}")]
    DuplicateConversionMapping {
        /// Source format of the duplicated pair.
        src: ImageFormat,
        /// Destination format of the duplicated pair.
        dst: ImageFormat,
        /// Index of the earlier occurrence.
        first: usize,
        /// Index of the later occurrence.
        second: usize,
    },
}

/// An in-memory mirror of the canonical configuration, holding pending edits.
///
/// Owned by the single active editing session. Initialized as a deep copy of
/// a [`Config`] and never aliasing it, so a backend refresh can never alter
/// an edit in progress. `dirty` turns true on the first mutation and only
/// clears on (re-)initialization from canonical state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDraft {
    watch_paths: Vec<WatchPath>,
    conversion_maps: Vec<ConversionMap>,
    silent_start: bool,
    launch_on_system_start: bool,
    dirty: bool,
}

impl ConfigDraft {
    /// Create a draft mirroring `canonical`.
    pub fn from_canonical(canonical: &Config) -> Self {
        let mut draft = Self::default();
        draft.initialize(canonical);
        draft
    }

    /// Replace every field with a deep copy of `canonical` and clear `dirty`.
    ///
    /// Idempotent: initializing twice from the same value yields the same
    /// draft both times.
    pub fn initialize(&mut self, canonical: &Config) {
        self.watch_paths = canonical.watch_paths.clone();
        self.conversion_maps = canonical.conversion_maps.clone();
        self.silent_start = canonical.silent_start;
        self.launch_on_system_start = canonical.launch_on_system_start;
        self.dirty = false;
    }

    /// Snapshot the draft as a [`Config`] for submission.
    pub fn to_config(&self) -> Config {
        Config {
            watch_paths: self.watch_paths.clone(),
            conversion_maps: self.conversion_maps.clone(),
            silent_start: self.silent_start,
            launch_on_system_start: self.launch_on_system_start,
        }
    }

    /// The watched directories as currently edited.
    pub fn watch_paths(&self) -> &[WatchPath] {
        &self.watch_paths
    }

    /// The conversion mappings as currently edited.
    pub fn conversion_maps(&self) -> &[ConversionMap] {
        &self.conversion_maps
    }

    /// Whether the application should launch minimized to the tray.
    pub fn silent_start(&self) -> bool {
        self.silent_start
    }

    /// Whether OS autostart registration is requested.
    pub fn launch_on_system_start(&self) -> bool {
        self.launch_on_system_start
    }

    /// True once any field has been mutated since the last initialization.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append watch entries for every candidate path not already present.
    ///
    /// Candidates are processed independently and in order: a duplicate is
    /// skipped without blocking the rest, and appended entries start
    /// non-recursive. Paths are compared as opaque byte-equal strings; a
    /// candidate also counts as duplicate against entries appended earlier in
    /// the same batch.
    ///
    /// Returns the skipped paths, in input order, for the UI to surface as
    /// "already exists" notices.
    pub fn add_watch_paths<I>(&mut self, candidates: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut rejected = Vec::new();
        for candidate in candidates {
            let path = candidate.into();
            if self.watch_paths.iter().any(|entry| entry.path == path) {
                rejected.push(path);
                continue;
            }
            self.watch_paths.push(WatchPath::new(path));
            self.dirty = true;
        }
        rejected
    }

    /// Flip `recursive_mode` for the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Correct UI wiring never passes a
    /// stale index.
    pub fn toggle_recursive(&mut self, index: usize) {
        let entry = &mut self.watch_paths[index];
        entry.recursive_mode = !entry.recursive_mode;
        self.dirty = true;
    }

    /// Point the entry at `index` at a different directory, keeping its
    /// `recursive_mode`.
    ///
    /// If `new_path` equals any existing entry's path the edit is silently
    /// discarded and `false` is returned - the same duplicate guard as
    /// additions, minus the notice.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range and `new_path` is not a duplicate.
    pub fn replace_watch_path(&mut self, index: usize, new_path: impl Into<String>) -> bool {
        let new_path = new_path.into();
        if self.watch_paths.iter().any(|entry| entry.path == new_path) {
            return false;
        }
        self.watch_paths[index].path = new_path;
        self.dirty = true;
        true
    }

    /// Remove the entry at `index`, shifting subsequent entries down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_watch_path(&mut self, index: usize) {
        self.watch_paths.remove(index);
        self.dirty = true;
    }

    /// Append a mapping with the default pair: destination [`ImageFormat::Png`],
    /// source the first format other than the destination.
    ///
    /// No duplicate check here - the user is expected to edit the fresh
    /// mapping immediately, so uniqueness is deferred to
    /// [`validate_for_submit`](Self::validate_for_submit).
    pub fn add_conversion_mapping(&mut self) {
        self.conversion_maps.push(default_mapping());
        self.dirty = true;
    }

    /// Set the source format of the mapping at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_mapping_src(&mut self, index: usize, src: ImageFormat) {
        self.conversion_maps[index].src = src;
        self.dirty = true;
    }

    /// Set the destination format of the mapping at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_mapping_dst(&mut self, index: usize, dst: ImageFormat) {
        self.conversion_maps[index].dst = dst;
        self.dirty = true;
    }

    /// Remove the mapping at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_conversion_mapping(&mut self, index: usize) {
        self.conversion_maps.remove(index);
        self.dirty = true;
    }

    /// Flip the tray-only launch flag.
    pub fn toggle_silent_start(&mut self) {
        self.silent_start = !self.silent_start;
        self.dirty = true;
    }

    /// Flip the OS autostart flag.
    pub fn toggle_launch_on_system_start(&mut self) {
        self.launch_on_system_start = !self.launch_on_system_start;
        self.dirty = true;
    }

    /// Check the draft is fit to submit.
    ///
    /// Fails on the first pair of mappings with equal `(src, dst)`, comparing
    /// index `i` against all `j > i` in ascending order, so the reported pair
    /// is deterministic. Watch paths need no re-check: the add/replace guards
    /// keep duplicates from ever entering the draft.
    ///
    /// Pairwise scan; mapping counts are user-entered and stay small.
    pub fn validate_for_submit(&self) -> Result<(), DraftError> {
        for i in 0..self.conversion_maps.len() {
            for j in (i + 1)..self.conversion_maps.len() {
                if self.conversion_maps[i] == self.conversion_maps[j] {
                    let mapping = self.conversion_maps[i];
                    return Err(DraftError::DuplicateConversionMapping {
                        src: mapping.src,
                        dst: mapping.dst,
                        first: i,
                        second: j,
                    });
                }
            }
        }
        Ok(())
    }
}

/// The pair a freshly added mapping starts with.
fn default_mapping() -> ConversionMap {
    let dst = ImageFormat::default();
    let src = ImageFormat::ALL
        .iter()
        .copied()
        .find(|format| *format != dst)
        .expect("more than one image format exists");
    ConversionMap::new(src, dst)
}
