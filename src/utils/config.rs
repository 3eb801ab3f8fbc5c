//! Application configuration constants.
//! Defaults and tuning limits in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Per-directory settings file, e.g. `.pdfsearch.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Converter ----

/// External text extractor, invoked as `<program> <path> -`.
pub const DEFAULT_CONVERTER: &str = "pdftotext";

/// Recognized document extension (matched case-insensitively).
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Page separator written by the converter between pages.
pub const PAGE_SEPARATOR: char = '\u{000C}';

// ---- Worker threads ----

/// Thread limits for the conversion and search pools.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Minimum for either pool.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    /// Call this at runtime when you need the effective available thread count.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Requested count if given, else all available threads; never below the floor.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.all_threads).max(self.floor)
    }
}

// ---- Bounded queues ----

/// Capacity of the path, page and match queues.
pub struct ChannelCap;

impl ChannelCap {
    /// Default cap. Pages are small, so this bounds memory to a few MB of text per queue.
    pub const DEFAULT: usize = 1_000;
    /// Upper bound for user-supplied caps.
    pub const MAX: usize = 100_000;

    /// Requested cap if given, clamped to `[1, MAX]`.
    pub fn resolve(requested: Option<usize>) -> usize {
        requested.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX)
    }
}
