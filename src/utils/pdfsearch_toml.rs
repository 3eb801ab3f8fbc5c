//! Load `.pdfsearch.toml` from the target directory (CLI only). Lib callers pass [`SearchOpts`](crate::SearchOpts) instead.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;
use crate::{OutputFormat, Opts};

#[derive(Debug, Default, Deserialize)]
pub struct PdfsearchToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    converter: Option<String>,
    extension: Option<String>,
    conversion_threads: Option<usize>,
    search_threads: Option<usize>,
    channel_cap: Option<usize>,
    case_insensitive: Option<bool>,
    recursive: Option<bool>,
    format: Option<OutputFormat>,
    verbose: Option<bool>,
}

/// Parse settings from a TOML string.
pub fn parse_pdfsearch_toml(s: &str) -> std::result::Result<PdfsearchToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load `.pdfsearch.toml` from `dir`. `Ok(None)` when the file does not exist; an error when it
/// exists but cannot be read or parsed (the caller warns and continues with defaults).
pub fn load_pdfsearch_toml(dir: &Path) -> Result<Option<PdfsearchToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file = parse_pdfsearch_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, some $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = Some(v);
        }
    };
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &PdfsearchToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, converter);
    apply_file_opt!(s, opts, extension);
    apply_file_opt!(s, opts, some conversion_threads);
    apply_file_opt!(s, opts, some search_threads);
    apply_file_opt!(s, opts, some channel_cap);
    apply_file_opt!(s, opts, case_insensitive);
    apply_file_opt!(s, opts, recursive);
    apply_file_opt!(s, opts, format);
    apply_file_opt!(s, opts, verbose);
}
