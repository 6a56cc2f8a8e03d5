use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::GcError;

/// Tuning knobs for the host heap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeapConfig {
    /// Allocations between automatic collections at safepoints. `0` disables
    /// automatic collection; `Heap::collect` still works.
    pub gc_threshold: usize,
    /// Number of object slots reserved up front.
    pub initial_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            gc_threshold: 1024,
            initial_capacity: 64,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    heap: HeapConfig,
}

impl HeapConfig {
    pub const THRESHOLD_VAR: &'static str = "MYMATH_GC_THRESHOLD";
    pub const CAPACITY_VAR: &'static str = "MYMATH_HEAP_CAPACITY";

    /// A configuration that never collects on its own.
    pub fn manual() -> Self {
        HeapConfig { gc_threshold: 0, ..HeapConfig::default() }
    }

    /// Parses the `[heap]` table of a TOML document. A missing table yields defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, GcError> {
        let file: ConfigFile = toml::from_str(source)?;
        Ok(file.heap)
    }

    pub fn from_file(path: &Path) -> Result<Self, GcError> {
        let source = fs::read_to_string(path).map_err(|source| GcError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Applies `MYMATH_GC_THRESHOLD` / `MYMATH_HEAP_CAPACITY` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, GcError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, GcError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(Self::THRESHOLD_VAR) {
            self.gc_threshold = parse_setting(Self::THRESHOLD_VAR, &value)?;
        }
        if let Some(value) = lookup(Self::CAPACITY_VAR) {
            self.initial_capacity = parse_setting(Self::CAPACITY_VAR, &value)?;
        }
        Ok(self)
    }
}

fn parse_setting(name: &'static str, value: &str) -> Result<usize, GcError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("off") {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| GcError::InvalidSetting {
        name,
        value: value.to_string(),
    })
}
