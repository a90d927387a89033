use std::collections::BTreeMap;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Title font size as a fraction of canvas height when a platform does not set its own.
pub const DEFAULT_TITLE_SCALE: f64 = 0.18;

/// Fixed pixel dimensions of a platform thumbnail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SizePreset {
    pub width: u32,
    pub height: u32,
}

impl SizePreset {
    pub fn new(width: u32, height: u32) -> ThumbResult<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbError::validation(format!(
                "size preset must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for SizePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// One entry of the platform table: identifier, size and title scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlatformSpec {
    pub id: String,
    pub size: SizePreset,
    /// Title font size as a fraction of the canvas height.
    pub title_scale: f64,
}

impl PlatformSpec {
    pub fn new(id: impl Into<String>, size: SizePreset, title_scale: f64) -> ThumbResult<Self> {
        let id = id.into().trim().to_ascii_lowercase();
        if id.is_empty() {
            return Err(ThumbError::validation("platform id must be non-empty"));
        }
        if !title_scale.is_finite() || title_scale <= 0.0 || title_scale > 1.0 {
            return Err(ThumbError::validation(format!(
                "platform '{id}' title_scale must be in (0, 1], got {title_scale}"
            )));
        }
        Ok(Self {
            id,
            size,
            title_scale,
        })
    }

    fn builtin(id: &str, width: u32, height: u32, title_scale: f64) -> Self {
        Self {
            id: id.to_owned(),
            size: SizePreset { width, height },
            title_scale,
        }
    }
}

/// Closed, name-keyed set of platform size presets.
///
/// The table grows by inserting entries; there is no formula and no fallback size for
/// identifiers it does not know.
#[derive(Clone, Debug)]
pub struct PlatformTable {
    entries: BTreeMap<String, PlatformSpec>,
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlatformTable {
    /// The stock youtube / instagram / tiktok presets.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for spec in [
            PlatformSpec::builtin("youtube", 1280, 720, 0.18),
            PlatformSpec::builtin("instagram", 1080, 1080, 0.14),
            PlatformSpec::builtin("tiktok", 1024, 1024, 0.15),
        ] {
            entries.insert(spec.id.clone(), spec);
        }
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, spec: PlatformSpec) {
        self.entries.insert(spec.id.clone(), spec);
    }

    pub fn resolve(&self, id: &str) -> ThumbResult<&PlatformSpec> {
        let key = id.trim().to_ascii_lowercase();
        self.entries
            .get(&key)
            .ok_or_else(|| ThumbError::unknown_platform(id.trim()))
    }

    pub fn size_for(&self, id: &str) -> ThumbResult<SizePreset> {
        self.resolve(id).map(|p| p.size)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformSpec> {
        self.entries.values()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/table.rs"]
mod tests;
