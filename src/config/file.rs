use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::fonts::FontBook,
    foundation::core::Rgba8,
    foundation::error::{ThumbError, ThumbResult},
    params::model::{DEFAULT_BACKGROUND, Style},
    platform::table::{DEFAULT_TITLE_SCALE, PlatformSpec, PlatformTable, SizePreset},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// On-disk configuration: extra platforms, render defaults and font files.
///
/// Every section is optional; an empty object is a valid config.
pub struct ThumbConfig {
    /// Platforms added to (or overriding) the built-in table, keyed by id.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformEntry>,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub fonts: FontPaths,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformEntry {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_title_scale")]
    pub title_scale: f64,
}

fn default_title_scale() -> f64 {
    DEFAULT_TITLE_SCALE
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Values used when the caller does not pick one.
pub struct Defaults {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub background_color: Option<Rgba8>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Font files for the title and subtitle faces; relative paths are resolved against the
/// config file's directory.
pub struct FontPaths {
    #[serde(default)]
    pub title: Option<PathBuf>,
    #[serde(default)]
    pub subtitle: Option<PathBuf>,
}

impl ThumbConfig {
    /// Read, parse and validate a JSON config file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ThumbResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ThumbError::serde(format!("{}: {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.fonts.resolve_relative_to(base);
        cfg.validate()?;
        tracing::debug!(platforms = cfg.platforms.len(), "loaded config");
        Ok(cfg)
    }

    /// Parse and validate JSON text; font paths are kept as written.
    pub fn from_json_str(s: &str) -> ThumbResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ThumbError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ThumbResult<()> {
        for (id, entry) in &self.platforms {
            entry.to_spec(id)?;
        }
        if let Some(platform) = &self.defaults.platform {
            self.platform_table().resolve(platform)?;
        }
        if self.fonts.subtitle.is_some() && self.fonts.title.is_none() {
            return Err(ThumbError::validation("fonts.subtitle requires fonts.title"));
        }
        Ok(())
    }

    /// Built-in platforms plus the configured ones.
    pub fn platform_table(&self) -> PlatformTable {
        let mut table = PlatformTable::builtin();
        for (id, entry) in &self.platforms {
            match entry.to_spec(id) {
                Ok(spec) => table.insert(spec),
                Err(err) => tracing::warn!(%err, "skipping invalid platform entry"),
            }
        }
        table
    }

    /// Configured font files, or system fonts when none are set.
    pub fn font_book(&self) -> ThumbResult<FontBook> {
        match &self.fonts.title {
            Some(title) => FontBook::from_files(title, self.fonts.subtitle.as_deref()),
            None => FontBook::from_system(),
        }
    }

    pub fn default_platform(&self) -> &str {
        self.defaults.platform.as_deref().unwrap_or("youtube")
    }

    pub fn default_style(&self) -> Style {
        self.defaults.style.unwrap_or_default()
    }

    pub fn default_background(&self) -> Rgba8 {
        self.defaults.background_color.unwrap_or(DEFAULT_BACKGROUND)
    }
}

impl PlatformEntry {
    fn to_spec(self, id: &str) -> ThumbResult<PlatformSpec> {
        if self.width == 0 || self.height == 0 {
            return Err(ThumbError::validation(format!(
                "platform '{id}' must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        PlatformSpec::new(id, SizePreset::new(self.width, self.height)?, self.title_scale)
    }
}

impl FontPaths {
    fn resolve_relative_to(&mut self, base: &Path) {
        for p in [&mut self.title, &mut self.subtitle].into_iter().flatten() {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/file.rs"]
mod tests;
