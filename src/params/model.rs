use std::{str::FromStr, sync::Arc};

use crate::{
    assets::decode::Bitmap,
    foundation::core::Rgba8,
    foundation::error::{ThumbError, ThumbResult},
    platform::table::{PlatformSpec, SizePreset},
};

/// Title drawn when the caller leaves the title blank.
pub const PLACEHOLDER_TITLE: &str = "Your big clickable title";

/// Background fill used when nothing else is configured.
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::rgb(0x11, 0x11, 0x11);

/// Visual preset controlling overlay, text placement and shadow/stroke treatment.
///
/// Serialized as its lowercase name; parsing from strings and from serde accepts any case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// No overlay; bottom-anchored title.
    #[default]
    Clean,
    /// Flat dark tint; top-anchored shadowed title, subtitle pill.
    Bold,
    /// Bottom gradient; same text treatment as `Bold`.
    Dramatic,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Clean, Style::Bold, Style::Dramatic];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Clean => "clean",
            Style::Bold => "bold",
            Style::Dramatic => "dramatic",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ThumbError::validation(format!(
                    "unknown style '{s}' (expected clean, bold or dramatic)"
                ))
            })
    }
}

impl<'de> serde::Deserialize<'de> for Style {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Style {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Mutually exclusive style toggle.
///
/// Selecting a style deactivates every other one; exactly one is active at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleSelection {
    active: Style,
}

impl StyleSelection {
    pub fn new(initial: Style) -> Self {
        Self { active: initial }
    }

    pub fn select(&mut self, style: Style) {
        self.active = style;
    }

    pub fn current(&self) -> Style {
        self.active
    }

    pub fn is_active(&self, style: Style) -> bool {
        self.active == style
    }

    /// Styles currently marked active, in declaration order.
    pub fn active_styles(&self) -> impl Iterator<Item = Style> + '_ {
        Style::ALL.into_iter().filter(|s| self.is_active(*s))
    }
}

/// Everything one render call needs, built by the caller before each render.
#[derive(Clone, Debug)]
pub struct RenderParams {
    pub platform: PlatformSpec,
    pub background_color: Rgba8,
    pub background_image: Option<Arc<Bitmap>>,
    pub style: Style,
    pub title: String,
    pub subtitle: String,
}

impl RenderParams {
    pub fn new(platform: PlatformSpec) -> Self {
        Self {
            platform,
            background_color: DEFAULT_BACKGROUND,
            background_image: None,
            style: Style::default(),
            title: String::new(),
            subtitle: String::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_background_color(mut self, color: Rgba8) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_background_image(mut self, image: Option<Arc<Bitmap>>) -> Self {
        self.background_image = image;
        self
    }

    pub fn size(&self) -> SizePreset {
        self.platform.size
    }

    /// Trimmed title, or [`PLACEHOLDER_TITLE`] when blank.
    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => PLACEHOLDER_TITLE,
            t => t,
        }
    }

    /// Trimmed subtitle; `None` when blank.
    pub fn display_subtitle(&self) -> Option<&str> {
        match self.subtitle.trim() {
            "" => None,
            s => Some(s),
        }
    }

    pub fn validate(&self) -> ThumbResult<()> {
        SizePreset::new(self.platform.size.width, self.platform.size.height)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
