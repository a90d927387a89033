use std::borrow::Cow;

use crate::{
    assets::fonts::{FontBook, FontFace},
    foundation::error::{ThumbError, ThumbResult},
};

/// Which face a piece of text is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Bold title face.
    Title,
    /// Semibold subtitle face.
    Subtitle,
}

impl FontRole {
    fn weight(self) -> f32 {
        match self {
            FontRole::Title => 700.0,
            FontRole::Subtitle => 600.0,
        }
    }
}

/// Pixel-width measurement of a single line of text.
pub trait TextMeasure {
    /// Width in pixels of `text` set in `role` at `size_px`.
    fn measure(&mut self, text: &str, role: FontRole, size_px: f32) -> f32;
}

/// Deterministic measurer: every character advances by the same width, regardless of size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub per_char_px: f32,
}

impl FixedAdvance {
    pub fn new(per_char_px: f32) -> Self {
        Self { per_char_px }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, _role: FontRole, _size_px: f32) -> f32 {
        text.chars().count() as f32 * self.per_char_px
    }
}

struct RegisteredFace {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Parley-backed shaper holding the registered title and subtitle faces.
///
/// The Parley contexts are scratch space reused across layouts; a layout depends only on
/// its inputs. Layouts carry no brush: paint is chosen per draw op at raster time.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    title: RegisteredFace,
    subtitle: RegisteredFace,
}

impl TextShaper {
    pub fn new(fonts: &FontBook) -> ThumbResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let title = register_face(&mut font_ctx, &fonts.title)?;
        let subtitle = register_face(&mut font_ctx, &fonts.subtitle)?;
        tracing::debug!(
            title = %title.family,
            subtitle = %subtitle.family,
            "registered text faces"
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            title,
            subtitle,
        })
    }

    pub fn family_name(&self, role: FontRole) -> &str {
        &self.face(role).family
    }

    /// Font data handed to the rasterizer for glyph outlines.
    pub(crate) fn font_data(&self, role: FontRole) -> &vello_cpu::peniko::FontData {
        &self.face(role).data
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        role: FontRole,
        size_px: f32,
    ) -> parley::Layout<()> {
        let size_px = if size_px.is_finite() {
            size_px.max(1.0)
        } else {
            1.0
        };
        let family = self.face(role).family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(role.weight()),
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    fn face(&self, role: FontRole) -> &RegisteredFace {
        match role {
            FontRole::Title => &self.title,
            FontRole::Subtitle => &self.subtitle,
        }
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str, role: FontRole, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, role, size_px).width()
    }
}

fn register_face(
    font_ctx: &mut parley::FontContext,
    face: &FontFace,
) -> ThumbResult<RegisteredFace> {
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(face.bytes.as_ref().clone()),
        None,
    );
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| ThumbError::font("no font families registered from font bytes"))?;

    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| ThumbError::font("registered font family has no name"))?
        .to_string();

    let data = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
        face.index,
    );
    Ok(RegisteredFace { family, data })
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
