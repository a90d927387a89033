use std::sync::Arc;

use crate::{
    assets::decode::Bitmap,
    compose::cover::CoverPlacement,
    foundation::core::{Point, Rect, Rgba8},
    platform::table::SizePreset,
    text::shaper::FontRole,
};

#[derive(Clone, Debug)]
/// Ordered draw operations for one thumbnail, produced by [`crate::compose_plan`].
///
/// The rasterizer executes `ops` front to back onto a transparent canvas of `size`.
pub struct ThumbnailPlan {
    pub size: SizePreset,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a solid rectangle is for.
pub enum RectRole {
    Background,
    Overlay,
    SubtitlePill,
}

#[derive(Clone, Debug)]
/// Draw operation emitted by the composer.
pub enum DrawOp {
    /// Solid rectangle.
    Rect {
        rect: Rect,
        color: Rgba8,
        role: RectRole,
    },
    /// Bitmap scaled and positioned by a cover-fit placement.
    Image {
        bitmap: Arc<Bitmap>,
        placement: CoverPlacement,
    },
    /// Vertical linear gradient filling `rect`: `from` at `start_y` and above, `to` at
    /// `end_y` and below.
    VerticalGradient {
        rect: Rect,
        start_y: f64,
        end_y: f64,
        from: Rgba8,
        to: Rgba8,
    },
    /// One line of text.
    Text(TextOp),
}

#[derive(Clone, Debug, PartialEq)]
/// A single line of text; `origin` is the top-left of the line box.
pub struct TextOp {
    pub text: String,
    pub role: FontRole,
    pub size_px: f32,
    pub origin: Point,
    /// Measured advance width at `size_px`.
    pub width_px: f32,
    pub fill: Rgba8,
    pub stroke: Option<TextStroke>,
    pub shadow: Option<TextShadow>,
}

impl TextOp {
    /// Approximate line box: measured width by one em of height.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + f64::from(self.width_px),
            self.origin.y + f64::from(self.size_px),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Outline drawn under the fill, with round joins.
pub struct TextStroke {
    pub color: Rgba8,
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Zero-offset blurred drop shadow behind a text line.
pub struct TextShadow {
    pub color: Rgba8,
    /// Canvas-style shadow blur; the Gaussian sigma is half of it.
    pub blur: f64,
}

impl ThumbnailPlan {
    pub fn text_ops(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn title_lines(&self) -> impl Iterator<Item = &TextOp> {
        self.text_ops().filter(|t| t.role == FontRole::Title)
    }

    /// Every op that exists only because a subtitle is present (text and pill).
    pub fn subtitle_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| match op {
            DrawOp::Text(t) => t.role == FontRole::Subtitle,
            DrawOp::Rect { role, .. } => *role == RectRole::SubtitlePill,
            DrawOp::Image { .. } | DrawOp::VerticalGradient { .. } => false,
        })
    }

    /// Union of the subtitle text box and pill, if any subtitle is drawn.
    pub fn subtitle_bounds(&self) -> Option<Rect> {
        self.subtitle_ops()
            .map(|op| match op {
                DrawOp::Text(t) => t.bounds(),
                DrawOp::Rect { rect, .. } => *rect,
                DrawOp::Image { .. } | DrawOp::VerticalGradient { .. } => Rect::ZERO,
            })
            .reduce(|a, b| a.union(b))
    }
}
