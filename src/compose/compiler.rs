use crate::{
    compose::cover::cover_fit,
    compose::plan::{DrawOp, RectRole, TextOp, TextShadow, TextStroke, ThumbnailPlan},
    foundation::core::{Point, Rect, Rgba8},
    params::model::{RenderParams, Style},
    text::shaper::{FontRole, TextMeasure},
    text::wrap::wrap_words,
};

// Overlays.
const DRAMATIC_FADE_START: f64 = 0.4;
const DRAMATIC_ALPHA: f64 = 0.7;
const BOLD_TINT_ALPHA: f64 = 0.2;

// Clean: bottom-anchored title.
const CLEAN_PAD_RATIO: f64 = 0.05;
const CLEAN_SUBTITLE_RESERVE: f64 = 0.6;
const CLEAN_TITLE_STROKE_RATIO: f64 = 0.06;
const CLEAN_TITLE_STROKE_MIN: f64 = 3.0;
const CLEAN_TITLE_STROKE_ALPHA: f64 = 0.75;
const CLEAN_SUBTITLE_RATIO: f64 = 0.45;
const CLEAN_SUBTITLE_STROKE_RATIO: f64 = 0.04;
const CLEAN_SUBTITLE_STROKE_MIN: f64 = 2.0;
const CLEAN_SUBTITLE_STROKE_ALPHA: f64 = 0.6;
const CLEAN_SUBTITLE_FILL_ALPHA: f64 = 0.88;

// Bold / dramatic: top-anchored title, subtitle pill.
const PUNCHY_PAD_RATIO: f64 = 0.06;
const PUNCHY_LINE_PITCH: f64 = 0.9;
const PUNCHY_SHADOW_ALPHA: f64 = 0.6;
const PUNCHY_SHADOW_BLUR: f64 = 10.0;
const PUNCHY_TITLE_STROKE_RATIO: f64 = 0.08;
const PUNCHY_TITLE_STROKE_MIN: f64 = 4.0;
const PUNCHY_TITLE_STROKE_ALPHA: f64 = 0.85;
const PUNCHY_SUBTITLE_RATIO: f64 = 0.36;
const PILL_EXTRA_WIDTH: f64 = 28.0;
const PILL_HEIGHT_RATIO: f64 = 1.4;
const PILL_TEXT_INSET: f64 = 12.0;
const PILL_ALPHA: f64 = 0.6;

/// Lay out one thumbnail: background, overlay, then text, in paint order.
///
/// Pure in `params`; `measure` supplies line widths for wrapping and pill sizing.
#[tracing::instrument(skip_all, fields(platform = %params.platform.id, style = %params.style))]
pub fn compose_plan<M>(params: &RenderParams, measure: &mut M) -> ThumbnailPlan
where
    M: TextMeasure + ?Sized,
{
    let size = params.size();
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let full = Rect::new(0.0, 0.0, w, h);
    let mut ops = Vec::new();

    ops.push(DrawOp::Rect {
        rect: full,
        color: params.background_color,
        role: RectRole::Background,
    });
    if let Some(bitmap) = &params.background_image {
        ops.push(DrawOp::Image {
            bitmap: bitmap.clone(),
            placement: cover_fit(size, bitmap.width, bitmap.height),
        });
    }

    match params.style {
        Style::Clean => {}
        Style::Dramatic => ops.push(DrawOp::VerticalGradient {
            rect: full,
            start_y: h * DRAMATIC_FADE_START,
            end_y: h,
            from: Rgba8::BLACK.with_alpha(0.0),
            to: Rgba8::BLACK.with_alpha(DRAMATIC_ALPHA),
        }),
        Style::Bold => ops.push(DrawOp::Rect {
            rect: full,
            color: Rgba8::BLACK.with_alpha(BOLD_TINT_ALPHA),
            role: RectRole::Overlay,
        }),
    }

    let title_size = (h * params.platform.title_scale).round().max(1.0);
    let text = TextInputs {
        title: params.display_title(),
        subtitle: params.display_subtitle(),
        width: w,
        height: h,
        title_size,
    };
    match params.style {
        Style::Clean => layout_clean(&text, measure, &mut ops),
        Style::Bold | Style::Dramatic => layout_punchy(&text, measure, &mut ops),
    }

    tracing::debug!(ops = ops.len(), title_size, "composed thumbnail plan");
    ThumbnailPlan { size, ops }
}

struct TextInputs<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    width: f64,
    height: f64,
    title_size: f64,
}

fn wrap_title<M>(text: &TextInputs<'_>, pad: f64, measure: &mut M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let max_w = (text.width - pad * 2.0) as f32;
    let size = text.title_size as f32;
    wrap_words(text.title, max_w, |line| {
        measure.measure(line, FontRole::Title, size)
    })
}

fn layout_clean<M>(text: &TextInputs<'_>, measure: &mut M, ops: &mut Vec<DrawOp>)
where
    M: TextMeasure + ?Sized,
{
    let ts = text.title_size;
    let pad = (text.width * CLEAN_PAD_RATIO).round();
    let lines = wrap_title(text, pad, measure);

    let reserve = if text.subtitle.is_some() {
        ts * CLEAN_SUBTITLE_RESERVE
    } else {
        0.0
    };
    // Clamp only: tall blocks still overflow the bottom edge.
    let y0 = (text.height - pad - lines.len() as f64 * ts - reserve).max(pad);

    let stroke = TextStroke {
        color: Rgba8::BLACK.with_alpha(CLEAN_TITLE_STROKE_ALPHA),
        width: (ts * CLEAN_TITLE_STROKE_RATIO).round().max(CLEAN_TITLE_STROKE_MIN),
    };
    for (i, line) in lines.iter().enumerate() {
        let width_px = measure.measure(line, FontRole::Title, ts as f32);
        ops.push(DrawOp::Text(TextOp {
            text: line.clone(),
            role: FontRole::Title,
            size_px: ts as f32,
            origin: Point::new(pad, y0 + i as f64 * ts),
            width_px,
            fill: Rgba8::WHITE,
            stroke: Some(stroke),
            shadow: None,
        }));
    }

    if let Some(subtitle) = text.subtitle {
        let sub = (ts * CLEAN_SUBTITLE_RATIO).round();
        let y = y0 + lines.len() as f64 * ts + (sub * 0.5).round();
        let width_px = measure.measure(subtitle, FontRole::Subtitle, sub as f32);
        ops.push(DrawOp::Text(TextOp {
            text: subtitle.to_owned(),
            role: FontRole::Subtitle,
            size_px: sub as f32,
            origin: Point::new(pad, y),
            width_px,
            fill: Rgba8::WHITE.with_alpha(CLEAN_SUBTITLE_FILL_ALPHA),
            stroke: Some(TextStroke {
                color: Rgba8::BLACK.with_alpha(CLEAN_SUBTITLE_STROKE_ALPHA),
                width: (sub * CLEAN_SUBTITLE_STROKE_RATIO)
                    .round()
                    .max(CLEAN_SUBTITLE_STROKE_MIN),
            }),
            shadow: None,
        }));
    }
}

fn layout_punchy<M>(text: &TextInputs<'_>, measure: &mut M, ops: &mut Vec<DrawOp>)
where
    M: TextMeasure + ?Sized,
{
    let ts = text.title_size;
    let pad = (text.width * PUNCHY_PAD_RATIO).round();
    let lines = wrap_title(text, pad, measure);

    let stroke = TextStroke {
        color: Rgba8::BLACK.with_alpha(PUNCHY_TITLE_STROKE_ALPHA),
        width: (ts * PUNCHY_TITLE_STROKE_RATIO).round().max(PUNCHY_TITLE_STROKE_MIN),
    };
    let shadow = TextShadow {
        color: Rgba8::BLACK.with_alpha(PUNCHY_SHADOW_ALPHA),
        blur: PUNCHY_SHADOW_BLUR,
    };
    for (i, line) in lines.iter().enumerate() {
        let width_px = measure.measure(line, FontRole::Title, ts as f32);
        ops.push(DrawOp::Text(TextOp {
            text: line.clone(),
            role: FontRole::Title,
            size_px: ts as f32,
            origin: Point::new(pad, pad + i as f64 * ts * PUNCHY_LINE_PITCH),
            width_px,
            fill: Rgba8::WHITE,
            stroke: Some(stroke),
            shadow: Some(shadow),
        }));
    }

    let Some(subtitle) = text.subtitle else {
        return;
    };
    let sub = (ts * PUNCHY_SUBTITLE_RATIO).round();
    let text_w = measure.measure(subtitle, FontRole::Subtitle, sub as f32);
    let pill_w = f64::from(text_w) + PILL_EXTRA_WIDTH;
    let pill_h = (sub * PILL_HEIGHT_RATIO).round();
    let pill_x = pad;
    let pill_y = text.height - pad - pill_h;

    ops.push(DrawOp::Rect {
        rect: Rect::new(pill_x, pill_y, pill_x + pill_w, pill_y + pill_h),
        color: Rgba8::BLACK.with_alpha(PILL_ALPHA),
        role: RectRole::SubtitlePill,
    });
    ops.push(DrawOp::Text(TextOp {
        text: subtitle.to_owned(),
        role: FontRole::Subtitle,
        size_px: sub as f32,
        origin: Point::new(pill_x + PILL_TEXT_INSET, pill_y + (pill_h - sub) / 2.0),
        width_px: text_w,
        fill: Rgba8::WHITE,
        stroke: None,
        shadow: None,
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compiler.rs"]
mod tests;
