use std::sync::Arc;

use vello_cpu::kurbo::{Affine, Join, Stroke};

use crate::{
    assets::decode::Bitmap,
    compose::plan::{DrawOp, TextOp, ThumbnailPlan},
    foundation::core::{Rect, Rgba8},
    foundation::error::{ThumbError, ThumbResult},
    platform::table::SizePreset,
    render::blur::{blur_rgba8_premul, radius_for_sigma},
    render::canvas::{ThumbCanvas, surface_dims},
    render::composite::{over_in_place, tint_coverage_in_place},
    text::shaper::TextShaper,
};

/// Executes a [`ThumbnailPlan`] on the CPU with `vello_cpu`.
///
/// Ops are batched into one render context; a shadowed text op forces the pending batch
/// onto the canvas so its blurred silhouette can be composited in paint order.
#[derive(Default)]
pub struct CpuRasterizer {
    image_cache: Option<(Arc<Bitmap>, vello_cpu::Image)>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    pub fn rasterize(
        &mut self,
        plan: &ThumbnailPlan,
        canvas: &mut ThumbCanvas,
        shaper: &mut TextShaper,
    ) -> ThumbResult<()> {
        if canvas.size() != plan.size {
            return Err(ThumbError::render(format!(
                "canvas is {} but plan is {}",
                canvas.size(),
                plan.size
            )));
        }
        let (w, h) = surface_dims(plan.size)?;
        let mut batch = Batch::new(w, h);

        for op in &plan.ops {
            match op {
                DrawOp::Rect { rect, color, .. } => {
                    batch.ctx.set_transform(Affine::IDENTITY);
                    batch.ctx.set_paint(paint_color(*color));
                    batch.ctx.fill_rect(&to_cpu_rect(*rect));
                    batch.dirty = true;
                }
                DrawOp::Image { bitmap, placement } => {
                    let paint = self.image_paint_for(bitmap)?;
                    batch.ctx.set_transform(
                        Affine::translate((placement.x, placement.y))
                            * Affine::scale(placement.scale),
                    );
                    batch.ctx.set_paint(paint);
                    batch.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(bitmap.width),
                        f64::from(bitmap.height),
                    ));
                    batch.dirty = true;
                }
                DrawOp::VerticalGradient {
                    rect,
                    start_y,
                    end_y,
                    from,
                    to,
                } => {
                    let Some(paint) = gradient_paint(*rect, *start_y, *end_y, *from, *to)? else {
                        continue;
                    };
                    batch.ctx.set_transform(Affine::translate((rect.x0, rect.y0)));
                    batch.ctx.set_paint(paint);
                    batch.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        rect.width().round(),
                        rect.height().round(),
                    ));
                    batch.dirty = true;
                }
                DrawOp::Text(text) => {
                    if let Some(shadow) = text.shadow {
                        batch.flush_onto(canvas)?;
                        draw_shadow(text, shadow.color, shadow.blur, canvas, shaper)?;
                    }
                    let stroke = text.stroke.map(|s| (s.color, s.width));
                    draw_text(&mut batch.ctx, shaper, text, text.fill, stroke);
                    batch.dirty = true;
                }
            }
        }
        batch.flush_onto(canvas)
    }

    fn image_paint_for(&mut self, bitmap: &Arc<Bitmap>) -> ThumbResult<vello_cpu::Image> {
        if let Some((cached, paint)) = &self.image_cache
            && Arc::ptr_eq(cached, bitmap)
        {
            return Ok(paint.clone());
        }

        let size = SizePreset::new(bitmap.width, bitmap.height)?;
        let pixmap = pixmap_from_premul(bitmap.rgba8_premul.as_slice(), size)?;
        let paint = image_paint(pixmap);
        self.image_cache = Some((bitmap.clone(), paint.clone()));
        Ok(paint)
    }
}

struct Batch {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    dirty: bool,
}

impl Batch {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            dirty: false,
        }
    }

    /// Render pending ops into a scratch layer and composite it over `canvas`.
    fn flush_onto(&mut self, canvas: &mut ThumbCanvas) -> ThumbResult<()> {
        if !self.dirty {
            return Ok(());
        }
        let layer = self.render_layer();
        over_in_place(canvas.data_premul_mut(), layer.data_as_u8_slice())?;
        Ok(())
    }

    fn render_layer(&mut self) -> vello_cpu::Pixmap {
        let mut ctx = std::mem::replace(
            &mut self.ctx,
            vello_cpu::RenderContext::new(self.width, self.height),
        );
        self.dirty = false;
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);
        layer
    }
}

/// Stroke then fill one text line at its origin.
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    shaper: &mut TextShaper,
    op: &TextOp,
    fill: Rgba8,
    stroke: Option<(Rgba8, f64)>,
) {
    let layout = shaper.layout_line(&op.text, op.role, op.size_px);
    let font = shaper.font_data(op.role).clone();
    ctx.set_transform(Affine::translate((op.origin.x, op.origin.y)));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            // Run glyphs carry offsets relative to the pen; accumulate advances from the run
            // origin on the baseline.
            let mut pen_x = run.offset();
            let baseline = run.baseline();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: pen_x + g.x,
                        y: baseline - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                })
                .collect();
            let font_size = run.run().font_size();

            if let Some((color, width)) = stroke
                && width > 0.0
            {
                ctx.set_stroke(Stroke::new(width).with_join(Join::Round));
                ctx.set_paint(paint_color(color));
                ctx.glyph_run(&font)
                    .font_size(font_size)
                    .stroke_glyphs(glyphs.iter().copied());
            }
            ctx.set_paint(paint_color(fill));
            ctx.glyph_run(&font)
                .font_size(font_size)
                .fill_glyphs(glyphs.into_iter());
        }
    }
}

/// Zero-offset drop shadow: blurred silhouette of stroke and fill, tinted `color`.
fn draw_shadow(
    op: &TextOp,
    color: Rgba8,
    blur: f64,
    canvas: &mut ThumbCanvas,
    shaper: &mut TextShaper,
) -> ThumbResult<()> {
    let (w, h) = surface_dims(canvas.size())?;
    let mut batch = Batch::new(w, h);
    let stroke = op.stroke.map(|s| (Rgba8::WHITE, s.width));
    draw_text(&mut batch.ctx, shaper, op, Rgba8::WHITE, stroke);
    let layer = batch.render_layer();

    let sigma = (blur / 2.0) as f32;
    let radius = radius_for_sigma(sigma);
    let spread = radius as f64 + op.stroke.map_or(0.0, |s| s.width);
    let Some(region) = Region::around(op, spread, canvas.width(), canvas.height()) else {
        return Ok(());
    };

    let stride = canvas.width() as usize;
    let mut patch = region.copy_out(layer.data_as_u8_slice(), stride);
    tint_coverage_in_place(&mut patch, color.to_premul().to_array());
    let blurred = blur_rgba8_premul(&patch, region.w as u32, region.h as u32, radius, sigma)?;
    region.over(canvas.data_premul_mut(), stride, &blurred)
}

/// Pixel rectangle on the canvas, clipped to its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl Region {
    /// Line box of `op` grown by `spread` and a descender allowance.
    fn around(op: &TextOp, spread: f64, canvas_w: u32, canvas_h: u32) -> Option<Self> {
        let b = op.bounds();
        let descent = f64::from(op.size_px) * 0.4;
        let x0 = (b.x0 - spread).floor().clamp(0.0, f64::from(canvas_w));
        let y0 = (b.y0 - spread).floor().clamp(0.0, f64::from(canvas_h));
        let x1 = (b.x1 + spread).ceil().clamp(0.0, f64::from(canvas_w));
        let y1 = (b.y1 + descent + spread).ceil().clamp(0.0, f64::from(canvas_h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as usize,
            y: y0 as usize,
            w: (x1 - x0) as usize,
            h: (y1 - y0) as usize,
        })
    }

    fn rows(self, stride: usize) -> impl Iterator<Item = std::ops::Range<usize>> {
        (self.y..self.y + self.h).map(move |row| {
            let start = (row * stride + self.x) * 4;
            start..start + self.w * 4
        })
    }

    fn copy_out(self, buf: &[u8], stride: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.w * self.h * 4);
        for range in self.rows(stride) {
            out.extend_from_slice(&buf[range]);
        }
        out
    }

    fn over(self, dst: &mut [u8], stride: usize, src: &[u8]) -> ThumbResult<()> {
        let row_len = self.w * 4;
        for (range, src_row) in self.rows(stride).zip(src.chunks_exact(row_len)) {
            over_in_place(&mut dst[range], src_row)?;
        }
        Ok(())
    }
}

/// Rasterize a vertical two-stop gradient into an image the size of `rect`.
fn gradient_paint(
    rect: Rect,
    start_y: f64,
    end_y: f64,
    from: Rgba8,
    to: Rgba8,
) -> ThumbResult<Option<vello_cpu::Image>> {
    let width = rect.width().round().max(0.0) as u32;
    let height = rect.height().round().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for row in 0..height {
        let y = rect.y0 + f64::from(row) + 0.5;
        let t = gradient_t(y, start_y, end_y);
        let px = lerp_rgba8(from, to, t).to_premul().to_array();
        for _ in 0..width {
            bytes.extend_from_slice(&px);
        }
    }
    let pixmap = pixmap_from_premul(&bytes, SizePreset::new(width, height)?)?;
    Ok(Some(image_paint(pixmap)))
}

fn gradient_t(y: f64, start_y: f64, end_y: f64) -> f64 {
    if end_y <= start_y {
        return if y < start_y { 0.0 } else { 1.0 };
    }
    ((y - start_y) / (end_y - start_y)).clamp(0.0, 1.0)
}

fn lerp_rgba8(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    let mix = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba8::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

/// Wrap premultiplied RGBA8 bytes covering `size` in a `vello_cpu` pixmap.
fn pixmap_from_premul(bytes: &[u8], size: SizePreset) -> ThumbResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(size)?;
    let expected = usize::from(w) * usize::from(h) * 4;
    if bytes.len() != expected {
        return Err(ThumbError::render(format!(
            "{size} image needs {expected} bytes, got {}",
            bytes.len()
        )));
    }

    let translucent = bytes.chunks_exact(4).any(|px| px[3] < u8::MAX);
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        translucent,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
