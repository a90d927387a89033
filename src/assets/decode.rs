use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{ThumbError, ThumbResult};

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Largest side the rasterizer can sample from.
pub const MAX_IMAGE_SIDE: u32 = u16::MAX as u32;

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// Images with a side above [`MAX_IMAGE_SIDE`] are downscaled to fit, keeping their aspect
/// ratio.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> ThumbResult<Bitmap> {
    let mut dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    if dyn_img.width() > MAX_IMAGE_SIDE || dyn_img.height() > MAX_IMAGE_SIDE {
        let (from_w, from_h) = (dyn_img.width(), dyn_img.height());
        dyn_img = dyn_img.resize(
            from_w.min(MAX_IMAGE_SIDE),
            from_h.min(MAX_IMAGE_SIDE),
            image::imageops::FilterType::Triangle,
        );
        tracing::warn!(
            from_w,
            from_h,
            to_w = dyn_img.width(),
            to_h = dyn_img.height(),
            "downscaled oversized background image"
        );
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ThumbError::validation("decoded image has zero area"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    tracing::debug!(width, height, "decoded background image");
    Ok(Bitmap {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file; a missing or undecodable file yields `None`.
///
/// The failure is logged and otherwise swallowed, so callers keep whatever background they
/// had before.
pub fn load_background(path: &Path) -> Option<Bitmap> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "background image unreadable");
            return None;
        }
    };
    decode_background(&bytes)
}

/// Decode in-memory image bytes, swallowing failures like [`load_background`].
pub fn decode_background(bytes: &[u8]) -> Option<Bitmap> {
    match decode_image(bytes) {
        Ok(bmp) => Some(bmp),
        Err(err) => {
            tracing::warn!(%err, "background image rejected");
            None
        }
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
