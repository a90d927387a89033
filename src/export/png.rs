use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;
use base64::Engine as _;

use crate::{
    foundation::error::{ThumbError, ThumbResult},
    render::canvas::ThumbCanvas,
};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Download name for a platform's thumbnail: `thumbnail-<platform>.png`.
pub fn export_file_name(platform: &str) -> String {
    format!("thumbnail-{platform}.png")
}

/// Encode the canvas as a lossless PNG.
#[tracing::instrument(skip_all, fields(size = %canvas.size()))]
pub fn encode_png(canvas: &ThumbCanvas) -> ThumbResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba8_straight())
        .ok_or_else(|| ThumbError::render("canvas buffer does not match its dimensions"))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    let bytes = out.into_inner();
    tracing::debug!(bytes = bytes.len(), "encoded png");
    Ok(bytes)
}

/// `data:image/png;base64,...` URI of the canvas.
pub fn png_data_uri(canvas: &ThumbCanvas) -> ThumbResult<String> {
    let png = encode_png(canvas)?;
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(DATA_URI_PREFIX);
    base64::engine::general_purpose::STANDARD.encode_string(&png, &mut uri);
    Ok(uri)
}

/// Write the canvas to `dir/thumbnail-<platform>.png`, returning the path.
pub fn save_png(canvas: &ThumbCanvas, dir: &Path, platform: &str) -> ThumbResult<PathBuf> {
    let png = encode_png(canvas)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory '{}'", dir.display()))?;
    let path = dir.join(export_file_name(platform));
    std::fs::write(&path, png).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "saved thumbnail");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
