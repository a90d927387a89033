use crate::foundation::error::{ThumbError, ThumbResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over: `src + dst * (1 - src.a)` on every channel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        u8::MAX => src,
        sa => {
            let keep = u16::from(u8::MAX - sa);
            std::array::from_fn(|i| src[i].saturating_add(mul_div255(u16::from(dst[i]), keep)))
        }
    }
}

/// Composite a layer over `dst`; both are premultiplied RGBA8 buffers of the same length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ThumbResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ThumbError::render(format!(
            "cannot composite {} layer bytes onto {} canvas bytes",
            src.len(),
            dst.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let px = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&px);
    }
    Ok(())
}

/// Replace the color of every pixel in a premultiplied layer, keeping its coverage.
///
/// Turns a rendered glyph silhouette into a shadow mask of `color`.
pub fn tint_coverage_in_place(layer: &mut [u8], color: PremulRgba8) {
    for px in layer.chunks_exact_mut(4) {
        let cov = u16::from(px[3]);
        for (channel, c) in px.iter_mut().zip(color) {
            *channel = mul_div255(u16::from(c), cov);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
