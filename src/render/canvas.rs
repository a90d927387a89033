use crate::{
    foundation::core::unpremultiply_rgba8_in_place,
    foundation::error::{ThumbError, ThumbResult},
    platform::table::SizePreset,
};

/// Raster surface a thumbnail is drawn into, sized to one platform preset.
///
/// Pixels are premultiplied RGBA8, row-major. The surface is limited to `u16` per axis.
pub struct ThumbCanvas {
    size: SizePreset,
    pixmap: vello_cpu::Pixmap,
}

impl ThumbCanvas {
    /// Transparent canvas of `size`.
    pub fn new(size: SizePreset) -> ThumbResult<Self> {
        let (w, h) = surface_dims(size)?;
        Ok(Self {
            size,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    pub fn size(&self) -> SizePreset {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Resize to `size` and clear every pixel to transparent.
    pub fn reset(&mut self, size: SizePreset) -> ThumbResult<()> {
        if size != self.size {
            let (w, h) = surface_dims(size)?;
            self.pixmap = vello_cpu::Pixmap::new(w, h);
            self.size = size;
        } else {
            self.pixmap.data_as_u8_slice_mut().fill(0);
        }
        Ok(())
    }

    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_premul_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.width() as usize + x as usize) * 4;
        let px = self.data_premul().get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with premultiplication undone, as image encoders expect.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data_premul().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

impl std::fmt::Debug for ThumbCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbCanvas")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

pub(crate) fn surface_dims(size: SizePreset) -> ThumbResult<(u16, u16)> {
    if size.width == 0 || size.height == 0 {
        return Err(ThumbError::render(format!(
            "canvas must be non-empty, got {size}"
        )));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| ThumbError::render("canvas width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| ThumbError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
