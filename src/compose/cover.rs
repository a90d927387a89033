use crate::platform::table::SizePreset;

/// Where a cover-fitted image lands on the canvas.
///
/// `x`/`y` are usually negative on the overflowing axis; the canvas bounds crop the excess.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale an `image_w`×`image_h` image by the larger axis ratio so it fills `canvas`, centered.
pub fn cover_fit(canvas: SizePreset, image_w: u32, image_h: u32) -> CoverPlacement {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let iw = f64::from(image_w.max(1));
    let ih = f64::from(image_h.max(1));

    let scale = (cw / iw).max(ch / ih);
    let width = iw * scale;
    let height = ih * scale;
    CoverPlacement {
        scale,
        x: (cw - width) / 2.0,
        y: (ch - height) / 2.0,
        width,
        height,
    }
}
