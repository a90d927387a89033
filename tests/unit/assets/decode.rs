use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, [100, 50, 200, 128]);

    let bmp = decode_image(&buf).unwrap();
    assert_eq!(bmp.width, 1);
    assert_eq!(bmp.height, 1);
    assert_eq!(
        bmp.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_downscales_sides_past_the_raster_limit() {
    let buf = png_bytes(70_000, 1, [0, 0, 255, 255]);

    let bmp = decode_image(&buf).unwrap();
    assert_eq!((bmp.width, bmp.height), (MAX_IMAGE_SIDE, 1));
    assert_eq!(bmp.rgba8_premul.len(), MAX_IMAGE_SIDE as usize * 4);
    let px = &bmp.rgba8_premul[..4];
    assert_eq!(&px[..2], &[0, 0]);
    assert!(px[2] >= 254 && px[3] >= 254, "{px:?}");
    assert!(decode_background(&buf).is_some());
}

#[test]
fn decode_rejects_non_images() {
    assert!(decode_image(b"definitely not a png").is_err());
    assert!(decode_background(b"definitely not a png").is_none());
}

#[test]
fn load_background_swallows_missing_file() {
    let path = std::path::Path::new("target/thumbforge-does-not-exist/bg.png");
    assert!(load_background(path).is_none());
}

#[test]
fn load_background_reads_file() {
    let dir = std::path::PathBuf::from("target").join("decode_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bg.png");
    std::fs::write(&path, png_bytes(4, 3, [0, 0, 255, 255])).unwrap();

    let bmp = load_background(&path).unwrap();
    assert_eq!((bmp.width, bmp.height), (4, 3));
    assert_eq!(&bmp.rgba8_premul[..4], &[0, 0, 255, 255]);
}
