use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 10, 10, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn wait_yields_decoded_bitmap() {
    let loader = BackgroundLoader::spawn_bytes(png_bytes(8, 6));
    let bmp = loader.wait().unwrap();
    assert_eq!((bmp.width, bmp.height), (8, 6));
}

#[test]
fn invalid_bytes_fail_silently() {
    let loader = BackgroundLoader::spawn_bytes(b"nope".to_vec());
    assert!(loader.wait().is_none());
}

#[test]
fn missing_file_fails_silently() {
    let loader = BackgroundLoader::spawn("target/thumbforge-missing/none.png");
    assert!(loader.wait().is_none());
}

#[test]
fn poll_settles_on_ready() {
    let mut loader = BackgroundLoader::spawn_bytes(png_bytes(2, 2));
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    let state = loop {
        match loader.poll() {
            LoadState::Pending if std::time::Instant::now() < deadline => {
                std::thread::sleep(std::time::Duration::from_millis(5));
            }
            other => break other,
        }
    };
    assert!(matches!(state, LoadState::Ready(_)));
    // Settled state is sticky.
    assert!(loader.poll().bitmap().is_some());
}
