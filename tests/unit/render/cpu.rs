use super::*;
use crate::{
    assets::fonts::FontBook,
    compose::plan::RectRole,
    foundation::core::Point,
    platform::table::SizePreset,
    text::shaper::FontRole,
};

fn text_op(origin: Point, width_px: f32, size_px: f32) -> TextOp {
    TextOp {
        text: "x".to_string(),
        role: FontRole::Title,
        size_px,
        origin,
        width_px,
        fill: Rgba8::WHITE,
        stroke: None,
        shadow: None,
    }
}

#[test]
fn gradient_t_clamps_outside_the_ramp() {
    assert_eq!(gradient_t(0.0, 288.0, 720.0), 0.0);
    assert_eq!(gradient_t(288.0, 288.0, 720.0), 0.0);
    assert_eq!(gradient_t(504.0, 288.0, 720.0), 0.5);
    assert_eq!(gradient_t(800.0, 288.0, 720.0), 1.0);
    assert_eq!(gradient_t(10.0, 50.0, 50.0), 0.0);
    assert_eq!(gradient_t(60.0, 50.0, 50.0), 1.0);
}

#[test]
fn lerp_mixes_straight_channels() {
    let a = Rgba8::new(0, 0, 0, 0);
    let b = Rgba8::new(0, 0, 0, 178);
    assert_eq!(lerp_rgba8(a, b, 0.0), a);
    assert_eq!(lerp_rgba8(a, b, 1.0), b);
    assert_eq!(lerp_rgba8(a, b, 0.5).a, 89);
}

#[test]
fn region_is_clipped_to_canvas() {
    let op = text_op(Point::new(10.0, 10.0), 100.0, 50.0);
    let r = Region::around(&op, 20.0, 200, 100).unwrap();
    assert_eq!((r.x, r.y), (0, 0));
    assert_eq!(r.w, 130);
    assert_eq!(r.h, 100);

    let off = text_op(Point::new(500.0, 500.0), 10.0, 10.0);
    assert!(Region::around(&off, 2.0, 200, 100).is_none());
}

#[test]
fn region_copy_and_over_touch_only_the_region() {
    let stride = 4;
    let buf: Vec<u8> = (0..4 * 3 * 4).map(|i| i as u8).collect();
    let region = Region { x: 1, y: 1, w: 2, h: 2 };
    let patch = region.copy_out(&buf, stride);
    assert_eq!(patch.len(), 2 * 2 * 4);
    assert_eq!(&patch[0..4], &buf[20..24]);

    let mut dst = vec![0u8; buf.len()];
    region.over(&mut dst, stride, &[255u8; 16]).unwrap();
    let touched: Vec<usize> = dst
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] == 255)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(touched, vec![5, 6, 9, 10]);
}

#[test]
fn pixmap_conversion_checks_length_and_limit() {
    let two = SizePreset::new(2, 2).unwrap();
    let err = pixmap_from_premul(&[0u8; 12], two).unwrap_err();
    assert!(err.to_string().contains("needs 16 bytes, got 12"));
    let p = pixmap_from_premul(&[255u8; 16], two).unwrap();
    assert_eq!((p.width(), p.height()), (2, 2));

    let wide = SizePreset::new(70_000, 1).unwrap();
    assert!(pixmap_from_premul(&[], wide).is_err());
}

#[test]
fn gradient_rows_ramp_downward() {
    let Some(img) = gradient_paint(
        Rect::new(0.0, 0.0, 2.0, 10.0),
        4.0,
        10.0,
        Rgba8::new(0, 0, 0, 0),
        Rgba8::new(0, 0, 0, 200),
    )
    .unwrap() else {
        panic!("non-empty rect should produce a paint");
    };
    let vello_cpu::ImageSource::Pixmap(p) = &img.image else {
        panic!("gradient should be a pixmap");
    };
    let alpha: Vec<u8> = p.data_as_u8_slice().chunks_exact(8).map(|row| row[3]).collect();
    assert_eq!(alpha.len(), 10);
    assert!(alpha[..4].iter().all(|a| *a == 0));
    assert!(alpha.windows(2).all(|w| w[0] <= w[1]));
    assert!(alpha[9] > 180);
}

#[test]
fn rect_plan_fills_canvas_and_rejects_size_mismatch() {
    let Ok(book) = FontBook::from_system() else {
        eprintln!("skipping: no system fonts available");
        return;
    };
    let mut shaper = TextShaper::new(&book).unwrap();
    let size = SizePreset::new(8, 4).unwrap();
    let plan = ThumbnailPlan {
        size,
        ops: vec![
            DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 8.0, 4.0),
                color: Rgba8::rgb(0x11, 0x22, 0x33),
                role: RectRole::Background,
            },
            DrawOp::Rect {
                rect: Rect::new(0.0, 0.0, 8.0, 4.0),
                color: Rgba8::BLACK.with_alpha(0.2),
                role: RectRole::Overlay,
            },
        ],
    };

    let mut canvas = ThumbCanvas::new(size).unwrap();
    CpuRasterizer::new()
        .rasterize(&plan, &mut canvas, &mut shaper)
        .unwrap();
    let px = canvas.pixel(3, 2).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[2] < 0x33 && px[2] > 0x22);

    let mut wrong = ThumbCanvas::new(SizePreset::new(4, 4).unwrap()).unwrap();
    assert!(
        CpuRasterizer::new()
            .rasterize(&plan, &mut wrong, &mut shaper)
            .is_err()
    );
}
