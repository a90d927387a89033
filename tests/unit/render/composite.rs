use super::*;

#[test]
fn transparent_source_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src), src);
    assert_eq!(over([9, 9, 9, 9], src), src);
}

#[test]
fn half_black_over_white_is_mid_gray() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out, [127, 127, 127, 255]);
}

#[test]
fn translucent_color_adds_to_what_shows_through() {
    // 60% white (premultiplied 153) over opaque blue.
    let out = over([0, 0, 255, 255], [153, 153, 153, 153]);
    assert_eq!(out, [153, 153, 255, 255]);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    let err = over_in_place(&mut dst, &[0u8; 4]).unwrap_err();
    assert!(err.to_string().contains("4 layer bytes onto 8 canvas bytes"));

    let src = [100u8, 110, 120, 200, 0, 0, 0, 0];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn tint_keeps_coverage_and_swaps_color() {
    let mut layer = vec![255u8, 255, 255, 255, 40, 40, 40, 0, 128, 128, 128, 128];
    tint_coverage_in_place(&mut layer, [0, 0, 0, 153]);
    assert_eq!(&layer[0..4], &[0, 0, 0, 153]);
    assert_eq!(&layer[4..8], &[0, 0, 0, 0]);
    assert_eq!(layer[11], ((153u32 * 128 + 127) / 255) as u8);
}
