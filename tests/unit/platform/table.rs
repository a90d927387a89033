use super::*;

#[test]
fn builtin_sizes_are_exact() {
    let t = PlatformTable::builtin();
    assert_eq!(t.size_for("youtube").unwrap(), SizePreset { width: 1280, height: 720 });
    assert_eq!(
        t.size_for("instagram").unwrap(),
        SizePreset { width: 1080, height: 1080 }
    );
    assert_eq!(t.size_for("tiktok").unwrap(), SizePreset { width: 1024, height: 1024 });
    assert_eq!(t.len(), 3);
}

#[test]
fn builtin_title_scales_follow_platform() {
    let t = PlatformTable::builtin();
    assert_eq!(t.resolve("youtube").unwrap().title_scale, 0.18);
    assert_eq!(t.resolve("instagram").unwrap().title_scale, 0.14);
    assert_eq!(t.resolve("tiktok").unwrap().title_scale, 0.15);
}

#[test]
fn unknown_platform_is_an_error_not_a_default() {
    let t = PlatformTable::builtin();
    let err = t.resolve("myspace").unwrap_err();
    assert!(matches!(err, ThumbError::UnknownPlatform(ref id) if id == "myspace"));
    assert!(PlatformTable::empty().resolve("youtube").is_err());
}

#[test]
fn lookup_ignores_ascii_case_and_padding() {
    let t = PlatformTable::builtin();
    assert_eq!(t.resolve(" YouTube ").unwrap().id, "youtube");
}

#[test]
fn table_extends_by_entry() {
    let mut t = PlatformTable::builtin();
    let spec = PlatformSpec::new("Twitter", SizePreset::new(1600, 900).unwrap(), 0.16).unwrap();
    t.insert(spec);
    assert_eq!(t.size_for("twitter").unwrap(), SizePreset { width: 1600, height: 900 });
    let ids: Vec<&str> = t.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["instagram", "tiktok", "twitter", "youtube"]);
}

#[test]
fn rejects_degenerate_entries() {
    assert!(SizePreset::new(0, 10).is_err());
    assert!(SizePreset::new(10, 0).is_err());
    let size = SizePreset::new(10, 10).unwrap();
    assert!(PlatformSpec::new("", size, 0.2).is_err());
    assert!(PlatformSpec::new("x", size, 0.0).is_err());
    assert!(PlatformSpec::new("x", size, 1.5).is_err());
    assert!(PlatformSpec::new("x", size, f64::NAN).is_err());
}

#[test]
fn size_display_uses_times_sign() {
    assert_eq!(SizePreset { width: 1280, height: 720 }.to_string(), "1280 × 720");
}
