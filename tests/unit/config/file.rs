use serde_json::json;

use super::*;

fn parse(v: serde_json::Value) -> ThumbResult<ThumbConfig> {
    ThumbConfig::from_json_str(&v.to_string())
}

#[test]
fn empty_object_uses_builtin_defaults() {
    let cfg = parse(json!({})).unwrap();
    assert_eq!(cfg, ThumbConfig::default());
    assert_eq!(cfg.default_platform(), "youtube");
    assert_eq!(cfg.default_style(), Style::Clean);
    assert_eq!(cfg.default_background(), Rgba8::rgb(0x11, 0x11, 0x11));
    assert_eq!(cfg.platform_table().len(), 3);
}

#[test]
fn custom_platform_extends_and_overrides_table() {
    let cfg = parse(json!({
        "platforms": {
            "Twitter": { "width": 1600, "height": 900, "title_scale": 0.16 },
            "youtube": { "width": 1920, "height": 1080 }
        },
        "defaults": { "platform": "twitter", "style": "dramatic", "background_color": "#204060" }
    }))
    .unwrap();

    let table = cfg.platform_table();
    assert_eq!(table.len(), 4);
    let tw = table.resolve("twitter").unwrap();
    assert_eq!((tw.size.width, tw.size.height, tw.title_scale), (1600, 900, 0.16));
    let yt = table.resolve("youtube").unwrap();
    assert_eq!((yt.size.width, yt.size.height), (1920, 1080));
    assert_eq!(yt.title_scale, DEFAULT_TITLE_SCALE);

    assert_eq!(cfg.default_style(), Style::Dramatic);
    assert_eq!(cfg.default_background(), Rgba8::rgb(0x20, 0x40, 0x60));
}

#[test]
fn invalid_entries_are_rejected() {
    let zero = parse(json!({ "platforms": { "x": { "width": 0, "height": 10 } } }));
    assert!(matches!(zero, Err(ThumbError::Validation(_))));

    let scale = parse(json!({ "platforms": { "x": { "width": 10, "height": 10, "title_scale": 1.5 } } }));
    assert!(matches!(scale, Err(ThumbError::Validation(_))));

    let unknown_default = parse(json!({ "defaults": { "platform": "myspace" } }));
    assert!(matches!(unknown_default, Err(ThumbError::UnknownPlatform(_))));

    let bad_color = parse(json!({ "defaults": { "background_color": "#12" } }));
    assert!(matches!(bad_color, Err(ThumbError::Serde(_))));

    let bad_style = parse(json!({ "defaults": { "style": "loud" } }));
    assert!(matches!(bad_style, Err(ThumbError::Serde(_))));

    let capitalized = parse(json!({ "defaults": { "style": "Bold" } })).unwrap();
    assert_eq!(capitalized.default_style(), Style::Bold);

    let typo = parse(json!({ "platfroms": {} }));
    assert!(matches!(typo, Err(ThumbError::Serde(_))));

    let orphan = parse(json!({ "fonts": { "subtitle": "a.ttf" } }));
    assert!(matches!(orphan, Err(ThumbError::Validation(_))));
}

#[test]
fn file_font_paths_resolve_against_config_dir() {
    let dir = std::env::temp_dir().join(format!("thumbforge-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("thumbforge.json");
    let abs = dir.join("abs.ttf");
    std::fs::write(
        &path,
        json!({ "fonts": { "title": "fonts/Bold.ttf", "subtitle": abs.clone() } }).to_string(),
    )
    .unwrap();

    let cfg = ThumbConfig::from_path(&path).unwrap();
    assert_eq!(cfg.fonts.title, Some(dir.join("fonts/Bold.ttf")));
    assert_eq!(cfg.fonts.subtitle, Some(abs));

    // The files do not exist, so loading the configured fonts fails loudly.
    assert!(cfg.font_book().is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_an_error() {
    let err = ThumbConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
