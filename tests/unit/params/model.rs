use super::*;
use crate::platform::table::PlatformTable;

fn youtube() -> PlatformSpec {
    PlatformTable::builtin().resolve("youtube").unwrap().clone()
}

#[test]
fn style_defaults_to_clean_and_parses_names() {
    assert_eq!(Style::default(), Style::Clean);
    assert_eq!("bold".parse::<Style>().unwrap(), Style::Bold);
    assert_eq!(" Dramatic ".parse::<Style>().unwrap(), Style::Dramatic);
    assert!("neon".parse::<Style>().is_err());
    assert_eq!(Style::Dramatic.to_string(), "dramatic");
}

#[test]
fn style_serde_writes_lowercase_and_reads_any_case() {
    for (json, style) in [
        ("\"bold\"", Style::Bold),
        ("\"Bold\"", Style::Bold),
        ("\"DRAMATIC\"", Style::Dramatic),
        ("\" clean \"", Style::Clean),
    ] {
        let parsed: Style = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, style, "{json}");
        assert_eq!(json.trim_matches('"').parse::<Style>().unwrap(), style);
    }
    assert_eq!(serde_json::to_string(&Style::Clean).unwrap(), "\"clean\"");

    let err = serde_json::from_str::<Style>("\"loud\"").unwrap_err();
    assert!(err.to_string().contains("unknown style 'loud'"));
}

#[test]
fn selecting_bold_after_clean_leaves_one_active() {
    let mut sel = StyleSelection::default();
    assert_eq!(sel.active_styles().collect::<Vec<_>>(), vec![Style::Clean]);

    sel.select(Style::Bold);
    let active: Vec<Style> = sel.active_styles().collect();
    assert_eq!(active, vec![Style::Bold]);
    assert!(!sel.is_active(Style::Clean));

    let params = RenderParams::new(youtube()).with_style(sel.current());
    assert_eq!(params.style, Style::Bold);
}

#[test]
fn blank_title_falls_back_to_placeholder() {
    let p = RenderParams::new(youtube()).with_title("   ");
    assert_eq!(p.display_title(), PLACEHOLDER_TITLE);

    let p = p.with_title("  Rust in 100 seconds ");
    assert_eq!(p.display_title(), "Rust in 100 seconds");
}

#[test]
fn blank_subtitle_is_omitted() {
    let p = RenderParams::new(youtube());
    assert_eq!(p.display_subtitle(), None);
    let p = p.with_subtitle(" part 2 ");
    assert_eq!(p.display_subtitle(), Some("part 2"));
}

#[test]
fn new_params_use_platform_size_and_defaults() {
    let p = RenderParams::new(youtube());
    assert_eq!(p.size(), SizePreset { width: 1280, height: 720 });
    assert_eq!(p.background_color, DEFAULT_BACKGROUND);
    assert!(p.background_image.is_none());
    assert_eq!(p.style, Style::Clean);
    p.validate().unwrap();
}
