use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ThumbError::font("x")
            .to_string()
            .contains("font error:")
    );
    assert!(
        ThumbError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ThumbError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unknown_platform_names_the_identifier() {
    let err = ThumbError::unknown_platform("myspace");
    assert_eq!(err.to_string(), "unknown platform 'myspace'");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
