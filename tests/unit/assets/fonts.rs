use super::*;

#[test]
fn empty_font_bytes_are_rejected() {
    let err = FontFace::from_bytes(Vec::new()).unwrap_err();
    assert!(err.to_string().contains("font error:"));
}

#[test]
fn missing_font_file_is_an_error() {
    let err = FontBook::from_files(Path::new("target/thumbforge-missing/font.ttf"), None)
        .unwrap_err();
    assert!(err.to_string().contains("read font file"));
}

#[test]
fn single_shares_face_between_roles() {
    let face = FontFace::from_bytes(vec![1, 2, 3]).unwrap();
    let book = FontBook::single(face);
    assert!(Arc::ptr_eq(&book.title.bytes, &book.subtitle.bytes));
    assert_eq!(book.subtitle.index, 0);
}

#[test]
fn subtitle_defaults_to_title_file() {
    let dir = std::path::PathBuf::from("target").join("fonts_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fake.ttf");
    std::fs::write(&path, [0u8, 1, 0, 0]).unwrap();

    let book = FontBook::from_files(&path, None).unwrap();
    assert_eq!(book.title.bytes.as_slice(), book.subtitle.bytes.as_slice());
}
