use super::*;

#[test]
fn without_fonts_has_empty_database() {
    let ctx = RenderContext::without_fonts();
    assert_eq!(ctx.font_face_count(), 0);
    assert!(ctx.brand_font_bytes().is_none());
}

#[test]
fn missing_font_dir_is_not_fatal() {
    let config = FontConfig {
        font_dirs: vec![PathBuf::from("/definitely/not/a/font/dir")],
        ..FontConfig::default()
    };
    let ctx = RenderContext::new(&config).unwrap();
    assert_eq!(ctx.font_face_count(), 0);
}

#[test]
fn missing_brand_font_is_config_error() {
    let config = FontConfig {
        brand_font: Some(PathBuf::from("/definitely/not/brand.ttf")),
        ..FontConfig::default()
    };
    let err = RenderContext::new(&config).unwrap_err();
    assert!(matches!(err, QuoteCardError::Config(_)), "{err}");
}

#[test]
fn font_config_deserializes_with_defaults() {
    let config: FontConfig = serde_json::from_str(r#"{"font_dirs":["fonts"]}"#).unwrap();
    assert_eq!(config.font_dirs, vec![PathBuf::from("fonts")]);
    assert!(!config.load_system_fonts);
    assert!(config.brand_font.is_none());
    assert!(FontConfig::system().load_system_fonts);
}

#[test]
fn parse_svg_accepts_text_without_fonts() {
    let ctx = RenderContext::without_fonts();
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><text x="0" y="5" font-family="Impact">x</text></svg>"#;
    let tree = ctx.parse_svg(svg).unwrap();
    assert_eq!(tree.size().width(), 10.0);
}

#[test]
fn parse_svg_rejects_malformed_markup() {
    let ctx = RenderContext::without_fonts();
    assert!(ctx.parse_svg("<svg><text>").is_err());
}

#[test]
fn only_font_extensions_are_loaded_from_dirs() {
    let dir = std::env::temp_dir().join(format!("quotecard-fontdir-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("nested.ttf")).unwrap();
    for name in ["Brand.TTF", "brand.otf", "readme.txt", "noext"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    assert!(is_font_file(&dir.join("Brand.TTF")));
    assert!(is_font_file(&dir.join("brand.otf")));
    assert!(!is_font_file(&dir.join("readme.txt")));
    assert!(!is_font_file(&dir.join("noext")));
    assert!(!is_font_file(&dir.join("nested.ttf")));

    // Files that are not real fonts are skipped with a warning.
    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, &dir);
    assert_eq!(db.len(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}
