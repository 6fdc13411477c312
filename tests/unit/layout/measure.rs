use super::*;

const FONT_CANDIDATES: &[&str] = &[
    "assets/fonts/brand.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

fn local_font() -> Option<Vec<u8>> {
    FONT_CANDIDATES.iter().find_map(|p| std::fs::read(p).ok())
}

#[test]
fn rejects_bytes_without_fonts() {
    assert!(ParleyMeasure::new(b"not a font", 0.0).is_err());
}

#[test]
fn shaped_width_grows_with_text_if_font_present() {
    let Some(font) = local_font() else {
        return;
    };
    let mut m = ParleyMeasure::new(&font, 0.0).unwrap();
    assert!(!m.family_name().is_empty());

    let short = m.advance_width("hodl", 48.0);
    let long = m.advance_width("hodl hodl hodl", 48.0);
    assert!(short > 0.0);
    assert!(long > short);

    // Repeated measurement is stable.
    assert_eq!(m.advance_width("hodl", 48.0), short);

    let tight = WrapMetrics {
        chars_per_line: 100,
        max_width_px: f64::from(short) - 1.0,
        font_size: 48.0,
    };
    assert!(!m.fits("hodl", &tight));
}
