use super::*;
use crate::layout::engine::QuoteRequest;

fn compositor() -> Compositor {
    Compositor::new(
        Arc::new(RenderContext::without_fonts()),
        Arc::new(BrandConstants::default()),
    )
}

fn layout(w: u32, h: u32) -> LineLayout {
    QuoteRequest::new("not your keys not your coins")
        .unwrap()
        .with_attribution("Andreas Antonopoulos")
        .with_canvas(w, h)
        .layout(&BrandConstants::default())
}

#[test]
fn missing_background_is_an_error() {
    let err = compositor().composite(None, &layout(100, 100), None).unwrap_err();
    assert!(matches!(err, QuoteCardError::MissingBackground));
}

#[test]
fn output_matches_layout_canvas() {
    let bg = RasterBuffer::solid(Canvas::new(300, 200).unwrap(), [0, 0, 80, 255]);
    let out = compositor()
        .composite(Some(&bg), &layout(120, 150), None)
        .unwrap();
    assert_eq!(out.canvas, Canvas::new(120, 150).unwrap());
    assert_eq!((out.image.width(), out.image.height()), (120, 150));
}

#[test]
fn figure_is_placed_bottom_right() {
    let canvas = Canvas::new(1000, 1000).unwrap();
    let figure = RasterBuffer::solid(Canvas::new(50, 100).unwrap(), [255, 0, 0, 255]);
    let placed = place_figure(&figure, canvas, &BrandConstants::default()).unwrap();

    assert_eq!(placed.image.height(), 220);
    assert_eq!(placed.image.width(), 110);
    assert_eq!(placed.left, 1000 - 110 - 40);
    assert_eq!(placed.top, 1000 - 220 - 40);
    let b = placed.bounds();
    assert_eq!((b.x1, b.y1), (960.0, 960.0));
}

#[test]
fn oversized_figure_clamps_to_origin() {
    let canvas = Canvas::new(10, 100).unwrap();
    let figure = RasterBuffer::solid(Canvas::new(100, 10).unwrap(), [255, 0, 0, 255]);
    let placed = place_figure(&figure, canvas, &BrandConstants::default()).unwrap();
    assert_eq!(placed.left, 0);
    assert!(placed.top >= 0);
}

#[test]
fn very_wide_figure_is_capped_to_canvas_width() {
    let canvas = Canvas::new(1080, 1080).unwrap();
    let figure = RasterBuffer::solid(Canvas::new(4000, 1).unwrap(), [255, 0, 0, 255]);
    let placed = place_figure(&figure, canvas, &BrandConstants::default()).unwrap();

    assert_eq!(placed.image.width(), 1080);
    assert_eq!(placed.image.height(), 1);
    assert_eq!(placed.left, 0);
    assert_eq!(placed.top, 1080 - 1 - 43);
}

#[test]
fn figure_pixels_land_in_the_corner() {
    let bg = RasterBuffer::solid(Canvas::new(200, 200).unwrap(), [0, 0, 0, 255]);
    let figure = RasterBuffer::solid(Canvas::new(10, 10).unwrap(), [255, 0, 0, 255]);
    let out = compositor()
        .composite(Some(&bg), &layout(200, 200), Some(&figure))
        .unwrap();
    // 44px square ending 8px from the bottom-right corner.
    let [r, g, b, a] = out.image.pixel(170, 170).unwrap();
    assert!(r >= 250 && g <= 5 && b <= 5 && a == 255, "got {r},{g},{b},{a}");
    assert_eq!(out.image.pixel(195, 195), Some([0, 0, 0, 255]));
}

#[test]
fn unplaceable_figure_is_skipped() {
    let bg = RasterBuffer::solid(Canvas::new(64, 64).unwrap(), [0, 40, 0, 255]);
    let empty = RasterBuffer::transparent(Canvas {
        width: 0,
        height: 0,
    });
    let c = compositor();
    let l = layout(64, 64);
    let with = c.composite(Some(&bg), &l, Some(&empty)).unwrap();
    let without = c.composite(Some(&bg), &l, None).unwrap();
    assert_eq!(with, without);
}

#[test]
fn composite_is_deterministic() {
    let bg = RasterBuffer::solid(Canvas::new(90, 60).unwrap(), [30, 60, 90, 255]);
    let c = compositor();
    let l = layout(80, 80);
    let a = c.composite(Some(&bg), &l, None).unwrap().to_png().unwrap();
    let b = c.composite(Some(&bg), &l, None).unwrap().to_png().unwrap();
    assert_eq!(a, b);
}

const FONT_CANDIDATES: &[&str] = &[
    "assets/fonts/brand.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

fn font_backed_context() -> Option<RenderContext> {
    let path = FONT_CANDIDATES
        .iter()
        .map(std::path::PathBuf::from)
        .find(|p| p.is_file())?;
    let config = crate::render::context::FontConfig {
        brand_font: Some(path),
        ..Default::default()
    };
    RenderContext::new(&config).ok()
}

#[test]
fn text_layer_reaches_the_pixels_if_font_present() {
    let Some(ctx) = font_backed_context() else {
        return;
    };
    let c = Compositor::new(Arc::new(ctx), Arc::new(BrandConstants::default()));
    let bg_px = [0, 0, 0, 255];
    let bg = RasterBuffer::solid(Canvas::new(400, 400).unwrap(), bg_px);
    let l = layout(400, 400);
    let out = c.composite(Some(&bg), &l, None).unwrap();

    let top = (l.block_start_y - l.quote_font_size).max(0.0) as u32;
    let bottom = (l.line_baseline(l.lines.len() - 1).ceil() as u32).min(399);
    let changed = (top..=bottom)
        .flat_map(|y| (0..400).map(move |x| (x, y)))
        .filter(|&(x, y)| out.image.pixel(x, y) != Some(bg_px))
        .count();
    assert!(changed > 50, "only {changed} text pixels in the quote band");

    assert_eq!(out.image.pixel(399, 399), Some(bg_px));
    assert_eq!(out.image.pixel(390, 5), Some(bg_px));
}
