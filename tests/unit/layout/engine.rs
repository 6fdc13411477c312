use super::*;

const DUTCH: &str = "decentralisatie is de beste investering die je ooit zult doen";

fn brand() -> BrandConstants {
    BrandConstants::default()
}

#[test]
fn request_rejects_blank_text() {
    assert!(QuoteRequest::new("   ").is_err());
    assert!(QuoteRequest::new("").is_err());
    assert!(QuoteRequest::new(" hi ").is_ok());
}

#[test]
fn blank_attribution_is_absent() {
    let req = QuoteRequest::new("x").unwrap().with_attribution("  ");
    assert_eq!(req.attribution, None);
}

#[test]
fn layout_is_deterministic() {
    let req = QuoteRequest::new(DUTCH)
        .unwrap()
        .with_attribution("Satoshi Nakamoto")
        .with_canvas(1080, 1350);
    let a = req.layout(&brand());
    let b = req.layout(&brand());
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn dutch_quote_wraps_on_square_canvas() {
    let req = QuoteRequest::new(DUTCH).unwrap();
    let layout = req.layout(&brand());

    assert_eq!(layout.quote_font_size, 52.0);
    assert_eq!(layout.padding, 86.0);
    assert_eq!(layout.chars_per_line, 36);
    assert!(layout.lines.len() >= 2);
    assert_eq!(
        layout.lines,
        vec!["decentralisatie is de beste", "investering die je ooit zult doen"]
    );
    for line in &layout.lines {
        assert!(line.chars().count() <= layout.chars_per_line);
    }
    assert!(layout.attribution.is_none());
    assert_eq!(layout.lines.join(" "), DUTCH);
}

#[test]
fn block_is_vertically_centered() {
    let long = DUTCH.repeat(4);
    for (w, h) in [(1080, 1080), (1280, 720), (1080, 1920), (320, 200)] {
        for text in ["one", DUTCH, long.as_str()] {
            let layout = QuoteRequest::new(text)
                .unwrap()
                .with_canvas(w, h)
                .layout(&brand());
            assert!(!layout.lines.is_empty());
            let center =
                layout.block_start_y - layout.quote_font_size + layout.total_text_height() / 2.0;
            assert!((center - f64::from(h) / 2.0).abs() <= layout.line_height / 2.0);
        }
    }
}

#[test]
fn sizes_scale_with_width_not_height() {
    let wide = QuoteRequest::new(DUTCH)
        .unwrap()
        .with_canvas(1280, 720)
        .layout(&brand());
    let tall = QuoteRequest::new(DUTCH)
        .unwrap()
        .with_canvas(1280, 1600)
        .layout(&brand());

    assert_eq!(wide.quote_font_size, (1280.0f64 * 0.048).round());
    assert_eq!(wide.attr_font_size, (1280.0f64 * 0.022).round());
    assert_eq!(wide.quote_mark.size, (1280.0f64 * 0.18).round());
    assert_eq!(wide.padding, (1280.0f64 * 0.08).round());

    assert_eq!(wide.quote_font_size, tall.quote_font_size);
    assert_eq!(wide.padding, tall.padding);
    assert_eq!(wide.lines, tall.lines);
    assert!((tall.block_start_y - wide.block_start_y - 440.0).abs() < 1e-9);

    let expected = (720.0 - wide.total_text_height()) / 2.0 + wide.quote_font_size;
    assert_eq!(wide.block_start_y, expected);
}

#[test]
fn attribution_is_uppercased_with_em_dash() {
    let layout = QuoteRequest::new("Bitcoin is a peer-to-peer electronic cash system")
        .unwrap()
        .with_attribution("Satoshi Nakamoto")
        .layout(&brand());
    let attr = layout.attribution.as_ref().unwrap();
    assert_eq!(attr.text, "\u{2014} SATOSHI NAKAMOTO");
    let last = layout.line_baseline(layout.lines.len() - 1);
    let expected = last + layout.line_height + layout.attr_font_size * 2.5;
    assert!((attr.baseline_y - expected).abs() < 1e-9);
}

#[test]
fn decorative_elements_follow_padding() {
    let layout = QuoteRequest::new(DUTCH).unwrap().layout(&brand());
    assert_eq!(layout.quote_mark.origin.x, layout.padding * 0.7);
    assert_eq!(
        layout.quote_mark.origin.y,
        layout.block_start_y - layout.line_height * 0.3
    );
    assert_eq!(layout.wordmark.origin, Point::new(86.0, 86.0 * 0.7));
    assert_eq!(layout.wordmark.size, 14.0);
    assert_eq!(layout.wordmark.text, "cryptotakkies");
}

#[test]
fn zero_dimensions_fall_back_to_default_canvas() {
    let mut req = QuoteRequest::new(DUTCH).unwrap();
    req.canvas = Canvas {
        width: 0,
        height: 0,
    };
    let layout = req.layout(&brand());
    assert_eq!(layout.canvas, Canvas::DEFAULT);
    assert_eq!(layout, QuoteRequest::new(DUTCH).unwrap().layout(&brand()));
}

#[test]
fn tiny_canvas_still_produces_lines() {
    let layout = QuoteRequest::new(DUTCH)
        .unwrap()
        .with_canvas(8, 8)
        .layout(&brand());
    assert!(layout.chars_per_line >= 1);
    assert!(layout.lines.len() >= 2);
    assert_eq!(layout.lines.join(" "), DUTCH);
}

#[test]
fn resolution_string_sets_canvas() {
    let req = QuoteRequest::new("x").unwrap().with_resolution("1920x1080");
    assert_eq!(
        req.canvas,
        Canvas {
            width: 1920,
            height: 1080
        }
    );
}
