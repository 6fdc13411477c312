use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn solid_premultiplies_colour() {
    let buf = RasterBuffer::solid(canvas(2, 1), [255, 0, 0, 128]);
    assert_eq!(buf.pixel(0, 0), Some([128, 0, 0, 128]));
    assert_eq!(buf.pixel(1, 0), Some([128, 0, 0, 128]));
    assert_eq!(buf.pixel(2, 0), None);
}

#[test]
fn from_premul_rejects_wrong_length() {
    assert!(RasterBuffer::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterBuffer::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn premultiply_zeroes_transparent_colour() {
    let mut px = vec![200, 100, 50, 0, 255, 255, 255, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 255, 255, 255]);
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    let mut px = vec![128, 64, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 255).abs() <= 1);
    assert!((i32::from(px[1]) - 128).abs() <= 1);
}

#[test]
fn png_encode_then_decode_keeps_pixels() {
    let buf = RasterBuffer::solid(canvas(3, 2), [10, 200, 30, 255]);
    let png = buf.encode_png().unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
    let back = RasterBuffer::decode(&png).unwrap();
    assert_eq!(back, buf);
}

#[test]
fn decode_rejects_garbage() {
    assert!(RasterBuffer::decode(b"not an image").is_err());
}

#[test]
fn cover_fit_always_matches_target() {
    let src = RasterBuffer::solid(canvas(400, 100), [0, 0, 255, 255]);
    for (w, h) in [(100, 100), (1080, 1350), (50, 300), (400, 100)] {
        let out = src.cover_fit(canvas(w, h)).unwrap();
        assert_eq!((out.width(), out.height()), (w, h));
    }
}

#[test]
fn cover_fit_crops_centre_of_wide_source() {
    // Left third red, middle third green, right third blue.
    let mut img = image::RgbaImage::new(300, 100);
    for (x, _, px) in img.enumerate_pixels_mut() {
        *px = match x {
            0..100 => image::Rgba([255, 0, 0, 255]),
            100..200 => image::Rgba([0, 255, 0, 255]),
            _ => image::Rgba([0, 0, 255, 255]),
        };
    }
    let src = RasterBuffer::from_straight(img);
    let out = src.cover_fit(canvas(100, 100)).unwrap();
    let [r, g, b, a] = out.pixel(50, 50).unwrap();
    assert_eq!(a, 255);
    assert!(g > 200 && r < 30 && b < 30, "got {r},{g},{b}");
}

#[test]
fn cover_fit_rejects_empty_source() {
    let src = RasterBuffer::transparent(Canvas {
        width: 0,
        height: 0,
    });
    assert!(src.cover_fit(canvas(10, 10)).is_err());
}

#[test]
fn resize_to_height_keeps_aspect_ratio() {
    let src = RasterBuffer::solid(canvas(200, 400), [255, 255, 255, 255]);
    let out = src.resize_to_height(100, 1000).unwrap();
    assert_eq!((out.width(), out.height()), (50, 100));
    assert!(src.resize_to_height(0, 1000).is_err());
}

#[test]
fn resize_output_stays_valid_premultiplied() {
    let mut img = image::RgbaImage::new(8, 8);
    for (x, _, px) in img.enumerate_pixels_mut() {
        *px = if x % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        };
    }
    let out = RasterBuffer::from_straight(img).resize_to_height(5, 100).unwrap();
    for px in out.as_bytes().chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}

#[test]
fn cover_fit_of_extreme_aspect_ratios_stays_small() {
    let tall = RasterBuffer::solid(canvas(1, 4000), [0, 128, 0, 255]);
    let out = tall.cover_fit(canvas(1080, 1080)).unwrap();
    assert_eq!((out.width(), out.height()), (1080, 1080));
    assert_eq!(out.pixel(540, 540), Some([0, 128, 0, 255]));

    let flat = RasterBuffer::solid(canvas(4000, 1), [0, 0, 128, 255]);
    let out = flat.cover_fit(canvas(1080, 1350)).unwrap();
    assert_eq!((out.width(), out.height()), (1080, 1350));
}

#[test]
fn cover_fit_rejects_zero_target() {
    let src = RasterBuffer::solid(canvas(4, 4), [0, 0, 0, 255]);
    let err = src
        .cover_fit(Canvas {
            width: 0,
            height: 10,
        })
        .unwrap_err();
    assert!(matches!(err, QuoteCardError::InvalidDimensions { .. }));
}

#[test]
fn resize_to_height_caps_width() {
    let wide = RasterBuffer::solid(canvas(4000, 1), [255, 255, 255, 255]);
    let out = wide.resize_to_height(238, 1080).unwrap();
    assert_eq!((out.width(), out.height()), (1080, 1));

    let banner = RasterBuffer::solid(canvas(400, 100), [255, 255, 255, 255]);
    let out = banner.resize_to_height(100, 200).unwrap();
    assert_eq!((out.width(), out.height()), (200, 50));
}
