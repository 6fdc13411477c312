use crate::{
    foundation::{
        core::mul_div255,
        error::{QuoteCardError, QuoteCardResult},
    },
    render::raster::RasterBuffer,
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of premultiplied `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let src_a = mul_div255(u16::from(src[3]), op);
    if src_a == 0 {
        return dst;
    }
    let keep = 255 - u16::from(src_a);

    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate().take(3) {
        *channel = mul_div255(u16::from(src[i]), op)
            .saturating_add(mul_div255(u16::from(dst[i]), keep));
    }
    out[3] = src_a.saturating_add(mul_div255(u16::from(dst[3]), keep));
    out
}

fn blend_row(dst: &mut [u8], src: &[u8], opacity: f32) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
}

/// Blend an equally sized premultiplied buffer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> QuoteCardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(QuoteCardError::validation(format!(
            "overlay is {} bytes but the target is {}",
            src.len(),
            dst.len()
        )));
    }
    blend_row(dst, src, opacity);
    Ok(())
}

/// Blend `src` over `dst` with its top-left corner at `(left, top)`.
///
/// Parts of `src` outside `dst` are clipped. Returns the number of destination pixels touched.
pub fn over_at(dst: &mut RasterBuffer, src: &RasterBuffer, left: i64, top: i64, opacity: f32) -> u64 {
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    let sw = i64::from(src.width());
    let sh = i64::from(src.height());

    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = (left + sw).min(dw);
    let y1 = (top + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let dst_stride = dw as usize * 4;
    let src_stride = sw as usize * 4;
    let run = (x1 - x0) as usize * 4;
    let src_bytes = src.as_bytes();
    let dst_bytes = dst.as_bytes_mut();

    for y in y0..y1 {
        let d_start = (y as usize) * dst_stride + (x0 as usize) * 4;
        let s_start = ((y - top) as usize) * src_stride + ((x0 - left) as usize) * 4;
        blend_row(
            &mut dst_bytes[d_start..d_start + run],
            &src_bytes[s_start..s_start + run],
            opacity,
        );
    }

    ((x1 - x0) * (y1 - y0)) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
