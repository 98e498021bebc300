//! Gaussian blur approximation for shadow layers.
//!
//! Three successive box blurs per axis, sized so their combined variance
//! matches the requested sigma. Pixels outside the buffer count as
//! transparent, so callers pad the layer by the blur extent.

/// Sigma for a blur radius, using the same conversion as Android's
/// `BlurMaskFilter`.
pub fn sigma_for_radius(radius: f32) -> f32 {
    if radius > 0.0 {
        radius * 0.57735 + 0.5
    } else {
        0.0
    }
}

/// Widths of three box filters approximating a gaussian of `sigma`.
pub fn box_sizes(sigma: f32) -> [usize; 3] {
    const PASSES: f32 = 3.0;
    let w_ideal = (12.0 * sigma * sigma / PASSES + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal = (12.0 * sigma * sigma - PASSES * wlf * wlf - 4.0 * PASSES * wlf - 3.0 * PASSES)
        / (-4.0 * wlf - 4.0);
    let m = m_ideal.round() as i64;
    let mut sizes = [0usize; 3];
    for (i, size) in sizes.iter_mut().enumerate() {
        *size = if (i as i64) < m { wl as usize } else { wu as usize };
    }
    sizes
}

/// Blur premultiplied RGBA8 pixels in place.
pub fn blur_rgba(data: &mut [u8], width: usize, height: usize, sigma: f32) {
    if !(sigma > 0.0) || width == 0 || height == 0 || data.len() < width * height * 4 {
        return;
    }
    let mut scratch = vec![0u8; width * height * 4];
    for size in box_sizes(sigma) {
        let radius = size / 2;
        if radius == 0 {
            continue;
        }
        box_pass(data, &mut scratch, width, height, radius, Axis::Horizontal);
        box_pass(&scratch, data, width, height, radius, Axis::Vertical);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn box_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize, axis: Axis) {
    let (lines, len) = match axis {
        Axis::Horizontal => (height, width),
        Axis::Vertical => (width, height),
    };
    let index = |line: usize, i: usize| match axis {
        Axis::Horizontal => (line * width + i) * 4,
        Axis::Vertical => (i * width + line) * 4,
    };
    let window = (2 * radius + 1) as u32;
    let half = window / 2;

    for line in 0..lines {
        let mut sum = [0u32; 4];
        for i in 0..radius.min(len) {
            let p = index(line, i);
            for c in 0..4 {
                sum[c] += src[p + c] as u32;
            }
        }
        for i in 0..len {
            let enter = i + radius;
            if enter < len {
                let p = index(line, enter);
                for c in 0..4 {
                    sum[c] += src[p + c] as u32;
                }
            }
            let out = index(line, i);
            for c in 0..4 {
                dst[out + c] = ((sum[c] + half) / window).min(255) as u8;
            }
            if i >= radius {
                let p = index(line, i - radius);
                for c in 0..4 {
                    sum[c] -= src[p + c] as u32;
                }
            }
        }
    }
}
