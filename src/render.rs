use rayon::prelude::*;

use crate::canvas::{Canvas, blend};
use crate::error::{Error, Result};
use crate::scoring::ScoreSet;
use crate::waves::{WaveLayer, X_MAX};

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
const GRID_LINE: [u8; 4] = [38, 38, 44, 255];
const SIGNATURE_ALPHA: f32 = 0.85;
const STROKE_HALF_WIDTH: f32 = 1.0;

// Score bar palette
const SCORE_LOW: [u8; 4] = [200, 60, 50, 255];
const SCORE_MID: [u8; 4] = [230, 200, 60, 255];
const SCORE_HIGH: [u8; 4] = [70, 190, 90, 255];
const PHASE_LOCK: [u8; 4] = [225, 225, 235, 255];
const BAR_TRACK: [u8; 4] = [30, 30, 30, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// `#rrggbb` to opaque RGBA.
pub fn parse_hex(hex: &str) -> Result<[u8; 4]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}

/// Vertical extent of all curves, padded 5% each side.
pub fn y_bounds(layers: &[WaveLayer]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for l in layers {
        for &v in l.y.iter().chain(l.signature.iter().flatten()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}

/// One polyline resampled to pixel columns: for column `x`, the pixel rows
/// covered by the segment to column `x + 1`.
struct Stroke {
    color: [u8; 4],
    alpha: f32,
    spans: Vec<(f32, f32)>,
}

fn sample_at(ys: &[f64], x: f64) -> f64 {
    let n = ys.len();
    if n == 1 {
        return ys[0];
    }
    let f = (x / X_MAX).clamp(0.0, 1.0) * (n - 1) as f64;
    let i0 = (f.floor() as usize).min(n - 2);
    let frac = f - i0 as f64;
    ys[i0] + (ys[i0 + 1] - ys[i0]) * frac
}

fn build_stroke(ys: &[f64], color: [u8; 4], alpha: f32, w: usize, h: usize, bounds: (f64, f64)) -> Stroke {
    let (lo, hi) = bounds;
    let to_row = |y: f64| ((hi - y) / (hi - lo) * (h - 1) as f64) as f32;
    let cols = w.max(2);
    let rows: Vec<f32> = (0..cols)
        .map(|px| to_row(sample_at(ys, px as f64 / (cols - 1) as f64 * X_MAX)))
        .collect();
    let spans = (0..w)
        .map(|px| {
            let a = rows[px];
            let b = rows[(px + 1).min(cols - 1)];
            (a.min(b) - STROKE_HALF_WIDTH, a.max(b) + STROKE_HALF_WIDTH)
        })
        .collect();
    Stroke { color, alpha, spans }
}

/// Render wave layers (and any signature overlays) as line plots on black.
pub fn render_waves(layers: &[WaveLayer], signature_color: &str, w: usize, h: usize) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(w, h, BACKGROUND);
    if layers.is_empty() || w == 0 || h == 0 {
        return Ok(canvas.into_rgba());
    }
    let bounds = y_bounds(layers);
    let sig_color = parse_hex(signature_color)?;

    let mut strokes = Vec::with_capacity(layers.len() * 2);
    for layer in layers {
        let color = parse_hex(layer.color)?;
        strokes.push(build_stroke(&layer.y, color, layer.opacity as f32, w, h, bounds));
        if let Some(sig) = &layer.signature {
            strokes.push(build_stroke(sig, sig_color, SIGNATURE_ALPHA, w, h, bounds));
        }
    }

    let grid_every_x = (w / 10).max(1);
    let grid_every_y = (h / 8).max(1);
    let row_bytes = canvas.row_bytes();

    canvas
        .data
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = y as f32;
            for x in 0..w {
                let px = &mut row[x * 4..x * 4 + 4];
                if x % grid_every_x == 0 || y % grid_every_y == 0 {
                    px.copy_from_slice(&GRID_LINE);
                }
                for s in &strokes {
                    let (top, bottom) = s.spans[x];
                    if fy >= top && fy <= bottom {
                        blend(px, s.color, s.alpha);
                    }
                }
            }
        });

    Ok(canvas.into_rgba())
}

fn score_color(value: f64) -> [u8; 4] {
    let t = (value / 100.0) as f32;
    if t < 0.5 {
        lerp_color(SCORE_LOW, SCORE_MID, t / 0.5)
    } else {
        lerp_color(SCORE_MID, SCORE_HIGH, (t - 0.5) / 0.5)
    }
}

/// Horizontal bar per score, phase lock last. Bar length is value / 100.
pub fn render_scores(scores: &ScoreSet, w: usize, h: usize) -> Vec<u8> {
    let mut canvas = Canvas::new(w, h, BACKGROUND);
    let bars: Vec<(f64, [u8; 4])> = scores
        .scores
        .iter()
        .map(|s| (s.value, score_color(s.value)))
        .chain(std::iter::once((scores.phase_lock, PHASE_LOCK)))
        .collect();
    if w == 0 || h == 0 {
        return canvas.into_rgba();
    }

    let band = (h / bars.len()).max(1);
    let gap = (band / 5).max(1);
    let margin = (w / 40).max(1);
    let track = w.saturating_sub(2 * margin);
    let row_bytes = canvas.row_bytes();

    canvas
        .data
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let slot = y / band;
            let within = y % band;
            if slot >= bars.len() || within < gap || within >= band - gap {
                return;
            }
            let (value, color) = bars[slot];
            let filled = ((value.clamp(0.0, 100.0) / 100.0) * track as f64).round() as usize;
            for x in margin..margin + track {
                let c = if x - margin < filled { color } else { BAR_TRACK };
                row[x * 4..x * 4 + 4].copy_from_slice(&c);
            }
        });

    canvas.into_rgba()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Params, Variant};
    use crate::profiles;
    use crate::scoring::{Score, ScoreKind};
    use crate::waves::waves;

    #[test]
    fn parse_hex_accepts_profile_colors() {
        assert_eq!(parse_hex("#66c2a5").unwrap(), [0x66, 0xc2, 0xa5, 255]);
        assert_eq!(parse_hex("ffffff").unwrap(), [255, 255, 255, 255]);
        assert!(matches!(parse_hex("#12345"), Err(Error::InvalidColor(_))));
        assert!(parse_hex("#zzzzzz").is_err());
        for d in &profiles::DISEASES {
            parse_hex(d.color).unwrap();
        }
    }

    #[test]
    fn waves_leave_ink_on_canvas() {
        let layers = waves(&Params::default(), profiles::default_disease(), Variant::Disease, 0.0);
        let rgba = render_waves(&layers, profiles::default_disease().color, 200, 120).unwrap();
        assert_eq!(rgba.len(), 200 * 120 * 4);
        let inked = rgba
            .chunks_exact(4)
            .filter(|px| px[..3] != BACKGROUND[..3] && px[..3] != GRID_LINE[..3])
            .count();
        assert!(inked > 200, "only {inked} stroke pixels");
    }

    #[test]
    fn bounds_cover_every_sample() {
        let layers = waves(&Params::default(), profiles::default_disease(), Variant::Molecular, 0.0);
        let (lo, hi) = y_bounds(&layers);
        for l in &layers {
            assert!(l.y.iter().all(|&v| v > lo && v < hi));
        }
        assert_eq!(y_bounds(&[]), (-1.0, 1.0));
    }

    #[test]
    fn full_score_fills_the_track() {
        let scores = ScoreSet {
            scores: vec![Score { kind: ScoreKind::Selectivity, value: 100.0 }],
            phase_lock: 0.0,
        };
        let (w, h) = (100, 40);
        let rgba = render_scores(&scores, w, h);
        // Middle of the first band, right end of the track.
        let y = 10;
        let x = w - w / 40 - 1;
        let i = (y * w + x) * 4;
        assert_eq!(&rgba[i..i + 4], &SCORE_HIGH);
        // Phase lock 0: second band is all track.
        let i = (30 * w + x) * 4;
        assert_eq!(&rgba[i..i + 4], &BAR_TRACK);
    }
}
