use std::f64::consts::{PI, TAU};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{Params, Variant};
use crate::profiles::DiseaseProfile;

pub const SAMPLES: usize = 1000;
pub const X_MAX: f64 = 10.0;

pub const PALETTE: [&str; 7] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WaveLayer {
    pub index: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: &'static str,
    pub opacity: f64,
    /// Disease signature overlay, same x as the layer. Drawn in the profile color.
    pub signature: Option<Vec<f64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveKind {
    Resonance,
    Delivery,
}

/// Per-variant layout of the wave stack.
#[derive(Clone, Copy, Debug)]
pub struct WaveShape {
    pub kind: WaveKind,
    pub layers: usize,
    /// Vertical gap between consecutive layers.
    pub offset: f64,
    pub signature_layers: &'static [usize],
}

pub fn shape(variant: Variant) -> WaveShape {
    match variant {
        Variant::Sbcl => WaveShape {
            kind: WaveKind::Delivery,
            layers: 7,
            offset: 1.5,
            signature_layers: &[],
        },
        Variant::Disease => WaveShape {
            kind: WaveKind::Resonance,
            layers: 7,
            offset: 2.0,
            signature_layers: &[1, 4],
        },
        Variant::Molecular => WaveShape {
            kind: WaveKind::Resonance,
            layers: 6,
            offset: 2.5,
            signature_layers: &[0, 3],
        },
    }
}

/// `n` evenly spaced points from `start` to `end` inclusive; the last
/// point is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Stateless closed-form curves over x in [0, 10]; the only time input is
/// the `t` the caller passes in.
pub fn waves(params: &Params, profile: &DiseaseProfile, variant: Variant, t: f64) -> Vec<WaveLayer> {
    let shape = shape(variant);
    let x = linspace(0.0, X_MAX, SAMPLES);
    let phases = linspace(0.0, TAU, shape.layers);

    (0..shape.layers)
        .into_par_iter()
        .map(|i| match shape.kind {
            WaveKind::Resonance => resonance_layer(i, &x, params, profile, &shape, t),
            WaveKind::Delivery => delivery_layer(i, &x, phases[i], params, &shape, t),
        })
        .collect()
}

fn resonance_layer(
    i: usize,
    x: &[f64],
    p: &Params,
    profile: &DiseaseProfile,
    shape: &WaveShape,
    t: f64,
) -> WaveLayer {
    let fi = i as f64;
    let amp = profile.amplitude * (0.6 + 0.1 * p.stability) * (1.0 - 0.06 * fi);
    let freq = profile.frequency * (1.0 + 0.12 * fi) * (1.0 + 0.05 * p.structural);
    let phase = profile.phase + fi * PI / shape.layers as f64 + p.charge * 0.5 + p.membrane * 0.2;
    let chaos_amp = profile.chaos * (0.2 + 0.3 * p.entropy);
    let therapeutic_amp = p.selectivity * 0.5;
    let base = fi * shape.offset;

    let y = x
        .iter()
        .map(|&x| {
            let primary = amp * (freq * x + phase + t).sin();
            let chaos = chaos_amp * (3.7 * freq * x + 1.3 * t + fi).sin();
            let therapeutic = therapeutic_amp * (0.5 * freq * x - phase + 0.7 * t).sin();
            primary + chaos + therapeutic + base
        })
        .collect();

    let signature = shape
        .signature_layers
        .contains(&i)
        .then(|| disease_signature(x, profile, base, t));

    WaveLayer {
        index: i,
        x: x.to_vec(),
        y,
        color: PALETTE[i % PALETTE.len()],
        opacity: (0.9 - 0.08 * fi).max(0.3),
        signature,
    }
}

/// The disease's own waveform, independent of the parameters.
fn disease_signature(x: &[f64], profile: &DiseaseProfile, base: f64, t: f64) -> Vec<f64> {
    let f = profile.frequency;
    let scale = profile.amplitude * (0.5 + 0.5 * profile.chaos);
    x.iter()
        .map(|&x| {
            let s = 0.7 * (f * x + profile.phase + t).sin() + 0.3 * (2.3 * f * x + 1.7 * t).sin();
            base + scale * s
        })
        .collect()
}

fn delivery_layer(i: usize, x: &[f64], phase: f64, p: &Params, shape: &WaveShape, t: f64) -> WaveLayer {
    let gain = (1.0 - 0.4 * p.flexibility) * (1.0 + p.delivery * 0.5);
    let shift = phase + p.recognition * 3.0 + t;
    let base = i as f64 * shape.offset;
    let y = x.iter().map(|&x| (x + shift).sin() * gain + base).collect();

    WaveLayer {
        index: i,
        x: x.to_vec(),
        y,
        color: PALETTE[i % PALETTE.len()],
        opacity: 1.0,
        signature: None,
    }
}
