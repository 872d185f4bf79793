pub mod animation;
pub mod canvas;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod profiles;
pub mod render;
pub mod scoring;
pub mod waves;

use std::time::Instant;

use serde::Serialize;

use classify::Complexity;
use config::{Params, Variant};
use profiles::{DiseaseProfile, MolecularCandidate};
use scoring::ScoreSet;
use waves::WaveLayer;

pub use error::{Error, Result};

/// Everything one recompute pass produces for a dashboard.
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
    pub variant: Variant,
    pub params: Params,
    pub disease: &'static DiseaseProfile,
    pub scores: ScoreSet,
    pub layers: Vec<WaveLayer>,
    pub complexity_total: f64,
    pub complexity: Complexity,
    pub candidate: &'static MolecularCandidate,
    /// Animation time the layers were sampled at.
    pub t: f64,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Recompute scores, wave layers and the complexity bucket for one input.
/// `params` are taken as already range-checked.
pub fn evaluate(params: &Params, disease: &'static DiseaseProfile, variant: Variant, t: f64) -> Evaluation {
    evaluate_timed(params, disease, variant, t).0
}

pub fn evaluate_timed(
    params: &Params,
    disease: &'static DiseaseProfile,
    variant: Variant,
    t: f64,
) -> (Evaluation, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Scores
    let s = Instant::now();
    let scores = scoring::score(params, disease, variant);
    timings.push(Timing {
        name: "score",
        ms: s.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Wave layers
    let s = Instant::now();
    let layers = waves::waves(params, disease, variant, t);
    timings.push(Timing {
        name: "waves",
        ms: s.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Complexity bucket -> candidate
    let s = Instant::now();
    let complexity_total = classify::total_complexity(params);
    let complexity = classify::bucket(complexity_total);
    let candidate = profiles::candidate(complexity);
    timings.push(Timing {
        name: "classify",
        ms: s.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    tracing::debug!(
        variant = %variant,
        disease = disease.name,
        phase_lock = scores.phase_lock,
        complexity = %complexity,
        "evaluated"
    );
    for timing in &timings {
        tracing::trace!(stage = timing.name, ms = timing.ms);
    }

    let eval = Evaluation {
        variant,
        params: params.clone(),
        disease,
        scores,
        layers,
        complexity_total,
        complexity,
        candidate,
        t,
    };
    (eval, timings)
}
