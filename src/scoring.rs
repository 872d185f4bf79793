use serde::Serialize;

use crate::config::{Params, Variant};
use crate::profiles::DiseaseProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Stability,
    Coupling,
    EntropyAlignment,
    Selectivity,
    FieldCoherence,
    Membrane,
    Charge,
    Structural,
}

impl ScoreKind {
    pub fn label(self) -> &'static str {
        match self {
            ScoreKind::Stability => "Stability",
            ScoreKind::Coupling => "Disease Coupling",
            ScoreKind::EntropyAlignment => "Entropy Alignment",
            ScoreKind::Selectivity => "Target Selectivity",
            ScoreKind::FieldCoherence => "Field Coherence",
            ScoreKind::Membrane => "Membrane Fit",
            ScoreKind::Charge => "Charge Fit",
            ScoreKind::Structural => "Structural Fit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Score {
    pub kind: ScoreKind,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreSet {
    pub scores: Vec<Score>,
    pub phase_lock: f64,
}

impl ScoreSet {
    pub fn get(&self, kind: ScoreKind) -> Option<f64> {
        self.scores.iter().find(|s| s.kind == kind).map(|s| s.value)
    }

    /// All values including phase lock, for range checks.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().map(|s| s.value).chain(std::iter::once(self.phase_lock))
    }
}

/// `100 - |value - target| * factor`
#[derive(Clone, Copy, Debug)]
pub struct Penalty {
    pub target: f64,
    pub factor: f64,
}

impl Penalty {
    fn apply(self, value: f64) -> f64 {
        clip(100.0 - (value - self.target).abs() * self.factor)
    }
}

/// Phase-lock weights. Sum to 1.0.
#[derive(Clone, Copy, Debug)]
pub struct PhaseWeights {
    pub membrane: f64,
    pub entropy_alignment: f64,
    pub structural: f64,
    pub charge: f64,
    pub selectivity: f64,
    pub stability: f64,
    pub coupling: f64,
    pub coherence: f64,
}

impl PhaseWeights {
    pub fn sum(&self) -> f64 {
        self.membrane
            + self.entropy_alignment
            + self.structural
            + self.charge
            + self.selectivity
            + self.stability
            + self.coupling
            + self.coherence
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResonanceWeights {
    pub stability_gain: f64,
    pub entropy_gain: f64,
    pub entropy_floor: f64,
    pub coherence_base: f64,
    pub coherence_selectivity: f64,
    pub coherence_stability: f64,
    pub membrane: Penalty,
    pub charge: Penalty,
    pub structural: Penalty,
    pub phase: PhaseWeights,
}

/// Three-slider linear model of the SBCL interface.
#[derive(Clone, Copy, Debug)]
pub struct DeliveryWeights {
    pub entropy_base: f64,
    pub entropy_recognition: f64,
    pub entropy_flexibility: f64,
    pub selectivity_base: f64,
    pub selectivity_recognition: f64,
    pub coherence_base: f64,
    pub coherence_delivery: f64,
    pub coherence_flexibility: f64,
}

#[derive(Clone, Copy, Debug)]
pub enum ScoreModel {
    Resonance(ResonanceWeights),
    Delivery(DeliveryWeights),
}

const SBCL: DeliveryWeights = DeliveryWeights {
    entropy_base: 50.0,
    entropy_recognition: 30.0,
    entropy_flexibility: 10.0,
    selectivity_base: 60.0,
    selectivity_recognition: 30.0,
    coherence_base: 70.0,
    coherence_delivery: 15.0,
    coherence_flexibility: 5.0,
};

const DISEASE: ResonanceWeights = ResonanceWeights {
    stability_gain: 20.0,
    entropy_gain: 80.0,
    entropy_floor: 20.0,
    coherence_base: 60.0,
    coherence_selectivity: 30.0,
    coherence_stability: 8.0,
    membrane: Penalty { target: 2.5, factor: 30.0 },
    charge: Penalty { target: -0.5, factor: 40.0 },
    structural: Penalty { target: 3.0, factor: 25.0 },
    phase: PhaseWeights {
        membrane: 0.15,
        entropy_alignment: 0.15,
        structural: 0.10,
        charge: 0.10,
        selectivity: 0.20,
        stability: 0.10,
        coupling: 0.10,
        coherence: 0.10,
    },
};

const MOLECULAR: ResonanceWeights = ResonanceWeights {
    stability_gain: 25.0,
    entropy_gain: 75.0,
    entropy_floor: 25.0,
    coherence_base: 55.0,
    coherence_selectivity: 35.0,
    coherence_stability: 9.0,
    membrane: Penalty { target: 2.0, factor: 35.0 },
    charge: Penalty { target: 0.0, factor: 30.0 },
    structural: Penalty { target: 3.5, factor: 20.0 },
    phase: PhaseWeights {
        membrane: 0.20,
        entropy_alignment: 0.10,
        structural: 0.15,
        charge: 0.10,
        selectivity: 0.15,
        stability: 0.10,
        coupling: 0.05,
        coherence: 0.15,
    },
};

pub fn model(variant: Variant) -> ScoreModel {
    match variant {
        Variant::Sbcl => ScoreModel::Delivery(SBCL),
        Variant::Disease => ScoreModel::Resonance(DISEASE),
        Variant::Molecular => ScoreModel::Resonance(MOLECULAR),
    }
}

#[inline]
fn clip(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// One decimal, rounded from the exact stored value. Scaling by ten first
/// would round 69.85 (stored as 69.8499..) up to 69.9.
fn round1(v: f64) -> f64 {
    format!("{v:.1}").parse().unwrap_or(v)
}

/// One function, parameterized by the per-variant constant table. Inputs
/// are assumed range-checked; every output is clipped to [0, 100].
pub fn score(params: &Params, profile: &DiseaseProfile, variant: Variant) -> ScoreSet {
    match model(variant) {
        ScoreModel::Resonance(w) => score_resonance(params, profile, &w),
        ScoreModel::Delivery(w) => score_delivery(params, &w),
    }
}

pub fn score_resonance(p: &Params, profile: &DiseaseProfile, w: &ResonanceWeights) -> ScoreSet {
    let stability = clip(p.stability * w.stability_gain);
    let coupling = clip(p.entropy * 100.0 * profile.chaos);
    let entropy_alignment = clip(p.entropy * w.entropy_gain + w.entropy_floor);
    let selectivity = clip(p.selectivity * 100.0);
    let coherence = clip(
        w.coherence_base + p.selectivity * w.coherence_selectivity + p.stability * w.coherence_stability,
    );
    let membrane = w.membrane.apply(p.membrane);
    let charge = w.charge.apply(p.charge);
    let structural = w.structural.apply(p.structural);

    let pw = &w.phase;
    let weighted = membrane * pw.membrane
        + entropy_alignment * pw.entropy_alignment
        + structural * pw.structural
        + charge * pw.charge
        + selectivity * pw.selectivity
        + stability * pw.stability
        + coupling * pw.coupling
        + coherence * pw.coherence;

    ScoreSet {
        scores: vec![
            Score { kind: ScoreKind::Membrane, value: membrane },
            Score { kind: ScoreKind::EntropyAlignment, value: entropy_alignment },
            Score { kind: ScoreKind::Structural, value: structural },
            Score { kind: ScoreKind::Charge, value: charge },
            Score { kind: ScoreKind::Selectivity, value: selectivity },
            Score { kind: ScoreKind::Stability, value: stability },
            Score { kind: ScoreKind::Coupling, value: coupling },
            Score { kind: ScoreKind::FieldCoherence, value: coherence },
        ],
        phase_lock: clip(weighted.round()),
    }
}

pub fn score_delivery(p: &Params, w: &DeliveryWeights) -> ScoreSet {
    let entropy = round1(
        w.entropy_base + p.recognition * w.entropy_recognition - p.flexibility * w.entropy_flexibility,
    );
    let selectivity = round1(w.selectivity_base + p.recognition * w.selectivity_recognition);
    let coherence = round1(
        w.coherence_base + p.delivery * w.coherence_delivery - p.flexibility * w.coherence_flexibility,
    );
    // Phase lock averages the unclipped values.
    let phase_lock = round1((entropy + selectivity + coherence) / 3.0);

    ScoreSet {
        scores: vec![
            Score { kind: ScoreKind::EntropyAlignment, value: clip(entropy) },
            Score { kind: ScoreKind::Selectivity, value: clip(selectivity) },
            Score { kind: ScoreKind::FieldCoherence, value: clip(coherence) },
        ],
        phase_lock: clip(phase_lock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles;

    fn glioblastoma() -> &'static DiseaseProfile {
        profiles::disease("Glioblastoma").unwrap()
    }

    #[test]
    fn phase_weights_sum_to_one() {
        for w in [DISEASE, MOLECULAR] {
            assert!((w.phase.sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn reference_coupling_score() {
        let s = score(&Params::default(), glioblastoma(), Variant::Disease);
        assert!((s.get(ScoreKind::Coupling).unwrap() - 45.0).abs() < 1e-9);
        assert_eq!(s.get(ScoreKind::Stability), Some(64.0));
        assert!((s.get(ScoreKind::Selectivity).unwrap() - 74.0).abs() < 1e-9);
        assert_eq!(s.get(ScoreKind::EntropyAlignment), Some(60.0));
    }

    #[test]
    fn reference_phase_lock() {
        // membrane 100, entropy 60, structural 100, charge 80, selectivity 74,
        // stability 64, coupling 45, coherence 60 + 22.2 + 25.6 = 107.8 -> 100
        let s = score(&Params::default(), glioblastoma(), Variant::Disease);
        assert_eq!(s.get(ScoreKind::FieldCoherence), Some(100.0));
        assert_eq!(s.get(ScoreKind::Charge), Some(80.0));
        assert_eq!(s.phase_lock, 78.0);
    }

    #[test]
    fn penalties_floor_at_zero() {
        let mut p = Params::default();
        p.membrane = 5.0;
        p.charge = 2.0;
        p.structural = 0.0;
        let s = score(&p, glioblastoma(), Variant::Disease);
        assert_eq!(s.get(ScoreKind::Membrane), Some(25.0));
        assert_eq!(s.get(ScoreKind::Charge), Some(0.0));
        assert_eq!(s.get(ScoreKind::Structural), Some(25.0));
    }

    #[test]
    fn sbcl_midpoint_scores() {
        let s = score(&Params::default(), glioblastoma(), Variant::Sbcl);
        assert_eq!(s.get(ScoreKind::EntropyAlignment), Some(60.0));
        assert_eq!(s.get(ScoreKind::Selectivity), Some(75.0));
        assert_eq!(s.get(ScoreKind::FieldCoherence), Some(75.0));
        assert_eq!(s.phase_lock, 70.0);
        assert_eq!(s.get(ScoreKind::Coupling), None);
    }

    #[test]
    fn sbcl_rounds_the_stored_value() {
        let mut p = Params::default();
        p.delivery = 0.0;
        p.recognition = 0.0;
        p.flexibility = 0.03;
        let s = score(&p, glioblastoma(), Variant::Sbcl);
        assert_eq!(s.get(ScoreKind::FieldCoherence), Some(69.8));
        assert_eq!(s.get(ScoreKind::EntropyAlignment), Some(49.7));
        assert_eq!(s.get(ScoreKind::Selectivity), Some(60.0));
        assert_eq!(s.phase_lock, 59.8);
    }

    #[test]
    fn round1_matches_decimal_rounding() {
        assert_eq!(round1(69.85), 69.8);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(74.96), 75.0);
    }

    #[test]
    fn sbcl_ignores_disease_profile() {
        let p = Params::default();
        let a = score(&p, &profiles::DISEASES[0], Variant::Sbcl);
        let b = score(&p, &profiles::DISEASES[3], Variant::Sbcl);
        assert_eq!(a, b);
    }
}
