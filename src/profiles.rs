use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::classify::Complexity;
use crate::config::ParamKey;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiseaseProfile {
    pub name: &'static str,
    pub color: &'static str,
    pub frequency: f64,
    pub amplitude: f64,
    pub chaos: f64,
    pub phase: f64,
}

/// Read-only disease table, selected by name.
pub static DISEASES: [DiseaseProfile; 5] = [
    DiseaseProfile {
        name: "Glioblastoma",
        color: "#e74c3c",
        frequency: 2.4,
        amplitude: 1.2,
        chaos: 0.9,
        phase: 0.0,
    },
    DiseaseProfile {
        name: "Pancreatic Cancer",
        color: "#9b59b6",
        frequency: 1.8,
        amplitude: 1.0,
        chaos: 0.75,
        phase: FRAC_PI_4,
    },
    DiseaseProfile {
        name: "Breast Cancer",
        color: "#ff6fb5",
        frequency: 1.5,
        amplitude: 0.9,
        chaos: 0.55,
        phase: FRAC_PI_3,
    },
    DiseaseProfile {
        name: "Alzheimer's",
        color: "#3498db",
        frequency: 0.8,
        amplitude: 0.7,
        chaos: 0.4,
        phase: FRAC_PI_2,
    },
    DiseaseProfile {
        name: "Parkinson's",
        color: "#f1c40f",
        frequency: 1.1,
        amplitude: 0.8,
        chaos: 0.6,
        phase: PI,
    },
];

pub fn default_disease() -> &'static DiseaseProfile {
    &DISEASES[0]
}

/// Case-insensitive lookup by display name.
pub fn disease(name: &str) -> Result<&'static DiseaseProfile> {
    let wanted = name.trim();
    DISEASES
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::UnknownDisease(name.to_string()))
}

/// Cosmetic naming scheme for the sliders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum InterfaceLanguage {
    #[default]
    Basic,
    Scientific,
    Symbolic,
    Mathematical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParamLabel {
    pub name: &'static str,
    pub help: &'static str,
}

const fn label(name: &'static str, help: &'static str) -> ParamLabel {
    ParamLabel { name, help }
}

impl InterfaceLanguage {
    pub const ALL: [InterfaceLanguage; 4] = [
        InterfaceLanguage::Basic,
        InterfaceLanguage::Scientific,
        InterfaceLanguage::Symbolic,
        InterfaceLanguage::Mathematical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InterfaceLanguage::Basic => "Basic",
            InterfaceLanguage::Scientific => "Scientific",
            InterfaceLanguage::Symbolic => "Symbolic",
            InterfaceLanguage::Mathematical => "Mathematical",
        }
    }

    pub fn label(self, key: ParamKey) -> ParamLabel {
        use InterfaceLanguage::*;
        use ParamKey::*;
        match (self, key) {
            (Basic, Membrane) => label("Cell Wall Access", "How easily the molecule crosses the cell wall"),
            (Basic, Entropy) => label("Disorder", "How much randomness the system tolerates"),
            (Basic, Structural) => label("Shape Fit", "How well the molecule's shape matches the target"),
            (Basic, Charge) => label("Electric Charge", "Overall positive or negative charge"),
            (Basic, Selectivity) => label("Targeting", "How precisely the molecule finds its target"),
            (Basic, Stability) => label("Durability", "How long the molecule stays intact"),
            (Basic, Delivery) => label("Delivery", "How much of the dose reaches the tissue"),
            (Basic, Recognition) => label("Recognition", "How well the target is recognised"),
            (Basic, Flexibility) => label("Flexibility", "How floppy the molecule is"),

            (Scientific, Membrane) => label("Membrane Permeability", "Passive diffusion coefficient across the lipid bilayer"),
            (Scientific, Entropy) => label("Conformational Entropy", "Normalised entropic penalty on binding"),
            (Scientific, Structural) => label("Structural Complementarity", "Shape complementarity to the binding pocket"),
            (Scientific, Charge) => label("Net Formal Charge", "Net charge at physiological pH"),
            (Scientific, Selectivity) => label("Target Selectivity", "On-target over off-target affinity ratio"),
            (Scientific, Stability) => label("Metabolic Stability", "Resistance to hepatic clearance"),
            (Scientific, Delivery) => label("Delivery Efficiency", "Bioavailable fraction at the target site"),
            (Scientific, Recognition) => label("Target Recognition", "Receptor recognition probability"),
            (Scientific, Flexibility) => label("Molecular Flexibility", "Rotatable bond fraction"),

            (Symbolic, Membrane) => label("Boundary Resonance", "Coupling strength across the symbolic boundary"),
            (Symbolic, Entropy) => label("Field Entropy", "Symbolic disorder of the resonance field"),
            (Symbolic, Structural) => label("Form Coherence", "Alignment of symbolic form with the target"),
            (Symbolic, Charge) => label("Polarity", "Symbolic polarity of the field"),
            (Symbolic, Selectivity) => label("Intent Focus", "Sharpness of the therapeutic intent"),
            (Symbolic, Stability) => label("Persistence", "Endurance of the resonance pattern"),
            (Symbolic, Delivery) => label("Carrier Flow", "Symbolic carrier throughput"),
            (Symbolic, Recognition) => label("Signature Match", "Match against the disease signature"),
            (Symbolic, Flexibility) => label("Form Fluidity", "Plasticity of the symbolic form"),

            (Mathematical, Membrane) => label("μ", "Boundary transfer coefficient μ ∈ [0, 5]"),
            (Mathematical, Entropy) => label("S", "Normalised entropy S ∈ [0, 1]"),
            (Mathematical, Structural) => label("σ", "Structural fit σ ∈ [0, 5]"),
            (Mathematical, Charge) => label("q", "Net charge q ∈ [-2, 2]"),
            (Mathematical, Selectivity) => label("κ", "Selectivity ratio κ ∈ [0, 1]"),
            (Mathematical, Stability) => label("τ", "Stability constant τ ∈ [0, 5]"),
            (Mathematical, Delivery) => label("δ", "Delivery fraction δ ∈ [0, 1]"),
            (Mathematical, Recognition) => label("ρ", "Recognition probability ρ ∈ [0, 1]"),
            (Mathematical, Flexibility) => label("φ", "Flexibility fraction φ ∈ [0, 1]"),
        }
    }
}

impl FromStr for InterfaceLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InterfaceLanguage::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for InterfaceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MolecularCandidate {
    pub id: &'static str,
    pub smiles: &'static str,
    pub molecular_weight: f64,
    pub log_p: f64,
    pub h_bond_donors: u32,
    pub h_bond_acceptors: u32,
}

static SIMPLE: MolecularCandidate = MolecularCandidate {
    id: "SBCL-S01",
    smiles: "CC(=O)Oc1ccccc1C(=O)O",
    molecular_weight: 180.16,
    log_p: 1.19,
    h_bond_donors: 1,
    h_bond_acceptors: 4,
};

static MEDIUM: MolecularCandidate = MolecularCandidate {
    id: "SBCL-M02",
    smiles: "CN1C(=O)CN=C(c2ccccc2)c2cc(Cl)ccc21",
    molecular_weight: 284.74,
    log_p: 2.82,
    h_bond_donors: 0,
    h_bond_acceptors: 3,
};

static COMPLEX: MolecularCandidate = MolecularCandidate {
    id: "SBCL-C03",
    smiles: "CC(C)Cc1ccc(cc1)C(C)C(=O)NC(Cc1c[nH]c2ccccc12)C(=O)N1CCC(CC1)c1ccc(Cl)cc1",
    molecular_weight: 527.67,
    log_p: 5.31,
    h_bond_donors: 3,
    h_bond_acceptors: 8,
};

static ADVANCED: MolecularCandidate = MolecularCandidate {
    id: "SBCL-A04",
    smiles: "Cc1ccc(NC(=O)c2ccc(CN3CCN(C)CC3)cc2)cc1Nc1nccc(-c2cccnc2)n1",
    molecular_weight: 493.62,
    log_p: 3.47,
    h_bond_donors: 2,
    h_bond_acceptors: 7,
};

pub fn candidate(bucket: Complexity) -> &'static MolecularCandidate {
    match bucket {
        Complexity::Simple => &SIMPLE,
        Complexity::Medium => &MEDIUM,
        Complexity::Complex => &COMPLEX,
        Complexity::Advanced => &ADVANCED,
    }
}

/// Rule-of-five breakdown for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Lipinski {
    pub heavy: bool,
    pub lipophilic: bool,
    pub too_many_donors: bool,
    pub too_many_acceptors: bool,
}

impl Lipinski {
    pub fn violations(&self) -> u32 {
        [self.heavy, self.lipophilic, self.too_many_donors, self.too_many_acceptors]
            .iter()
            .filter(|&&v| v)
            .count() as u32
    }

    pub fn drug_like(&self) -> bool {
        self.violations() == 0
    }
}

impl MolecularCandidate {
    pub fn lipinski(&self) -> Lipinski {
        Lipinski {
            heavy: self.molecular_weight > 500.0,
            lipophilic: self.log_p > 5.0,
            too_many_donors: self.h_bond_donors > 5,
            too_many_acceptors: self.h_bond_acceptors > 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disease_lookup_ignores_case() {
        assert_eq!(disease("glioblastoma").unwrap().chaos, 0.9);
        assert!(matches!(disease("flu"), Err(Error::UnknownDisease(_))));
    }

    #[test]
    fn every_language_labels_every_param() {
        for lang in InterfaceLanguage::ALL {
            for key in ParamKey::ALL {
                let l = lang.label(key);
                assert!(!l.name.is_empty() && !l.help.is_empty(), "{lang} {key}");
            }
        }
        assert_eq!("symbolic".parse::<InterfaceLanguage>().unwrap(), InterfaceLanguage::Symbolic);
    }

    #[test]
    fn lipinski_counts_breaches() {
        assert!(candidate(Complexity::Advanced).lipinski().drug_like());
        let c = candidate(Complexity::Complex).lipinski();
        assert_eq!(c.violations(), 2);
        assert!(c.heavy && c.lipophilic);
        assert!(!c.drug_like());
    }
}
