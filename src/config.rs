use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Every adjustable parameter across the three dashboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    Membrane,
    Entropy,
    Structural,
    Charge,
    Selectivity,
    Stability,
    Delivery,
    Recognition,
    Flexibility,
}

/// Slider metadata: range, default position and step.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl ParamKey {
    pub const ALL: [ParamKey; 9] = [
        ParamKey::Membrane,
        ParamKey::Entropy,
        ParamKey::Structural,
        ParamKey::Charge,
        ParamKey::Selectivity,
        ParamKey::Stability,
        ParamKey::Delivery,
        ParamKey::Recognition,
        ParamKey::Flexibility,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::Membrane => "membrane",
            ParamKey::Entropy => "entropy",
            ParamKey::Structural => "structural",
            ParamKey::Charge => "charge",
            ParamKey::Selectivity => "selectivity",
            ParamKey::Stability => "stability",
            ParamKey::Delivery => "delivery",
            ParamKey::Recognition => "recognition",
            ParamKey::Flexibility => "flexibility",
        }
    }

    pub fn spec(self) -> ParamSpec {
        let (min, max, default, step) = match self {
            ParamKey::Membrane => (0.0, 5.0, 2.5, 0.1),
            ParamKey::Entropy => (0.0, 1.0, 0.5, 0.01),
            ParamKey::Structural => (0.0, 5.0, 3.0, 0.1),
            ParamKey::Charge => (-2.0, 2.0, -1.0, 0.1),
            ParamKey::Selectivity => (0.0, 1.0, 0.74, 0.01),
            ParamKey::Stability => (0.0, 5.0, 3.2, 0.1),
            ParamKey::Delivery => (0.0, 1.0, 0.5, 0.01),
            ParamKey::Recognition => (0.0, 1.0, 0.5, 0.01),
            ParamKey::Flexibility => (0.0, 1.0, 0.5, 0.01),
        };
        ParamSpec { key: self, min, max, default, step }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All tunable parameters, exposed as sliders in the frontend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Resonance model
    pub membrane: f64,
    pub entropy: f64,
    pub structural: f64,
    pub charge: f64,
    pub selectivity: f64,
    pub stability: f64,

    // SBCL delivery model
    pub delivery: f64,
    pub recognition: f64,
    pub flexibility: f64,
}

impl Default for Params {
    fn default() -> Self {
        let mut params = Self {
            membrane: 0.0,
            entropy: 0.0,
            structural: 0.0,
            charge: 0.0,
            selectivity: 0.0,
            stability: 0.0,
            delivery: 0.0,
            recognition: 0.0,
            flexibility: 0.0,
        };
        for key in ParamKey::ALL {
            params.set(key, key.spec().default);
        }
        params
    }
}

impl Params {
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::Membrane => self.membrane,
            ParamKey::Entropy => self.entropy,
            ParamKey::Structural => self.structural,
            ParamKey::Charge => self.charge,
            ParamKey::Selectivity => self.selectivity,
            ParamKey::Stability => self.stability,
            ParamKey::Delivery => self.delivery,
            ParamKey::Recognition => self.recognition,
            ParamKey::Flexibility => self.flexibility,
        }
    }

    pub fn set(&mut self, key: ParamKey, value: f64) {
        let slot = match key {
            ParamKey::Membrane => &mut self.membrane,
            ParamKey::Entropy => &mut self.entropy,
            ParamKey::Structural => &mut self.structural,
            ParamKey::Charge => &mut self.charge,
            ParamKey::Selectivity => &mut self.selectivity,
            ParamKey::Stability => &mut self.stability,
            ParamKey::Delivery => &mut self.delivery,
            ParamKey::Recognition => &mut self.recognition,
            ParamKey::Flexibility => &mut self.flexibility,
        };
        *slot = value;
    }

    /// Reject any value outside its declared range (NaN included).
    pub fn validate(&self) -> Result<()> {
        for key in ParamKey::ALL {
            let spec = key.spec();
            let value = self.get(key);
            if !(spec.min..=spec.max).contains(&value) {
                return Err(Error::OutOfRange {
                    param: key.name(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }

    /// Slider behaviour: pin every value into its range. NaN falls back to the default.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for key in ParamKey::ALL {
            let spec = key.spec();
            let v = self.get(key);
            let v = if v.is_nan() { spec.default } else { v.clamp(spec.min, spec.max) };
            out.set(key, v);
        }
        out
    }

    /// Load a preset; keys left out keep their defaults.
    pub fn from_toml_str(src: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_toml_str(&src).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }
}

/// The three dashboards, folded into one parameterized model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// SBCL cancer interface: three delivery sliders.
    Sbcl,
    /// Disease resonance dashboard.
    #[default]
    Disease,
    /// Molecular resonance designer.
    Molecular,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Sbcl, Variant::Disease, Variant::Molecular];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Sbcl => "sbcl",
            Variant::Disease => "disease",
            Variant::Molecular => "molecular",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::Sbcl => "SBCL Cancer Resonance Interface",
            Variant::Disease => "Disease Resonance Dashboard",
            Variant::Molecular => "Molecular Resonance Designer",
        }
    }

    /// Sliders shown by this dashboard, in display order.
    pub fn params(self) -> &'static [ParamKey] {
        const DELIVERY: &[ParamKey] = &[ParamKey::Delivery, ParamKey::Recognition, ParamKey::Flexibility];
        const RESONANCE: &[ParamKey] = &[
            ParamKey::Membrane,
            ParamKey::Entropy,
            ParamKey::Structural,
            ParamKey::Charge,
            ParamKey::Selectivity,
            ParamKey::Stability,
        ];
        match self {
            Variant::Sbcl => DELIVERY,
            Variant::Disease | Variant::Molecular => RESONANCE,
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        Params::default().validate().unwrap();
        assert_eq!(Params::default().selectivity, 0.74);
        assert_eq!(Params::default().charge, -1.0);
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        let mut p = Params::default();
        p.charge = -2.5;
        assert!(matches!(p.validate(), Err(Error::OutOfRange { param: "charge", .. })));
        p.charge = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn clamped_pins_to_range() {
        let mut p = Params::default();
        p.membrane = 9.0;
        p.entropy = f64::NAN;
        let c = p.clamped();
        assert_eq!(c.membrane, 5.0);
        assert_eq!(c.entropy, 0.5);
        c.validate().unwrap();
    }

    #[test]
    fn toml_preset_keeps_missing_defaults() {
        let p = Params::from_toml_str("membrane = 1.5\ncharge = 0.25\n").unwrap();
        assert_eq!(p.membrane, 1.5);
        assert_eq!(p.charge, 0.25);
        assert_eq!(p.stability, 3.2);
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("SBCL".parse::<Variant>().unwrap(), Variant::Sbcl);
        assert!(matches!("nope".parse::<Variant>(), Err(Error::UnknownVariant(_))));
    }
}
