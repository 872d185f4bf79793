use std::fmt;

use serde::Serialize;

use crate::config::Params;

/// Bucket boundaries on the complexity total, ascending.
pub const THRESHOLDS: [f64; 3] = [6.0, 10.0, 14.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    Advanced,
}

impl Complexity {
    pub fn name(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
            Complexity::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weighted parameter sum used for bucketing.
pub fn total_complexity(p: &Params) -> f64 {
    p.membrane
        + p.entropy * 5.0
        + p.structural
        + p.charge.abs()
        + p.selectivity * 3.0
        + p.stability
}

pub fn bucket(total: f64) -> Complexity {
    if total < THRESHOLDS[0] {
        Complexity::Simple
    } else if total < THRESHOLDS[1] {
        Complexity::Medium
    } else if total < THRESHOLDS[2] {
        Complexity::Complex
    } else {
        Complexity::Advanced
    }
}

pub fn classify(p: &Params) -> Complexity {
    bucket(total_complexity(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_params_are_advanced() {
        let p = Params::default();
        assert!((total_complexity(&p) - 14.42).abs() < 1e-9);
        assert_eq!(classify(&p), Complexity::Advanced);
    }

    #[test]
    fn boundaries_belong_to_the_upper_bucket() {
        assert_eq!(bucket(5.999), Complexity::Simple);
        assert_eq!(bucket(6.0), Complexity::Medium);
        assert_eq!(bucket(9.999), Complexity::Medium);
        assert_eq!(bucket(10.0), Complexity::Complex);
        assert_eq!(bucket(13.999), Complexity::Complex);
        assert_eq!(bucket(14.0), Complexity::Advanced);
        assert_eq!(bucket(0.0), Complexity::Simple);
    }

    #[test]
    fn charge_counts_by_magnitude() {
        let mut a = Params::default();
        let mut b = Params::default();
        a.charge = 1.5;
        b.charge = -1.5;
        assert_eq!(total_complexity(&a), total_complexity(&b));
    }
}
