//! Static table of supported prediction modes.
//!
//! Each mode names one aerodynamic shape. It fixes the order in which input
//! features are fed to that shape's scaler and models, the file-name stem of
//! its artifacts, and, for the NASA configuration, the angle-of-attack range
//! the models were trained on.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// A named numeric input accepted by `/predict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Mach,
    Aoa,
    Ln,
    Swept,
    Lln,
}

impl Feature {
    /// JSON field name carrying this feature.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Mach => "mach",
            Feature::Aoa => "aoa",
            Feature::Ln => "ln",
            Feature::Swept => "swept",
            Feature::Lln => "lln",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Angle-of-attack range a mode's models are valid for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AoaEnvelope {
    pub min: f64,
    pub max: f64,
    /// Values in `[min, caution_below)` are accepted with a warning.
    pub caution_below: f64,
}

pub const LOW_AOA_WARNING: &str =
    "Prediction error may be larger for angles of attack below -2.5 degrees";

impl AoaEnvelope {
    /// Rejects out-of-range values and returns a warning for the caution band.
    pub fn check(&self, aoa: f64) -> Result<Option<String>> {
        if !(self.min..=self.max).contains(&aoa) {
            return Err(Error::AoaOutOfRange {
                aoa,
                min: self.min,
                max: self.max,
            });
        }

        if aoa < self.caution_below {
            Ok(Some(LOW_AOA_WARNING.to_string()))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeConfig {
    pub name: &'static str,
    pub features: &'static [Feature],
    pub artifact_prefix: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aoa_envelope: Option<AoaEnvelope>,
}

const MACH_AOA: &[Feature] = &[Feature::Mach, Feature::Aoa];

static MODES: &[ModeConfig] = &[
    ModeConfig {
        name: "NASA",
        features: &[
            Feature::Lln,
            Feature::Ln,
            Feature::Swept,
            Feature::Mach,
            Feature::Aoa,
        ],
        artifact_prefix: "NASA",
        aoa_envelope: Some(AoaEnvelope {
            min: -4.0,
            max: 25.0,
            caution_below: -2.5,
        }),
    },
    ModeConfig {
        name: "Von-Karman Nose",
        features: MACH_AOA,
        artifact_prefix: "Von-Karman Nose",
        aoa_envelope: None,
    },
    ModeConfig {
        name: "Missile Shape 1",
        features: MACH_AOA,
        artifact_prefix: "Missile Shape 1",
        aoa_envelope: None,
    },
    ModeConfig {
        name: "Missile Shape 2",
        features: MACH_AOA,
        artifact_prefix: "Missile Shape 2",
        aoa_envelope: None,
    },
    ModeConfig {
        name: "Missile Shape 3",
        features: MACH_AOA,
        artifact_prefix: "Missile Shape 3",
        aoa_envelope: None,
    },
];

impl ModeConfig {
    /// Finds a mode by exact name, ignoring surrounding whitespace.
    pub fn lookup(name: &str) -> Option<&'static ModeConfig> {
        let name = name.trim();
        MODES.iter().find(|mode| mode.name == name)
    }

    pub fn all() -> &'static [ModeConfig] {
        MODES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_trims_whitespace() {
        let mode = ModeConfig::lookup("  Missile Shape 2 ").unwrap();
        assert_eq!(mode.artifact_prefix, "Missile Shape 2");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(ModeConfig::lookup("nasa").is_none());
        assert!(ModeConfig::lookup("").is_none());
    }

    #[test]
    fn test_nasa_feature_order() {
        let nasa = ModeConfig::lookup("NASA").unwrap();
        let keys: Vec<_> = nasa.features.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["lln", "ln", "swept", "mach", "aoa"]);
    }

    #[test]
    fn test_only_nasa_has_envelope() {
        let with_envelope: Vec<_> = ModeConfig::all()
            .iter()
            .filter(|m| m.aoa_envelope.is_some())
            .map(|m| m.name)
            .collect();
        assert_eq!(with_envelope, ["NASA"]);
    }

    #[test]
    fn test_envelope_bounds() {
        let envelope = ModeConfig::lookup("NASA").unwrap().aoa_envelope.unwrap();

        assert!(envelope.check(-4.1).is_err());
        assert!(envelope.check(25.01).is_err());
        assert_eq!(envelope.check(25.0).unwrap(), None);
        assert_eq!(envelope.check(-2.5).unwrap(), None);
        assert!(envelope.check(-4.0).unwrap().is_some());
        assert!(envelope.check(-2.6).unwrap().is_some());
    }
}
