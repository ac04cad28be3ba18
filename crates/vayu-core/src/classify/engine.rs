use crate::error::VayuError;
use crate::model::AqiValue;
use crate::scale::schema::{ScaleDef, TierDef};
use crate::scale::{builtin, validate_scale};
use std::sync::LazyLock;

/// Maps AQI readings to the tiers of one severity scale.
///
/// A classifier owns a validated scale, so lookups never fail.
#[derive(Debug, Clone)]
pub struct Classifier {
    scale: ScaleDef,
}

impl Classifier {
    /// Build a classifier for the given scale.
    pub fn new(scale: ScaleDef) -> Result<Self, VayuError> {
        validate_scale(&scale)?;
        Ok(Self { scale })
    }

    /// Build a classifier for a predefined scale.
    pub fn from_preset(name: &str) -> Result<Self, VayuError> {
        Self::new(builtin::load_preset(name)?)
    }

    pub fn scale(&self) -> &ScaleDef {
        &self.scale
    }

    /// Index of the tier containing `aqi`, or `None` for no data.
    ///
    /// Negative and non-finite values have no tier.
    pub fn tier_index(&self, aqi: f64) -> Option<usize> {
        if !aqi.is_finite() || aqi < 0.0 {
            return None;
        }
        // The first tier starts at 0, so at least one bound is <= aqi.
        self.scale
            .tiers
            .iter()
            .rposition(|t| f64::from(t.lower_bound) <= aqi)
    }

    /// Classify a reading. Always returns a tier; unusable input yields
    /// the scale's "No Data" tier.
    pub fn classify(&self, aqi: f64) -> &TierDef {
        match self.tier_index(aqi) {
            Some(i) => &self.scale.tiers[i],
            None => &self.scale.no_data,
        }
    }

    /// Classify a possibly-missing reading.
    pub fn classify_value(&self, value: &AqiValue) -> &TierDef {
        match value {
            AqiValue::Measured(v) => self.classify(*v),
            AqiValue::Unavailable => &self.scale.no_data,
        }
    }

    /// Fraction of the gauge to fill, clamped to `[0, 1]`.
    pub fn gauge_fraction(&self, aqi: f64) -> f64 {
        if !aqi.is_finite() {
            return 0.0;
        }
        (aqi / self.scale.gauge_max).clamp(0.0, 1.0)
    }

    /// Gauge fill for a possibly-missing reading.
    pub fn gauge_fraction_value(&self, value: &AqiValue) -> f64 {
        value.numeric().map_or(0.0, |v| self.gauge_fraction(v))
    }

    /// The "No Data" pseudo-tier of this scale.
    pub fn no_data(&self) -> &TierDef {
        &self.scale.no_data
    }
}

static CANONICAL: LazyLock<Classifier> = LazyLock::new(|| {
    let scale = builtin::load_preset(builtin::DEFAULT_PRESET)
        .expect("bundled default scale must be valid");
    Classifier { scale }
});

/// The process-wide classifier for the default scale.
pub fn canonical() -> &'static Classifier {
    &CANONICAL
}

/// Classify a reading against the default scale.
pub fn classify(aqi: f64) -> &'static TierDef {
    CANONICAL.classify(aqi)
}

/// Gauge fill for a reading against the default scale.
pub fn gauge_fraction(aqi: f64) -> f64 {
    CANONICAL.gauge_fraction(aqi)
}
