use serde::{Deserialize, Serialize};

use crate::catalog::Tier;
use crate::error::{Error, Result};

/// How the per-tier package values are entered: directly as percent of the
/// loop, or as absolute minutes over the total event duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    Percentage,
    AbsoluteMinutes,
}

/// One value per package tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues {
    pub s: f64,
    pub m: f64,
    pub l: f64,
    pub xl: f64,
}

impl TierValues {
    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::S => self.s,
            Tier::M => self.m,
            Tier::L => self.l,
            Tier::XL => self.xl,
        }
    }
}

/// Package weighting for the four tiers. Both value sets are retained so
/// switching the input mode does not lose the other set; `mode` selects
/// which one drives the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierWeightConfig {
    pub mode: WeightMode,
    /// Total event duration in minutes, used only in absolute-minutes mode.
    pub total_event_minutes: f64,
    /// Per-tier percent of the loop.
    pub percent: TierValues,
    /// Per-tier absolute minutes over the event.
    pub minutes: TierValues,
}

impl Default for TierWeightConfig {
    fn default() -> Self {
        TierWeightConfig {
            mode: WeightMode::Percentage,
            total_event_minutes: 240.0,
            percent: TierValues {
                s: 2.0,
                m: 5.0,
                l: 10.0,
                xl: 20.0,
            },
            minutes: TierValues {
                s: 5.0,
                m: 10.0,
                l: 20.0,
                xl: 40.0,
            },
        }
    }
}

impl TierWeightConfig {
    /// The value set selected by the active mode.
    pub fn active_values(&self) -> TierValues {
        match self.mode {
            WeightMode::Percentage => self.percent,
            WeightMode::AbsoluteMinutes => self.minutes,
        }
    }

    /// Rejects configurations the core must not run with: negative weights,
    /// or a non-positive event duration in absolute-minutes mode.
    pub fn validate(&self) -> Result<()> {
        let values = self.active_values();
        for tier in Tier::ALL {
            let value = values.get(tier);
            if value < 0.0 || !value.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "tier {} has invalid weight {}",
                    tier, value
                )));
            }
        }
        if self.mode == WeightMode::AbsoluteMinutes && self.total_event_minutes <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "total event minutes must be positive, got {}",
                self.total_event_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TierWeightConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut config = TierWeightConfig::default();
        config.percent.l = -1.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_event_minutes_only_matters_in_absolute_mode() {
        let mut config = TierWeightConfig::default();
        config.total_event_minutes = 0.0;
        assert!(config.validate().is_ok());
        config.mode = WeightMode::AbsoluteMinutes;
        assert!(config.validate().is_err());
    }

    #[test]
    fn active_values_follow_mode() {
        let config = TierWeightConfig::default();
        assert_eq!(config.active_values().xl, 20.0);
        let config = TierWeightConfig {
            mode: WeightMode::AbsoluteMinutes,
            ..config
        };
        assert_eq!(config.active_values().xl, 40.0);
    }
}
