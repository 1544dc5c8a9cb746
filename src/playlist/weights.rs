use crate::catalog::Tier;
use crate::config::{TierValues, WeightMode};

/// Per-tier share of the loop as a percentage, whichever way the values
/// were entered. Derived on every run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    percent: TierValues,
}

impl NormalizedWeights {
    pub fn get(&self, tier: Tier) -> f64 {
        self.percent.get(tier)
    }
}

/// Converts the configured tier values into percent-of-loop.
///
/// Percentage mode is an identity mapping. Absolute-minutes mode divides by
/// the event duration; a non-positive event duration yields 0% for every
/// tier rather than dividing by zero (upstream validation rejects such a
/// config before generation, this is only the fallback).
pub fn normalize(values: TierValues, mode: WeightMode, total_event_minutes: f64) -> NormalizedWeights {
    let percent = match mode {
        WeightMode::Percentage => values,
        WeightMode::AbsoluteMinutes => {
            if total_event_minutes <= 0.0 {
                TierValues {
                    s: 0.0,
                    m: 0.0,
                    l: 0.0,
                    xl: 0.0,
                }
            } else {
                TierValues {
                    s: values.s / total_event_minutes * 100.0,
                    m: values.m / total_event_minutes * 100.0,
                    l: values.l / total_event_minutes * 100.0,
                    xl: values.xl / total_event_minutes * 100.0,
                }
            }
        }
    };
    NormalizedWeights { percent }
}
