//! Edge-triggered threshold alerts.

use serde::Serialize;

/// Band a value falls into relative to two thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Below,
    Neutral,
    Above,
}

impl Zone {
    /// Classify a value; the thresholds themselves belong to the neutral band.
    pub fn classify(value: f64, lower: f64, upper: f64) -> Self {
        if value > upper {
            Zone::Above
        } else if value < lower {
            Zone::Below
        } else {
            Zone::Neutral
        }
    }
}

/// A value entering the upper or lower zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdCrossing {
    pub index: usize,
    /// Zone entered: `Above` or `Below`.
    pub zone: Zone,
    pub value: f64,
}

/// Detect entries into the zones above `upper` and below `lower`.
///
/// Fires once per entry rather than on every position spent inside a zone;
/// another alert for the same zone needs the value to leave it first. A
/// zone is only entered from an observed previous position, so the first
/// defined value, and the first value after an undefined gap, never fire.
pub fn detect_threshold_crossings(
    values: &[Option<f64>],
    lower: f64,
    upper: f64,
) -> Vec<ThresholdCrossing> {
    let mut crossings = Vec::new();
    let mut previous: Option<Zone> = None;

    for (index, value) in values.iter().enumerate() {
        let Some(value) = *value else {
            previous = None;
            continue;
        };

        let zone = Zone::classify(value, lower, upper);
        if let Some(prev) = previous {
            if zone != prev && zone != Zone::Neutral {
                crossings.push(ThresholdCrossing { index, zone, value });
            }
        }
        previous = Some(zone);
    }

    crossings
}
