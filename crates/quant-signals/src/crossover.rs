//! Crossover detection between two aligned series.

use serde::Serialize;

/// Direction in which series A crossed series B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// A moved from below B to above it.
    Up,
    /// A moved from above B to below it.
    Down,
}

/// A sign change of `A - B` at a given index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crossover {
    pub index: usize,
    pub direction: Direction,
}

fn sign(diff: f64) -> i8 {
    if diff > 0.0 {
        1
    } else if diff < 0.0 {
        -1
    } else {
        0
    }
}

/// Detect every crossover of `a` over `b`.
///
/// Only consecutive positions where both series are defined are compared,
/// so nothing is detected across an undefined gap and the first defined
/// position of a run never produces an event. A touch (`A == B`) is not a
/// crossing by itself: the event fires on the first position whose sign
/// differs from the last non-zero sign of the current run.
pub fn detect_crossovers(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Crossover> {
    let mut crossovers = Vec::new();
    let mut run_started = false;
    let mut last_sign: i8 = 0;

    for (index, pair) in a.iter().zip(b).enumerate() {
        let (Some(x), Some(y)) = pair else {
            run_started = false;
            last_sign = 0;
            continue;
        };

        let current = sign(x - y);
        if run_started && current != 0 && last_sign != 0 && current != last_sign {
            let direction = if current > 0 {
                Direction::Up
            } else {
                Direction::Down
            };
            crossovers.push(Crossover { index, direction });
        }

        if current != 0 {
            last_sign = current;
        }
        run_started = true;
    }

    crossovers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_simple_crossovers() {
        let a = s(&[1.0, 2.0, 3.0, 2.0, 1.0]);
        let b = s(&[2.0, 2.5, 2.5, 2.5, 2.5]);

        assert_eq!(
            detect_crossovers(&a, &b),
            vec![
                Crossover { index: 2, direction: Direction::Up },
                Crossover { index: 3, direction: Direction::Down },
            ]
        );
    }

    #[test]
    fn test_no_detection_across_undefined_gap() {
        let a = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let b = vec![Some(2.0), Some(2.0), Some(2.0), Some(2.0)];

        // 1 < 2 before the gap and 3 > 2 after it, but the gap breaks the run
        assert!(detect_crossovers(&a, &b).is_empty());
    }

    #[test]
    fn test_first_defined_position_never_fires() {
        let a = vec![None, None, Some(5.0), Some(6.0)];
        let b = vec![None, Some(1.0), Some(1.0), Some(1.0)];

        assert!(detect_crossovers(&a, &b).is_empty());
    }

    #[test]
    fn test_touch_and_return_is_not_a_cross() {
        let a = s(&[1.0, 2.0, 1.0]);
        let b = s(&[2.0, 2.0, 2.0]);

        assert!(detect_crossovers(&a, &b).is_empty());
    }

    #[test]
    fn test_cross_through_equality_fires_once() {
        let a = s(&[1.0, 2.0, 3.0]);
        let b = s(&[2.0, 2.0, 2.0]);

        assert_eq!(
            detect_crossovers(&a, &b),
            vec![Crossover { index: 2, direction: Direction::Up }]
        );
    }

    #[test]
    fn test_swapping_inputs_swaps_direction() {
        let a = s(&[1.0, 3.0, 0.5, 4.0, 4.0, 1.0]);
        let b = s(&[2.0, 2.0, 2.0, 2.0, 2.0, 2.0]);

        let forward = detect_crossovers(&a, &b);
        let backward = detect_crossovers(&b, &a);

        assert_eq!(forward.len(), backward.len());
        for (f, r) in forward.iter().zip(&backward) {
            assert_eq!(f.index, r.index);
            assert_ne!(f.direction, r.direction);
        }
    }
}
