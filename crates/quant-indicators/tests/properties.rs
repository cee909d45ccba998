//! Property tests for the indicator kernels and engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use quant_core::error::IndicatorError;
use quant_core::types::{Bar, BarSeries, IndicatorRequest, Timeframe};
use quant_indicators::momentum::{macd, rsi};
use quant_indicators::moving_average::{defined, ema, sma};
use quant_indicators::{IndicatorEngine, IndicatorRegistry};

fn series_from_closes(closes: &[f64]) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let date = start + chrono::Days::new(i as u64);
            Bar::new(date, c, c * 1.01, c * 0.99, c, 5_000.0).unwrap()
        })
        .collect();
    BarSeries::new("PROP", Timeframe::Daily, bars).unwrap()
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

proptest! {
    #[test]
    fn ma_is_aligned_trailing_mean(
        closes in proptest::collection::vec(1.0f64..1000.0, 1..120),
        period in 1usize..30,
    ) {
        let result = sma(&defined(&closes), period);
        prop_assert_eq!(result.len(), closes.len());

        for (i, value) in result.iter().enumerate() {
            if i + 1 < period {
                prop_assert!(value.is_none());
            } else {
                let window = &closes[i + 1 - period..=i];
                let mean = window.iter().sum::<f64>() / period as f64;
                prop_assert!(close_enough(value.unwrap(), mean));
            }
        }
    }

    #[test]
    fn ema_and_ma_agree_on_constant_series(
        price in 1.0f64..500.0,
        len in 1usize..80,
        period in 1usize..40,
    ) {
        let closes = defined(&vec![price; len]);
        let ma = sma(&closes, period);
        let ema = ema(&closes, period);

        for i in 0..len {
            prop_assert_eq!(ma[i].is_some(), ema[i].is_some());
            prop_assert_eq!(ema[i].is_some(), i + 1 >= period);
            if let (Some(m), Some(e)) = (ma[i], ema[i]) {
                prop_assert!(close_enough(m, price));
                prop_assert!(close_enough(e, price));
            }
        }
    }

    #[test]
    fn macd_histogram_is_macd_minus_signal(
        closes in proptest::collection::vec(1.0f64..1000.0, 1..150),
        fast in 1usize..15,
        extra in 1usize..20,
        signal in 1usize..15,
    ) {
        let lines = macd(&closes, fast, fast + extra, signal);

        for i in 0..closes.len() {
            match (lines.macd[i], lines.signal[i]) {
                (Some(m), Some(s)) => prop_assert_eq!(lines.histogram[i], Some(m - s)),
                _ => prop_assert!(lines.histogram[i].is_none()),
            }
        }
    }

    #[test]
    fn rsi_is_bounded(
        closes in proptest::collection::vec(0.0f64..1000.0, 2..150),
        period in 1usize..30,
    ) {
        for value in rsi(&closes, period).into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn rsi_of_rising_series_is_one_hundred(
        start in 1.0f64..100.0,
        steps in proptest::collection::vec(0.01f64..5.0, 2..60),
        period in 1usize..20,
    ) {
        let closes: Vec<f64> = steps
            .iter()
            .scan(start, |price, step| {
                *price += step;
                Some(*price)
            })
            .collect();

        let result = rsi(&closes, period);
        for (i, value) in result.iter().enumerate() {
            if i < period {
                prop_assert!(value.is_none());
            } else {
                prop_assert_eq!(*value, Some(100.0));
            }
        }
    }

    #[test]
    fn engine_is_deterministic(
        closes in proptest::collection::vec(1.0f64..1000.0, 1..80),
    ) {
        let registry = IndicatorRegistry::new();
        let engine = IndicatorEngine::new(&registry);
        let series = series_from_closes(&closes);
        let requests = vec![
            IndicatorRequest::new("MA").with_param("period", 3.0),
            IndicatorRequest::new("EMA").with_param("period", 5.0),
            IndicatorRequest::new("MACD").with_param("fast", 3.0).with_param("slow", 6.0).with_param("signal", 2.0),
            IndicatorRequest::new("RSI").with_param("period", 4.0),
            IndicatorRequest::new("KDJ"),
        ];

        let first = engine.compute(&series, &requests);
        let second = engine.compute(&series, &requests);
        prop_assert_eq!(&first, &second);

        for result in first.results.values() {
            for line in &result.lines {
                prop_assert_eq!(line.values.len(), closes.len());
            }
        }
    }
}

#[test]
fn rsi_on_flat_series_is_fifty_everywhere_defined() {
    let registry = IndicatorRegistry::new();
    let engine = IndicatorEngine::new(&registry);
    let series = series_from_closes(&[25.0; 20]);

    let result = engine
        .compute_one(&series, &IndicatorRequest::new("RSI").with_param("period", 14.0))
        .unwrap();
    let values = result.values("rsi").unwrap();

    assert!(values[..14].iter().all(Option::is_none));
    assert!(values[14..].iter().all(|v| *v == Some(50.0)));
}

#[test]
fn rsi_fourteen_on_ten_bars_is_insufficient() {
    let registry = IndicatorRegistry::new();
    let engine = IndicatorEngine::new(&registry);
    let series = series_from_closes(&[10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0]);

    let err = engine
        .compute_one(&series, &IndicatorRequest::new("RSI").with_param("period", 14.0))
        .unwrap_err();

    assert_eq!(
        err,
        IndicatorError::InsufficientData {
            indicator: "RSI(14)".into(),
            required: 15,
            available: 10,
        }
    );
}
