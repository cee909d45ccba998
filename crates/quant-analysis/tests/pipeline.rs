//! End-to-end tests of the analysis pipeline.

use chrono::NaiveDate;
use proptest::prelude::*;
use quant_analysis::{Analyzer, SignalConfig};
use quant_core::error::IndicatorError;
use quant_core::types::{Bar, BarSeries, IndicatorRequest, SignalKind, Timeframe};

fn trending_series(len: usize) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
    let bars = (0..len)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + t * 0.2 + (t * 0.35).sin() * 6.0;
            let date = start + chrono::Days::new(i as u64);
            Bar::new(date, close - 0.3, close + 1.2, close - 1.4, close, 10_000.0 + t).unwrap()
        })
        .collect();
    BarSeries::new("ACME", Timeframe::Daily, bars).unwrap()
}

fn all_requests() -> Vec<IndicatorRequest> {
    IndicatorRequest::parse_list("MA:period=5;MA:period=20;EMA;MACD;RSI;KDJ").unwrap()
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = Analyzer::global();
    let series = trending_series(200);
    let config = SignalConfig::default();

    let first = analyzer.analyze(&series, &all_requests(), &config).unwrap();
    let second = analyzer.analyze(&series, &all_requests(), &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

fn series_from_closes(closes: &[f64]) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let date = start + chrono::Days::new(i as u64);
            Bar::new(date, c, c * 1.02, c * 0.98, c, 1_000.0).unwrap()
        })
        .collect();
    BarSeries::new("PROP", Timeframe::Daily, bars).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn analysis_is_idempotent_for_any_closes(
        closes in proptest::collection::vec(1.0f64..500.0, 0..90),
        short in 2usize..8,
        extra in 1usize..15,
    ) {
        let analyzer = Analyzer::global();
        let series = series_from_closes(&closes);
        let config = SignalConfig::ma_cross_only(short, short + extra);

        let first = analyzer.analyze(&series, &all_requests(), &config).unwrap();
        let second = analyzer.analyze(&series, &all_requests(), &config).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}

#[test]
fn every_line_is_aligned_with_the_series() {
    let analyzer = Analyzer::global();
    let series = trending_series(120);

    let result = analyzer
        .analyze(&series, &all_requests(), &SignalConfig::default())
        .unwrap();

    assert!(result.is_complete());
    for indicator in result.indicators.values() {
        for line in &indicator.lines {
            assert_eq!(line.values.len(), series.len(), "{} {}", indicator.label, line.name);
        }
    }
    for event in &result.signals {
        assert_eq!(series.get(event.index).unwrap().date(), event.date);
    }
}

#[test]
fn failures_do_not_abort_siblings() {
    let analyzer = Analyzer::global();
    let series = trending_series(30);
    let requests = vec![
        IndicatorRequest::new("MA").with_param("period", 5.0),
        IndicatorRequest::new("MA").with_param("period", 60.0),
        IndicatorRequest::new("BOLL"),
        IndicatorRequest::new("RSI").with_param("period", 2.5),
    ];
    let mut config = SignalConfig::default();
    config.macd_cross.enabled = false;

    let result = analyzer.analyze(&series, &requests, &config).unwrap();

    assert!(result.indicator("MA(5)").is_some());
    assert!(matches!(
        result.errors.get("MA(60)"),
        Some(IndicatorError::InsufficientData { required: 60, available: 30, .. })
    ));
    assert!(matches!(
        result.errors.get("BOLL"),
        Some(IndicatorError::UnknownIndicator { .. })
    ));
    assert!(matches!(
        result.errors.get("RSI(period=2.5)"),
        Some(IndicatorError::InvalidParameter { .. })
    ));
    // MA(10), MA(30) and RSI(14) were added for the signal rules
    assert!(result.indicator("MA(10)").is_some());
    assert!(result.indicator("MA(30)").unwrap().primary().unwrap()[29].is_some());
    assert!(result.indicator("RSI(14)").is_some());
}

#[test]
fn empty_series_is_not_an_error() {
    let analyzer = Analyzer::global();
    let series = BarSeries::empty("EMPTY", Timeframe::Daily);

    let result = analyzer
        .analyze(&series, &all_requests(), &SignalConfig::default())
        .unwrap();

    assert!(result.signals.is_empty());
    assert!(result.indicators.is_empty());
    assert!(result
        .errors
        .values()
        .all(|e| matches!(e, IndicatorError::InsufficientData { available: 0, .. })));
}

#[test]
fn short_ma_pair_scenario() {
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let bars = [10.0, 11.0, 12.0, 11.0, 10.0]
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + chrono::Days::new(i as u64), c, c, c, c, 1.0).unwrap())
        .collect();
    let series = BarSeries::new("HAND", Timeframe::Daily, bars).unwrap();

    let result = Analyzer::global()
        .analyze(&series, &[], &SignalConfig::ma_cross_only(2, 3))
        .unwrap();

    assert_eq!(result.signals.len(), 1);
    let event = &result.signals[0];
    assert_eq!(event.kind, SignalKind::DeathCross);
    assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
    assert!(result.signals.iter().all(|e| e.kind != SignalKind::GoldenCross));
}

#[test]
fn json_shape_for_presentation_layer() {
    let analyzer = Analyzer::global();
    let series = trending_series(60);
    let requests = vec![IndicatorRequest::new("MACD")];

    let result = analyzer
        .analyze(&series, &requests, &SignalConfig::default())
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    let macd = &json["indicators"]["MACD(12,26,9)"];
    assert_eq!(macd["id"], "MACD");
    assert_eq!(macd["plot_type"], "oscillator");
    assert_eq!(macd["params"]["slow"], 26.0);
    assert_eq!(macd["lines"][0]["name"], "macd");
    assert!(macd["lines"][0]["values"][0].is_null());
    assert_eq!(json["series"]["symbol"], "ACME");
    assert!(json["signals"].is_array());
}
