use predtrader::domain::indicator::ema::calculate_ema;
use predtrader::domain::indicator::rsi::calculate_rsi;
use predtrader::domain::indicator::sma::calculate_sma;
use predtrader::domain::signal::{generate_signals, Signal};
use predtrader::domain::simulator::{PositionSimulator, SimulationState};
use proptest::prelude::*;

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Buy), Just(Signal::Sell), Just(Signal::Hold)]
}

fn closes_and_window() -> impl Strategy<Value = (Vec<f64>, usize)> {
    prop::collection::vec(0.01f64..10_000.0, 1..80).prop_flat_map(|closes| {
        let len = closes.len();
        (Just(closes), 1..=len)
    })
}

fn closes_and_signals() -> impl Strategy<Value = (Vec<f64>, Vec<Signal>)> {
    (1usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(0.01f64..10_000.0, n),
            prop::collection::vec(signal_strategy(), n),
        )
    })
}

proptest! {
    /// SMA is undefined during warmup and the trailing mean afterwards.
    #[test]
    fn sma_is_trailing_mean((closes, window) in closes_and_window()) {
        let series = calculate_sma(&closes, window).unwrap();
        prop_assert_eq!(series.len(), closes.len());
        for (i, v) in series.values.iter().enumerate() {
            if i + 1 < window {
                prop_assert!(v.is_none());
            } else {
                let mean = closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                prop_assert_eq!(*v, Some(mean));
            }
        }
    }

    /// EMA is seeded with the first close and never undefined.
    #[test]
    fn ema_defined_from_first_bar((closes, span) in closes_and_window()) {
        let series = calculate_ema(&closes, span).unwrap();
        prop_assert_eq!(series.values[0], Some(closes[0]));
        prop_assert!(series.values.iter().all(Option::is_some));
    }

    /// RSI stays within [0, 100] wherever it is defined.
    #[test]
    fn rsi_bounded((closes, window) in closes_and_window()) {
        let series = calculate_rsi(&closes, window).unwrap();
        for (i, v) in series.values.iter().enumerate() {
            match v {
                Some(rsi) => prop_assert!((0.0..=100.0).contains(rsi), "RSI {} at {}", rsi, i),
                None => prop_assert!(i < window),
            }
        }
    }

    /// After every bar at most one of units and cash is positive.
    #[test]
    fn single_position_invariant((closes, signals) in closes_and_signals()) {
        let mut state = SimulationState::new(1000.0);
        for (&c, &s) in closes.iter().zip(&signals) {
            state.apply(c, s);
            prop_assert!(!(state.units_held > 0.0 && state.cash > 0.0));
        }
    }

    /// Trajectory length matches input, fills never move the valuation and
    /// reruns are bit-identical.
    #[test]
    fn trajectory_properties((closes, signals) in closes_and_signals()) {
        let sim = PositionSimulator::new(1000.0).unwrap();
        let a = sim.run(&closes, &signals).unwrap();
        let b = sim.run(&closes, &signals).unwrap();

        prop_assert_eq!(a.portfolio_values.len(), closes.len());
        prop_assert_eq!(a.final_value, a.portfolio_values[closes.len() - 1]);
        prop_assert_eq!(&a, &b);

        let mut state = SimulationState::new(1000.0);
        for (&c, &s) in closes.iter().zip(&signals) {
            let before = state.valuation(c);
            if state.apply(c, s).is_some() {
                let after = state.valuation(c);
                prop_assert!((after - before).abs() <= 1e-9 * before.abs().max(1.0));
            }
        }
    }

    /// Signals depend only on the same bar's prediction and close.
    #[test]
    fn signals_are_pointwise(pairs in prop::collection::vec((0.01f64..100.0, 0.01f64..100.0), 0..50)) {
        let (close, predicted): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let signals = generate_signals(&close, &predicted).unwrap();
        for i in 0..close.len() {
            let expected = Signal::from_prediction(predicted[i], close[i]);
            prop_assert_eq!(signals[i], expected);
        }
    }
}
