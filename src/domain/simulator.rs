//! Single-position long/flat simulator.
//!
//! Signals are consumed strictly in bar order; each decision depends only on
//! the current signal and the state carried from the previous bar.
//!
//! - FLAT + BUY  -> LONG: units = cash / close, cash = 0
//! - LONG + SELL -> FLAT: cash = units * close, units = 0
//! - anything else leaves the state unchanged
//!
//! Valuation at bar i is cash when FLAT, units * close[i] when LONG.

use super::error::PredtraderError;
use super::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Flat,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub position: Position,
    pub units_held: f64,
    pub cash: f64,
}

impl SimulationState {
    pub fn new(initial_capital: f64) -> Self {
        SimulationState {
            position: Position::Flat,
            units_held: 0.0,
            cash: initial_capital,
        }
    }

    pub fn is_long(&self) -> bool {
        self.position == Position::Long
    }

    pub fn valuation(&self, close: f64) -> f64 {
        match self.position {
            Position::Flat => self.cash,
            Position::Long => self.units_held * close,
        }
    }

    /// Apply one bar's signal. Returns the side that filled, if any.
    pub fn apply(&mut self, close: f64, signal: Signal) -> Option<Signal> {
        match (self.position, signal) {
            (Position::Flat, Signal::Buy) => {
                self.units_held = self.cash / close;
                self.cash = 0.0;
                self.position = Position::Long;
                Some(Signal::Buy)
            }
            (Position::Long, Signal::Sell) => {
                self.cash = self.units_held * close;
                self.units_held = 0.0;
                self.position = Position::Flat;
                Some(Signal::Sell)
            }
            _ => None,
        }
    }
}

/// One entry and its matching exit; `exit_*` are `None` while still open.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_index: usize,
    pub entry_price: f64,
    pub units: f64,
    pub exit_index: Option<usize>,
    pub exit_price: Option<f64>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.exit_index.is_none()
    }

    /// Realised profit, or `None` while open.
    pub fn pnl(&self) -> Option<f64> {
        self.exit_price
            .map(|exit| self.units * (exit - self.entry_price))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub portfolio_values: Vec<f64>,
    pub final_value: f64,
    pub final_state: SimulationState,
    pub trades: Vec<Trade>,
}

impl Simulation {
    pub fn closed_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| !t.is_open())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSimulator {
    initial_capital: f64,
}

impl PositionSimulator {
    pub fn new(initial_capital: f64) -> Result<Self, PredtraderError> {
        if !(initial_capital.is_finite() && initial_capital > 0.0) {
            return Err(PredtraderError::NonPositiveCapital {
                capital: initial_capital,
            });
        }
        Ok(PositionSimulator { initial_capital })
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn run(&self, close: &[f64], signals: &[Signal]) -> Result<Simulation, PredtraderError> {
        if close.len() != signals.len() {
            return Err(PredtraderError::LengthMismatch {
                left: close.len(),
                right: signals.len(),
            });
        }
        if close.is_empty() {
            return Err(PredtraderError::EmptySeries);
        }

        let mut state = SimulationState::new(self.initial_capital);
        let mut portfolio_values = Vec::with_capacity(close.len());
        let mut trades: Vec<Trade> = Vec::new();

        for (i, (&price, &signal)) in close.iter().zip(signals).enumerate() {
            // only an entry divides by the close
            let enters = signal == Signal::Buy && !state.is_long();
            if enters && !(price.is_finite() && price > 0.0) {
                return Err(PredtraderError::NonPositivePrice { index: i, price });
            }
            match state.apply(price, signal) {
                Some(Signal::Buy) => trades.push(Trade {
                    entry_index: i,
                    entry_price: price,
                    units: state.units_held,
                    exit_index: None,
                    exit_price: None,
                }),
                Some(Signal::Sell) => {
                    if let Some(open) = trades.last_mut() {
                        open.exit_index = Some(i);
                        open.exit_price = Some(price);
                    }
                }
                _ => {}
            }
            portfolio_values.push(state.valuation(price));
        }

        let final_value = portfolio_values[portfolio_values.len() - 1];
        tracing::debug!(
            bars = close.len(),
            trades = trades.len(),
            final_value,
            "simulation complete"
        );

        Ok(Simulation {
            portfolio_values,
            final_value,
            final_state: state,
            trades,
        })
    }
}
