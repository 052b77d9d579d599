use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::{DEFAULT_CASHIERS, DEFAULT_HORIZON, DEFAULT_TELLERS, SECONDS_PER_MINUTE};

/// Largest customer count a run will generate; arrival sets are held in memory
pub const MAX_CUSTOMERS: usize = 10_000_000;

/// When a routed supermarket customer is scheduled to leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DepartureRule {
    /// Leave at `now + backlog`, where backlog already includes this customer.
    /// Later departures on a busy cashier drift by the whole queue ahead.
    #[default]
    Cumulative,
    /// Leave at `now + duration`; the backlog is only used for routing and
    /// the reported total service time.
    OwnDuration,
}

/// Parameters for one bank vs. supermarket comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Customers per minute
    pub arrival_rate: f64,
    /// Upper bound (exclusive) on a customer's requested service, in minutes
    pub max_service_minutes: f64,
    pub seed: u64,

    /// Simulation cutoff, in seconds
    pub horizon: usize,
    pub tellers: usize,
    pub cashiers: usize,
    pub departure_rule: DepartureRule,
}

impl SimulationConfig {
    pub fn new(arrival_rate: f64, max_service_minutes: f64, seed: u64) -> Self {
        SimulationConfig {
            arrival_rate,
            max_service_minutes,
            seed,
            ..Self::default()
        }
    }

    /// Truncate a floating-point seed argument toward zero.
    ///
    /// Negative and NaN seeds saturate to 0.
    pub fn seed_from_f64(seed: f64) -> u64 {
        seed as u64
    }

    pub fn total_minutes(&self) -> usize {
        self.horizon / SECONDS_PER_MINUTE
    }

    /// Number of synthetic customers generated for the run
    pub fn total_customers(&self) -> usize {
        (self.arrival_rate * self.total_minutes() as f64).round() as usize
    }

    pub fn max_service_seconds(&self) -> usize {
        (self.max_service_minutes * SECONDS_PER_MINUTE as f64) as usize
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.arrival_rate.is_finite() || self.arrival_rate < 0.0 {
            return Err(SimError::invalid(
                "arrival rate",
                format!("expected a non-negative number, got {}", self.arrival_rate),
            ));
        }
        let customers = (self.arrival_rate * self.total_minutes() as f64).round();
        if customers > MAX_CUSTOMERS as f64 {
            return Err(SimError::invalid(
                "arrival rate",
                format!(
                    "{} customers/min over {} minutes exceeds the {} customer limit",
                    self.arrival_rate,
                    self.total_minutes(),
                    MAX_CUSTOMERS
                ),
            ));
        }
        if !self.max_service_minutes.is_finite() || self.max_service_seconds() == 0 {
            return Err(SimError::invalid(
                "max service minutes",
                format!(
                    "must allow at least one second of service, got {}",
                    self.max_service_minutes
                ),
            ));
        }
        if self.horizon == 0 {
            return Err(SimError::invalid("horizon", "must be at least one second"));
        }
        if self.tellers == 0 {
            return Err(SimError::invalid("tellers", "need at least one teller"));
        }
        if self.cashiers == 0 {
            return Err(SimError::invalid("cashiers", "need at least one cashier"));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            arrival_rate: 0.0,
            max_service_minutes: 1.0,
            seed: 0,
            horizon: DEFAULT_HORIZON,
            tellers: DEFAULT_TELLERS,
            cashiers: DEFAULT_CASHIERS,
            departure_rule: DepartureRule::Cumulative,
        }
    }
}
