use des::EventLoop;
use log::info;
use serde::Serialize;

use crate::arrivals::ArrivalGenerator;
use crate::bank::Bank;
use crate::config::{DepartureRule, SimulationConfig};
use crate::error::SimResult;
use crate::grocery::Grocery;
use crate::percentiles::Percentiles;
use crate::{BankStats, Event, GroceryStats, Stats};

pub const BANK_LABEL: &str = "Bank";
pub const GROCERY_LABEL: &str = "Supermarket";

/// Run the bank model over `arrivals` until the scheduler drains or the
/// next event lies past `horizon`.
pub fn run_bank(arrivals: &[Event], tellers: usize, horizon: usize) -> BankStats {
    let initial_events = arrivals.iter().cloned().map(Event::scheduled).collect();
    let agents: Vec<Box<dyn des::Agent<Event, Stats>>> = vec![Box::new(Bank::new(tellers))];

    let mut event_loop: EventLoop<Event, Stats> = EventLoop::new(initial_events, agents);
    event_loop.run(horizon);

    info!(
        "Bank run stopped at t={} after {} events ({} left unprocessed)",
        event_loop.current_t(),
        event_loop.processed(),
        event_loop.pending()
    );

    match event_loop.stats().into_iter().next() {
        Some(Stats::Bank(stats)) => stats,
        _ => unreachable!("bank event loop holds a single Bank agent"),
    }
}

/// Run the supermarket model over `arrivals`, see [`run_bank`].
pub fn run_grocery(
    arrivals: &[Event],
    cashiers: usize,
    rule: DepartureRule,
    horizon: usize,
) -> GroceryStats {
    let initial_events = arrivals.iter().cloned().map(Event::scheduled).collect();
    let agents: Vec<Box<dyn des::Agent<Event, Stats>>> =
        vec![Box::new(Grocery::new(cashiers, rule))];

    let mut event_loop: EventLoop<Event, Stats> = EventLoop::new(initial_events, agents);
    event_loop.run(horizon);

    info!(
        "Supermarket run stopped at t={} after {} events ({} left unprocessed)",
        event_loop.current_t(),
        event_loop.processed(),
        event_loop.pending()
    );

    match event_loop.stats().into_iter().next() {
        Some(Stats::Grocery(stats)) => stats,
        _ => unreachable!("grocery event loop holds a single Grocery agent"),
    }
}

/// Both models run over the same arrivals
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub config: SimulationConfig,
    pub arrivals: Vec<Event>,
    pub bank: BankStats,
    pub grocery: GroceryStats,
}

impl ScenarioResult {
    pub fn bank_percentiles(&self) -> SimResult<Percentiles> {
        Percentiles::from_service_times(BANK_LABEL, &self.bank.service_times)
    }

    pub fn grocery_percentiles(&self) -> SimResult<Percentiles> {
        Percentiles::from_service_times(GROCERY_LABEL, &self.grocery.service_times)
    }

    pub fn report(&self) -> SimResult<ScenarioReport> {
        Ok(ScenarioReport {
            config: self.config.clone(),
            total_customers: self.arrivals.len(),
            bank: self.bank_percentiles()?,
            supermarket: self.grocery_percentiles()?,
        })
    }
}

/// Printable / serializable outcome of a scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub config: SimulationConfig,
    pub total_customers: usize,
    pub bank: Percentiles,
    pub supermarket: Percentiles,
}

impl ScenarioReport {
    pub fn print_summary(&self) {
        println!("{}\n", self.bank);
        println!("{}\n", self.supermarket);
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generate arrivals from `config` and feed the same set to both models.
pub fn run_scenario(config: &SimulationConfig) -> SimResult<ScenarioResult> {
    config.validate()?;

    let total_customers = config.total_customers();
    let arrivals = ArrivalGenerator::from_config(config)?.generate(total_customers);
    info!(
        "Generated {} customers over {} minutes (seed {})",
        arrivals.len(),
        config.total_minutes(),
        config.seed
    );

    let bank = run_bank(&arrivals, config.tellers, config.horizon);
    let grocery = run_grocery(&arrivals, config.cashiers, config.departure_rule, config.horizon);

    Ok(ScenarioResult {
        config: config.clone(),
        arrivals,
        bank,
        grocery,
    })
}
