//! Seeded synthetic customer arrivals.
//!
//! Arrival times are uniform over `[0, horizon)` and requested service
//! durations uniform over `[0, max_service_seconds)`. The same seed always
//! yields the same sequence, so both queue models can be fed identical
//! traffic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

use crate::Event;
use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};

pub struct ArrivalGenerator {
    rng: StdRng,
    arrival_time: Uniform<usize>,
    duration: Uniform<usize>,
    next_customer_id: usize,
}

impl ArrivalGenerator {
    pub fn new(horizon: usize, max_service_seconds: usize, seed: u64) -> SimResult<ArrivalGenerator> {
        let arrival_time = Uniform::new(0, horizon)
            .map_err(|e| SimError::invalid("horizon", e.to_string()))?;
        let duration = Uniform::new(0, max_service_seconds)
            .map_err(|e| SimError::invalid("max service minutes", e.to_string()))?;
        Ok(ArrivalGenerator {
            rng: StdRng::seed_from_u64(seed),
            arrival_time,
            duration,
            next_customer_id: 0,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> SimResult<ArrivalGenerator> {
        ArrivalGenerator::new(config.horizon, config.max_service_seconds(), config.seed)
    }

    pub fn next_arrival(&mut self) -> Event {
        let customer_id = self.next_customer_id;
        self.next_customer_id += 1;
        let event_time = self.arrival_time.sample(&mut self.rng);
        let duration = self.duration.sample(&mut self.rng);
        Event::arrival(customer_id, event_time, duration)
    }

    /// Draw `count` arrivals with sequential customer IDs.
    pub fn generate(&mut self, count: usize) -> Vec<Event> {
        (0..count).map(|_| self.next_arrival()).collect()
    }
}
