//! Bank vs. supermarket checkout queueing
//!
//! Runs two queueing disciplines over the same synthetic arrivals and
//! compares the service-time percentiles they produce.
//!
//! Key agents:
//! - Bank: one shared FIFO wait line in front of a pool of identical tellers
//! - Grocery: one implicit line per cashier, arrivals join the least busy one
//!
//! Each agent runs inside its own `des::EventLoop`, so the two models never
//! share a scheduler. All times are whole seconds since the simulation start.

pub mod arrivals;
pub mod bank;
pub mod config;
pub mod error;
pub mod grocery;
pub mod percentiles;
pub mod scenario;

pub use config::{DepartureRule, SimulationConfig};
pub use error::{SimError, SimResult};
pub use percentiles::Percentiles;

pub const SECONDS_PER_MINUTE: usize = 60;

/// Length of the simulated business day
pub const SIM_HOURS: usize = 12;

/// 12 hours in seconds
pub const DEFAULT_HORIZON: usize = SIM_HOURS * 60 * SECONDS_PER_MINUTE;

pub const DEFAULT_TELLERS: usize = 6;
pub const DEFAULT_CASHIERS: usize = 6;

/// What happened to a customer at `event_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Customer walks in
    Arrival,

    /// Customer leaves a server
    Departure {
        /// Wait time plus service duration
        total_service_time: usize,
        /// Cashier the customer was routed to (grocery model only)
        server: Option<usize>,
    },
}

/// A customer at one point in simulated time.
///
/// Created as an arrival; [`Event::depart`] consumes it and produces the
/// matching departure. The requested service `duration` never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    customer_id: usize,
    event_time: usize,
    duration: usize,
    kind: EventKind,
}

impl Event {
    pub fn arrival(customer_id: usize, event_time: usize, duration: usize) -> Event {
        Event {
            customer_id,
            event_time,
            duration,
            kind: EventKind::Arrival,
        }
    }

    /// Turn this customer into a departure leaving at `event_time`.
    pub fn depart(self, event_time: usize, total_service_time: usize, server: Option<usize>) -> Event {
        Event {
            event_time,
            kind: EventKind::Departure {
                total_service_time,
                server,
            },
            ..self
        }
    }

    pub fn customer_id(&self) -> usize {
        self.customer_id
    }

    pub fn event_time(&self) -> usize {
        self.event_time
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_arrival(&self) -> bool {
        matches!(self.kind, EventKind::Arrival)
    }

    /// Only departures carry a total service time.
    pub fn total_service_time(&self) -> Option<usize> {
        match self.kind {
            EventKind::Arrival => None,
            EventKind::Departure {
                total_service_time, ..
            } => Some(total_service_time),
        }
    }

    pub fn server(&self) -> Option<usize> {
        match self.kind {
            EventKind::Arrival => None,
            EventKind::Departure { server, .. } => server,
        }
    }

    /// Scheduler entry for this event.
    pub fn scheduled(self) -> (usize, Event) {
        (self.event_time, self)
    }
}

/// Observable state of the bank (single shared line)
#[derive(Debug, Clone, PartialEq)]
pub struct BankStats {
    pub teller_count: usize,
    pub tellers_available: usize,

    /// Completed total service times, in departure order
    pub service_times: Vec<usize>,

    pub total_arrivals: usize,
    pub total_departures: usize,
    pub served_immediately: usize,
    pub total_waited: usize,

    pub wait_line_length: usize,
    pub peak_wait_line_length: usize,
}

impl BankStats {
    pub fn busy_tellers(&self) -> usize {
        self.teller_count - self.tellers_available
    }

    /// Customers admitted but not yet departed: at a teller or in line.
    pub fn in_system(&self) -> usize {
        self.busy_tellers() + self.wait_line_length
    }
}

/// Observable state of the supermarket (one line per cashier)
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryStats {
    pub rule: DepartureRule,

    /// Completed total service times, in departure order
    pub service_times: Vec<usize>,

    pub total_arrivals: usize,
    pub total_departures: usize,

    /// Outstanding committed service seconds per cashier
    pub backlog: Vec<usize>,
    /// Customers ever routed to each cashier
    pub routed: Vec<usize>,
}

impl GroceryStats {
    pub fn cashier_count(&self) -> usize {
        self.backlog.len()
    }

    pub fn in_system(&self) -> usize {
        self.total_arrivals - self.total_departures
    }
}

/// Combined stats enum for DES framework compatibility
#[derive(Debug, Clone, PartialEq)]
pub enum Stats {
    Bank(BankStats),
    Grocery(GroceryStats),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_horizon_is_twelve_hours() {
        assert_eq!(DEFAULT_HORIZON, 43200);
    }

    #[test]
    fn depart_keeps_identity_and_duration() {
        let arrival = Event::arrival(7, 100, 30);
        assert!(arrival.is_arrival());
        assert_eq!(arrival.total_service_time(), None);

        let departure = arrival.depart(145, 45, Some(2));
        assert!(!departure.is_arrival());
        assert_eq!(departure.customer_id(), 7);
        assert_eq!(departure.duration(), 30);
        assert_eq!(departure.event_time(), 145);
        assert_eq!(departure.total_service_time(), Some(45));
        assert_eq!(departure.server(), Some(2));
    }

    #[test]
    fn scheduled_uses_event_time() {
        let (t, event) = Event::arrival(0, 12, 3).scheduled();
        assert_eq!(t, 12);
        assert_eq!(event.customer_id(), 0);
    }
}
