//! Supermarket model: every cashier keeps its own line and each arrival is
//! routed to the cashier with the least outstanding work.

use des::{Agent, Response};
use log::debug;

use crate::config::DepartureRule;
use crate::{Event, EventKind, GroceryStats, Stats};

pub struct Grocery {
    rule: DepartureRule,
    // committed but unfinished service seconds, per cashier
    backlog: Vec<usize>,
    routed: Vec<usize>,
    service_times: Vec<usize>,
    total_arrivals: usize,
}

impl Grocery {
    pub fn new(cashier_count: usize, rule: DepartureRule) -> Grocery {
        Grocery {
            rule,
            backlog: vec![0; cashier_count],
            routed: vec![0; cashier_count],
            service_times: Vec::new(),
            total_arrivals: 0,
        }
    }

    /// Index of the cashier with the smallest backlog. Ties go to the lowest index.
    pub fn shortest_line(&self) -> usize {
        // min_by_key keeps the first of equal minima
        self.backlog
            .iter()
            .enumerate()
            .min_by_key(|(_, busy)| **busy)
            .map_or(0, |(i, _)| i)
    }

    pub fn backlog(&self) -> &[usize] {
        &self.backlog
    }

    fn arrive(&mut self, current_t: usize, customer: Event) -> Response<Event> {
        self.total_arrivals += 1;

        let cashier = self.shortest_line();
        let duration = customer.duration();
        let total_service_time = self.backlog[cashier] + duration;
        self.backlog[cashier] += duration;
        self.routed[cashier] += 1;

        let leave_at = match self.rule {
            DepartureRule::Cumulative => current_t + self.backlog[cashier],
            DepartureRule::OwnDuration => current_t + duration,
        };
        debug!(
            "[{}] Customer {} routed to cashier {} (backlog now {}s)",
            current_t,
            customer.customer_id(),
            cashier,
            self.backlog[cashier]
        );

        let departure = customer.depart(leave_at, total_service_time, Some(cashier));
        Response::event(departure.event_time(), departure)
    }

    fn depart(&mut self, current_t: usize, customer: &Event, total_service_time: usize) -> Response<Event> {
        let Some(cashier) = customer.server() else {
            unreachable!(
                "[{}] customer {} departed without a cashier; only Grocery::arrive schedules supermarket departures",
                current_t,
                customer.customer_id()
            );
        };
        self.backlog[cashier] -= customer.duration();
        self.service_times.push(total_service_time);
        Response::new()
    }
}

impl Agent<Event, Stats> for Grocery {
    fn act(&mut self, current_t: usize, data: &Event) -> Response<Event> {
        match data.kind() {
            EventKind::Arrival => self.arrive(current_t, data.clone()),
            EventKind::Departure {
                total_service_time, ..
            } => self.depart(current_t, data, total_service_time),
        }
    }

    fn stats(&self) -> Stats {
        Stats::Grocery(GroceryStats {
            rule: self.rule,
            service_times: self.service_times.clone(),
            total_arrivals: self.total_arrivals,
            total_departures: self.service_times.len(),
            backlog: self.backlog.clone(),
            routed: self.routed.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_line_prefers_lowest_index_on_ties() {
        let mut grocery = Grocery::new(4, DepartureRule::Cumulative);
        assert_eq!(grocery.shortest_line(), 0);

        grocery.backlog = vec![5, 3, 3, 9];
        assert_eq!(grocery.shortest_line(), 1);

        grocery.backlog = vec![2, 3, 3, 2];
        assert_eq!(grocery.shortest_line(), 0);
    }

    #[test]
    fn arrival_joins_least_busy_cashier_and_counts_backlog() {
        let mut grocery = Grocery::new(2, DepartureRule::Cumulative);
        grocery.backlog = vec![40, 10];

        let response = grocery.act(100, &Event::arrival(3, 100, 25));

        let (t, departure) = &response.events[0];
        assert_eq!(departure.server(), Some(1));
        assert_eq!(departure.total_service_time(), Some(35));
        // cumulative rule: now + post-increment backlog
        assert_eq!(*t, 135);
        assert_eq!(grocery.backlog(), &[40, 35]);
    }

    #[test]
    fn own_duration_rule_schedules_by_customer_duration() {
        let mut grocery = Grocery::new(2, DepartureRule::OwnDuration);
        grocery.backlog = vec![40, 10];

        let response = grocery.act(100, &Event::arrival(3, 100, 25));

        let (t, departure) = &response.events[0];
        assert_eq!(*t, 125);
        assert_eq!(departure.total_service_time(), Some(35));
        assert_eq!(grocery.backlog(), &[40, 35]);
    }

    #[test]
    fn departure_releases_backlog_and_records_time() {
        let mut grocery = Grocery::new(2, DepartureRule::Cumulative);
        let response = grocery.act(0, &Event::arrival(0, 0, 25));
        let (t, departure) = response.events.into_iter().next().unwrap();

        grocery.act(t, &departure);

        assert_eq!(grocery.backlog(), &[0, 0]);
        match grocery.stats() {
            Stats::Grocery(stats) => {
                assert_eq!(stats.service_times, vec![25]);
                assert_eq!(stats.routed, vec![1, 0]);
                assert_eq!(stats.in_system(), 0);
            }
            _ => panic!("Expected GroceryStats"),
        }
    }

    #[test]
    #[should_panic(expected = "without a cashier")]
    fn departure_without_cashier_is_rejected() {
        let mut grocery = Grocery::new(2, DepartureRule::Cumulative);
        grocery.act(0, &Event::arrival(0, 0, 25));

        grocery.act(25, &Event::arrival(0, 0, 25).depart(25, 25, None));
    }
}
