//! Bank model: one FIFO wait line shared by a pool of identical tellers.

use std::collections::VecDeque;

use des::{Agent, Response};
use log::debug;

use crate::{BankStats, Event, EventKind, Stats};

pub struct Bank {
    teller_count: usize,
    tellers_available: usize,
    wait_line: VecDeque<Event>,
    service_times: Vec<usize>,
    total_arrivals: usize,
    served_immediately: usize,
    total_waited: usize,
    peak_wait_line_length: usize,
}

impl Bank {
    pub fn new(teller_count: usize) -> Bank {
        Bank {
            teller_count,
            tellers_available: teller_count,
            wait_line: VecDeque::new(),
            service_times: Vec::new(),
            total_arrivals: 0,
            served_immediately: 0,
            total_waited: 0,
            peak_wait_line_length: 0,
        }
    }

    /// Customer IDs currently in line, front first.
    pub fn wait_line(&self) -> impl Iterator<Item = usize> + '_ {
        self.wait_line.iter().map(Event::customer_id)
    }

    fn arrive(&mut self, current_t: usize, customer: Event) -> Response<Event> {
        self.total_arrivals += 1;

        if self.tellers_available > 0 {
            self.tellers_available -= 1;
            self.served_immediately += 1;
            let duration = customer.duration();
            debug!(
                "[{}] Customer {} goes straight to a teller ({} free)",
                current_t,
                customer.customer_id(),
                self.tellers_available
            );
            let departure = customer.depart(current_t + duration, duration, None);
            Response::event(departure.event_time(), departure)
        } else {
            debug!(
                "[{}] Customer {} joins the line behind {} others",
                current_t,
                customer.customer_id(),
                self.wait_line.len()
            );
            self.wait_line.push_back(customer);
            self.peak_wait_line_length = self.peak_wait_line_length.max(self.wait_line.len());
            Response::new()
        }
    }

    fn depart(&mut self, current_t: usize, total_service_time: usize) -> Response<Event> {
        self.service_times.push(total_service_time);

        match self.wait_line.pop_front() {
            Some(next) => {
                // the freed teller goes straight to the head of the line
                self.total_waited += 1;
                let duration = next.duration();
                let total = current_t - next.event_time() + duration;
                debug!(
                    "[{}] Customer {} leaves the line after waiting {}s",
                    current_t,
                    next.customer_id(),
                    current_t - next.event_time()
                );
                let departure = next.depart(current_t + duration, total, None);
                Response::event(departure.event_time(), departure)
            }
            None => {
                self.tellers_available += 1;
                Response::new()
            }
        }
    }
}

impl Agent<Event, Stats> for Bank {
    fn act(&mut self, current_t: usize, data: &Event) -> Response<Event> {
        match data.kind() {
            EventKind::Arrival => self.arrive(current_t, data.clone()),
            EventKind::Departure {
                total_service_time, ..
            } => self.depart(current_t, total_service_time),
        }
    }

    fn stats(&self) -> Stats {
        Stats::Bank(BankStats {
            teller_count: self.teller_count,
            tellers_available: self.tellers_available,
            service_times: self.service_times.clone(),
            total_arrivals: self.total_arrivals,
            total_departures: self.service_times.len(),
            served_immediately: self.served_immediately,
            total_waited: self.total_waited,
            wait_line_length: self.wait_line.len(),
            peak_wait_line_length: self.peak_wait_line_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_stats(bank: &Bank) -> BankStats {
        match bank.stats() {
            Stats::Bank(stats) => stats,
            _ => panic!("Expected BankStats"),
        }
    }

    #[test]
    fn free_teller_serves_immediately() {
        let mut bank = Bank::new(2);
        let response = bank.act(10, &Event::arrival(0, 10, 30));

        assert_eq!(response.events.len(), 1);
        let (t, departure) = &response.events[0];
        assert_eq!(*t, 40);
        assert_eq!(departure.total_service_time(), Some(30));
        assert_eq!(bank_stats(&bank).tellers_available, 1);
    }

    #[test]
    fn busy_tellers_queue_the_customer_unchanged() {
        let mut bank = Bank::new(1);
        bank.act(0, &Event::arrival(0, 0, 30));
        let response = bank.act(5, &Event::arrival(1, 5, 30));

        assert!(response.events.is_empty());
        assert_eq!(bank.wait_line().collect::<Vec<_>>(), vec![1]);
        assert_eq!(bank.wait_line.front(), Some(&Event::arrival(1, 5, 30)));
    }

    #[test]
    fn departure_hands_teller_to_head_of_line() {
        let mut bank = Bank::new(1);
        bank.act(0, &Event::arrival(0, 0, 30));
        bank.act(5, &Event::arrival(1, 5, 20));

        let departure = Event::arrival(0, 0, 30).depart(30, 30, None);
        let response = bank.act(30, &departure);

        assert_eq!(response.events.len(), 1);
        let (t, next) = &response.events[0];
        assert_eq!(next.customer_id(), 1);
        assert_eq!(*t, 50);
        // waited 25s, served 20s
        assert_eq!(next.total_service_time(), Some(45));

        let stats = bank_stats(&bank);
        assert_eq!(stats.service_times, vec![30]);
        assert_eq!(stats.tellers_available, 0);
        assert_eq!(stats.total_waited, 1);
    }

    #[test]
    fn departure_with_empty_line_frees_teller() {
        let mut bank = Bank::new(1);
        bank.act(0, &Event::arrival(0, 0, 30));
        let response = bank.act(30, &Event::arrival(0, 0, 30).depart(30, 30, None));

        assert!(response.events.is_empty());
        assert_eq!(bank_stats(&bank).tellers_available, 1);
    }
}
