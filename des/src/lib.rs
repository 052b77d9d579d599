//! Minimal discrete-event simulation core.
//!
//! A [`Scheduler`] holds pending events ordered by time. An [`EventLoop`]
//! drains it up to a horizon, handing each event to every registered
//! [`Agent`] and pushing the follow-up events the agents respond with.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{trace, warn};

struct Entry<T> {
    t: usize,
    seq: u64,
    data: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

// BinaryHeap is a max-heap: reverse on time, then on insertion order
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.t.cmp(&self.t).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of events keyed by time.
///
/// Events with equal times come out in the order they were pushed.
pub struct Scheduler<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Scheduler<T> {
        Scheduler {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, t: usize, data: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { t, seq, data });
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<(usize, T)> {
        self.heap.pop().map(|entry| (entry.t, entry.data))
    }

    /// Time of the earliest event without removing it.
    pub fn peek_time(&self) -> Option<usize> {
        self.heap.peek().map(|entry| entry.t)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl<T> FromIterator<(usize, T)> for Scheduler<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut scheduler = Scheduler::new();
        for (t, data) in iter {
            scheduler.push(t, data);
        }
        scheduler
    }
}

/// Follow-up events produced by an agent while handling an event.
pub struct Response<T> {
    pub events: Vec<(usize, T)>,
}

impl<T> Response<T> {
    pub fn new() -> Response<T> {
        Response { events: Vec::new() }
    }

    pub fn event(t: usize, data: T) -> Response<T> {
        Response {
            events: vec![(t, data)],
        }
    }

    pub fn events(events: Vec<(usize, T)>) -> Response<T> {
        Response { events }
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::new()
    }
}

pub trait Agent<T, S> {
    fn act(&mut self, _current_t: usize, _data: &T) -> Response<T> {
        Response::new()
    }

    fn stats(&self) -> S;
}

pub struct EventLoop<T, S> {
    scheduler: Scheduler<T>,
    current_t: usize,
    processed: usize,
    agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> EventLoop<T, S> {
    pub fn new(events: Vec<(usize, T)>, agents: Vec<Box<dyn Agent<T, S>>>) -> EventLoop<T, S> {
        EventLoop {
            scheduler: events.into_iter().collect(),
            current_t: 0,
            processed: 0,
            agents,
        }
    }

    fn broadcast(&mut self) {
        if let Some((t, data)) = self.scheduler.pop() {
            self.current_t = t;
            self.processed += 1;
            trace!("[{}] dispatching event #{}", t, self.processed);
            for agent in &mut self.agents {
                let response = agent.act(self.current_t, &data);
                for (new_t, new_data) in response.events {
                    if new_t < self.current_t {
                        warn!(
                            "[{}] dropping follow-up event scheduled in the past at {}",
                            self.current_t, new_t
                        );
                        continue;
                    }
                    self.scheduler.push(new_t, new_data);
                }
            }
        }
    }

    /// Process events until the scheduler is empty or the next event lies
    /// beyond `until`. Events past the horizon stay in the scheduler.
    pub fn run(&mut self, until: usize) {
        while let Some(t) = self.scheduler.peek_time() {
            if t > until {
                break;
            }
            self.broadcast();
        }
    }

    pub fn stats(&self) -> Vec<S> {
        self.agents.iter().map(|agent| agent.stats()).collect()
    }

    pub fn current_t(&self) -> usize {
        self.current_t
    }

    /// Number of events dispatched so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Number of events still waiting in the scheduler.
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }
}
