use crate::common::Dimensions;
use crate::core::probe::{ProbeResult, Prober};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Probing(usize),
    StoppedEarly,
    Completed,
}

/// Everything a finished search produced, in probe order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub results: Vec<ProbeResult>,
    pub state: SearchState,
    pub safety_percent: u32,
}

impl SearchReport {
    /// Largest successful probe by pixel area.
    pub fn max_success(&self) -> Option<&ProbeResult> {
        self.results
            .iter()
            .filter(|r| r.success)
            .max_by_key(|r| r.size.area())
    }

    pub fn recommended(&self) -> Option<Dimensions> {
        self.max_success().map(|r| r.size.scaled_percent(self.safety_percent))
    }

    pub fn first_failure(&self) -> Option<&ProbeResult> {
        self.results.iter().find(|r| !r.success)
    }
}

/// Walks the candidate sizes in order and stops at the first failure.
pub struct SearchDriver {
    sizes: Vec<Dimensions>,
    pause: Duration,
    safety_percent: u32,
}

impl SearchDriver {
    pub fn new(sizes: Vec<Dimensions>, pause: Duration, safety_percent: u32) -> Self {
        Self { sizes, pause, safety_percent }
    }

    pub fn run<P: Prober>(&self, prober: &mut P) -> SearchReport {
        let mut results = Vec::with_capacity(self.sizes.len());
        let mut state = if self.sizes.is_empty() {
            SearchState::Completed
        } else {
            SearchState::Probing(0)
        };

        while let SearchState::Probing(index) = state {
            let size = self.sizes[index];
            let result = prober.probe(size);
            let success = result.success;
            results.push(result);

            if success && !self.pause.is_zero() {
                std::thread::sleep(self.pause);
            }

            state = self.next_state(index, success);
            tracing::debug!("{} -> {:?}", size, state);
        }

        SearchReport { results, state, safety_percent: self.safety_percent }
    }

    fn next_state(&self, index: usize, success: bool) -> SearchState {
        if !success {
            SearchState::StoppedEarly
        } else if index + 1 < self.sizes.len() {
            SearchState::Probing(index + 1)
        } else {
            SearchState::Completed
        }
    }
}
