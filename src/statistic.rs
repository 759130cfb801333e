use std::collections::{HashMap, HashSet};

use crate::extract::{Algorithm, Extractors, LineFacts, RequestRecord};

/// All running counters for one report run. Zero-initialized, owned by a
/// single [`Aggregator`], or produced per chunk and folded with [`merge`].
///
/// [`merge`]: AggregateState::merge
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AggregateState {
    pub total_requests: u64,
    pub endpoint_counts: HashMap<String, u64>,
    pub status_counts: HashMap<String, u64>,
    pub endpoint_times: HashMap<String, Vec<f64>>,
    pub unique_ids: HashSet<String>,
    pub batch_counts: HashMap<String, u64>,
    pub algorithm_counts: HashMap<Algorithm, u64>,
    pub timetable_hits: u64,
}

impl AggregateState {
    pub fn fold(&mut self, facts: LineFacts) {
        if let Some(request) = facts.request {
            self.fold_request(request);
        }
        for id in facts.identifiers {
            self.record_identifier(id);
        }
        for algorithm in facts.algorithms {
            *self.algorithm_counts.entry(algorithm).or_default() += 1;
        }
    }

    fn fold_request(&mut self, request: RequestRecord) {
        self.total_requests += 1;
        if request.endpoint.contains("/generate") {
            self.timetable_hits += 1;
        }
        if let Some(ms) = request.response_time_ms {
            self.endpoint_times
                .entry(request.endpoint.clone())
                .or_default()
                .push(ms);
        }
        *self.status_counts.entry(request.status).or_default() += 1;
        *self.endpoint_counts.entry(request.endpoint).or_default() += 1;
    }

    fn record_identifier(&mut self, id: String) {
        // the extractor guarantees a 4-digit ASCII prefix
        let batch = id[..4].to_string();
        if self.unique_ids.insert(id) {
            *self.batch_counts.entry(batch).or_default() += 1;
        }
    }

    /// Fold another partial state into this one. Commutative and
    /// associative, so chunk boundaries never change the final report.
    pub fn merge(&mut self, other: AggregateState) {
        self.total_requests += other.total_requests;
        self.timetable_hits += other.timetable_hits;
        for (endpoint, count) in other.endpoint_counts {
            *self.endpoint_counts.entry(endpoint).or_default() += count;
        }
        for (status, count) in other.status_counts {
            *self.status_counts.entry(status).or_default() += count;
        }
        for (endpoint, times) in other.endpoint_times {
            self.endpoint_times.entry(endpoint).or_default().extend(times);
        }
        for (algorithm, count) in other.algorithm_counts {
            *self.algorithm_counts.entry(algorithm).or_default() += count;
        }
        // batch counts follow the set union rather than a map sum: an id
        // seen in two chunks must still count once in its batch
        for id in other.unique_ids {
            self.record_identifier(id);
        }
    }
}

#[derive(Default)]
pub struct Aggregator {
    extractors: Extractors,
    state: AggregateState,
}

impl Aggregator {
    pub fn new() -> Aggregator {
        Aggregator::default()
    }

    pub fn ingest(&mut self, line: &str) {
        let facts = self.extractors.classify(line);
        self.state.fold(facts);
    }

    pub fn finish(self) -> AggregateState {
        self.state
    }
}
