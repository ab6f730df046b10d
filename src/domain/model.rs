use serde::{Deserialize, Serialize};

/// A named search probe: `path` is the index-pattern part of the URL,
/// `body` the JSON search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    pub path: String,
    pub body: serde_json::Value,
}

/// One CSV row: when the probe started, which query, how long it took (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub timestamp: String,
    pub name: String,
    pub duration: f64,
}

#[derive(Debug, Clone, Default)]
pub struct QueryStats {
    pub name: String,
    pub samples: u64,
    pub failures: u64,
    total_duration: f64,
}

impl QueryStats {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, duration: f64) {
        self.samples += 1;
        self.total_duration += duration;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn average(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.total_duration / self.samples as f64
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeSummary {
    pub cycles: u64,
    pub per_query: Vec<QueryStats>,
}

impl ProbeSummary {
    pub fn total_samples(&self) -> u64 {
        self.per_query.iter().map(|s| s.samples).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.per_query.iter().map(|s| s.failures).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_average_over_all_samples() {
        let mut stats = QueryStats::new("service.node.name-term");
        stats.record(0.2);
        stats.record(0.4);
        stats.record(0.6);
        assert_eq!(stats.samples, 3);
        assert!((stats.average() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_stats_average_empty_is_zero() {
        let stats = QueryStats::new("empty");
        assert_eq!(stats.average(), 0.0);
    }

    #[test]
    fn test_failures_do_not_skew_average() {
        let mut stats = QueryStats::new("flaky");
        stats.record(1.0);
        stats.record_failure();
        assert_eq!(stats.samples, 1);
        assert_eq!(stats.failures, 1);
        assert!((stats.average() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_totals() {
        let mut a = QueryStats::new("a");
        a.record(0.1);
        let mut b = QueryStats::new("b");
        b.record(0.2);
        b.record_failure();

        let summary = ProbeSummary {
            cycles: 1,
            per_query: vec![a, b],
        };
        assert_eq!(summary.total_samples(), 2);
        assert_eq!(summary.total_failures(), 1);
    }
}
