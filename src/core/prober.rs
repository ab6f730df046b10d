use std::time::{Duration, Instant};

use chrono::Utc;

use crate::config::catalog::Catalog;
use crate::config::ProberConfig;
use crate::domain::model::{ProbeRecord, ProbeSummary, QueryStats};
use crate::domain::ports::{ResultSink, SearchClient};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives the probe loop: one cycle walks the whole catalog in order,
/// timing each search and appending a row to the sink.
pub struct ProberEngine<C: SearchClient, S: ResultSink> {
    client: C,
    sink: S,
    catalog: Catalog,
    query_interval: Duration,
    test_duration: Option<Duration>,
    monitor: SystemMonitor,
    stats: Vec<QueryStats>,
    cycles: u64,
}

impl<C: SearchClient, S: ResultSink> ProberEngine<C, S> {
    pub fn new(client: C, sink: S, catalog: Catalog, config: &ProberConfig) -> Self {
        Self::new_with_monitoring(client, sink, catalog, config, false)
    }

    pub fn new_with_monitoring(
        client: C,
        sink: S,
        catalog: Catalog,
        config: &ProberConfig,
        monitor_enabled: bool,
    ) -> Self {
        let stats = catalog
            .queries()
            .iter()
            .map(|q| QueryStats::new(&q.name))
            .collect();

        Self {
            client,
            sink,
            catalog,
            query_interval: Duration::from_secs_f64(config.query_interval.max(0.0)),
            test_duration: config
                .test_duration
                .map(|d| Duration::from_secs_f64(d.max(0.0))),
            monitor: SystemMonitor::new(monitor_enabled),
            stats,
            cycles: 0,
        }
    }

    /// Probes until the deadline passes. The deadline is checked per cycle;
    /// a started catalog pass always completes.
    pub async fn run(mut self) -> ProbeSummary {
        let deadline = self.test_duration.map(|d| Instant::now() + d);

        loop {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break;
                }
            }
            self.run_cycle().await;
        }

        self.monitor.log_final_stats();
        self.summary()
    }

    /// One pass over the catalog.
    pub async fn run_cycle(&mut self) {
        self.cycles += 1;

        for index in 0..self.catalog.len() {
            let name = self.catalog.queries()[index].name.clone();
            tracing::info!("Executing query '{}'...", name);

            match self.probe_once(index).await {
                Ok(duration) => {
                    let stats = &mut self.stats[index];
                    stats.record(duration);
                    tracing::info!(
                        "Query '{}' average time: {:.6} seconds",
                        name,
                        stats.average()
                    );
                }
                Err(e) => {
                    // 單一查詢失敗不中斷整體探測
                    self.stats[index].record_failure();
                    tracing::error!("Query '{}' failed: {}", name, e);
                }
            }

            tracing::debug!("Sleeping {:.0} seconds...", self.query_interval.as_secs_f64());
            tokio::time::sleep(self.query_interval).await;
        }

        self.monitor.log_cycle_stats(self.cycles);
    }

    async fn probe_once(&mut self, index: usize) -> Result<f64> {
        let query = self.catalog.queries()[index].clone();
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string();

        let started = Instant::now();
        self.client.search(&query).await?;
        let duration = started.elapsed().as_secs_f64();

        self.sink.append(&ProbeRecord {
            timestamp,
            name: query.name,
            duration,
        })?;

        Ok(duration)
    }

    pub fn summary(&self) -> ProbeSummary {
        ProbeSummary {
            cycles: self.cycles,
            per_query: self.stats.clone(),
        }
    }
}
