//! The region-by-region collection loop.

use std::time::{Duration, Instant};

use skatequest_core::{ParkRecord, Result};
use skatequest_overpass::{
    DEFAULT_ADMIN_LEVEL, DEFAULT_QUERY_TIMEOUT_SECS, OverpassConfig, OverpassQuery,
    OverpassService,
};

use crate::{
    CollectionReport, CollectorConfig, DEFAULT_REQUEST_DELAY_MS, RegionReport, TRACING_TARGET,
    park_record, write_records,
};

/// Collects skatepark records region by region.
///
/// Regions are queried strictly one after another. After each region except
/// the last, the collector sleeps for the configured delay so the shared
/// public Overpass instance is not hammered. There is no retry: a failed
/// region is logged, reported, and contributes no records.
#[derive(Debug, Clone)]
pub struct Collector {
    service: OverpassService,
    admin_level: u8,
    query_timeout: u64,
    request_delay: Duration,
}

impl Collector {
    /// Creates a collector on top of an Overpass service.
    pub fn new(service: OverpassService) -> Self {
        Self {
            service,
            admin_level: DEFAULT_ADMIN_LEVEL,
            query_timeout: DEFAULT_QUERY_TIMEOUT_SECS,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
        }
    }

    /// Takes the query settings (admin level, server timeout) from a client configuration.
    #[must_use]
    pub fn with_overpass_config(mut self, config: &OverpassConfig) -> Self {
        self.admin_level = config.admin_level;
        self.query_timeout = config.query_timeout;
        self
    }

    /// Sets the pause between two region queries.
    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Returns the pause between two region queries.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Builds the query for one region.
    fn query_for(&self, region: &str) -> OverpassQuery {
        OverpassQuery::skateparks(region)
            .with_admin_level(self.admin_level)
            .with_server_timeout(self.query_timeout)
    }

    /// Queries one region and maps the result to records.
    ///
    /// Never fails: any query error is logged and turned into a failed
    /// [`RegionReport`] with no records.
    pub async fn collect_region(&self, region: &str) -> (Vec<ParkRecord>, RegionReport) {
        let query = self.query_for(region);

        let response = match self.service.query(&query).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    region = %region,
                    error = %error,
                    "Error fetching {region}: {error}"
                );
                return (Vec::new(), RegionReport::failed(region, error.to_string()));
            }
        };

        let total_elements = response.elements.len();
        let records: Vec<ParkRecord> = response
            .elements
            .iter()
            .filter_map(|element| park_record(element, region))
            .collect();

        tracing::info!(
            target: TRACING_TARGET,
            region = %region,
            records = records.len(),
            skipped = total_elements - records.len(),
            "Found {} skateparks in {region}",
            records.len()
        );

        let report = RegionReport::succeeded(region, records.len());
        (records, report)
    }

    /// Queries every region in order and accumulates the results.
    pub async fn collect<S>(&self, regions: &[S]) -> CollectionReport
    where
        S: AsRef<str>,
    {
        let started_at = Instant::now();
        let total = regions.len();

        tracing::info!(
            target: TRACING_TARGET,
            regions = total,
            request_delay_ms = self.request_delay.as_millis(),
            "Fetching skateparks from OpenStreetMap"
        );

        let mut report = CollectionReport::new();
        for (index, region) in regions.iter().enumerate() {
            let region = region.as_ref();
            tracing::info!(
                target: TRACING_TARGET,
                region = %region,
                "[{}/{total}] {region}",
                index + 1
            );

            let (records, region_report) = self.collect_region(region).await;
            report = report.with_region(records, region_report);

            if index + 1 < total && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        tracing::info!(
            target: TRACING_TARGET,
            total = report.total(),
            succeeded = report.succeeded_regions().count(),
            failed = report.failed_regions().count(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Total skateparks fetched: {}",
            report.total()
        );

        report
    }

    /// Runs a full collection and writes the output file.
    ///
    /// Regions, pause and output path all come from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid or the output
    /// cannot be written; region failures are part of the report.
    pub async fn run(&self, config: &CollectorConfig) -> Result<CollectionReport> {
        config.validate()?;

        let regions = config.regions();
        let collector = self.clone().with_request_delay(config.request_delay());
        let report = collector.collect(&regions).await;
        write_records(&config.output, &report.records).await?;

        tracing::info!(
            target: TRACING_TARGET,
            path = %config.output.display(),
            total = report.total(),
            "Saved to {}",
            config.output.display()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use skatequest_core::ErrorKind;
    use skatequest_overpass::{Center, Element};

    use super::*;
    use crate::MockProvider;

    fn collector(mock: &MockProvider) -> Collector {
        Collector::new(mock.service()).with_request_delay(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn point_element_yields_one_record() {
        let mock = MockProvider::new().with_elements(
            "Oregon",
            vec![Element::node(1, 45.52, -122.68).with_tag("name", "Burnside")],
        );

        let (records, report) = collector(&mock).collect_region("Oregon").await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lat, 45.52);
        assert_eq!(records[0].lng, -122.68);
        assert_eq!(records[0].category, "park");
        assert_eq!(records[0].name, "Burnside");
        assert_eq!(report, RegionReport::succeeded("Oregon", 1));
    }

    #[tokio::test]
    async fn area_element_uses_centroid() {
        let mock = MockProvider::new().with_elements(
            "Arizona",
            vec![Element::way(22, Some(Center::new(33.45, -112.07)))],
        );

        let (records, _) = collector(&mock).collect_region("Arizona").await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "osm-way-22");
        assert_eq!(records[0].lat, 33.45);
        assert_eq!(records[0].lng, -112.07);
        assert_eq!(records[0].name, "Skatepark in Arizona");
    }

    #[tokio::test]
    async fn elements_without_position_are_skipped() {
        let mut bare_node = Element::node(3, 0.0, 0.0);
        bare_node.lat = None;
        bare_node.lon = None;

        let mock = MockProvider::new().with_elements(
            "Nevada",
            vec![Element::way(1, None), bare_node, Element::node(4, 36.1, -115.1)],
        );

        let (records, report) = collector(&mock).collect_region("Nevada").await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "osm-node-4");
        assert_eq!(report.record_count(), 1);
    }

    #[tokio::test]
    async fn failed_region_yields_nothing() {
        let mock = MockProvider::new().with_failure(
            "Texas",
            ErrorKind::ExternalError,
            "HTTP status 400: syntax error",
        );

        let (records, report) = collector(&mock).collect_region("Texas").await;

        assert!(records.is_empty());
        assert!(!report.is_success());
        assert!(report.error().unwrap().contains("syntax error"));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_does_not_stop_the_run() {
        let mock = MockProvider::new()
            .with_elements("Alabama", vec![Element::node(1, 32.4, -86.3)])
            .with_failure("Alaska", ErrorKind::NetworkError, "Connection failed")
            .with_elements(
                "Arizona",
                vec![
                    Element::node(2, 33.4, -112.0),
                    Element::way(3, Some(Center::new(32.2, -110.9))),
                ],
            );

        let report = collector(&mock)
            .collect(&["Alabama", "Alaska", "Arizona"])
            .await;

        assert_eq!(mock.calls(), ["Alabama", "Alaska", "Arizona"]);
        assert_eq!(report.total(), 3);
        assert_eq!(
            report.total(),
            report
                .succeeded_regions()
                .map(RegionReport::record_count)
                .sum::<usize>()
        );

        let ids: Vec<_> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["osm-node-1", "osm-node-2", "osm-way-3"]);

        let failed: Vec<_> = report.failed_regions().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].region, "Alaska");
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_between_regions_only() {
        let mock = MockProvider::new();
        let started_at = tokio::time::Instant::now();

        collector(&mock).collect(&["Iowa", "Ohio", "Utah"]).await;

        // Two pauses for three regions, none after the last one.
        assert_eq!(started_at.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_does_not_sleep() {
        let mock = MockProvider::new();
        let started_at = tokio::time::Instant::now();

        Collector::new(mock.service())
            .with_request_delay(Duration::ZERO)
            .collect(&["Iowa", "Ohio"])
            .await;

        assert_eq!(started_at.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn empty_region_list_collects_nothing() {
        let mock = MockProvider::new();
        let report = collector(&mock).collect::<&str>(&[]).await;

        assert_eq!(report.total(), 0);
        assert!(report.regions.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_with_one_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("parks.json");

        let mock = MockProvider::new()
            .with_elements(
                "Region A",
                vec![
                    Element::node(10, 40.0, -100.0).with_tag("name", "Point Park"),
                    Element::way(20, Some(Center::new(41.0, -101.0))),
                ],
            )
            .with_failure("Region B", ErrorKind::Timeout, "Request timed out");

        let config = CollectorConfig::default()
            .with_regions(["Region A", "Region B"])
            .with_output(&output);

        let report = collector(&mock).run(&config).await.unwrap();

        assert_eq!(report.total(), 2);
        let failed: Vec<_> = report.failed_regions().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].region, "Region B");
        assert!(failed[0].error().unwrap().contains("timed out"));

        let written: Vec<ParkRecord> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].id, "osm-node-10");
        assert_eq!(written[0].name, "Point Park");
        assert_eq!(written[1].id, "osm-way-20");
        assert_eq!(written[1].name, "Skatepark in Region A");
        assert_eq!(written, report.records);
    }

    #[tokio::test(start_paused = true)]
    async fn run_uses_configured_delay() {
        let dir = tempfile::tempdir().unwrap();
        let config = CollectorConfig::default()
            .with_regions(["A", "B", "C"])
            .with_output(dir.path().join("parks.json"));

        let mock = MockProvider::new();
        let collector = Collector::new(mock.service()).with_request_delay(Duration::from_secs(9));

        let started_at = tokio::time::Instant::now();
        collector
            .run(&config.clone().with_request_delay_ms(0))
            .await
            .unwrap();
        assert_eq!(started_at.elapsed(), Duration::ZERO);

        let started_at = tokio::time::Instant::now();
        collector
            .run(&config.with_request_delay_ms(500))
            .await
            .unwrap();
        assert_eq!(started_at.elapsed(), Duration::from_secs(1));
        assert_eq!(collector.request_delay(), Duration::from_secs(9));
    }

    #[tokio::test]
    async fn run_rejects_invalid_config() {
        let mock = MockProvider::new();
        let config = CollectorConfig::default().with_output("");

        let error = collector(&mock).run(&config).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn queries_use_overpass_settings() {
        let mock = MockProvider::new();
        let config = OverpassConfig::default()
            .with_admin_level(6)
            .with_query_timeout(30);
        let collector = collector(&mock).with_overpass_config(&config);

        let query = collector.query_for("King County");

        assert_eq!(query.admin_level(), 6);
        assert_eq!(query.server_timeout(), 30);
    }
}
