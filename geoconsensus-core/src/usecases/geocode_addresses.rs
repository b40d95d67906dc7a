use super::{prelude::*, *};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    /// Addresses with less than two resolved coordinates,
    /// i.e. without a meaningful disagreement.
    pub unresolved: usize,
}

/// Geocodes the addresses in the given order and appends each
/// record to the sink before the next address is processed.
///
/// Aborts on the first sink error.
pub fn geocode_addresses<I, S>(
    aggregator: &Aggregator,
    metric: DisagreementMetric,
    addresses: I,
    sink: &mut S,
) -> Result<BatchSummary>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    S: ResultSink,
{
    let mut summary = BatchSummary::default();
    for address in addresses {
        let record = geocode_address(aggregator, metric, address.as_ref());
        sink.append(&record)?;
        summary.processed += 1;
        if record.result.resolved_count() < 2 {
            summary.unresolved += 1;
        }
    }
    log::info!(
        "Geocoded {} address(es), {} without at least two answers",
        summary.processed,
        summary.unresolved
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{registry::ProviderRegistry, usecases::tests::*};

    fn aggregator() -> Aggregator {
        let mut registry = ProviderRegistry::new();
        registry.register(
            ProviderName::Arcgis,
            MockGateway::answering(Coordinate::from_lat_lng_deg(4.6, -74.1)),
        );
        registry.register(
            ProviderName::Osm,
            MockGateway::answering(Coordinate::from_lat_lng_deg(4.61, -74.1)),
        );
        registry
            .into_aggregator(providers(&[ProviderName::Arcgis, ProviderName::Osm]))
            .unwrap()
    }

    #[test]
    fn append_records_in_input_order() {
        let mut sink = MockSink::default();
        let summary = geocode_addresses(
            &aggregator(),
            DisagreementMetric::BoundingBox,
            ["CLL 131A 9", "KR 7 # 32-16"],
            &mut sink,
        )
        .unwrap();
        assert_eq!(
            BatchSummary {
                processed: 2,
                unresolved: 0
            },
            summary
        );
        let addresses: Vec<_> = sink.records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(vec!["CLL 131A 9", "KR 7 # 32-16"], addresses);
        assert!(sink.records.iter().all(|r| r.max_error > Distance::zero()));
    }

    #[test]
    fn count_addresses_without_enough_answers() {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderName::Arcgis, MockGateway::failing());
        registry.register(
            ProviderName::Osm,
            MockGateway::answering(Coordinate::from_lat_lng_deg(4.61, -74.1)),
        );
        let aggregator = registry
            .into_aggregator(providers(&[ProviderName::Arcgis, ProviderName::Osm]))
            .unwrap();
        let mut sink = MockSink::default();
        let summary = geocode_addresses(
            &aggregator,
            DisagreementMetric::ClosedTour,
            vec!["a".to_string(), "b".to_string()],
            &mut sink,
        )
        .unwrap();
        assert_eq!(2, summary.processed);
        assert_eq!(2, summary.unresolved);
        assert!(sink.records.iter().all(|r| r.max_error == Distance::zero()));
    }

    #[test]
    fn abort_on_sink_error() {
        let mut sink = MockSink {
            fail_after: Some(1),
            ..Default::default()
        };
        let err = geocode_addresses(
            &aggregator(),
            DisagreementMetric::BoundingBox,
            ["a", "b", "c"],
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
        assert_eq!(1, sink.records.len());
    }
}
