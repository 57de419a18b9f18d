use std::collections::{HashMap, HashSet};
use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use loadtally::prelude::*;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap()
}

fn request(code: u16) -> Event {
    Event::new(at(0)).with_status_code(code)
}

fn render(reporter: &impl Reporter) -> String {
    let mut output = Vec::new();
    reporter.report(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn summary_does_not_depend_on_arrival_order() {
    let events = vec![
        request(200)
            .with_timing(Duration::from_millis(10))
            .with_bytes_out(10)
            .with_bytes_in(100),
        request(404)
            .with_timing(Duration::from_millis(30))
            .with_bytes_in(20)
            .with_error("not found"),
        request(0)
            .with_timing(Duration::from_millis(50))
            .with_error("connection refused"),
        request(201)
            .with_timing(Duration::from_millis(70))
            .with_bytes_out(30)
            .with_bytes_in(40),
    ];

    let summaries: Vec<_> = events
        .iter()
        .cloned()
        .permutations(events.len())
        .map(|permutation| {
            let mut aggregator = SummaryAggregator::with_settings(
                SummarySettings::default().with_sorted_output(true),
            );
            permutation
                .into_iter()
                .for_each(|event| aggregator.add(event));
            render(&aggregator)
        })
        .collect();

    assert_eq!(summaries.len(), 24);
    assert!(summaries.iter().all_equal());
}

#[test]
fn chronological_report_is_ordered_by_timestamp() {
    let arrivals = [4, 2, 9, 2, 7, 1, 1, 8, 3];
    let mut reporter = ChronologicalAggregator::new();

    for (index, second) in arrivals.iter().enumerate() {
        reporter.add(Event::new(at(*second)).with_bytes_out(index as u64));
    }

    let order: Vec<_> = reporter
        .events()
        .map(|event| (event.timestamp().timestamp(), event.bytes_out()))
        .collect();

    assert_eq!(
        order,
        vec![
            (1, 5),
            (1, 6),
            (2, 1),
            (2, 3),
            (3, 8),
            (4, 0),
            (7, 4),
            (8, 7),
            (9, 2)
        ]
    );
}

#[test]
fn histogram_counts_exact_occurrences() {
    let mut reporter = SummaryAggregator::new();
    [200, 200, 404, 500]
        .into_iter()
        .for_each(|code| reporter.add(request(code)));

    let histogram: HashMap<_, _> = reporter.summary().histogram().iter().copied().collect();

    assert_eq!(histogram, HashMap::from([(200, 2), (404, 1), (500, 1)]));
}

#[test]
fn success_ratio_counts_two_hundreds() {
    let mut reporter = SummaryAggregator::new();
    [200, 201, 404, 500]
        .into_iter()
        .for_each(|code| reporter.add(request(code)));

    assert_eq!(reporter.summary().success_ratio(), 0.5);
    assert!(render(&reporter).contains("Success ratio:   0.500000\n"));
}

#[test]
fn error_set_contains_each_message_once() {
    let mut reporter = SummaryAggregator::new();
    for message in ["timeout", "timeout", "refused"] {
        reporter.add(Event::now().with_error(message));
    }

    let output = render(&reporter);
    let error_lines: HashSet<_> = output
        .split("Error set:\n")
        .nth(1)
        .unwrap()
        .lines()
        .collect();

    assert_eq!(output.matches("timeout").count(), 1);
    assert_eq!(error_lines, HashSet::from(["timeout", "refused"]));
}

#[test]
fn empty_summary_renders_nan_averages() {
    let output = render(&SummaryAggregator::new());

    assert!(output.starts_with("Results:\nTime      (avg): NaN\n"));
    assert!(output.contains("Bytes out (avg): NaN\n"));
    assert!(output.contains("Success ratio:   NaN\n"));
    assert!(output.contains("Requests:        0\n"));
}

#[test]
fn chronological_report_lists_timestamps_in_order() {
    let mut reporter = ChronologicalAggregator::new();
    for second in [3, 1, 2] {
        reporter.add(Event::new(at(second)));
    }

    itertools::assert_equal(
        render(&reporter).lines(),
        [
            "1970-01-01T00:00:01.000000000Z",
            "1970-01-01T00:00:02.000000000Z",
            "1970-01-01T00:00:03.000000000Z",
        ],
    );
}

#[test]
fn reporters_selected_at_runtime_share_the_event_stream() {
    let mut reporters: Vec<Box<dyn Reporter + Send>> = vec![
        Box::new(ChronologicalAggregator::new()),
        Box::new(SummaryAggregator::new()),
    ];

    reporters.add(request(200).with_timing(Duration::from_millis(4)));

    let output = render(&reporters);

    assert!(output.starts_with("1970-01-01T00:00:00.000000000Z\nResults:\n"));
    assert!(output.contains("Time      (avg): 4ms\n"));
    assert!(output.contains("200\t1\n"));
}

#[test]
fn write_failure_is_returned_as_io_error() {
    let mut reporter = SummaryAggregator::new().and(ChronologicalAggregator::new());
    reporter.add(request(200));

    match reporter.report(&mut ClosedPipe) {
        Err(ReportError::Io(error)) => {
            assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!(error.to_string(), "pipe closed");
        }
        result => panic!("Unexpected result {result:?}"),
    }
}

#[tokio::test]
async fn collected_events_are_reported_once_producers_finish() {
    let (sender, handle) = collector::channel(ChronologicalAggregator::new(), 4);

    let producers: Vec<_> = [[5, 3], [4, 1]]
        .into_iter()
        .map(|seconds| {
            let sender = sender.clone();
            tokio::spawn(async move {
                for second in seconds {
                    sender.send(Event::new(at(second))).await.unwrap();
                }
            })
        })
        .collect();
    drop(sender);

    for producer in producers {
        producer.await.unwrap();
    }

    let reporter = handle.finish().await.unwrap();
    let mut output = Vec::new();
    reporter.report_to(&mut output).await.unwrap();

    itertools::assert_equal(
        String::from_utf8(output).unwrap().lines().map(|line| &line[17..19]),
        ["01", "03", "04", "05"],
    );
}
