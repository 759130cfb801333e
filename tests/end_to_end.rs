use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use log_analyzer::{analyze_file, analyze_file_parallel, render};

const SAMPLE: &str = "\
GET /generate 200 120.5ms [2023AB12]
POST /login 401 [2023CD34]
GET /generate 200 500.0µs Backtracking
GET /generate 200 [2022EF56]
";

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn sample_log_aggregates_every_metric() {
    let file = write_log(SAMPLE);
    let state = analyze_file(file.path()).unwrap();

    assert_eq!(state.total_requests, 4);
    assert_eq!(state.endpoint_counts["/generate"], 3);
    assert_eq!(state.endpoint_counts["/login"], 1);
    assert_eq!(state.status_counts["200"], 3);
    assert_eq!(state.status_counts["401"], 1);
    assert_eq!(state.endpoint_times["/generate"], vec![120.5, 0.5]);
    assert_eq!(state.unique_ids.len(), 3);
    assert_eq!(state.batch_counts["2023"], 2);
    assert_eq!(state.batch_counts["2022"], 1);
    assert_eq!(state.timetable_hits, 3);
}

#[test]
fn sample_log_renders_the_full_report() {
    let file = write_log(SAMPLE);
    let state = analyze_file(file.path()).unwrap();

    let expected = "\
Traffic & Usage Analysis
-------------------------
Total API Requests: 4

Endpoint Popularity:
- /generate: 3 requests (75.0%)
- /login: 1 requests (25.0%)

HTTP Status Codes:
- 200: 3 times
- 401: 1 times

Performance Metrics
-------------------
Endpoint: /generate
  Avg Response: 60.50 ms
  Max Response: 120.50 ms

Application Insights
--------------------
Backtracking: 1 times

Average Timetables per /generate: 1.00
Total Timetables: 3

Unique ID Analysis
------------------
Total Unique IDs: 3
Batch 2022: 1 unique IDs
Batch 2023: 2 unique IDs";

    assert_eq!(render(&state), expected);
}

#[test]
fn parallel_run_renders_the_same_report() {
    let file = write_log(SAMPLE);
    let sequential = analyze_file(file.path()).unwrap();
    for threads in [2, 3, 4] {
        let parallel = analyze_file_parallel(file.path(), threads).unwrap();
        assert_eq!(render(&parallel), render(&sequential));
    }
}

#[test]
fn duplicate_id_across_chunks_counts_once() {
    let mut contents = String::new();
    for i in 0..50 {
        contents.push_str(&format!("GET /page{} 200 [2023AB12]\n", i % 3));
    }
    let file = write_log(&contents);
    let state = analyze_file_parallel(file.path(), 4).unwrap();
    assert_eq!(state.unique_ids.len(), 1);
    assert_eq!(state.batch_counts["2023"], 1);
    assert_eq!(state.total_requests, 50);
}

#[test]
fn missing_file_is_the_only_fatal_error() {
    let err = analyze_file(std::path::Path::new("no/such/file.log")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn unrecognized_lines_contribute_nothing() {
    let file = write_log("completely unrelated chatter\nanother line\n");
    let state = analyze_file(file.path()).unwrap();
    assert_eq!(state.total_requests, 0);
    assert!(state.unique_ids.is_empty());
    assert!(state.algorithm_counts.is_empty());
}
