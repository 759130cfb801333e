use crate::statistic::AggregateState;

/// Render the final report. Pure function of the aggregate state; every
/// section sorts on an explicit key so output is diffable across runs.
pub fn render(state: &AggregateState) -> String {
    let mut report = Vec::new();

    report.push("Traffic & Usage Analysis".to_string());
    report.push("-------------------------".to_string());
    report.push(format!("Total API Requests: {}\n", state.total_requests));

    report.push("Endpoint Popularity:".to_string());
    let mut endpoints: Vec<_> = state.endpoint_counts.iter().collect();
    endpoints.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (endpoint, count) in endpoints {
        let percent = if state.total_requests == 0 {
            0.0
        } else {
            *count as f64 / state.total_requests as f64 * 100.0
        };
        if percent >= 0.1 {
            report.push(format!("- {endpoint}: {count} requests ({percent:.1}%)"));
        }
    }

    report.push("\nHTTP Status Codes:".to_string());
    let mut statuses: Vec<_> = state.status_counts.iter().collect();
    statuses.sort();
    for (status, count) in statuses {
        report.push(format!("- {status}: {count} times"));
    }

    report.push("\nPerformance Metrics".to_string());
    report.push("-------------------".to_string());
    let mut timed: Vec<_> = state.endpoint_times.iter().collect();
    timed.sort_by(|a, b| a.0.cmp(b.0));
    for (endpoint, times) in timed {
        let avg = times.iter().sum::<f64>() / times.len() as f64;
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        report.push(format!("Endpoint: {endpoint}"));
        report.push(format!("  Avg Response: {avg:.2} ms"));
        report.push(format!("  Max Response: {max:.2} ms"));
    }

    if !state.algorithm_counts.is_empty() {
        report.push("\nApplication Insights".to_string());
        report.push("--------------------".to_string());
        let mut algorithms: Vec<_> = state.algorithm_counts.iter().collect();
        algorithms.sort();
        for (algorithm, count) in algorithms {
            report.push(format!("{}: {count} times", algorithm.name()));
        }
    }

    let generate_calls = state.endpoint_counts.get("/generate").copied().unwrap_or(0);
    let avg_timetables = if generate_calls == 0 {
        0.0
    } else {
        state.timetable_hits as f64 / generate_calls as f64
    };
    report.push(format!("\nAverage Timetables per /generate: {avg_timetables:.2}"));
    report.push(format!("Total Timetables: {}", state.timetable_hits));

    report.push("\nUnique ID Analysis".to_string());
    report.push("------------------".to_string());
    report.push(format!("Total Unique IDs: {}", state.unique_ids.len()));
    let mut batches: Vec<_> = state.batch_counts.iter().collect();
    batches.sort();
    for (batch, count) in batches {
        report.push(format!("Batch {batch}: {count} unique IDs"));
    }

    report.join("\n")
}
