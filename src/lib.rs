use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub mod extract;
pub mod report;
pub mod statistic;
pub mod thread_pool;

pub use extract::{Algorithm, Extractors, LineFacts, Method, RequestRecord};
pub use report::render;
pub use statistic::{AggregateState, Aggregator};
pub use thread_pool::ThreadPool;

/// One sequential pass: each line is fully classified and folded before
/// the next is read.
pub fn analyze_lines<I>(lines: I) -> AggregateState
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut aggregator = Aggregator::new();
    for line in lines {
        aggregator.ingest(line.as_ref());
    }
    aggregator.finish()
}

pub fn analyze_file(path: &Path) -> io::Result<AggregateState> {
    let reader = BufReader::new(File::open(path)?);
    let mut aggregator = Aggregator::new();
    for line in reader.lines() {
        aggregator.ingest(&line?);
    }
    Ok(aggregator.finish())
}

pub fn analyze_file_parallel(path: &Path, threads: usize) -> io::Result<AggregateState> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    Ok(analyze_lines_parallel(lines, threads))
}

/// Chunked variant of [`analyze_lines`]: one contiguous chunk per worker,
/// one independent `Aggregator` per chunk, partial states merged at the
/// end. The merge is order-independent, so the report matches the
/// sequential pass for every chunking.
pub fn analyze_lines_parallel(lines: Vec<String>, threads: usize) -> AggregateState {
    if threads <= 1 || lines.len() <= 1 {
        return analyze_lines(&lines);
    }
    let chunk_len = lines.len().div_ceil(threads);
    log::debug!(
        "dispatching {} lines in chunks of {chunk_len} to {threads} workers",
        lines.len()
    );

    let pool = ThreadPool::new(threads);
    let partials: Arc<Mutex<Vec<AggregateState>>> = Arc::new(Mutex::new(Vec::new()));
    let mut remaining = lines.into_iter();
    loop {
        let chunk: Vec<String> = remaining.by_ref().take(chunk_len).collect();
        if chunk.is_empty() {
            break;
        }
        let partials = Arc::clone(&partials);
        pool.execute(move || {
            let mut aggregator = Aggregator::new();
            for line in &chunk {
                aggregator.ingest(line);
            }
            partials.lock().unwrap().push(aggregator.finish());
        });
    }
    pool.join();

    let mut merged = AggregateState::default();
    for partial in partials.lock().unwrap().drain(..) {
        merged.merge(partial);
    }
    merged
}
