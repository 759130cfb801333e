use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub method: Method,
    pub endpoint: String,
    pub status: String,
    pub response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Backtracking,
    Iterative,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Backtracking => "Backtracking",
            Algorithm::Iterative => "Iterative",
        }
    }
}

/// Everything one line can contribute. The three aspects are independent:
/// a line may carry any combination of them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineFacts {
    pub request: Option<RequestRecord>,
    pub identifiers: Vec<String>,
    pub algorithms: Vec<Algorithm>,
}

pub struct Extractors {
    request: Regex,
    time: Regex,
    identifier: Regex,
    algorithm: Regex,
}

impl Extractors {
    pub fn new() -> Extractors {
        Extractors {
            // endpoint is non-greedy so the first 3-digit group stays the status
            request: Regex::new(r"(GET|POST) (.*?) (\d{3})").unwrap(),
            time: Regex::new(r"(\d+\.\d+)(µs|ms)").unwrap(),
            identifier: Regex::new(r"\[(\d{4}[A-Z0-9]+)\]").unwrap(),
            algorithm: Regex::new(r"(?i)\b(backtracking|iterative)\b").unwrap(),
        }
    }

    pub fn classify(&self, line: &str) -> LineFacts {
        LineFacts {
            request: self.request_record(line),
            identifiers: self.identifiers(line),
            algorithms: self.algorithms(line),
        }
    }

    fn request_record(&self, line: &str) -> Option<RequestRecord> {
        let caps = self.request.captures(line)?;
        let method = match &caps[1] {
            "GET" => Method::Get,
            _ => Method::Post,
        };
        Some(RequestRecord {
            method,
            endpoint: caps[2].to_string(),
            status: caps[3].to_string(),
            response_time_ms: self.response_time_ms(line),
        })
    }

    fn response_time_ms(&self, line: &str) -> Option<f64> {
        let caps = self.time.captures(line)?;
        let value: f64 = caps[1].parse().ok()?;
        if &caps[2] == "µs" {
            Some(value / 1000.0)
        } else {
            Some(value)
        }
    }

    fn identifiers(&self, line: &str) -> Vec<String> {
        self.identifier
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    fn algorithms(&self, line: &str) -> Vec<Algorithm> {
        let mut found = Vec::new();
        for caps in self.algorithm.captures_iter(line) {
            let algorithm = if caps[1].eq_ignore_ascii_case("backtracking") {
                Algorithm::Backtracking
            } else {
                Algorithm::Iterative
            };
            // one increment per distinct name per line
            if !found.contains(&algorithm) {
                found.push(algorithm);
            }
        }
        found
    }
}

impl Default for Extractors {
    fn default() -> Extractors {
        Extractors::new()
    }
}
