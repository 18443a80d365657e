//! Everyday patterns: retries, timeouts, pipelines, batching, grouping,
//! layered configuration, guard clauses, newtypes and memoisation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};

use crate::lesson::PRACTICAL_PATTERNS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::sample::SampleData;
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let entries = [
        ExampleInfo::new(
            "retry_backoff",
            PRACTICAL_PATTERNS,
            "Retrying a fallible operation with exponential backoff",
            Action::plain(retry_backoff),
        ),
        ExampleInfo::new(
            "timeout_wrapper",
            PRACTICAL_PATTERNS,
            "Bounding work with a worker thread and recv_timeout",
            Action::plain(timeout_wrapper),
        ),
        ExampleInfo::new(
            "pipeline_pattern",
            PRACTICAL_PATTERNS,
            "Composing transformation stages as a list of boxed closures",
            Action::plain(pipeline_pattern),
        ),
        ExampleInfo::new(
            "batch_processing",
            PRACTICAL_PATTERNS,
            "Processing slices in fixed-size chunks with per-batch results",
            Action::with_test_data(batch_processing),
        ),
        ExampleInfo::new(
            "groupby_aggregate",
            PRACTICAL_PATTERNS,
            "Grouping records by key and aggregating count, sum and mean",
            Action::plain(groupby_aggregate),
        ),
        ExampleInfo::new(
            "config_cascade",
            PRACTICAL_PATTERNS,
            "Layering defaults, file values and overrides into one configuration",
            Action::plain(config_cascade),
        ),
        ExampleInfo::new(
            "guard_clauses",
            PRACTICAL_PATTERNS,
            "Early returns instead of nested conditionals",
            Action::plain(guard_clauses),
        ),
        ExampleInfo::new(
            "newtype_values",
            PRACTICAL_PATTERNS,
            "Newtypes that validate on construction and cannot be mixed up",
            Action::plain(newtype_values),
        ),
        ExampleInfo::new(
            "memoize_pattern",
            PRACTICAL_PATTERNS,
            "Caching results of a pure function in a HashMap",
            Action::plain(memoize_pattern),
        ),
    ];
    for info in entries {
        registry.register(info.doc_url("https://rust-unofficial.github.io/patterns/"))?;
    }
    Ok(())
}

/// Calls `op` until it succeeds or `attempts` is exhausted, doubling the
/// delay after each failure. Returns the last error.
fn retry<T>(
    attempts: u32,
    initial_delay: Duration,
    mut op: impl FnMut(u32) -> Result<T>,
) -> Result<T> {
    let mut delay = initial_delay;
    let mut last_err = anyhow!("no attempts made");
    for attempt in 1..=attempts {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) => {
                println!("attempt {attempt} failed: {err}; waiting {delay:?}");
                last_err = err;
                if attempt < attempts {
                    thread::sleep(delay);
                    delay *= 2;
                }
            }
        }
    }
    Err(last_err)
}

fn retry_backoff() -> Result<()> {
    show("fn retry<T>(attempts: u32, initial_delay: Duration, op: impl FnMut(u32) -> Result<T>) -> Result<T>");
    let value = retry(5, Duration::from_millis(1), |attempt| {
        if attempt < 3 {
            bail!("service unavailable");
        }
        Ok(attempt * 100)
    })?;
    println!("succeeded with {value}");

    let failed = retry(2, Duration::from_millis(1), |_| -> Result<()> { bail!("still down") });
    println!("gave up: {}", failed.is_err());
    Ok(())
}

/// Wait at most `limit` for `work`. The worker is always joined, so when this
/// returns `None` the late work has still run to completion.
fn with_timeout<T: Send>(limit: Duration, work: impl FnOnce() -> T + Send) -> Result<Option<T>> {
    let (tx, rx) = mpsc::channel();
    thread::scope(|s| {
        let worker = s.spawn(move || tx.send(work()).map_err(|_| anyhow!("receiver dropped")));
        let result = rx.recv_timeout(limit).ok();
        worker
            .join()
            .map_err(|_| anyhow!("worker thread panicked"))??;
        Ok(result)
    })
}

fn timeout_wrapper() -> Result<()> {
    show("thread::scope(|s| {\n    let worker = s.spawn(move || tx.send(work()));\n    let result = rx.recv_timeout(limit).ok();\n    worker.join();\n})");
    let quick = with_timeout(Duration::from_millis(500), || 6 * 7)?;
    println!("quick job: {quick:?}");
    let slow = with_timeout(Duration::from_millis(10), || {
        thread::sleep(Duration::from_millis(50));
        "finished"
    })?;
    println!("slow job:  {slow:?} (worker joined after the deadline)");
    Ok(())
}

type Stage = Box<dyn Fn(String) -> String>;

fn run_pipeline(input: &str, stages: &[Stage]) -> String {
    stages
        .iter()
        .fold(input.to_string(), |value, stage| stage(value))
}

fn pipeline_pattern() -> Result<()> {
    show("type Stage = Box<dyn Fn(String) -> String>;\nstages.iter().fold(input, |value, stage| stage(value))");
    let stages: [Stage; 4] = [
        Box::new(|s: String| s.trim().to_string()),
        Box::new(|s: String| s.to_lowercase()),
        Box::new(|s: String| s.replace(' ', "-")),
        Box::new(|s: String| format!("/posts/{s}")),
    ];
    show_result(
        "run_pipeline(\"  Hello Rust World  \", &stages)",
        run_pipeline("  Hello Rust World  ", &stages),
    );
    Ok(())
}

fn batch_processing(data: SampleData) -> Result<()> {
    show("for (i, batch) in items.chunks(2).enumerate() { .. }");
    let mut items = data.testlist.clone();
    items.extend(["date", "elderberry"].map(String::from));
    for (i, batch) in items.chunks(2).enumerate() {
        let lengths: usize = batch.iter().map(String::len).sum();
        println!("batch {i}: {batch:?} total chars {lengths}");
    }

    let values = tuple_values(&data);
    show_result(
        "values.chunks_exact(2).map(|c| c[0] * c[1])",
        format!("{:?}", values.chunks_exact(2).map(|c| c[0] * c[1]).collect::<Vec<_>>()),
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Stats {
    count: usize,
    sum: f64,
}

impl Stats {
    fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.sum / self.count as f64 }
    }
}

fn group_stats<'a>(records: &[(&'a str, f64)]) -> BTreeMap<&'a str, Stats> {
    let mut groups: BTreeMap<&str, Stats> = BTreeMap::new();
    for &(key, value) in records {
        let entry = groups.entry(key).or_default();
        entry.count += 1;
        entry.sum += value;
    }
    groups
}

fn groupby_aggregate() -> Result<()> {
    let sales = [
        ("north", 120.0),
        ("south", 80.0),
        ("north", 60.0),
        ("east", 200.0),
        ("south", 40.0),
    ];
    show("let entry = groups.entry(key).or_default();\nentry.count += 1;\nentry.sum += value;");
    for (region, stats) in group_stats(&sales) {
        println!(
            "{region:<6} count={} sum={:.1} mean={:.1}",
            stats.count,
            stats.sum,
            stats.mean()
        );
    }
    Ok(())
}

fn cascade(layers: &[&[(&str, &str)]]) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for layer in layers {
        for (key, value) in *layer {
            merged.insert(key.to_string(), value.to_string());
        }
    }
    merged
}

fn config_cascade() -> Result<()> {
    let defaults: &[(&str, &str)] = &[
        ("host", "localhost"),
        ("port", "8080"),
        ("debug", "false"),
    ];
    let file: &[(&str, &str)] = &[("port", "9000")];
    let overrides: &[(&str, &str)] = &[("debug", "true")];
    show("cascade(&[defaults, file, overrides])  // later layers win");
    for (key, value) in cascade(&[defaults, file, overrides]) {
        println!("{key} = {value}");
    }
    Ok(())
}

fn shipping_cost(weight_kg: f64, country: &str, express: bool) -> Result<f64> {
    if weight_kg <= 0.0 {
        bail!("weight must be positive");
    }
    if country.is_empty() {
        bail!("country is required");
    }
    if weight_kg > 30.0 {
        bail!("parcels over 30kg are not accepted");
    }
    let base = if country == "domestic" { 5.0 } else { 15.0 };
    let express_fee = if express { 10.0 } else { 0.0 };
    Ok(base + weight_kg * 1.5 + express_fee)
}

fn guard_clauses() -> Result<()> {
    show("if weight_kg <= 0.0 { bail!(\"weight must be positive\"); }\nif country.is_empty() { bail!(\"country is required\"); }");
    let parcels = [
        (2.0, "domestic", false),
        (0.0, "domestic", false),
        (5.0, "abroad", true),
        (40.0, "", false),
    ];
    for (weight, country, express) in parcels {
        match shipping_cost(weight, country, express) {
            Ok(cost) => println!("{weight}kg to {country:?}: {cost:.2}"),
            Err(err) => println!("{weight}kg to {country:?}: rejected ({err})"),
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Celsius(f64);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Fahrenheit(f64);

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Email(String);

impl Email {
    fn parse(raw: &str) -> Result<Self> {
        let Some((user, domain)) = raw.split_once('@') else {
            bail!("{raw:?} is missing '@'");
        };
        if user.is_empty() || !domain.contains('.') {
            bail!("{raw:?} is not a valid address");
        }
        Ok(Email(raw.to_lowercase()))
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn newtype_values() -> Result<()> {
    show("struct Celsius(f64);\nstruct Fahrenheit(f64);\nimpl From<Celsius> for Fahrenheit { .. }");
    let boiling: Fahrenheit = Celsius(100.0).into();
    println!("{:?} -> {boiling:?}", Celsius(100.0));

    show("Email::parse(\"Ferris@Example.com\")?");
    for raw in ["Ferris@Example.com", "no-at-sign", "@example.com"] {
        match Email::parse(raw) {
            Ok(email) => println!("valid: {email}"),
            Err(err) => println!("invalid: {err}"),
        }
    }
    Ok(())
}

/// Memoised function with a hit counter.
#[derive(Default)]
struct Memo {
    cache: HashMap<u64, u64>,
    hits: usize,
}

impl Memo {
    fn fib(&mut self, n: u64) -> u64 {
        if n < 2 {
            return n;
        }
        if let Some(&value) = self.cache.get(&n) {
            self.hits += 1;
            return value;
        }
        let value = self.fib(n - 1) + self.fib(n - 2);
        self.cache.insert(n, value);
        value
    }
}

fn memoize_pattern() -> Result<()> {
    show("if let Some(&value) = self.cache.get(&n) { return value; }\nlet value = self.fib(n - 1) + self.fib(n - 2);\nself.cache.insert(n, value);");
    let mut memo = Memo::default();
    println!("fib(80) = {}", memo.fib(80));
    println!("cache entries: {}, cache hits: {}", memo.cache.len(), memo.hits);
    Ok(())
}

fn tuple_values(data: &SampleData) -> Vec<i32> {
    let (a, b, c) = data.testtuple;
    vec![a, b, c, a + b + c]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn retry_returns_first_success() -> Result<()> {
        let mut calls = 0;
        let value = retry(4, Duration::ZERO, |attempt| {
            calls += 1;
            if attempt == 2 { Ok("done") } else { bail!("nope") }
        })?;
        assert_eq!(value, "done");
        assert_eq!(calls, 2);
        Ok(())
    }

    #[test]
    fn retry_reports_last_error() {
        let err = retry(3, Duration::ZERO, |attempt| -> Result<()> { bail!("failure {attempt}") })
            .unwrap_err();
        assert_eq!(err.to_string(), "failure 3");
    }

    #[test]
    fn timeout_returns_value_for_fast_work() -> Result<()> {
        assert_eq!(with_timeout(Duration::from_secs(5), || 1 + 1)?, Some(2));
        Ok(())
    }

    #[test]
    fn timed_out_work_has_finished_when_call_returns() -> Result<()> {
        let done = AtomicBool::new(false);
        let result = with_timeout(Duration::from_millis(10), || {
            thread::sleep(Duration::from_millis(100));
            done.store(true, Ordering::SeqCst);
        })?;
        assert_eq!(result, None);
        assert!(done.load(Ordering::SeqCst));
        Ok(())
    }

    #[test]
    fn worker_panic_becomes_an_error() {
        let err = with_timeout(Duration::from_secs(1), || -> i32 { panic!("boom") }).unwrap_err();
        assert_eq!(err.to_string(), "worker thread panicked");
    }

    #[test]
    fn grouping_and_cascade() {
        let stats = group_stats(&[("a", 1.0), ("b", 4.0), ("a", 3.0)]);
        assert_eq!(stats["a"], Stats { count: 2, sum: 4.0 });
        assert_eq!(stats["a"].mean(), 2.0);

        let base: &[(&str, &str)] = &[("k", "1"), ("x", "a")];
        let top: &[(&str, &str)] = &[("k", "2")];
        let merged = cascade(&[base, top]);
        assert_eq!(merged["k"], "2");
        assert_eq!(merged["x"], "a");
    }

    #[test]
    fn guards_and_newtypes() {
        assert!(shipping_cost(-1.0, "domestic", false).is_err());
        assert_eq!(shipping_cost(2.0, "domestic", true).unwrap(), 18.0);
        assert_eq!(Fahrenheit::from(Celsius(0.0)), Fahrenheit(32.0));
        assert!(Email::parse("a@b").is_err());
        assert_eq!(Email::parse("A@B.io").unwrap().to_string(), "a@b.io");
    }

    #[test]
    fn memo_reuses_cached_values() {
        let mut memo = Memo::default();
        assert_eq!(memo.fib(30), 832_040);
        assert!(memo.hits > 0);
        let pipeline: [Stage; 2] = [
            Box::new(|s: String| s + "!"),
            Box::new(|s: String| s.to_uppercase()),
        ];
        assert_eq!(run_pipeline("hi", &pipeline), "HI!");
    }
}
