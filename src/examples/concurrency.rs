use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use tokio::runtime::{Builder, Runtime};

use crate::lesson::CONCURRENCY;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "threading_example",
            CONCURRENCY,
            "thread::spawn with join handles and thread::scope over borrowed data",
            Action::plain(threading_example),
        )
        .doc_url("https://doc.rust-lang.org/std/thread/fn.scope.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "channel_example",
            CONCURRENCY,
            "Producer/consumer with mpsc channels and multiple senders",
            Action::plain(channel_example),
        )
        .doc_url("https://doc.rust-lang.org/std/sync/mpsc/index.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "shared_state",
            CONCURRENCY,
            "Arc<Mutex<T>>, RwLock and AtomicUsize counters across threads",
            Action::plain(shared_state),
        )
        .doc_url("https://doc.rust-lang.org/book/ch16-03-shared-state.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "async_tasks",
            CONCURRENCY,
            "async fns on a tokio runtime: join!, spawn and time::timeout",
            Action::plain(async_tasks),
        )
        .doc_url("https://docs.rs/tokio/latest/tokio/macro.join.html")
        .tags(["async", "tokio"]),
    )?;
    Ok(())
}

fn parallel_sum(values: &[u64], workers: usize) -> u64 {
    let chunk = values.len().div_ceil(workers.max(1)).max(1);
    thread::scope(|scope| {
        let handles: Vec<_> = values
            .chunks(chunk)
            .map(|part| scope.spawn(move || part.iter().sum::<u64>()))
            .collect();
        handles.into_iter().filter_map(|h| h.join().ok()).sum()
    })
}

fn threading_example() -> Result<()> {
    show("let handle = thread::spawn(move || (1..=10u64).product::<u64>());\nhandle.join()");
    let handle = thread::spawn(|| (1..=10u64).product::<u64>());
    let product = handle
        .join()
        .map_err(|_| anyhow!("worker thread panicked"))?;
    println!("10! computed on another thread = {product}");

    show("thread::scope(|scope| {\n    for part in values.chunks(chunk) { scope.spawn(move || part.iter().sum::<u64>()); }\n});");
    let values: Vec<u64> = (1..=1000).collect();
    show_result("parallel_sum(&values, 4)", parallel_sum(&values, 4));
    Ok(())
}

fn channel_example() -> Result<()> {
    show("let (tx, rx) = mpsc::channel();\nlet tx2 = tx.clone();\nfor message in rx { .. }");
    let (tx, rx) = mpsc::channel::<String>();
    let mut producers = Vec::new();
    for id in 0..3 {
        let tx = tx.clone();
        producers.push(thread::spawn(move || -> Result<()> {
            for n in 0..2 {
                tx.send(format!("producer {id} item {n}"))?;
            }
            Ok(())
        }));
    }
    drop(tx);

    let mut received: Vec<String> = rx.iter().collect();
    for producer in producers {
        producer
            .join()
            .map_err(|_| anyhow!("producer thread panicked"))??;
    }
    received.sort();
    println!("received {} messages:", received.len());
    for message in &received {
        println!("  {message}");
    }

    show("let (tx, rx) = mpsc::sync_channel(1);  // bounded");
    let (tx, rx) = mpsc::sync_channel::<u32>(1);
    let consumer = thread::spawn(move || rx.iter().sum::<u32>());
    for n in 1..=5 {
        tx.send(n)?;
    }
    drop(tx);
    let total = consumer
        .join()
        .map_err(|_| anyhow!("consumer thread panicked"))?;
    println!("bounded channel total = {total}");
    Ok(())
}

fn shared_state() -> Result<()> {
    show("let counter = Arc::new(Mutex::new(0));\n*counter.lock()? += 1;");
    let counter = Arc::new(Mutex::new(0u32));
    let hits = Arc::new(AtomicUsize::new(0));
    thread::scope(|scope| {
        for _ in 0..4 {
            let counter = Arc::clone(&counter);
            let hits = Arc::clone(&hits);
            scope.spawn(move || {
                for _ in 0..250 {
                    if let Ok(mut guard) = counter.lock() {
                        *guard += 1;
                    }
                    hits.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });
    let total = *counter
        .lock()
        .map_err(|_| anyhow!("counter mutex poisoned"))?;
    println!("mutex counter = {total}, atomic hits = {}", hits.load(Ordering::Relaxed));

    show("let config = RwLock::new(..);\nconfig.read()   config.write()");
    let config = RwLock::new(vec!["alpha".to_string()]);
    {
        let mut writer = config.write().map_err(|_| anyhow!("config lock poisoned"))?;
        writer.push("beta".to_string());
    }
    let reader = config.read().map_err(|_| anyhow!("config lock poisoned"))?;
    println!("config entries: {reader:?}");
    Ok(())
}

async fn fetch(name: &'static str, delay_ms: u64) -> String {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    format!("{name} after {delay_ms}ms")
}

fn current_thread_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_time().build()?)
}

fn async_tasks() -> Result<()> {
    let runtime = current_thread_runtime()?;

    show("runtime.block_on(async { tokio::join!(fetch(\"users\", 30), fetch(\"orders\", 20)) })");
    let started = Instant::now();
    let (users, orders) =
        runtime.block_on(async { tokio::join!(fetch("users", 30), fetch("orders", 20)) });
    println!("{users}; {orders}");
    println!("joined in {}ms, not the 50ms of running them back to back", started.elapsed().as_millis());

    show("let handle = tokio::spawn(async move { .. });\ntotal += handle.await?;");
    let total = runtime.block_on(async {
        let handles: Vec<_> = (1..=3u64)
            .map(|n| {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(n)).await;
                    n * n
                })
            })
            .collect();
        let mut total = 0;
        for handle in handles {
            total += handle.await?;
        }
        Ok::<u64, anyhow::Error>(total)
    })?;
    show_result("sum of spawned squares", total);

    show("tokio::time::timeout(Duration::from_millis(10), fetch(\"slow\", 200)).await");
    let timed = runtime.block_on(tokio::time::timeout(
        Duration::from_millis(10),
        fetch("slow", 200),
    ));
    println!("timed out: {}", timed.is_err());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_argument_order() -> Result<()> {
        let runtime = current_thread_runtime()?;
        let (slow, fast) = runtime.block_on(async { tokio::join!(fetch("slow", 20), fetch("fast", 1)) });
        assert_eq!(slow, "slow after 20ms");
        assert_eq!(fast, "fast after 1ms");
        Ok(())
    }

    #[test]
    fn timeout_cancels_slow_future() -> Result<()> {
        let runtime = current_thread_runtime()?;
        let quick = runtime.block_on(tokio::time::timeout(Duration::from_secs(5), fetch("quick", 1)));
        assert_eq!(quick.ok().as_deref(), Some("quick after 1ms"));
        let slow = runtime.block_on(tokio::time::timeout(Duration::from_millis(5), fetch("slow", 500)));
        assert!(slow.is_err());
        Ok(())
    }

    #[test]
    fn parallel_sum_matches_sequential() {
        let values: Vec<u64> = (1..=101).collect();
        assert_eq!(parallel_sum(&values, 4), 5151);
        assert_eq!(parallel_sum(&values, 0), 5151);
        assert_eq!(parallel_sum(&[], 3), 0);
    }
}
