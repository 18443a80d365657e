//! Classic object-oriented patterns expressed with traits, closures and enums.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow};

use crate::lesson::DESIGN_PATTERNS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::show;

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "factory_pattern",
            DESIGN_PATTERNS,
            "A factory function returning Box<dyn Trait> chosen by name",
            Action::plain(factory_pattern),
        )
        .doc_url("https://rust-unofficial.github.io/patterns/"),
    )?;
    registry.register(
        ExampleInfo::new(
            "strategy_pattern",
            DESIGN_PATTERNS,
            "Interchangeable algorithms as trait objects or plain closures",
            Action::plain(strategy_pattern),
        )
        .doc_url("https://rust-unofficial.github.io/patterns/patterns/behavioural/strategy.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "observer_pattern",
            DESIGN_PATTERNS,
            "Subscribers registered as boxed callbacks notified on every event",
            Action::plain(observer_pattern),
        )
        .doc_url("https://doc.rust-lang.org/book/ch15-05-interior-mutability.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "builder_pattern",
            DESIGN_PATTERNS,
            "Consuming builders with defaults and validation in build()",
            Action::plain(builder_pattern),
        )
        .doc_url("https://rust-unofficial.github.io/patterns/patterns/creational/builder.html"),
    )?;
    Ok(())
}

trait Notifier {
    fn send(&self, message: &str) -> String;
}

struct EmailNotifier;
struct SmsNotifier {
    max_len: usize,
}

impl Notifier for EmailNotifier {
    fn send(&self, message: &str) -> String {
        format!("email: {message}")
    }
}

impl Notifier for SmsNotifier {
    fn send(&self, message: &str) -> String {
        let truncated: String = message.chars().take(self.max_len).collect();
        format!("sms: {truncated}")
    }
}

fn make_notifier(kind: &str) -> Result<Box<dyn Notifier>> {
    match kind {
        "email" => Ok(Box::new(EmailNotifier)),
        "sms" => Ok(Box::new(SmsNotifier { max_len: 10 })),
        other => Err(anyhow!("no notifier named {other:?}")),
    }
}

fn factory_pattern() -> Result<()> {
    show("fn make_notifier(kind: &str) -> Result<Box<dyn Notifier>> {\n    match kind { \"email\" => Ok(Box::new(EmailNotifier)), .. }\n}");
    for kind in ["email", "sms", "pigeon"] {
        match make_notifier(kind) {
            Ok(notifier) => println!("{}", notifier.send("server restarted at noon")),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

trait Discount {
    fn apply(&self, price: f64) -> f64;
}

struct NoDiscount;
struct Percentage(f64);
struct FixedOff(f64);

impl Discount for NoDiscount {
    fn apply(&self, price: f64) -> f64 {
        price
    }
}

impl Discount for Percentage {
    fn apply(&self, price: f64) -> f64 {
        price * (1.0 - self.0 / 100.0)
    }
}

impl Discount for FixedOff {
    fn apply(&self, price: f64) -> f64 {
        (price - self.0).max(0.0)
    }
}

fn checkout(prices: &[f64], discount: &dyn Discount) -> f64 {
    prices.iter().map(|p| discount.apply(*p)).sum()
}

fn strategy_pattern() -> Result<()> {
    let cart = [20.0, 35.0, 5.0];
    show("fn checkout(prices: &[f64], discount: &dyn Discount) -> f64");
    let strategies: [(&str, Box<dyn Discount>); 3] = [
        ("none", Box::new(NoDiscount)),
        ("10%", Box::new(Percentage(10.0))),
        ("$6 off", Box::new(FixedOff(6.0))),
    ];
    for (label, strategy) in &strategies {
        println!("{label:<7} total = {:.2}", checkout(&cart, strategy.as_ref()));
    }

    show("let sorters: [(&str, fn(&mut Vec<i32>)); 2] = [..];");
    let sorters: [(&str, fn(&mut Vec<i32>)); 2] = [
        ("ascending", |v| v.sort()),
        ("descending", |v| v.sort_by(|a, b| b.cmp(a))),
    ];
    for (label, sort) in sorters {
        let mut values = vec![3, 1, 2];
        sort(&mut values);
        println!("{label}: {values:?}");
    }
    Ok(())
}

/// Fans each published event out to every subscriber in subscription order.
#[derive(Default)]
struct EventBus {
    subscribers: Vec<Box<dyn Fn(&str)>>,
}

impl EventBus {
    fn subscribe(&mut self, callback: impl Fn(&str) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn publish(&self, event: &str) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}

fn observer_pattern() -> Result<()> {
    show("struct EventBus { subscribers: Vec<Box<dyn Fn(&str)>> }\nbus.subscribe(move |event| log.borrow_mut().push(event.to_string()));");
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::default();

    let sink = Rc::clone(&log);
    bus.subscribe(move |event| sink.borrow_mut().push(event.to_string()));
    bus.subscribe(|event| println!("printer received {event:?}"));

    bus.publish("user_signed_up");
    bus.publish("order_placed");
    println!("log subscriber saw: {:?}", log.borrow());
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct Request {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    timeout_secs: u64,
}

#[derive(Debug, Default)]
struct RequestBuilder {
    method: Option<String>,
    url: Option<String>,
    headers: Vec<(String, String)>,
    timeout_secs: Option<u64>,
}

impl RequestBuilder {
    fn method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    fn build(self) -> Result<Request> {
        let url = self.url.ok_or_else(|| anyhow!("url is required"))?;
        Ok(Request {
            method: self.method.unwrap_or_else(|| "GET".to_string()),
            url,
            headers: self.headers,
            timeout_secs: self.timeout_secs.unwrap_or(30),
        })
    }
}

fn builder_pattern() -> Result<()> {
    show("RequestBuilder::default()\n    .method(\"POST\")\n    .url(\"https://example.com/api\")\n    .header(\"Accept\", \"application/json\")\n    .build()?");
    let request = RequestBuilder::default()
        .method("POST")
        .url("https://example.com/api")
        .header("Accept", "application/json")
        .timeout_secs(5)
        .build()?;
    println!(
        "{} {} headers={:?} timeout={}s",
        request.method, request.url, request.headers, request.timeout_secs
    );

    let missing = RequestBuilder::default().method("GET").build();
    println!("without url: {:?}", missing.map_err(|e| e.to_string()));
    Ok(())
}
