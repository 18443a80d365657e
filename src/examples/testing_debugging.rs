use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use crate::lesson::TESTING_DEBUGGING;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "unit_testing",
            TESTING_DEBUGGING,
            "#[test], assert macros, #[should_panic], table-driven cases and trait-based test doubles",
            Action::plain(unit_testing),
        )
        .doc_url("https://doc.rust-lang.org/book/ch11-01-writing-tests.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "debugging_example",
            TESTING_DEBUGGING,
            "dbg!, pretty Debug output, error context chains and captured backtraces",
            Action::plain(debugging_example),
        )
        .doc_url("https://doc.rust-lang.org/std/macro.dbg.html"),
    )?;
    Ok(())
}

fn checked_div(a: i32, b: i32) -> Result<i32> {
    if b == 0 {
        bail!("division by zero");
    }
    Ok(a / b)
}

/// Panics on an empty slice.
fn first_word(words: &[&str]) -> String {
    assert!(!words.is_empty(), "need at least one word");
    words[0].to_lowercase()
}

trait Mailer {
    fn send(&self, to: &str, body: &str) -> Result<()>;
}

/// Records every message instead of sending it.
#[derive(Default)]
struct RecordingMailer {
    sent: RefCell<Vec<(String, String)>>,
}

impl Mailer for RecordingMailer {
    fn send(&self, to: &str, body: &str) -> Result<()> {
        self.sent.borrow_mut().push((to.to_string(), body.to_string()));
        Ok(())
    }
}

fn notify_overdue(mailer: &dyn Mailer, accounts: &[(&str, i64)]) -> Result<usize> {
    let mut sent = 0;
    for &(email, balance) in accounts {
        if balance < 0 {
            mailer.send(email, &format!("balance is {balance}"))?;
            sent += 1;
        }
    }
    Ok(sent)
}

fn unit_testing() -> Result<()> {
    show("#[cfg(test)]\nmod tests {\n    use super::*;\n\n    #[test]\n    fn divides() -> Result<()> {\n        assert_eq!(checked_div(7, 2)?, 3);\n        Ok(())\n    }\n\n    #[test]\n    #[should_panic(expected = \"need at least one word\")]\n    fn empty_input_panics() { first_word(&[]); }\n}");
    println!("cargo test runs them; cargo test divides filters by name");

    show("for (a, b, expected) in cases { assert_eq!(checked_div(a, b)?, expected, \"{a}/{b}\"); }");
    let cases = [(10, 2, 5), (9, 3, 3), (-8, 4, -2)];
    for (a, b, expected) in cases {
        let got = checked_div(a, b)?;
        let status = if got == expected { "PASS" } else { "FAIL" };
        println!("  {a}/{b} = {got}, expected {expected}: {status}");
    }
    show_result("checked_div(1, 0).is_err()", checked_div(1, 0).is_err());
    show_result("first_word(&[\"Hello\", \"world\"])", first_word(&["Hello", "world"]));

    show("struct RecordingMailer { sent: RefCell<Vec<..>> }\nimpl Mailer for RecordingMailer { .. }");
    let mailer = RecordingMailer::default();
    let count = notify_overdue(&mailer, &[("a@example.com", -5), ("b@example.com", 10)])?;
    println!("sent {count} message(s): {:?}", mailer.sent.borrow());
    Ok(())
}

#[derive(Debug)]
struct Order {
    id: u32,
    items: BTreeMap<&'static str, u32>,
}

fn load_quantity(order: &Order, item: &str) -> Result<u32> {
    order
        .items
        .get(item)
        .copied()
        .with_context(|| format!("order {} has no {item}", order.id))
}

fn debugging_example() -> Result<()> {
    show("let total = dbg!(price * quantity);  // prints file:line and value to stderr");
    let price = 4;
    let quantity = 3;
    let total = dbg!(price * quantity);
    println!("dbg! passes the value through: {total}");

    show("println!(\"{order:#?}\")");
    let order = Order {
        id: 7,
        items: BTreeMap::from([("apple", 2), ("pear", 1)]),
    };
    println!("{order:#?}");

    show("load_quantity(&order, \"fig\").context(\"restocking\")  // {err:#} joins the chain");
    if let Err(err) = load_quantity(&order, "fig").context("restocking failed") {
        println!("{err:#}");
        for (depth, cause) in err.chain().enumerate() {
            println!("  {depth}: {cause}");
        }
    }

    show("Backtrace::capture()  // enabled by RUST_BACKTRACE=1");
    let trace = Backtrace::capture();
    let state = match trace.status() {
        BacktraceStatus::Captured => "captured",
        BacktraceStatus::Disabled => "disabled (set RUST_BACKTRACE=1)",
        _ => "unsupported on this platform",
    };
    println!("backtrace: {state}");

    show("debug_assert!(total > 0, \"total must be positive\");  // compiled out in release");
    debug_assert!(total > 0, "total must be positive");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_and_rejects_zero() -> Result<()> {
        assert_eq!(checked_div(7, 2)?, 3);
        assert_eq!(checked_div(1, 0).unwrap_err().to_string(), "division by zero");
        Ok(())
    }

    #[test]
    #[should_panic(expected = "need at least one word")]
    fn empty_input_panics() {
        first_word(&[]);
    }

    #[test]
    fn only_negative_balances_are_mailed() -> Result<()> {
        let mailer = RecordingMailer::default();
        let sent = notify_overdue(&mailer, &[("x@example.com", 1), ("y@example.com", -2)])?;
        assert_eq!(sent, 1);
        assert_eq!(
            *mailer.sent.borrow(),
            vec![("y@example.com".to_string(), "balance is -2".to_string())]
        );
        Ok(())
    }

    #[test]
    fn missing_item_error_keeps_context_chain() {
        let order = Order {
            id: 3,
            items: BTreeMap::from([("apple", 1)]),
        };
        let err = load_quantity(&order, "fig").context("restocking failed").unwrap_err();
        assert_eq!(format!("{err:#}"), "restocking failed: order 3 has no fig");
        assert_eq!(first_word(&["Hello", "world"]), "hello");
    }
}
