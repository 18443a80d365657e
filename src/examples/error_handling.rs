//! Result, Option, the `?` operator, typed errors and context chains.

use std::num::ParseIntError;

use anyhow::{Context, Result, anyhow, bail};
use thiserror::Error;

use crate::lesson::ERROR_HANDLING;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "error_handle",
            ERROR_HANDLING,
            "match on Result, unwrap_or, ok_or and combinators on Option",
            Action::plain(error_handle),
        )
        .doc_url("https://doc.rust-lang.org/book/ch09-02-recoverable-errors-with-result.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "error_propagation",
            ERROR_HANDLING,
            "The ? operator, thiserror enums and anyhow context chains",
            Action::plain(error_propagation),
        )
        .doc_url("https://doc.rust-lang.org/book/ch09-02-recoverable-errors-with-result.html#propagating-errors"),
    )?;
    Ok(())
}

fn safe_divide(a: i32, b: i32) -> Result<i32, String> {
    if b == 0 {
        return Err("division by zero".to_string());
    }
    Ok(a / b)
}

fn error_handle() -> Result<()> {
    show("match \"42\".parse::<i32>() {\n    Ok(n) => ..,\n    Err(e) => ..,\n}");
    for input in ["42", "forty-two"] {
        match input.parse::<i32>() {
            Ok(n) => println!("{input:?} -> {n}"),
            Err(e) => println!("{input:?} -> error: {e}"),
        }
    }

    show_result(
        "\"oops\".parse::<i32>().unwrap_or(0)",
        "oops".parse::<i32>().unwrap_or(0),
    );

    show("safe_divide(10, 0)");
    println!("{:?}", safe_divide(10, 2));
    println!("{:?}", safe_divide(10, 0));

    let names = ["ferris"];
    show("names.get(3).ok_or(\"no such index\")");
    println!("{:?}", names.get(3).ok_or("no such index"));

    show("names.first().map(|n| n.len()).filter(|len| *len > 3)");
    println!("{:?}", names.first().map(|n| n.len()).filter(|len| *len > 3));
    Ok(())
}

#[derive(Debug, Error)]
enum OrderError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    #[error("could not parse quantity")]
    Parse(#[from] ParseIntError),
}

fn parse_order(line: &str) -> Result<(String, i64), OrderError> {
    let (product, qty) = line
        .split_once(':')
        .ok_or_else(|| OrderError::UnknownProduct(line.to_string()))?;
    if !matches!(product, "apple" | "banana") {
        return Err(OrderError::UnknownProduct(product.to_string()));
    }
    let qty: i64 = qty.trim().parse()?;
    if qty <= 0 {
        return Err(OrderError::InvalidQuantity(qty));
    }
    Ok((product.to_string(), qty))
}

fn load_settings(raw: &str) -> Result<u16> {
    let port = raw
        .strip_prefix("port=")
        .ok_or_else(|| anyhow!("missing `port=` prefix"))?;
    let port: u16 = port.parse().context("port is not a number")?;
    if port < 1024 {
        bail!("port {port} is reserved");
    }
    Ok(port)
}

fn error_propagation() -> Result<()> {
    show("#[derive(Debug, Error)]\nenum OrderError {\n    #[error(\"quantity must be positive, got {0}\")]\n    InvalidQuantity(i64),\n    ..\n}");
    for line in ["apple:3", "apple:-1", "melon:2", "banana:lots"] {
        match parse_order(line) {
            Ok(order) => println!("{line:<12} ok  {order:?}"),
            Err(err) => println!("{line:<12} err {err}"),
        }
    }

    show("let port: u16 = port.parse().context(\"port is not a number\")?;");
    for raw in ["port=8080", "port=80", "port=http", "host=x"] {
        match load_settings(raw) {
            Ok(port) => println!("{raw:<10} -> {port}"),
            Err(err) => println!("{raw:<10} -> {err:#}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_errors_are_typed() {
        assert_eq!(parse_order("apple:2").ok(), Some(("apple".to_string(), 2)));
        assert!(matches!(parse_order("apple:0"), Err(OrderError::InvalidQuantity(0))));
        assert!(matches!(parse_order("kiwi:1"), Err(OrderError::UnknownProduct(_))));
        assert!(matches!(parse_order("apple:x"), Err(OrderError::Parse(_))));
    }

    #[test]
    fn context_is_kept_in_chain() {
        let err = load_settings("port=abc").unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with("port is not a number: "));
        assert_eq!(load_settings("port=80").unwrap_err().to_string(), "port 80 is reserved");
        assert_eq!(load_settings("port=9000").unwrap(), 9000);
    }
}
