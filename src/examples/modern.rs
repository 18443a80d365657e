//! Derives, exhaustive matching, iterator impls, rich enums and let-else.

use std::collections::HashSet;

use anyhow::{Result, bail};

use crate::lesson::MODERN_RUST;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "derive_example",
            MODERN_RUST,
            "derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)",
            Action::plain(derive_example),
        )
        .doc_url("https://doc.rust-lang.org/book/appendix-03-derivable-traits.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "pattern_matching",
            MODERN_RUST,
            "match with guards, bindings, ranges, nested enums and slices",
            Action::plain(pattern_matching),
        )
        .doc_url("https://doc.rust-lang.org/book/ch19-00-patterns.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "custom_iterators",
            MODERN_RUST,
            "Implementing Iterator, iter::from_fn and iter::successors",
            Action::plain(custom_iterators),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/index.html#implementing-iterator"),
    )?;
    registry.register(
        ExampleInfo::new(
            "enum_example",
            MODERN_RUST,
            "Enums carrying data, methods on enums and exhaustive matches",
            Action::plain(enum_example),
        )
        .doc_url("https://doc.rust-lang.org/book/ch06-01-defining-an-enum.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "let_else",
            MODERN_RUST,
            "let-else for early returns and if-let chains over Option",
            Action::plain(let_else),
        )
        .doc_url("https://doc.rust-lang.org/rust-by-example/flow_control/let_else.html"),
    )?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

fn derive_example() -> Result<()> {
    show("#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]\nstruct Version { major: u32, minor: u32, patch: u32 }");
    let v1 = Version { major: 1, minor: 2, patch: 0 };
    let v2 = Version { major: 1, minor: 10, patch: 3 };
    println!("{v1:?} < {v2:?}: {}", v1 < v2);
    println!("default: {:?}", Version::default());

    let mut versions = vec![v2.clone(), v1.clone(), Version::default()];
    versions.sort();
    println!("sorted: {versions:?}");

    let unique: HashSet<Version> = [v1.clone(), v1.clone(), v2].into_iter().collect();
    show_result("unique.len()", unique.len());
    Ok(())
}

#[derive(Debug)]
enum Shape {
    Circle { radius: f64 },
    Rect { w: f64, h: f64 },
    Triangle(f64, f64, f64),
}

fn describe_number(n: i32) -> &'static str {
    match n {
        i32::MIN..=-1 => "negative",
        0 => "zero",
        x if x % 2 == 0 => "positive even",
        _ => "positive odd",
    }
}

fn describe_slice(items: &[i32]) -> String {
    match items {
        [] => "empty".to_string(),
        [only] => format!("one item: {only}"),
        [first, .., last] => format!("{first}..{last} ({} items)", items.len()),
    }
}

fn pattern_matching() -> Result<()> {
    show("match n {\n    i32::MIN..=-1 => \"negative\",\n    0 => \"zero\",\n    x if x % 2 == 0 => \"positive even\",\n    _ => \"positive odd\",\n}");
    for n in [-5, 0, 4, 7] {
        println!("{n}: {}", describe_number(n));
    }

    let shapes = [
        Shape::Circle { radius: 1.0 },
        Shape::Rect { w: 2.0, h: 3.0 },
        Shape::Triangle(3.0, 4.0, 5.0),
    ];
    show("match shape {\n    Shape::Circle { radius } => ..,\n    Shape::Rect { w, h } if w == h => ..,\n    ..\n}");
    for shape in &shapes {
        let text = match shape {
            Shape::Circle { radius } => {
                format!("circle area {:.2}", std::f64::consts::PI * radius * radius)
            }
            Shape::Rect { w, h } if w == h => format!("square side {w}"),
            Shape::Rect { w, h } => format!("rect {w}x{h}"),
            Shape::Triangle(a, b, c) => format!("triangle perimeter {}", a + b + c),
        };
        println!("{text}");
    }

    show("match items { [] => .., [only] => .., [first, .., last] => .. }");
    let cases: [&[i32]; 3] = [&[], &[7], &[1, 2, 3, 4]];
    for items in cases {
        println!("{}", describe_slice(items));
    }

    show("n @ 1..=9 => format!(\"digit {n}\")");
    let code = 7;
    let label = match code {
        n @ 1..=9 => format!("digit {n}"),
        n => format!("other {n}"),
    };
    println!("{label}");
    Ok(())
}

/// Counts down from `remaining` to 1.
struct Countdown {
    remaining: u32,
}

impl Iterator for Countdown {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.remaining;
        self.remaining -= 1;
        Some(current)
    }
}

fn custom_iterators() -> Result<()> {
    show("impl Iterator for Countdown { type Item = u32; fn next(&mut self) -> Option<u32> { .. } }");
    let values: Vec<u32> = Countdown { remaining: 5 }.collect();
    println!("{values:?}");
    let evens: u32 = Countdown { remaining: 10 }.filter(|n| n % 2 == 0).sum();
    println!("sum of even countdown values: {evens}");

    show("let mut state = (0u64, 1u64);\nstd::iter::from_fn(move || { .. })");
    let mut state = (0u64, 1u64);
    let fib: Vec<u64> = std::iter::from_fn(move || {
        let current = state.0;
        state = (state.1, state.0 + state.1);
        Some(current)
    })
    .take(10)
    .collect();
    println!("{fib:?}");

    show("std::iter::successors(Some(1u32), |n| n.checked_mul(10))");
    let powers: Vec<u32> = std::iter::successors(Some(1u32), |n| n.checked_mul(10)).collect();
    println!("{} powers of ten fit in u32; last {:?}", powers.len(), powers.last());
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Quit,
    Move { x: i32, y: i32 },
    Write(String),
    Color(u8, u8, u8),
}

impl Command {
    fn parse(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "quit" => Some(Command::Quit),
            "move" => {
                let x = parts.next()?.parse().ok()?;
                let y = parts.next()?.parse().ok()?;
                Some(Command::Move { x, y })
            }
            "write" => Some(Command::Write(parts.collect::<Vec<_>>().join(" "))),
            "color" => {
                let mut channel = || parts.next()?.parse::<u8>().ok();
                Some(Command::Color(channel()?, channel()?, channel()?))
            }
            _ => None,
        }
    }

    fn summary(&self) -> String {
        match self {
            Command::Quit => "quit".to_string(),
            Command::Move { x, y } => format!("move to ({x}, {y})"),
            Command::Write(text) => format!("write {text:?}"),
            Command::Color(r, g, b) => format!("color #{r:02x}{g:02x}{b:02x}"),
        }
    }
}

fn enum_example() -> Result<()> {
    show("enum Command { Quit, Move { x: i32, y: i32 }, Write(String), Color(u8, u8, u8) }");
    for line in ["move 3 -4", "write hello world", "color 255 128 0", "jump", "quit"] {
        match Command::parse(line) {
            Some(cmd) => println!("{line:<20} -> {}", cmd.summary()),
            None => println!("{line:<20} -> unrecognised"),
        }
    }

    show("Option<Option<i32>> flattens with .flatten()");
    let nested: Option<Option<i32>> = Some(Some(3));
    println!("{:?}", nested.flatten());
    Ok(())
}

fn parse_key_value(line: &str) -> Result<(&str, i64)> {
    let Some((key, raw)) = line.split_once('=') else {
        bail!("expected key=value, got {line:?}");
    };
    let Ok(value) = raw.trim().parse::<i64>() else {
        bail!("value for {key} is not an integer");
    };
    Ok((key.trim(), value))
}

fn let_else() -> Result<()> {
    show("let Some((key, raw)) = line.split_once('=') else {\n    bail!(\"expected key=value\");\n};");
    for line in ["retries = 3", "timeout", "port = high"] {
        match parse_key_value(line) {
            Ok((key, value)) => println!("{key} -> {value}"),
            Err(err) => println!("error: {err}"),
        }
    }

    show("if let Some(user) = find_user(id) && user.active { .. }");
    let users = [("ferris", true), ("corro", false)];
    for name in ["ferris", "corro", "nobody"] {
        if let Some((_, active)) = users.iter().find(|(n, _)| *n == name)
            && *active
        {
            println!("{name} is active");
        } else {
            println!("{name} is inactive or unknown");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parsing() {
        assert_eq!(Command::parse("move 1 2"), Some(Command::Move { x: 1, y: 2 }));
        assert_eq!(Command::parse("color 1 2 300"), None);
        assert_eq!(Command::parse("write a  b"), Some(Command::Write("a b".to_string())));
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::Color(255, 0, 16).summary(), "color #ff0010");
    }

    #[test]
    fn countdown_yields_descending() {
        let values: Vec<u32> = Countdown { remaining: 3 }.collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn match_helpers() {
        assert_eq!(describe_number(-1), "negative");
        assert_eq!(describe_number(8), "positive even");
        assert_eq!(describe_slice(&[]), "empty");
        assert_eq!(describe_slice(&[1, 9]), "1..9 (2 items)");
    }

    #[test]
    fn let_else_rejects_bad_lines() {
        assert_eq!(parse_key_value("a = 5").unwrap(), ("a", 5));
        assert!(parse_key_value("a").is_err());
        assert!(parse_key_value("a = x").is_err());
    }
}
