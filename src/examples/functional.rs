//! Functions, closures, iterator consumers, recursion and function wrappers.

use std::time::Instant;

use anyhow::Result;

use crate::lesson::FUNCTIONAL;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "function_basics",
            FUNCTIONAL,
            "fn signatures, Option for defaults, slices for variadics, tuple returns",
            Action::plain(function_basics),
        )
        .doc_url("https://doc.rust-lang.org/book/ch03-03-how-functions-work.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "iterator_consumers",
            FUNCTIONAL,
            "any, all, min_by_key, max_by, sort_by_key",
            Action::plain(iterator_consumers),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/trait.Iterator.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "scope_closures",
            FUNCTIONAL,
            "Block scope, shadowing, closures capturing by reference and by move",
            Action::plain(scope_closures),
        )
        .doc_url("https://doc.rust-lang.org/book/ch13-01-closures.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "recursion_example",
            FUNCTIONAL,
            "Recursive factorial, fibonacci and flattening a nested enum",
            Action::plain(recursion_example),
        )
        .doc_url("https://doc.rust-lang.org/book/ch15-01-box.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "closure_functions",
            FUNCTIONAL,
            "Closures with map, filter, fold and sort_by",
            Action::plain(closure_functions),
        )
        .doc_url("https://doc.rust-lang.org/rust-by-example/fn/closures.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "function_wrappers",
            FUNCTIONAL,
            "Timing and repeating wrappers built from generic Fn parameters",
            Action::plain(function_wrappers),
        )
        .doc_url("https://doc.rust-lang.org/book/ch19-05-advanced-functions-and-closures.html"),
    )?;
    Ok(())
}

fn greet(name: &str, greeting: Option<&str>) -> String {
    format!("{}, {name}!", greeting.unwrap_or("Hello"))
}

fn sum_all(values: &[i64]) -> i64 {
    values.iter().sum()
}

fn min_max(values: &[i64]) -> Option<(i64, i64)> {
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;
    Some((min, max))
}

fn function_basics() -> Result<()> {
    show("fn greet(name: &str, greeting: Option<&str>) -> String");
    println!("{}", greet("Ferris", None));
    println!("{}", greet("Ferris", Some("Welcome")));

    show_result("sum_all(&[1, 2, 3, 4])", sum_all(&[1, 2, 3, 4]));

    show("fn min_max(values: &[i64]) -> Option<(i64, i64)>");
    println!("min_max(&[3, 9, -2]) = {:?}", min_max(&[3, 9, -2]));
    println!("min_max(&[])         = {:?}", min_max(&[]));
    Ok(())
}

fn iterator_consumers() -> Result<()> {
    let nums = [3, 8, -1, 12, 5];
    show("nums.iter().any(|&n| n < 0)   nums.iter().all(|&n| n < 20)");
    println!("any negative: {}", nums.iter().any(|&n| n < 0));
    println!("all below 20: {}", nums.iter().all(|&n| n < 20));

    let words = ["kiwi", "fig", "banana", "apple"];
    show("words.iter().min_by_key(|w| w.len())   words.iter().max_by_key(|w| w.len())");
    println!("shortest: {:?}", words.iter().min_by_key(|w| w.len()));
    println!("longest:  {:?}", words.iter().max_by_key(|w| w.len()));

    show("sorted.sort_by_key(|w| std::cmp::Reverse(w.len()));");
    let mut sorted = words.to_vec();
    sorted.sort_by_key(|w| std::cmp::Reverse(w.len()));
    println!("by length desc: {sorted:?}");

    let position = nums.iter().position(|&n| n == 12);
    show_result("nums.iter().position(|&n| n == 12)", format!("{position:?}"));
    Ok(())
}

fn scope_closures() -> Result<()> {
    show("let x = 5;\n{\n    let x = x * 2;\n}\n// outer x is still 5");
    let x = 5;
    {
        let x = x * 2;
        println!("inner x = {x}");
    }
    println!("outer x = {x}");

    show("let mut count = 0;\nlet mut inc = || count += 1;");
    let mut count = 0;
    let mut inc = || count += 1;
    inc();
    inc();
    println!("count after two calls: {count}");

    show("fn make_adder(n: i32) -> impl Fn(i32) -> i32 { move |x| x + n }");
    fn make_adder(n: i32) -> impl Fn(i32) -> i32 {
        move |x| x + n
    }
    let add_ten = make_adder(10);
    println!("add_ten(5) = {}", add_ten(5));

    show("fn make_counter() -> impl FnMut() -> u32");
    fn make_counter() -> impl FnMut() -> u32 {
        let mut calls = 0;
        move || {
            calls += 1;
            calls
        }
    }
    let mut counter = make_counter();
    let ticks: Vec<u32> = (0..3).map(|_| counter()).collect();
    println!("counter ticks: {ticks:?}");
    Ok(())
}

fn factorial(n: u64) -> u64 {
    if n <= 1 { 1 } else { n * factorial(n - 1) }
}

fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

#[derive(Debug)]
enum Nested {
    Leaf(i32),
    List(Vec<Nested>),
}

fn flatten(item: &Nested, out: &mut Vec<i32>) {
    match item {
        Nested::Leaf(n) => out.push(*n),
        Nested::List(items) => {
            for child in items {
                flatten(child, out);
            }
        }
    }
}

fn recursion_example() -> Result<()> {
    show("fn factorial(n: u64) -> u64 { if n <= 1 { 1 } else { n * factorial(n - 1) } }");
    println!("factorial(10) = {}", factorial(10));

    let fibs: Vec<u64> = (0..10).map(fibonacci).collect();
    show_result("(0..10).map(fibonacci)", format!("{fibs:?}"));

    let tree = Nested::List(vec![
        Nested::Leaf(1),
        Nested::List(vec![Nested::Leaf(2), Nested::List(vec![Nested::Leaf(3)])]),
        Nested::Leaf(4),
    ]);
    show("enum Nested { Leaf(i32), List(Vec<Nested>) }\nflatten(&tree, &mut out);");
    let mut out = Vec::new();
    flatten(&tree, &mut out);
    println!("flattened = {out:?}");
    Ok(())
}

fn closure_functions() -> Result<()> {
    let square = |x: i32| x * x;
    show_result("let square = |x: i32| x * x;  square(7)", square(7));

    let nums = [1, 2, 3, 4, 5, 6];
    show("nums.iter().map(|x| x * 2)   nums.iter().filter(|x| *x % 2 == 1)");
    let doubled: Vec<i32> = nums.iter().map(|x| x * 2).collect();
    let odd: Vec<&i32> = nums.iter().filter(|x| *x % 2 == 1).collect();
    println!("doubled = {doubled:?}");
    println!("odd     = {odd:?}");

    show("nums.iter().fold(1, |acc, x| acc * x)");
    println!("product = {}", nums.iter().fold(1, |acc, x| acc * x));

    show("people.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));");
    let mut people = vec![("Alice", 30), ("Bob", 25), ("Charlie", 30)];
    people.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    println!("sorted = {people:?}");
    Ok(())
}

/// Run `f`, returning its value and the elapsed wall-clock time in microseconds.
fn timed<T>(f: impl FnOnce() -> T) -> (T, u128) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed().as_micros())
}

fn repeat<F: FnMut(usize)>(times: usize, mut f: F) {
    for i in 0..times {
        f(i);
    }
}

fn function_wrappers() -> Result<()> {
    show("fn timed<T>(f: impl FnOnce() -> T) -> (T, u128)");
    let (sum, micros) = timed(|| (1..=100_000u64).sum::<u64>());
    println!("sum = {sum} in {micros}us");

    show("fn repeat<F: FnMut(usize)>(times: usize, mut f: F)");
    let mut seen = Vec::new();
    repeat(3, |i| seen.push(format!("hello #{i}")));
    println!("{seen:?}");

    show("let ops: [(&str, fn(i32, i32) -> i32); 3] = [(\"add\", |a, b| a + b), ..];");
    let ops: [(&str, fn(i32, i32) -> i32); 3] = [
        ("add", |a, b| a + b),
        ("sub", |a, b| a - b),
        ("mul", |a, b| a * b),
    ];
    for (name, op) in &ops {
        println!("{name}(6, 3) = {}", op(6, 3));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursive_helpers() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(fibonacci(10), 55);

        let tree = Nested::List(vec![Nested::Leaf(1), Nested::List(vec![Nested::Leaf(2)])]);
        let mut out = Vec::new();
        flatten(&tree, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn helpers_with_defaults() {
        assert_eq!(greet("Ferris", None), "Hello, Ferris!");
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[4, -1, 7]), Some((-1, 7)));
    }
}
