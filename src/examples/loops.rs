use anyhow::Result;

use crate::lesson::LOOPS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::show;

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "loop_range",
            LOOPS,
            "enumerate() and zip() to iterate with indices and parallel sequences",
            Action::plain(loop_range),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/trait.Iterator.html#method.zip"),
    )?;
    Ok(())
}

fn loop_range() -> Result<()> {
    show("for i in 0..3 { .. }   for i in (0..3).rev() { .. }");
    let up: Vec<_> = (0..3).collect();
    let down: Vec<_> = (0..3).rev().collect();
    println!("up: {up:?}, down: {down:?}");

    let fruits = ["apple", "banana", "cherry"];
    show("for (i, fruit) in fruits.iter().enumerate() { .. }");
    for (i, fruit) in fruits.iter().enumerate() {
        println!("{i}: {fruit}");
    }

    let prices = [1.20, 0.50, 3.00];
    show("for (fruit, price) in fruits.iter().zip(prices) { .. }");
    for (fruit, price) in fruits.iter().zip(prices) {
        println!("{fruit:<8} ${price:.2}");
    }
    Ok(())
}
