use std::any::Any;
use std::fmt::{Debug, Display};

use anyhow::Result;

use crate::lesson::TYPE_SYSTEM;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "generics_example",
            TYPE_SYSTEM,
            "Generic functions and structs with trait bounds and where clauses",
            Action::plain(generics_example),
        )
        .doc_url("https://doc.rust-lang.org/book/ch10-01-syntax.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "trait_objects",
            TYPE_SYSTEM,
            "dyn Trait for heterogeneous collections and Any for downcasting",
            Action::plain(trait_objects),
        )
        .doc_url("https://doc.rust-lang.org/book/ch18-02-trait-objects.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "associated_types",
            TYPE_SYSTEM,
            "Traits with associated types and constants",
            Action::plain(associated_types),
        )
        .doc_url("https://doc.rust-lang.org/book/ch19-03-advanced-traits.html"),
    )?;
    Ok(())
}

fn largest<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    let mut iter = items.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |best, x| if x > best { x } else { best }))
}

#[derive(Debug)]
struct Pair<T> {
    left: T,
    right: T,
}

impl<T> Pair<T>
where
    T: PartialOrd + Display,
{
    fn larger(&self) -> &T {
        if self.left >= self.right { &self.left } else { &self.right }
    }
}

fn generics_example() -> Result<()> {
    show("fn largest<T: PartialOrd + Copy>(items: &[T]) -> Option<T>");
    println!("{:?}", largest(&[3, 9, 2]));
    println!("{:?}", largest(&[1.5, -0.5]));
    println!("{:?}", largest(&['x', 'b', 'q']));
    println!("{:?}", largest::<u8>(&[]));

    show("impl<T> Pair<T> where T: PartialOrd + Display { fn larger(&self) -> &T { .. } }");
    let pair = Pair { left: "pear", right: "apple" };
    show_result("pair.larger()", pair.larger());
    let numbers = Pair { left: 4, right: 11 };
    println!("{numbers:?} larger = {}", numbers.larger());
    Ok(())
}

trait Shape: Debug {
    fn area(&self) -> f64;
    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug)]
struct Square(f64);

#[derive(Debug)]
struct Circle(f64);

impl Shape for Square {
    fn area(&self) -> f64 {
        self.0 * self.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.0 * self.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn total_area(shapes: &[Box<dyn Shape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

fn trait_objects() -> Result<()> {
    show("let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Square(2.0)), Box::new(Circle(1.0))];");
    let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Square(2.0)), Box::new(Circle(1.0))];
    for shape in &shapes {
        println!("{shape:?} area {:.3}", shape.area());
    }
    println!("total area {:.3}", total_area(&shapes));

    show("shape.as_any().downcast_ref::<Square>()");
    for shape in &shapes {
        match shape.as_any().downcast_ref::<Square>() {
            Some(square) => println!("found a square with side {}", square.0),
            None => println!("{shape:?} is not a square"),
        }
    }
    Ok(())
}

trait Container {
    type Item;
    const KIND: &'static str;

    fn items(&self) -> Vec<Self::Item>;
}

struct Shelf(Vec<&'static str>);
struct Range10;

impl Container for Shelf {
    type Item = &'static str;
    const KIND: &'static str = "shelf";

    fn items(&self) -> Vec<&'static str> {
        self.0.clone()
    }
}

impl Container for Range10 {
    type Item = u8;
    const KIND: &'static str = "range";

    fn items(&self) -> Vec<u8> {
        (0..10).collect()
    }
}

fn describe<C: Container>(container: &C) -> String
where
    C::Item: Debug,
{
    format!("{} with {:?}", C::KIND, container.items())
}

fn associated_types() -> Result<()> {
    show("trait Container { type Item; const KIND: &'static str; fn items(&self) -> Vec<Self::Item>; }");
    println!("{}", describe(&Shelf(vec!["book", "lamp"])));
    println!("{}", describe(&Range10));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_handles_empty_and_mixed() {
        assert_eq!(largest(&[2, 7, 7, 1]), Some(7));
        assert_eq!(largest::<i32>(&[]), None);
        assert_eq!(Pair { left: 3, right: 3 }.larger(), &3);
    }

    #[test]
    fn downcast_finds_concrete_type() {
        let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Circle(1.0)), Box::new(Square(3.0))];
        let squares = shapes
            .iter()
            .filter(|s| s.as_any().downcast_ref::<Square>().is_some())
            .count();
        assert_eq!(squares, 1);
        assert_eq!(describe(&Shelf(vec!["a"])), "shelf with [\"a\"]");
    }
}
