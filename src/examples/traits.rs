use std::fmt;
use std::ops::{Add, Mul};

use anyhow::Result;

use crate::lesson::STRUCTS_TRAITS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "struct_basics",
            STRUCTS_TRAITS,
            "Structs with impl blocks, associated constructors, Default and Display",
            Action::plain(struct_basics),
        )
        .doc_url("https://doc.rust-lang.org/book/ch05-00-structs.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "operator_traits",
            STRUCTS_TRAITS,
            "Add, Mul, PartialEq and PartialOrd implemented for a vector type",
            Action::plain(operator_traits),
        )
        .doc_url("https://doc.rust-lang.org/std/ops/index.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "trait_defaults",
            STRUCTS_TRAITS,
            "Traits with default methods, overriding them and generic bounds",
            Action::plain(trait_defaults),
        )
        .doc_url("https://doc.rust-lang.org/book/ch10-02-traits.html"),
    )?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct Account {
    owner: String,
    balance: i64,
}

impl Account {
    fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance: 0,
        }
    }

    fn deposit(&mut self, amount: i64) -> i64 {
        self.balance += amount;
        self.balance
    }

    fn withdraw(&mut self, amount: i64) -> Option<i64> {
        if amount > self.balance {
            return None;
        }
        self.balance -= amount;
        Some(self.balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (balance {})", self.owner, self.balance)
    }
}

#[derive(Debug, Default)]
struct Settings {
    verbose: bool,
    retries: u32,
    name: String,
}

fn struct_basics() -> Result<()> {
    show("struct Account { owner: String, balance: i64 }\nimpl Account { fn new(owner: impl Into<String>) -> Self { .. } }");
    let mut account = Account::new("Ferris");
    account.deposit(100);
    println!("after deposit:  {account}");
    println!("withdraw 30:    {:?}", account.withdraw(30));
    println!("withdraw 500:   {:?}", account.withdraw(500));
    println!("debug:          {account:?}");

    show("#[derive(Default)] struct Settings { .. }\nSettings { retries: 3, ..Default::default() }");
    let settings = Settings {
        retries: 3,
        ..Default::default()
    };
    println!("{settings:?}");
    println!(
        "verbose={} retries={} name={:?}",
        settings.verbose, settings.retries, settings.name
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f64) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({}, {})", self.x, self.y)
    }
}

fn operator_traits() -> Result<()> {
    let a = Vec2 { x: 1.0, y: 2.0 };
    let b = Vec2 { x: 3.0, y: 4.0 };
    show("impl Add for Vec2 { type Output = Vec2; fn add(self, other: Vec2) -> Vec2 { .. } }");
    show_result("a + b", a + b);
    show_result("a * 3.0", a * 3.0);
    show_result("b.length()", b.length());
    show_result("a == Vec2 { x: 1.0, y: 2.0 }", a == Vec2 { x: 1.0, y: 2.0 });
    show_result("a < b", a < b);
    Ok(())
}

trait Describe {
    fn name(&self) -> String;

    fn describe(&self) -> String {
        format!("this is {}", self.name())
    }
}

struct Dog;
struct Robot {
    model: u32,
}

impl Describe for Dog {
    fn name(&self) -> String {
        "a dog".to_string()
    }
}

impl Describe for Robot {
    fn name(&self) -> String {
        format!("robot #{}", self.model)
    }

    fn describe(&self) -> String {
        format!("{} reporting for duty", self.name())
    }
}

fn announce(item: &impl Describe) -> String {
    item.describe().to_uppercase()
}

fn trait_defaults() -> Result<()> {
    show("trait Describe {\n    fn name(&self) -> String;\n    fn describe(&self) -> String { format!(\"this is {}\", self.name()) }\n}");
    println!("{}", Dog.describe());
    println!("{}", Robot { model: 7 }.describe());

    show("fn announce(item: &impl Describe) -> String");
    println!("{}", announce(&Dog));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_refuses_overdraft() {
        let mut account = Account::new("test");
        assert_eq!(account.deposit(50), 50);
        assert_eq!(account.withdraw(80), None);
        assert_eq!(account.withdraw(20), Some(30));
        assert_eq!(account.to_string(), "test (balance 30)");
    }

    #[test]
    fn vector_operators() {
        let sum = Vec2 { x: 1.0, y: 2.0 } + Vec2 { x: 2.0, y: 2.0 };
        assert_eq!(sum, Vec2 { x: 3.0, y: 4.0 });
        assert_eq!(sum.length(), 5.0);
        assert_eq!(sum * 2.0, Vec2 { x: 6.0, y: 8.0 });
    }

    #[test]
    fn default_method_can_be_overridden() {
        assert_eq!(Dog.describe(), "this is a dog");
        assert_eq!(Robot { model: 1 }.describe(), "robot #1 reporting for duty");
    }
}
