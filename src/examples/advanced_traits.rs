use std::any::{Any, type_name};
use std::fmt;

use anyhow::Result;
use indexmap::IndexMap;
use thiserror::Error;

use crate::lesson::ADVANCED_TRAITS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "validated_fields",
            ADVANCED_TRAITS,
            "Private fields behind checked setters; const-generic bounded newtypes with TryFrom",
            Action::plain(validated_fields),
        )
        .doc_url("https://doc.rust-lang.org/std/convert/trait.TryFrom.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "plugin_registry",
            ADVANCED_TRAITS,
            "Registering types by an associated const, building them as Box<dyn Trait>, downcasting via Any",
            Action::plain(plugin_registry),
        )
        .doc_url("https://doc.rust-lang.org/std/any/trait.Any.html")
        .tags(["dyn", "any"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "sealed_traits",
            ADVANCED_TRAITS,
            "Sealed traits closed to outside impls, and blanket impls over any matching type",
            Action::plain(sealed_traits),
        )
        .doc_url("https://rust-lang.github.io/api-guidelines/future-proofing.html"),
    )?;
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
enum FieldError {
    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("name must not be blank")]
    BlankName,
}

/// An integer that can only hold values in `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounded<const MIN: i64, const MAX: i64>(i64);

impl<const MIN: i64, const MAX: i64> TryFrom<i64> for Bounded<MIN, MAX> {
    type Error = FieldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN..=MAX).contains(&value) {
            Ok(Bounded(value))
        } else {
            Err(FieldError::OutOfRange {
                value,
                min: MIN,
                max: MAX,
            })
        }
    }
}

type Age = Bounded<0, 150>;

#[derive(Debug)]
struct Person {
    name: String,
    age: Age,
}

impl Person {
    fn new(name: &str, age: i64) -> Result<Self, FieldError> {
        let mut person = Person {
            name: String::new(),
            age: Age::try_from(0)?,
        };
        person.set_name(name)?;
        person.set_age(age)?;
        Ok(person)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn age(&self) -> i64 {
        self.age.0
    }

    fn set_name(&mut self, name: &str) -> Result<(), FieldError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FieldError::BlankName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    fn set_age(&mut self, age: i64) -> Result<(), FieldError> {
        self.age = Age::try_from(age)?;
        Ok(())
    }
}

fn validated_fields() -> Result<()> {
    show("struct Bounded<const MIN: i64, const MAX: i64>(i64);\nimpl TryFrom<i64> for Bounded<MIN, MAX> { .. }\ntype Age = Bounded<0, 150>;");
    println!("Age::try_from(42)  = {:?}", Age::try_from(42));
    println!("Age::try_from(200) = {:?}", Age::try_from(200));

    show("person.set_age(-1)   // fields are private; setters validate");
    let mut person = Person::new("  Ada ", 36)?;
    println!("{} is {}", person.name(), person.age());
    if let Err(err) = person.set_age(-1) {
        println!("rejected: {err}");
    }
    if let Err(err) = person.set_name("   ") {
        println!("rejected: {err}");
    }
    println!("unchanged: {} is {}", person.name(), person.age());
    Ok(())
}

trait Plugin: Any {
    fn run(&self) -> String;
    fn as_any(&self) -> &dyn Any;
}

/// Types that can be registered by name and built on demand.
trait NamedPlugin: Plugin + Default {
    const NAME: &'static str;
}

#[derive(Default)]
struct AuthPlugin;

struct CachePlugin {
    capacity: usize,
}

impl Default for CachePlugin {
    fn default() -> Self {
        CachePlugin { capacity: 128 }
    }
}

impl Plugin for AuthPlugin {
    fn run(&self) -> String {
        "checking credentials".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl NamedPlugin for AuthPlugin {
    const NAME: &'static str = "auth";
}

impl Plugin for CachePlugin {
    fn run(&self) -> String {
        format!("caching up to {} entries", self.capacity)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl NamedPlugin for CachePlugin {
    const NAME: &'static str = "cache";
}

type Factory = fn() -> Box<dyn Plugin>;

fn build<P: NamedPlugin>() -> Box<dyn Plugin> {
    Box::new(P::default())
}

#[derive(Default)]
struct PluginTable {
    factories: IndexMap<&'static str, (Factory, &'static str)>,
}

impl PluginTable {
    fn add<P: NamedPlugin>(&mut self) -> &mut Self {
        self.factories.insert(P::NAME, (build::<P> as Factory, type_name::<P>()));
        self
    }

    fn create(&self, name: &str) -> Option<Box<dyn Plugin>> {
        self.factories.get(name).map(|(factory, _)| factory())
    }

    fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

fn plugin_registry() -> Result<()> {
    show("trait NamedPlugin: Plugin + Default { const NAME: &'static str; }\ntable.add::<AuthPlugin>().add::<CachePlugin>();");
    let mut table = PluginTable::default();
    table.add::<AuthPlugin>().add::<CachePlugin>();
    println!("registered: {:?}", table.names());
    for (name, (_, type_path)) in &table.factories {
        println!("  {name:<5} -> {type_path}");
    }

    show("let plugin = table.create(\"cache\")?;\nplugin.as_any().downcast_ref::<CachePlugin>()");
    for name in ["auth", "cache", "metrics"] {
        match table.create(name) {
            Some(plugin) => {
                let is_cache = plugin.as_any().downcast_ref::<CachePlugin>().is_some();
                println!("{name}: {} (is CachePlugin: {is_cache})", plugin.run());
            }
            None => println!("{name}: not registered"),
        }
    }
    Ok(())
}

mod sealed {
    pub trait Sealed {}
}

/// Implemented only for the unit types in this module.
trait Unit: sealed::Sealed {
    const SYMBOL: &'static str;
    const PER_METER: f64;
}

struct Meters;
struct Feet;

impl sealed::Sealed for Meters {}
impl sealed::Sealed for Feet {}

impl Unit for Meters {
    const SYMBOL: &'static str = "m";
    const PER_METER: f64 = 1.0;
}

impl Unit for Feet {
    const SYMBOL: &'static str = "ft";
    const PER_METER: f64 = 3.280_84;
}

fn convert<Src: Unit, Dst: Unit>(value: f64) -> f64 {
    value / Src::PER_METER * Dst::PER_METER
}

/// Blanket impl: every `Display` type gets a bracketed label for free.
trait Labelled {
    fn label(&self) -> String;
}

impl<T: fmt::Display + ?Sized> Labelled for T {
    fn label(&self) -> String {
        format!("[{self}]")
    }
}

fn sealed_traits() -> Result<()> {
    show("mod sealed { pub trait Sealed {} }\ntrait Unit: sealed::Sealed { const PER_METER: f64; }");
    println!(
        "100 {} = {:.2} {}",
        Meters::SYMBOL,
        convert::<Meters, Feet>(100.0),
        Feet::SYMBOL
    );

    show("impl<T: fmt::Display + ?Sized> Labelled for T { .. }");
    show_result("42_i32.label()", 42_i32.label());
    show_result("\"text\".label()", "text".label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_rejects_values_outside_range() {
        assert_eq!(Bounded::<1, 10>::try_from(10), Ok(Bounded(10)));
        assert_eq!(
            Bounded::<1, 10>::try_from(11),
            Err(FieldError::OutOfRange {
                value: 11,
                min: 1,
                max: 10
            })
        );
    }

    #[test]
    fn failed_setter_leaves_person_unchanged() -> Result<()> {
        let mut person = Person::new("Grace", 45)?;
        assert!(person.set_age(151).is_err());
        assert_eq!(person.set_name(""), Err(FieldError::BlankName));
        assert_eq!((person.name(), person.age()), ("Grace", 45));
        assert_eq!(Person::new("x", -5).unwrap_err().to_string(), "-5 is outside 0..=150");
        Ok(())
    }

    #[test]
    fn plugins_are_built_by_name_and_downcast() {
        let mut table = PluginTable::default();
        table.add::<AuthPlugin>().add::<CachePlugin>();
        assert_eq!(table.names(), vec!["auth", "cache"]);
        let auth = table.create("auth");
        assert!(auth.as_ref().is_some_and(|p| p.as_any().is::<AuthPlugin>()));
        assert!(table.create("unknown").is_none());
    }

    #[test]
    fn unit_conversion_round_trips() {
        let feet = convert::<Meters, Feet>(2.0);
        assert!((convert::<Feet, Meters>(feet) - 2.0).abs() < 1e-9);
        assert_eq!("ok".label(), "[ok]");
    }
}
