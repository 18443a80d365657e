use std::any::type_name;

use anyhow::Result;

use crate::lesson::MODULES_PACKAGING;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "module_system",
            MODULES_PACKAGING,
            "Inline modules, pub / pub(crate) / private items, use paths and re-exports",
            Action::plain(module_system),
        )
        .doc_url("https://doc.rust-lang.org/reference/visibility-and-privacy.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "cargo_packaging",
            MODULES_PACKAGING,
            "Package metadata via env!, cfg! conditions, Cargo.toml features and targets",
            Action::plain(cargo_packaging),
        )
        .doc_url("https://doc.rust-lang.org/cargo/reference/manifest.html"),
    )?;
    Ok(())
}

mod geometry {
    pub mod shapes {
        #[derive(Debug)]
        pub struct Circle {
            pub radius: f64,
        }

        impl Circle {
            pub fn area(&self) -> f64 {
                std::f64::consts::PI * square(self.radius)
            }
        }

        /// Visible anywhere in this crate, not to dependents.
        pub(crate) fn unit() -> Circle {
            Circle { radius: 1.0 }
        }

        // private to `shapes`
        fn square(x: f64) -> f64 {
            x * x
        }

        pub fn location() -> &'static str {
            module_path!()
        }
    }

    pub use shapes::Circle;

    pub(super) fn describe(circle: &Circle) -> String {
        format!("circle r={} area={:.3}", circle.radius, circle.area())
    }
}

use geometry::Circle;

fn module_system() -> Result<()> {
    show("mod geometry {\n    pub mod shapes { pub struct Circle { .. } fn square(..) { .. } }\n    pub use shapes::Circle;\n}\nuse geometry::Circle;");
    let circle = Circle { radius: 2.0 };
    println!("{}", geometry::describe(&circle));
    println!("{}", geometry::describe(&geometry::shapes::unit()));

    show_result("module_path!() inside shapes", geometry::shapes::location());
    show_result("type_name::<Circle>()", type_name::<Circle>());

    show("// lib.rs\npub mod registry;          // src/registry.rs\npub use registry::Registry; // re-export at the crate root\n\n// main.rs\nuse quickref::Registry;");
    println!("this module: {}", module_path!());
    Ok(())
}

fn package_summary() -> String {
    format!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "release" }
}

fn cargo_packaging() -> Result<()> {
    show("env!(\"CARGO_PKG_NAME\")   env!(\"CARGO_PKG_VERSION\")");
    println!("{}", package_summary());
    println!(
        "repository: {}",
        option_env!("CARGO_PKG_REPOSITORY")
            .filter(|r| !r.is_empty())
            .unwrap_or("(not set)")
    );

    show("cfg!(debug_assertions)   cfg!(target_os = \"linux\")   cfg!(unix)");
    println!("profile: {}", build_profile());
    println!("target os: {}, unix: {}", std::env::consts::OS, cfg!(unix));

    show("[features]\ndefault = [\"json\"]\njson = [\"dep:serde_json\"]\n\n#[cfg(feature = \"json\")]\npub mod json;");
    println!("features gate optional modules and dependencies at compile time");

    show("src/lib.rs          library crate\nsrc/main.rs         default binary\nsrc/bin/*.rs        extra binaries\ntests/*.rs          integration tests\nexamples/*.rs       cargo run --example NAME");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_paths_reflect_nesting() {
        assert!(geometry::shapes::location().ends_with("modules_packaging::geometry::shapes"));
        assert!(type_name::<Circle>().ends_with("geometry::shapes::Circle"));
    }

    #[test]
    fn reexported_type_is_the_same_type() {
        let circle: geometry::shapes::Circle = Circle { radius: 1.0 };
        assert!((circle.area() - geometry::shapes::unit().area()).abs() < f64::EPSILON);
    }

    #[test]
    fn package_metadata_comes_from_manifest() {
        assert!(package_summary().starts_with("quickref "));
        assert_eq!(build_profile() == "debug", cfg!(debug_assertions));
    }
}
