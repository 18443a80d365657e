//! Built-in example catalogue. Each submodule registers the examples of one
//! category; `register_all` is the single composition root.

mod advanced;
mod advanced_traits;
mod collections;
mod concurrency;
mod control_flow;
mod data_structures;
mod design_patterns;
mod error_handling;
mod file_operations;
mod functional;
mod iterators_guards;
mod loops;
mod modern;
mod modules_packaging;
mod practical_patterns;
mod stdlib_tools;
mod strings;
mod testing_debugging;
mod traits;
mod type_system;

use anyhow::Result;
use tracing::debug;

use crate::registry::{Registry, RegistryError};

/// Register every built-in example, category by category.
pub fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    data_structures::register(registry)?;
    control_flow::register(registry)?;
    strings::register(registry)?;
    loops::register(registry)?;
    functional::register(registry)?;
    traits::register(registry)?;
    error_handling::register(registry)?;
    collections::register(registry)?;
    file_operations::register(registry)?;
    advanced::register(registry)?;
    modern::register(registry)?;
    stdlib_tools::register(registry)?;
    design_patterns::register(registry)?;
    practical_patterns::register(registry)?;
    concurrency::register(registry)?;
    type_system::register(registry)?;
    iterators_guards::register(registry)?;
    advanced_traits::register(registry)?;
    modules_packaging::register(registry)?;
    testing_debugging::register(registry)?;
    debug!(count = registry.len(), "registered built-in examples");
    Ok(())
}

/// A fresh registry holding the built-in catalogue.
pub fn standard_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{
        ADVANCED_TRAITS, CONCURRENCY, Curriculum, ITERATORS_GUARDS, MODULES_PACKAGING,
        TESTING_DEBUGGING, TYPE_SYSTEM,
    };
    use crate::resolve;
    use crate::runner::Runner;

    #[test]
    fn standard_registry_has_no_gaps() -> Result<()> {
        let registry = standard_registry()?;
        assert!(registry.len() > 50);
        let missing = resolve::missing_categories(&registry, Curriculum::standard());
        assert!(missing.is_empty(), "categories without examples: {missing:?}");
        Ok(())
    }

    #[test]
    fn registering_twice_is_rejected() -> Result<()> {
        let mut registry = standard_registry()?;
        let before = registry.len();
        let err = register_all(&mut registry).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateExample {
                name: "basic_types".to_string()
            }
        );
        assert_eq!(registry.len(), before);
        Ok(())
    }

    #[test]
    fn unassigned_categories_run_last() -> Result<()> {
        let registry = standard_registry()?;
        let order = resolve::placements(&registry, Curriculum::standard());
        let first_unassigned = order
            .iter()
            .position(|p| p.lesson.is_none())
            .unwrap_or(order.len());
        assert!(order[first_unassigned..].iter().all(|p| p.lesson.is_none()));
        let unassigned = [
            CONCURRENCY,
            TYPE_SYSTEM,
            ITERATORS_GUARDS,
            ADVANCED_TRAITS,
            MODULES_PACKAGING,
            TESTING_DEBUGGING,
        ];
        for placement in &order[first_unassigned..] {
            let category = placement.example.category.as_str();
            assert!(unassigned.contains(&category), "unexpected category {category}");
        }
        let groups = registry.by_category();
        for category in unassigned {
            assert!(groups.contains_key(category), "{category} has no examples");
        }
        assert_eq!(order.len(), registry.len());
        Ok(())
    }

    #[test]
    fn every_builtin_example_runs() -> Result<()> {
        let registry = standard_registry()?;
        let dir = tempfile::tempdir()?;
        let output_dir = dir.path().join("data");
        let mut runner = Runner::new(
            &registry,
            Curriculum::standard(),
            output_dir.clone(),
            Vec::new(),
        );
        runner.run_all()?;
        assert!(output_dir.join("student.json").exists());
        let banners = String::from_utf8(runner.into_inner())?;
        assert!(banners.contains("Lesson 1: Data Structures"));
        assert!(banners.contains("--- threading_example"));
        assert!(banners.contains("--- async_tasks"));
        assert!(banners.contains("--- debugging_example"));
        Ok(())
    }
}
