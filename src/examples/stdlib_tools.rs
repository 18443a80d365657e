use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::lesson::STDLIB_TOOLS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "path_example",
            STDLIB_TOOLS,
            "Path and PathBuf: join, components, extension, file_stem, parent",
            Action::plain(path_example),
        )
        .doc_url("https://doc.rust-lang.org/std/path/struct.Path.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "datetime_example",
            STDLIB_TOOLS,
            "chrono dates: Utc::now, offsets, strftime formatting, RFC 3339 parsing",
            Action::plain(datetime_example),
        )
        .doc_url("https://docs.rs/chrono/latest/chrono/")
        .tags(["chrono", "time"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "env_example",
            STDLIB_TOOLS,
            "Reading environment variables and process arguments",
            Action::plain(env_example),
        )
        .doc_url("https://doc.rust-lang.org/std/env/index.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "lazy_statics",
            STDLIB_TOOLS,
            "Lazily initialised statics with once_cell::sync::Lazy",
            Action::plain(lazy_statics),
        )
        .doc_url("https://docs.rs/once_cell/latest/once_cell/sync/struct.Lazy.html")
        .tags(["once_cell"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "hash_digest",
            STDLIB_TOOLS,
            "SHA-256 digests with the sha2 crate and hex formatting",
            Action::plain(hash_digest),
        )
        .doc_url("https://docs.rs/sha2/latest/sha2/")
        .tags(["sha2"]),
    )?;
    Ok(())
}

fn path_example() -> Result<()> {
    let base = Path::new("/srv/app");
    show("let config = base.join(\"conf\").join(\"settings.yaml\");");
    let config: PathBuf = base.join("conf").join("settings.yaml");
    println!("full path:  {}", config.display());
    println!("file name:  {:?}", config.file_name());
    println!("stem:       {:?}", config.file_stem());
    println!("extension:  {:?}", config.extension());
    println!("parent:     {:?}", config.parent());

    show("config.components().count()   config.strip_prefix(base)");
    println!("components: {}", config.components().count());
    println!("relative:   {}", config.strip_prefix(base)?.display());

    let mut renamed = config.clone();
    renamed.set_extension("json");
    show_result("renamed.set_extension(\"json\")", renamed.display());
    Ok(())
}

fn next_day_rfc3339(stamp: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(stamp)
        .with_context(|| format!("invalid RFC 3339 timestamp {stamp:?}"))?;
    Ok((parsed + Duration::days(1)).to_rfc3339())
}

fn days_between(from: &str, to: &str) -> Result<i64> {
    let from = NaiveDate::parse_from_str(from, "%Y-%m-%d")?;
    let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")?;
    Ok((to - from).num_days())
}

fn datetime_example() -> Result<()> {
    show("let now = Utc::now();\nlet tomorrow = now + Duration::days(1);");
    let now = Utc::now();
    let tomorrow = now + Duration::days(1);
    println!("now:      {}", now.format("%Y-%m-%d %H:%M:%S %Z"));
    println!("tomorrow: {}", tomorrow.format("%A, %d %B %Y"));

    show("let tokyo = FixedOffset::east_opt(9 * 3600)?;\nnow.with_timezone(&tokyo)");
    let tokyo = FixedOffset::east_opt(9 * 3600).context("offset out of range")?;
    println!("UTC+9:    {}", now.with_timezone(&tokyo).to_rfc3339());

    show("DateTime::parse_from_rfc3339(\"2024-02-28T23:30:00+02:00\")? + Duration::days(1)");
    println!("next day: {}", next_day_rfc3339("2024-02-28T23:30:00+02:00")?);

    show("NaiveDate::parse_from_str(\"2024-12-25\", \"%Y-%m-%d\")?   (to - from).num_days()");
    println!("2024-01-01 -> 2024-12-25: {} days", days_between("2024-01-01", "2024-12-25")?);

    show("let start = Instant::now(); ..; start.elapsed()");
    let start = Instant::now();
    let total: u64 = (0..50_000u64).map(|n| n % 7).sum();
    println!("computed {total} in {:?}", start.elapsed());
    Ok(())
}

fn env_example() -> Result<()> {
    show("env::var(\"HOME\")   env::var(\"QUICKREF_UNSET_VARIABLE\").unwrap_or_else(..)");
    match env::var("HOME") {
        Ok(home) => println!("HOME is set ({} chars)", home.len()),
        Err(err) => println!("HOME unavailable: {err}"),
    }
    let fallback = env::var("QUICKREF_UNSET_VARIABLE").unwrap_or_else(|_| "default".to_string());
    println!("fallback value: {fallback}");

    show("env::args().count()   env::current_dir()?");
    println!("argument count: {}", env::args().count());
    println!("current dir exists: {}", env::current_dir()?.exists());
    Ok(())
}

static UNIT_FACTORS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    tracing::debug!("building unit table");
    HashMap::from([("mm", 0.001), ("cm", 0.01), ("m", 1.0), ("km", 1000.0)])
});

fn to_meters(value: f64, unit: &str) -> Option<f64> {
    UNIT_FACTORS.get(unit).map(|factor| value * factor)
}

fn lazy_statics() -> Result<()> {
    show("static UNIT_FACTORS: Lazy<HashMap<&str, f64>> = Lazy::new(|| HashMap::from([..]));");
    println!("2.5 km = {:?} m", to_meters(2.5, "km"));
    println!("30 cm  = {:?} m", to_meters(30.0, "cm"));
    println!("1 mile = {:?}", to_meters(1.0, "mile"));
    show_result("UNIT_FACTORS.len()", UNIT_FACTORS.len());
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn hash_digest() -> Result<()> {
    show("let digest = Sha256::digest(b\"hello\");");
    println!("sha256(\"hello\") = {}", sha256_hex(b"hello"));

    show("let mut hasher = Sha256::new();\nhasher.update(b\"hel\");\nhasher.update(b\"lo\");");
    let mut hasher = Sha256::new();
    hasher.update(b"hel");
    hasher.update(b"lo");
    let incremental: String = hasher.finalize().iter().map(|b| format!("{b:02x}")).collect();
    show_result("incremental == one-shot", incremental == sha256_hex(b"hello"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_known_input() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn date_arithmetic_crosses_leap_day() -> Result<()> {
        assert_eq!(
            next_day_rfc3339("2024-02-28T23:30:00+02:00")?,
            "2024-02-29T23:30:00+02:00"
        );
        assert_eq!(days_between("2024-01-01", "2024-12-25")?, 359);
        assert!(next_day_rfc3339("yesterday").is_err());
        Ok(())
    }

    #[test]
    fn unit_table_lookups() {
        assert_eq!(to_meters(2.0, "km"), Some(2000.0));
        assert_eq!(to_meters(1.0, "furlong"), None);
    }
}
