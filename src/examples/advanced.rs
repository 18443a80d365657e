use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::{Either, Itertools, iproduct};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lesson::ADVANCED;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{output_path, show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "json_operations",
            ADVANCED,
            "serde derive with serde_json: to_string_pretty, from_str, untyped Value",
            Action::with_output_dir(json_operations),
        )
        .doc_url("https://docs.rs/serde_json/latest/serde_json/")
        .tags(["serde", "json"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "yaml_documents",
            ADVANCED,
            "Reading typed configuration from YAML with serde_yaml_ng",
            Action::with_output_dir(yaml_documents),
        )
        .doc_url("https://docs.rs/serde_yaml_ng/latest/serde_yaml_ng/")
        .tags(["serde", "yaml"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "regex_patterns",
            ADVANCED,
            "Regex matching, named capture groups and replace_all",
            Action::plain(regex_patterns),
        )
        .doc_url("https://docs.rs/regex/latest/regex/")
        .tags(["regex", "text"]),
    )?;
    registry.register(
        ExampleInfo::new(
            "itertools_examples",
            ADVANCED,
            "iproduct!, combinations, permutations and other Itertools adaptors",
            Action::plain(itertools_examples),
        )
        .doc_url("https://docs.rs/itertools/latest/itertools/")
        .tags(["iterators", "itertools"]),
    )?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Student {
    name: String,
    age: u32,
    #[serde(default)]
    courses: Vec<String>,
}

fn json_operations(dir: &Path) -> Result<()> {
    let student = Student {
        name: "Ferris".to_string(),
        age: 8,
        courses: vec!["Math".to_string(), "Rust".to_string()],
    };
    show("#[derive(Serialize, Deserialize)] struct Student { name: String, age: u32, courses: Vec<String> }\nserde_json::to_string_pretty(&student)?");
    let pretty = serde_json::to_string_pretty(&student)?;
    println!("{pretty}");

    let path = output_path(dir, "student.json");
    fs::write(&path, &pretty).with_context(|| format!("failed to write {}", path.display()))?;
    let loaded: Student = serde_json::from_str(&fs::read_to_string(&path)?)?;
    show_result("loaded == student", loaded == student);

    show("serde_json::from_str::<Student>(r#\"{\"name\": \"Corro\", \"age\": 3}\"#)?");
    let partial: Student = serde_json::from_str(r#"{"name": "Corro", "age": 3}"#)?;
    println!("{partial:?}");

    show("let value: serde_json::Value = serde_json::from_str(..)?;\nvalue[\"scores\"][1]");
    let value: serde_json::Value = serde_json::from_str(r#"{"scores": [90, 85, 77]}"#)?;
    println!("second score: {}", value["scores"][1]);
    println!("missing key:  {}", value["missing"]);
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    host: String,
    port: u16,
    #[serde(default)]
    features: BTreeMap<String, bool>,
}

fn yaml_documents(dir: &Path) -> Result<()> {
    let text = "host: localhost\nport: 8080\nfeatures:\n  cache: true\n  tracing: false\n";
    let path = output_path(dir, "server.yaml");
    fs::write(&path, text)?;

    show("let config: ServerConfig = serde_yaml_ng::from_str(&fs::read_to_string(&path)?)?;");
    let config: ServerConfig = serde_yaml_ng::from_str(&fs::read_to_string(&path)?)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    println!("{}:{}", config.host, config.port);
    let enabled: Vec<&str> = config
        .features
        .iter()
        .filter(|(_, on)| **on)
        .map(|(name, _)| name.as_str())
        .collect();
    println!("enabled features: {enabled:?}");

    show("serde_yaml_ng::from_str::<ServerConfig>(\"host: x\\nport: not-a-port\")");
    let bad = serde_yaml_ng::from_str::<ServerConfig>("host: x\nport: not-a-port");
    println!("parse failed: {}", bad.is_err());
    Ok(())
}

#[derive(Debug, PartialEq)]
struct LogError<'a> {
    date: &'a str,
    message: &'a str,
}

fn error_lines(log: &str) -> Result<Vec<LogError<'_>>> {
    let re = Regex::new(r"(?m)^(?P<date>\d{4}-\d{2}-\d{2}) ERROR (?P<msg>.+)$")?;
    Ok(re
        .captures_iter(log)
        .filter_map(|caps| {
            Some(LogError {
                date: caps.name("date")?.as_str(),
                message: caps.name("msg")?.as_str(),
            })
        })
        .collect())
}

fn redact_emails(text: &str) -> Result<String> {
    let re = Regex::new(r"[\w.+-]+@([\w-]+\.[\w.]+)")?;
    Ok(re.replace_all(text, "***@$1").into_owned())
}

fn regex_patterns() -> Result<()> {
    show(r#"let re = Regex::new(r"^\d{3}-\d{4}$")?;
re.is_match("555-1234")"#);
    let phone = Regex::new(r"^\d{3}-\d{4}$")?;
    for candidate in ["555-1234", "5551234"] {
        println!("{candidate:>9} -> {}", phone.is_match(candidate));
    }

    show(r"re.find_iter(text).map(|m| m.as_str())");
    let numbers = Regex::new(r"\d+")?;
    let found: Vec<&str> = numbers
        .find_iter("3 apples, 12 pears and 7 plums")
        .map(|m| m.as_str())
        .collect();
    println!("{found:?}");

    let log = "2024-01-05 ERROR disk full\n2024-01-05 INFO ok\n2024-01-06 ERROR timeout";
    show(r"(?m)^(?P<date>\d{4}-\d{2}-\d{2}) ERROR (?P<msg>.+)$ with captures_iter");
    for entry in error_lines(log)? {
        println!("{}: {}", entry.date, entry.message);
    }

    show(r#"re.replace_all(text, "***@$1")"#);
    println!("{}", redact_emails("contact ferris@rust-lang.org or corro@example.com")?);
    Ok(())
}

fn itertools_examples() -> Result<()> {
    show("iproduct!(sizes, colors).map(|(s, c)| format!(\"{s}-{c}\"))");
    let sizes = ["S", "M"];
    let colors = ["red", "blue"];
    let product: Vec<String> = iproduct!(sizes, colors)
        .map(|(s, c)| format!("{s}-{c}"))
        .collect();
    println!("{product:?}");

    show_result(
        "['a', 'b', 'c'].into_iter().combinations(2)",
        format!("{:?}", ['a', 'b', 'c'].into_iter().combinations(2).collect_vec()),
    );
    show_result(
        "(1..=3).permutations(3).count()",
        (1..=3).permutations(3).count(),
    );

    show("[1, 2, 4, 7].iter().tuple_windows().map(|(a, b)| b - a)");
    let gaps: Vec<i32> = [1, 2, 4, 7].iter().tuple_windows().map(|(a, b)| b - a).collect();
    println!("{gaps:?}");

    show("words.iter().unique().sorted().join(\", \")");
    let words = ["pear", "apple", "pear", "fig", "apple"];
    println!("{}", words.iter().unique().sorted().join(", "));

    show("(1..=10).partition_map(|n| if n % 2 == 0 { Either::Left(n) } else { Either::Right(n) })");
    let (even, odd): (Vec<i32>, Vec<i32>) = (1..=10).partition_map(|n| {
        if n % 2 == 0 {
            Either::Left(n)
        } else {
            Either::Right(n)
        }
    });
    println!("even {even:?} odd {odd:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_lines_capture_date_and_message() -> Result<()> {
        let log = "2024-01-05 ERROR disk full\n2024-01-05 INFO ok\nnoise ERROR no date\n2024-01-06 ERROR timeout";
        assert_eq!(
            error_lines(log)?,
            vec![
                LogError { date: "2024-01-05", message: "disk full" },
                LogError { date: "2024-01-06", message: "timeout" },
            ]
        );
        Ok(())
    }

    #[test]
    fn emails_keep_their_domain_when_redacted() -> Result<()> {
        assert_eq!(
            redact_emails("mail a.b+c@example.com now")?,
            "mail ***@example.com now"
        );
        assert_eq!(redact_emails("nothing here")?, "nothing here");
        Ok(())
    }

    #[test]
    fn itertools_counts() {
        assert_eq!((1..=4).combinations(2).count(), 6);
        assert_eq!((1..=3).combinations(2).next(), Some(vec![1, 2]));
        assert_eq!((1..=3).permutations(3).count(), 6);
        assert_eq!(iproduct!(0..2, 0..3).count(), 6);
    }

    #[test]
    fn json_round_trip_on_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        json_operations(dir.path())?;
        let text = fs::read_to_string(dir.path().join("student.json"))?;
        let student: Student = serde_json::from_str(&text)?;
        assert_eq!(student.name, "Ferris");
        assert_eq!(student.courses.len(), 2);
        Ok(())
    }
}
