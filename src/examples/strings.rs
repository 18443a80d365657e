use anyhow::Result;

use crate::lesson::STRINGS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::sample::SampleData;
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "unicode_bytes",
            STRINGS,
            "String vs &str vs bytes, UTF-8 lengths, chars and from_utf8",
            Action::plain(unicode_bytes),
        )
        .doc_url("https://doc.rust-lang.org/book/ch08-02-strings.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "string_operations",
            STRINGS,
            "Upper/lower case, split, replace, format! and padding",
            Action::with_test_data(string_operations),
        )
        .doc_url("https://doc.rust-lang.org/std/string/struct.String.html"),
    )?;
    Ok(())
}

fn unicode_bytes() -> Result<()> {
    let word = "naïve 🦀";
    show("let word = \"naïve 🦀\";\nword.len()   word.chars().count()");
    println!("bytes: {}, chars: {}", word.len(), word.chars().count());

    show("word.as_bytes()");
    println!("{:?}", word.as_bytes());

    show("let owned: String = word.to_owned();\nlet borrowed: &str = &owned;");
    let owned: String = word.to_owned();
    let borrowed: &str = &owned;
    println!("owned == borrowed: {}", owned == borrowed);

    show("String::from_utf8(vec![0xF0, 0x9F, 0xA6, 0x80])");
    let crab = String::from_utf8(vec![0xF0, 0x9F, 0xA6, 0x80])?;
    println!("decoded: {crab}");
    let bad = String::from_utf8(vec![0xFF, 0xFE]);
    println!("invalid bytes: {}", bad.is_err());
    let lossy = String::from_utf8_lossy(&[b'h', b'i', 0xFF]);
    show_result("String::from_utf8_lossy(&[b'h', b'i', 0xFF])", lossy);

    show("'🦀' as u32   char::from_u32(0x41)");
    println!("U+{:X}  {:?}", '🦀' as u32, char::from_u32(0x41));
    Ok(())
}

fn string_operations(data: SampleData) -> Result<()> {
    let text = &data.teststring;
    show("text.to_uppercase()   text.to_lowercase()");
    println!("upper: {}", text.to_uppercase());
    println!("lower: {}", text.to_lowercase());

    show("text.split_whitespace().collect::<Vec<_>>()");
    let words: Vec<&str> = text.split_whitespace().collect();
    println!("words: {words:?}");

    show("text.replace(\"awesome\", \"fast\")");
    println!("{}", text.replace("awesome", "fast"));

    show("format!(\"{:>10}|{:<10}|{:^10}\", \"right\", \"left\", \"mid\")");
    println!("{:>10}|{:<10}|{:^10}|", "right", "left", "mid");

    let language = "Rust";
    let year = 2015;
    show_result(
        "format!(\"{language} 1.0 shipped in {year}\")",
        format!("{language} 1.0 shipped in {year}"),
    );

    show("data.testlist.join(\", \")");
    println!("{}", data.testlist.join(", "));
    println!("starts with 'Rust': {}", text.starts_with("Rust"));
    println!("trimmed: {:?}", "  padded  ".trim());
    Ok(())
}
