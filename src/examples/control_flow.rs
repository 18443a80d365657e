use anyhow::Result;

use crate::lesson::CONTROL_FLOW;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "if_else",
            CONTROL_FLOW,
            "if / else if / else as expressions, if let and matches!",
            Action::plain(if_else),
        )
        .doc_url("https://doc.rust-lang.org/book/ch03-05-control-flow.html#if-expressions"),
    )?;
    registry.register(
        ExampleInfo::new(
            "loop_forms",
            CONTROL_FLOW,
            "loop with break values, while, for over ranges, labels and continue",
            Action::plain(loop_forms),
        )
        .doc_url("https://doc.rust-lang.org/book/ch03-05-control-flow.html#repetition-with-loops"),
    )?;
    Ok(())
}

fn grade(score: u32) -> char {
    if score >= 90 {
        'A'
    } else if score >= 80 {
        'B'
    } else if score >= 70 {
        'C'
    } else {
        'F'
    }
}

fn if_else() -> Result<()> {
    show("let grade = if score >= 90 { 'A' } else if score >= 80 { 'B' } else { .. };");
    for score in [95, 83, 71, 40] {
        println!("{score} -> {}", grade(score));
    }

    let temperature = 28;
    let feel = if temperature > 25 { "warm" } else { "cool" };
    show_result("let feel = if temperature > 25 { \"warm\" } else { \"cool\" };", feel);

    show("if let Some(first) = names.first() { .. }");
    let names = vec!["ferris", "corro"];
    if let Some(first) = names.first() {
        println!("first name: {first}");
    }
    let empty: Vec<&str> = Vec::new();
    println!("empty.first() is none: {}", empty.first().is_none());

    show("matches!(c, 'a'..='z' | 'A'..='Z')");
    for c in ['q', '7', 'Z'] {
        println!("{c:?} is a letter: {}", matches!(c, 'a'..='z' | 'A'..='Z'));
    }
    Ok(())
}

fn loop_forms() -> Result<()> {
    show("let found = loop {\n    n += 1;\n    if n * n > 50 { break n; }\n};");
    let mut n = 0;
    let found = loop {
        n += 1;
        if n * n > 50 {
            break n;
        }
    };
    println!("first n with n*n > 50: {found}");

    show("while countdown > 0 { countdown -= 1; }");
    let mut countdown = 3;
    while countdown > 0 {
        println!("countdown {countdown}");
        countdown -= 1;
    }

    show("for i in (0..10).step_by(3) { .. }");
    let stepped: Vec<_> = (0..10).step_by(3).collect();
    println!("step_by(3) = {stepped:?}");

    show("for x in 0..10 {\n    if x % 2 == 0 { continue; }\n    if x > 7 { break; }\n}");
    let mut odd = Vec::new();
    for x in 0..10 {
        if x % 2 == 0 {
            continue;
        }
        if x > 7 {
            break;
        }
        odd.push(x);
    }
    println!("odd below 8: {odd:?}");

    show("'outer: for row in 0..3 { for col in 0..3 { if row * col == 2 { break 'outer; } } }");
    let mut last = (0, 0);
    'outer: for row in 0..3 {
        for col in 0..3 {
            last = (row, col);
            if row * col == 2 {
                break 'outer;
            }
        }
    }
    println!("stopped at {last:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade(90), 'A');
        assert_eq!(grade(89), 'B');
        assert_eq!(grade(70), 'C');
        assert_eq!(grade(69), 'F');
    }
}
