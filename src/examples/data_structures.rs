//! Scalars, Vec, HashMap, HashSet, tuples, slices and collecting iterators.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;

use crate::lesson::DATA_STRUCTURES;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::sample::SampleData;
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "basic_types",
            DATA_STRUCTURES,
            "i32, f64, bool, char, unit, casts and checked arithmetic",
            Action::plain(basic_types),
        )
        .doc_url("https://doc.rust-lang.org/book/ch03-02-data-types.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "slice_operations",
            DATA_STRUCTURES,
            "Ranges over slices and strings, split_at, windows, reverse iteration",
            Action::plain(slice_operations),
        )
        .doc_url("https://doc.rust-lang.org/std/primitive.slice.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "collect_examples",
            DATA_STRUCTURES,
            "collect() into HashMap, HashSet and sums instead of comprehensions",
            Action::plain(collect_examples),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/trait.Iterator.html#method.collect"),
    )?;
    registry.register(
        ExampleInfo::new(
            "destructuring",
            DATA_STRUCTURES,
            "Slice patterns, tuple and struct destructuring, swapping",
            Action::plain(destructuring),
        )
        .doc_url("https://doc.rust-lang.org/book/ch19-03-pattern-syntax.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "ownership_clones",
            DATA_STRUCTURES,
            "Moves, borrows, clone() and equality versus identity",
            Action::plain(ownership_clones),
        )
        .doc_url("https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "list_iterate",
            DATA_STRUCTURES,
            "Iterate through a Vec and print each item",
            Action::with_test_data(list_iterate),
        )
        .doc_url("https://doc.rust-lang.org/std/vec/struct.Vec.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "conditional_check",
            DATA_STRUCTURES,
            "Check membership with contains() and contains_key()",
            Action::with_test_data(conditional_check),
        )
        .doc_url("https://doc.rust-lang.org/std/primitive.slice.html#method.contains"),
    )?;
    registry.register(
        ExampleInfo::new(
            "list_modify",
            DATA_STRUCTURES,
            "Push, remove and reverse a Vec",
            Action::with_test_data(list_modify),
        )
        .doc_url("https://doc.rust-lang.org/std/vec/struct.Vec.html#method.push"),
    )?;
    registry.register(
        ExampleInfo::new(
            "list_comprehend",
            DATA_STRUCTURES,
            "Build vectors with map, filter and collect",
            Action::plain(list_comprehend),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/trait.Iterator.html#method.filter"),
    )?;
    registry.register(
        ExampleInfo::new(
            "dict_iterate",
            DATA_STRUCTURES,
            "Iterate through map key-value pairs",
            Action::with_test_data(dict_iterate),
        )
        .doc_url("https://doc.rust-lang.org/std/collections/struct.BTreeMap.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "set_modify",
            DATA_STRUCTURES,
            "Insert into and remove from a set",
            Action::with_test_data(set_modify),
        )
        .doc_url("https://doc.rust-lang.org/std/collections/struct.BTreeSet.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "tuple_unpack",
            DATA_STRUCTURES,
            "Unpack tuple values into variables",
            Action::with_test_data(tuple_unpack),
        )
        .doc_url("https://doc.rust-lang.org/std/primitive.tuple.html"),
    )?;
    Ok(())
}

fn basic_types() -> Result<()> {
    show("let x: i32 = 42;\nlet ratio: f64 = 2.5;\nlet ok: bool = true;\nlet c: char = 'R';");
    let x: i32 = 42;
    let ratio: f64 = 2.5;
    let ok = true;
    let c = 'R';
    println!("i32:  {x}  ({} bytes)", std::mem::size_of::<i32>());
    println!("f64:  {ratio}  ({} bytes)", std::mem::size_of::<f64>());
    println!("bool: {ok}");
    println!("char: {c}  ({} bytes, a Unicode scalar)", std::mem::size_of::<char>());
    println!("unit: {:?}", ());

    show("10 / 3   10 % 3   10.0 / 3.0   2_i32.pow(10)");
    println!("10 / 3       = {}", 10 / 3);
    println!("10 % 3       = {}", 10 % 3);
    println!("10.0 / 3.0   = {:.4}", 10.0 / 3.0);
    println!("2_i32.pow(10) = {}", 2_i32.pow(10));

    show("\"42\".parse::<i32>()   3.99_f64 as i32   i32::MAX.checked_add(1)");
    println!("\"42\".parse::<i32>()  = {:?}", "42".parse::<i32>());
    println!("3.99_f64 as i32      = {}", 3.99_f64 as i32);
    println!("i32::MAX.checked_add(1) = {:?}", i32::MAX.checked_add(1));
    println!("250_u8.wrapping_add(10) = {}", 250_u8.wrapping_add(10));
    Ok(())
}

fn slice_operations() -> Result<()> {
    let nums: Vec<i32> = (0..10).collect();
    show("let nums: Vec<i32> = (0..10).collect();");
    println!("nums = {nums:?}");

    show("&nums[2..5]   &nums[..3]   &nums[nums.len() - 3..]");
    println!("&nums[2..5]  = {:?}", &nums[2..5]);
    println!("&nums[..3]   = {:?}", &nums[..3]);
    println!("&nums[7..]   = {:?}", &nums[nums.len() - 3..]);

    show("nums.iter().step_by(2)   nums.iter().rev()");
    let evens: Vec<_> = nums.iter().step_by(2).collect();
    let reversed: Vec<_> = nums.iter().rev().collect();
    println!("step_by(2) = {evens:?}");
    println!("rev()      = {reversed:?}");

    let (left, right) = nums.split_at(4);
    show_result("let (left, right) = nums.split_at(4);", format!("{left:?} {right:?}"));
    let windows: Vec<i32> = nums.windows(3).map(|w| w.iter().sum()).collect();
    show_result("nums.windows(3).map(|w| w.iter().sum())", format!("{windows:?}"));

    let s = "Hello, World!";
    show("let s = \"Hello, World!\";\n&s[7..]   s.chars().rev().collect::<String>()");
    println!("&s[7..] = {:?}", &s[7..]);
    println!("reversed = {:?}", s.chars().rev().collect::<String>());
    println!("s.get(0..100) = {:?}", s.get(0..100));
    Ok(())
}

fn collect_examples() -> Result<()> {
    show("let squares: HashMap<i32, i32> = (0..5).map(|x| (x, x * x)).collect();");
    let mut squares: Vec<(i32, i32)> = (0..5)
        .map(|x| (x, x * x))
        .collect::<HashMap<_, _>>()
        .into_iter()
        .collect();
    squares.sort();
    println!("squares = {squares:?}");

    show("scores.iter().filter(|(_, s)| **s >= 80).collect::<HashMap<_, _>>()");
    let scores = HashMap::from([("Alice", 92), ("Bob", 78), ("Charlie", 85), ("Diana", 65)]);
    let mut passing: Vec<_> = scores.iter().filter(|(_, s)| **s >= 80).collect();
    passing.sort();
    println!("passing = {passing:?}");

    show("let lengths: HashSet<usize> = words.iter().map(|w| w.len()).collect();");
    let words = ["hello", "world", "hi", "hey"];
    let lengths: HashSet<usize> = words.iter().map(|w| w.len()).collect();
    let mut lengths: Vec<_> = lengths.into_iter().collect();
    lengths.sort_unstable();
    println!("distinct lengths = {lengths:?}");

    let total: i32 = (0..10).map(|x| x * x).sum();
    show_result("(0..10).map(|x| x * x).sum::<i32>()", total);
    Ok(())
}

struct Point {
    x: i32,
    y: i32,
}

fn destructuring() -> Result<()> {
    show("let [first, rest @ ..] = [1, 2, 3, 4, 5];");
    let numbers = [1, 2, 3, 4, 5];
    let [first, rest @ ..] = numbers;
    println!("first = {first}, rest = {rest:?}");

    let [head, .., last] = numbers;
    show_result("let [head, .., last] = numbers;", format!("head = {head}, last = {last}"));

    show("let (mut a, mut b) = (1, 2);\nstd::mem::swap(&mut a, &mut b);");
    let (mut a, mut b) = (1, 2);
    std::mem::swap(&mut a, &mut b);
    println!("a = {a}, b = {b}");

    show("let Point { x, y } = Point { x: 3, y: -1 };");
    let Point { x, y } = Point { x: 3, y: -1 };
    println!("x = {x}, y = {y}");

    show("let ((a, b), c) = ((1, 2), 3);");
    let ((p, q), r) = ((1, 2), 3);
    println!("nested: {p} {q} {r}");
    Ok(())
}

fn ownership_clones() -> Result<()> {
    show("let a = vec![1, 2, 3];\nlet b = a.clone();\na == b  std::ptr::eq(&a, &b)");
    let a = vec![1, 2, 3];
    let b = a.clone();
    println!("a == b         = {}", a == b);
    println!("ptr::eq(a, b)  = {}", std::ptr::eq(&a, &b));

    show("let moved = a;  // `a` can no longer be used");
    let moved = a;
    println!("moved = {moved:?}");

    show("fn total(v: &[i32]) -> i32 { v.iter().sum() }\ntotal(&moved)");
    fn total(values: &[i32]) -> i32 {
        values.iter().sum()
    }
    println!("borrowed total = {}, still usable: {moved:?}", total(&moved));

    show("let mut grid = vec![vec![0; 2]; 2];\nlet mut copy = grid.clone();\ncopy[0][0] = 9;");
    let grid = vec![vec![0; 2]; 2];
    let mut copy = grid.clone();
    copy[0][0] = 9;
    println!("original = {grid:?}");
    println!("clone    = {copy:?}  (clone is always deep for Vec<Vec<_>>)");
    Ok(())
}

fn list_iterate(data: SampleData) -> Result<()> {
    show("for item in &data.testlist {\n    println!(\"{item}\");\n}");
    for item in &data.testlist {
        println!("{item}");
    }
    show("for (i, item) in data.testlist.iter().enumerate() { .. }");
    for (i, item) in data.testlist.iter().enumerate() {
        println!("{i}: {item}");
    }
    Ok(())
}

fn conditional_check(data: SampleData) -> Result<()> {
    show("data.testlist.iter().any(|s| s == \"banana\")");
    let has_banana = data.testlist.iter().any(|s| s == "banana");
    println!("list contains banana: {has_banana}");

    show("data.testdict.contains_key(\"a\")   data.testset.contains(&4)");
    println!("dict has key 'a': {}", data.testdict.contains_key("a"));
    println!("set contains 4:   {}", data.testset.contains(&4));
    println!("sentence mentions Rust: {}", data.teststring.contains("Rust"));
    Ok(())
}

fn list_modify(mut data: SampleData) -> Result<()> {
    show("data.testlist.push(\"date\".into());");
    data.testlist.push("date".into());
    println!("after push:    {:?}", data.testlist);

    show("data.testlist.retain(|s| s != \"banana\");");
    data.testlist.retain(|s| s != "banana");
    println!("after retain:  {:?}", data.testlist);

    show("data.testlist.insert(0, \"avocado\".into());\nlet popped = data.testlist.pop();");
    data.testlist.insert(0, "avocado".into());
    let popped = data.testlist.pop();
    println!("popped {popped:?}, now {:?}", data.testlist);

    show("data.testlist.reverse();");
    data.testlist.reverse();
    println!("after reverse: {:?}", data.testlist);
    Ok(())
}

fn list_comprehend() -> Result<()> {
    show("(0..10).map(|x| x * x).collect::<Vec<_>>()");
    let squares: Vec<i32> = (0..10).map(|x| x * x).collect();
    println!("squares = {squares:?}");

    show("(0..10).filter(|x| x % 2 == 0).collect::<Vec<_>>()");
    let evens: Vec<i32> = (0..10).filter(|x| x % 2 == 0).collect();
    println!("evens   = {evens:?}");

    show("(1..=3).flat_map(|x| (1..=3).map(move |y| (x, y)))");
    let pairs: Vec<(i32, i32)> = (1..=3)
        .flat_map(|x| (1..=3).map(move |y| (x, y)))
        .filter(|(x, y)| x != y)
        .collect();
    println!("pairs   = {pairs:?}");
    Ok(())
}

fn dict_iterate(data: SampleData) -> Result<()> {
    show("for (key, value) in &data.testdict {\n    println!(\"{key}: {value}\");\n}");
    for (key, value) in &data.testdict {
        println!("{key}: {value}");
    }
    show("data.testdict.values().sum::<i32>()");
    println!("sum of values = {}", data.testdict.values().sum::<i32>());
    let keys: Vec<_> = data.testdict.keys().collect();
    show_result("data.testdict.keys().collect::<Vec<_>>()", format!("{keys:?}"));
    Ok(())
}

fn set_modify(mut data: SampleData) -> Result<()> {
    show("data.testset.insert(4);\ndata.testset.remove(&1);");
    let inserted = data.testset.insert(4);
    let removed = data.testset.remove(&1);
    println!("inserted 4: {inserted}, removed 1: {removed}");
    println!("set now:   {:?}", data.testset);
    println!("insert 2 again: {}", data.testset.insert(2));

    let other = BTreeSet::from([3, 4, 5]);
    let union: Vec<_> = data.testset.union(&other).collect();
    let common: Vec<_> = data.testset.intersection(&other).collect();
    show("data.testset.union(&other)   data.testset.intersection(&other)");
    println!("union:        {union:?}");
    println!("intersection: {common:?}");
    Ok(())
}

fn tuple_unpack(data: SampleData) -> Result<()> {
    show("let (a, b, c) = data.testtuple;");
    let (a, b, c) = data.testtuple;
    println!("a = {a}, b = {b}, c = {c}");

    show("let (first, ..) = data.testtuple;   data.testtuple.2");
    let (first, ..) = data.testtuple;
    println!("first = {first}, last = {}", data.testtuple.2);
    Ok(())
}
