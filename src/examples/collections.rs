use std::collections::{BTreeMap, HashMap, VecDeque};

use anyhow::Result;
use indexmap::IndexMap;

use crate::lesson::COLLECTIONS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "collections_example",
            COLLECTIONS,
            "Entry-API counting, default maps, VecDeque, BTreeMap and IndexMap",
            Action::plain(collections_example),
        )
        .doc_url("https://doc.rust-lang.org/std/collections/index.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "heap_and_sorting",
            COLLECTIONS,
            "BinaryHeap for top-k, sort_unstable, dedup and binary_search",
            Action::plain(heap_and_sorting),
        )
        .doc_url("https://doc.rust-lang.org/std/collections/struct.BinaryHeap.html"),
    )?;
    Ok(())
}

fn word_counts(text: &str) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

fn collections_example() -> Result<()> {
    let text = "the cat and the hat and the bat";
    show("*counts.entry(word).or_insert(0) += 1;");
    println!("{:?}", word_counts(text));

    show("groups.entry(len).or_insert_with(Vec::new).push(word);");
    let mut groups: HashMap<usize, Vec<&str>> = HashMap::new();
    for word in ["fig", "kiwi", "pear", "plum", "apple"] {
        groups.entry(word.len()).or_insert_with(Vec::new).push(word);
    }
    let mut lengths: Vec<_> = groups.keys().copied().collect();
    lengths.sort_unstable();
    for len in lengths {
        println!("{len}: {:?}", groups[&len]);
    }

    show("let mut recent = VecDeque::with_capacity(3);\nif recent.len() == 3 { recent.pop_front(); }\nrecent.push_back(x);");
    let mut recent = VecDeque::with_capacity(3);
    for x in 1..=5 {
        if recent.len() == 3 {
            recent.pop_front();
        }
        recent.push_back(x);
    }
    println!("last three: {recent:?}");

    show("IndexMap keeps insertion order");
    let mut ordered = IndexMap::new();
    ordered.insert("zebra", 1);
    ordered.insert("apple", 2);
    ordered.insert("mango", 3);
    println!("{:?}", ordered.keys().collect::<Vec<_>>());
    show_result("ordered.get_index(0)", format!("{:?}", ordered.get_index(0)));
    Ok(())
}

fn top_k(values: &[i32], k: usize) -> Vec<i32> {
    let mut heap: std::collections::BinaryHeap<i32> = values.iter().copied().collect();
    let mut out = Vec::with_capacity(k);
    while out.len() < k {
        match heap.pop() {
            Some(v) => out.push(v),
            None => break,
        }
    }
    out
}

fn heap_and_sorting() -> Result<()> {
    let values = [5, 1, 9, 3, 9, 7, 2];
    show("let mut heap: BinaryHeap<i32> = values.iter().copied().collect();\nheap.pop()");
    show_result("top_k(&values, 3)", format!("{:?}", top_k(&values, 3)));

    show("sorted.sort_unstable(); sorted.dedup();");
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    println!("{sorted:?}");

    show("sorted.binary_search(&7)   sorted.binary_search(&4)");
    println!("{:?} {:?}", sorted.binary_search(&7), sorted.binary_search(&4));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words() {
        let counts = word_counts("a b a c a");
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn top_k_stops_when_exhausted() {
        assert_eq!(top_k(&[4, 8, 1], 2), vec![8, 4]);
        assert_eq!(top_k(&[4], 3), vec![4]);
    }
}
