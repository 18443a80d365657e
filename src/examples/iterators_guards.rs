use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::iter;
use std::time::Instant;

use anyhow::Result;

use crate::lesson::ITERATORS_GUARDS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::show::{show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "iterator_protocol",
            ITERATORS_GUARDS,
            "IntoIterator for owned, borrowed and mutable access; iter::from_fn; next() on exhaustion",
            Action::plain(iterator_protocol),
        )
        .doc_url("https://doc.rust-lang.org/std/iter/index.html#for-loops-and-intoiterator"),
    )?;
    registry.register(
        ExampleInfo::new(
            "drop_guards",
            ITERATORS_GUARDS,
            "RAII guards: a Drop timer, reverse drop order and early drop()",
            Action::plain(drop_guards),
        )
        .doc_url("https://doc.rust-lang.org/std/ops/trait.Drop.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "closure_guards",
            ITERATORS_GUARDS,
            "Deferred cleanup closures, ignoring expected errors, capturing output into a buffer",
            Action::plain(closure_guards),
        )
        .doc_url("https://doc.rust-lang.org/std/io/trait.Write.html"),
    )?;
    Ok(())
}

/// Iterable by value, by reference and mutably.
#[derive(Debug, Default)]
struct Playlist {
    tracks: Vec<String>,
}

impl Playlist {
    fn from_titles(titles: &[&str]) -> Self {
        Playlist {
            tracks: titles.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl IntoIterator for Playlist {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

impl<'a> IntoIterator for &'a mut Playlist {
    type Item = &'a mut String;
    type IntoIter = std::slice::IterMut<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter_mut()
    }
}

fn powers_of_two(limit: u32) -> impl Iterator<Item = u32> {
    let mut next = Some(1u32);
    iter::from_fn(move || {
        let current = next.filter(|&n| n <= limit)?;
        next = current.checked_mul(2);
        Some(current)
    })
}

fn iterator_protocol() -> Result<()> {
    show("impl<'a> IntoIterator for &'a Playlist { type Item = &'a String; .. }\nfor track in &playlist { .. }");
    let mut playlist = Playlist::from_titles(&["intro", "verse", "outro"]);
    for track in &playlist {
        println!("  borrowed: {track}");
    }
    for track in &mut playlist {
        track.make_ascii_uppercase();
    }
    let owned: Vec<String> = playlist.into_iter().collect();
    println!("owned after mutation: {owned:?}");

    show("let mut it = [10, 20, 30].into_iter();\nit.next()   it.next().unwrap_or(0)");
    let mut it = [10, 20, 30].into_iter();
    println!("next = {:?}", it.next());
    println!("next = {:?}", it.next());
    println!("next = {:?}", it.next());
    println!("exhausted, with default = {}", it.next().unwrap_or(0));

    show_result(
        "iter::from_fn(..) doubling up to 100",
        format!("{:?}", powers_of_two(100).collect::<Vec<_>>()),
    );
    Ok(())
}

/// Reports how long its scope took when dropped.
struct ScopeTimer {
    label: &'static str,
    start: Instant,
}

impl ScopeTimer {
    fn new(label: &'static str) -> Self {
        ScopeTimer {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        println!("  [{}] finished in {:?}", self.label, self.start.elapsed());
    }
}

/// Pushes its name onto a shared log when dropped.
struct Noisy<'a> {
    name: &'static str,
    log: &'a RefCell<Vec<&'static str>>,
}

impl Drop for Noisy<'_> {
    fn drop(&mut self) {
        self.log.borrow_mut().push(self.name);
    }
}

fn drop_order(log: &RefCell<Vec<&'static str>>) {
    let _first = Noisy { name: "first", log };
    let second = Noisy { name: "second", log };
    let _third = Noisy { name: "third", log };
    drop(second);
}

fn drop_guards() -> Result<()> {
    show("struct ScopeTimer { .. }\nimpl Drop for ScopeTimer { fn drop(&mut self) { println!(..elapsed..) } }");
    {
        let _timer = ScopeTimer::new("sum");
        let total: u64 = (0..100_000u64).sum();
        println!("  sum = {total}");
    }

    show("let _first = ..; let second = ..; let _third = ..;\ndrop(second);  // locals drop in reverse order");
    let log = RefCell::new(Vec::new());
    drop_order(&log);
    println!("drop order: {:?}", log.borrow());
    Ok(())
}

/// Runs the closure when the guard leaves scope, unless dismissed first.
struct Defer<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Defer<F> {
    fn new(action: F) -> Self {
        Defer {
            action: Some(action),
        }
    }

    fn dismiss(mut self) {
        self.action = None;
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

fn tagged(
    out: &mut impl Write,
    tag: &str,
    body: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "<{tag}>")?;
    body(out)?;
    writeln!(out, "</{tag}>")
}

fn closure_guards() -> Result<()> {
    show("let _cleanup = Defer::new(|| println!(\"cleanup ran\"));");
    {
        let _cleanup = Defer::new(|| println!("  cleanup ran at end of scope"));
        println!("  doing work");
    }
    let skipped = Defer::new(|| println!("  never printed"));
    skipped.dismiss();
    println!("dismissed guard did nothing");

    show("match File::open(path) { Err(e) if e.kind() == ErrorKind::NotFound => {}, .. }");
    match File::open("quickref-file-that-does-not-exist.txt") {
        Ok(_) => println!("unexpectedly found the file"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => println!("missing file ignored"),
        Err(err) => return Err(err.into()),
    }

    show("let mut buffer = Vec::new();\ntagged(&mut buffer, \"body\", |w| writeln!(w, \"content\"))?;");
    let mut buffer = Vec::new();
    tagged(&mut buffer, "body", |w| writeln!(w, "  content"))?;
    let len = buffer.len();
    println!("captured {len} bytes:\n{}", String::from_utf8(buffer)?);
    Ok(())
}
