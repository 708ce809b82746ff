//! Counts word occurrences across files and prints the most frequent ones.
//!
//! A word is a maximal run of ASCII letters, lowercased. Words shorter than
//! `--min` or longer than `--max` letters are ignored.
//!
//! ```text
//! cargo run --example word_count -- README.md src/*.rs
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use symtab::{SymbolTable, Value};

#[derive(Debug, Parser)]
#[command(about = "Print the most frequent words in a set of files")]
struct Args {
    /// Files to read
    #[clap(required = true)]
    files: Vec<PathBuf>,
    /// Number of words to print
    #[clap(short = 'n', long, default_value_t = 20)]
    top: usize,
    /// Shortest word counted
    #[clap(long, default_value_t = 6)]
    min: usize,
    /// Longest word counted
    #[clap(long, default_value_t = 50)]
    max: usize,
    /// Number of buckets in the symbol table
    #[clap(long, default_value_t = 10_000)]
    buckets: usize,
}

// Yields the words of `text` whose length lies in `min..=max`.
fn words(text: &[u8], min: usize, max: usize) -> impl Iterator<Item = String> + '_ {
    text.split(|b| !b.is_ascii_alphabetic())
        .filter(move |word| !word.is_empty() && (min..=max).contains(&word.len()))
        .map(|word| word.iter().map(|b| b.to_ascii_lowercase() as char).collect())
}

// Adds one to the count of every word in `text`.
fn count(table: &mut SymbolTable, text: &[u8], args: &Args) -> Result<(), symtab::Error> {
    for word in words(text, args.min, args.max) {
        let count = table.lookup(&word).and_then(Value::as_word).unwrap_or(0);
        table.install(&word, Value::Word(count + 1))?;
    }
    Ok(())
}

// Returns the `k` highest counts, highest first. Among equal counts the word
// seen first keeps the better rank.
fn top_k(table: &SymbolTable, k: usize) -> Vec<(&str, u64)> {
    let mut top: Vec<(&str, u64)> = Vec::with_capacity(k.min(table.len()) + 1);

    for (word, value) in table {
        let Some(count) = value.as_word() else {
            continue;
        };

        let slot = top.partition_point(|&(_, c)| c >= count);
        if slot < k {
            top.insert(slot, (word, count));
            top.truncate(k);
        }
    }

    top
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut table = match SymbolTable::new(args.buckets) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("could not create symbol table: {err}");
            return ExitCode::FAILURE;
        }
    };

    for path in &args.files {
        let text = match fs::read(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("could not open {}: {err}: ignored.", path.display());
                continue;
            }
        };

        if let Err(err) = count(&mut table, &text, &args) {
            eprintln!("failed to count words in {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        log::debug!("{}: {} distinct words so far", path.display(), table.len());
    }

    for (word, count) in top_k(&table, args.top) {
        println!("{word} {count}");
    }

    ExitCode::SUCCESS
}
