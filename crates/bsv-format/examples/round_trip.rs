//! BSV round trip example
//!
//! Encodes a small table, decodes it again, saves and reloads it, then
//! appends a row to a second file.
//!
//! Run with: cargo run --example round_trip
//!
//! Set `RUST_LOG=bsv_format=debug` to see the store's log output.

use bsv_format::{Cell, append, decode, encode, format_table, load, save};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let table = vec![
        vec![
            Cell::text("Hello"),
            Cell::text("🌎"),
            Cell::Null,
            Cell::Empty,
        ],
        vec![Cell::text("A\0B\nC"), Cell::text("Test 𝄞")],
    ];
    println!("{}", format_table(&table));

    let bytes = encode(&table);
    println!("{bytes:02X?}");

    let decoded = decode(&bytes)?;
    println!("{}", format_table(&decoded));

    let dir = std::env::temp_dir();
    let path = dir.join("Test.bsv");
    save(&table, &path)?;
    let loaded = load(&path)?;
    println!("{}", format_table(&loaded));

    let append_path = dir.join("Append.bsv");
    append(&[vec![Cell::text("ABC")]], &append_path)?;
    println!("{}", format_table(&load(&append_path)?));

    std::fs::remove_file(path)?;
    std::fs::remove_file(append_path)?;
    Ok(())
}
