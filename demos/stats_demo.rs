use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use array_hash::Error;
use array_hash::HashTable;
use array_hash::hash_table::Entry;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Fraction of the slots to fill before reporting.
    #[arg(short = 'l', long = "load", default_value_t = 1.0)]
    load: f64,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with target capacity: {}",
        args.target_capacity
    );

    let mut table: HashTable<u64> = HashTable::with_capacity(args.target_capacity);

    println!("Actual capacity: {}", table.capacity());
    println!("Filling table with u64 values...");

    let num_values = (table.capacity() as f64 * args.load.clamp(0.0, 1.0)) as usize;
    let mut num_failures = 0;
    for value in 0..num_values as u64 {
        let hash = hash_u64(value);

        match table.entry(hash, |&v| v == value) {
            Ok(Entry::Vacant(entry)) => {
                entry.insert(value);
            }
            Ok(Entry::Occupied(_)) => {
                panic!("Value already exists in table: {value}");
            }
            Err(Error::TableFull { .. }) => num_failures += 1,
            Err(e) => panic!("{e}"),
        }
    }

    println!("Inserted {} values into table", table.len());
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.print_probe_histogram();
    table.debug_stats().print();
    println!("Number of rejected inserts: {num_failures}");
}
