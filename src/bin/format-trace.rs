//! Format-conversion collaborator: normalizes a raw DynamoRIO-style branch
//! log into this crate's `<decimal-pc> <T|N>` trace format.
//!
//! Input lines are whitespace-separated records; field 1 is the taken bit,
//! field 2 the conditional bit, field 7 the hex PC. Only conditional
//! records are emitted.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        println!("usage: {} <input log> <output trace>", args[0]);
        exit(1);
    }

    let infile = match File::open(&args[1]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("could not open {}: {e}", args[1]);
            exit(1);
        }
    };
    let mut outfile = match File::create(&args[2]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("could not create {}: {e}", args[2]);
            exit(1);
        }
    };

    println!("[*] normalizing {} -> {}", args[1], args[2]);
    let mut written = 0u64;
    for (line_no, line) in BufReader::new(infile).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(_) => continue,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= 7 {
            continue;
        }
        let taken = fields[1];
        let cond = fields[2];
        let pc_hex = fields[7];
        if cond != "1" {
            continue;
        }
        let pc = match u64::from_str_radix(pc_hex.trim_start_matches("0x"), 16) {
            Ok(pc) => pc,
            Err(_) => {
                eprintln!("line {}: malformed hex PC {pc_hex:?}, skipping", line_no + 1);
                continue;
            }
        };
        let outcome = if taken == "1" { "T" } else { "N" };
        writeln!(outfile, "{pc} {outcome}").expect("write to output trace failed");
        written += 1;
    }
    println!("[*] wrote {written} events");
}
