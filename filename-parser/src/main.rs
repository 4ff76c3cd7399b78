//! Command-line front end: parse paths given as arguments (or on stdin)
//! and print the structured result as JSON.

use std::io::{self, BufRead};

use filename_parser::scan_path;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(path) if !path.trim().is_empty() => print_result(path.trim()),
                Ok(_) => continue,
                Err(err) => {
                    eprintln!("error reading stdin: {}", err);
                    std::process::exit(1);
                }
            }
        }
    } else {
        for path in &args {
            print_result(path);
        }
    }
}

fn print_result(path: &str) {
    match scan_path(path) {
        Some(parsed) => match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("error serializing result for '{}': {}", path, err),
        },
        None => println!("{{\"original\": {:?}, \"matched\": false}}", path),
    }
}
