//! Read a JSON document from stdin and print it back in compact form,
//! object members sorted by key.

use std::io::Read;
use std::process::exit;

fn main() {
    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("error: {err}");
        exit(1);
    }
    match copse_json::parse(&input) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            eprintln!("error: {err}");
            exit(1);
        }
    }
}
