//! EasyEDA shape tool CLI.

use edac::commands::{check_file, decode_file, fmt_file, lex_file, parse_options};

fn main() {
    edac::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" | "decode" | "check" | "fmt" => {
            let (options, path) = match parse_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: edac {command} <file|-> [options]");
                    std::process::exit(2);
                }
            };

            let code = match command.as_str() {
                "lex" => lex_file(&path, &options),
                "decode" => decode_file(&path, &options),
                "check" => check_file(&path, &options),
                _ => fmt_file(&path, &options),
            };
            std::process::exit(code);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("edac {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("EasyEDA shape tool");
    println!();
    println!("Usage: edac <command> <file|-> [options]");
    println!();
    println!("Commands:");
    println!("  lex      Print the token stream");
    println!("  decode   Decode and print shapes");
    println!("  check    Validate without printing shapes");
    println!("  fmt      Print the canonical encoding");
    println!("  help     Show this message");
    println!("  version  Show version");
    println!();
    println!("Options:");
    println!("  --format=<fmt>   decode output: text, json, tokens (default: text)");
    println!("  --nested         Input is a list of shape arrays: [[...], [...]]");
    println!("  --path           Each array is a path of chained L/ARC/CARC segments");
    println!("  --color=<when>   auto, always, never (default: auto)");
    println!();
    println!("Pass '-' as the file to read from stdin.");
    println!("Set RUST_LOG (e.g. RUST_LOG=eda_codec=trace) for decoder tracing.");
}
