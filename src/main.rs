use std::fs;

use clap::Parser;
use minimatica::{interpreter::sink::Console, run};

/// minimatica is a small language for numbers, polynomial functions and
/// matrices.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells minimatica to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints only the last value a script logs.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut console = Console::new();
    let ok = run(&script, &mut console);

    if args.pipe_mode {
        if let Some(last) = console.logs().last() {
            println!("{last}");
        }
    } else {
        for value in console.logs() {
            println!("{value}");
        }
    }

    for message in console.errors() {
        eprintln!("{message}");
    }

    if !ok {
        std::process::exit(1);
    }
}
