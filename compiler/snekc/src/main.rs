//! Snek CLI

use std::path::PathBuf;

use snek_vm::stdio_handler;
use snekc::{disassemble, init_tracing, run_file, run_repl, CliError, RunOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut file_path = None;

            let mut rest = args.iter().skip(2);
            while let Some(arg) = rest.next() {
                if arg == "--no-prelude" {
                    options.prelude = false;
                } else if arg == "--root" {
                    let Some(dir) = rest.next() else {
                        eprintln!("error: --root needs a directory");
                        std::process::exit(1);
                    };
                    options.root = Some(PathBuf::from(dir));
                } else if let Some(dir) = arg.strip_prefix("--root=") {
                    options.root = Some(PathBuf::from(dir));
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(PathBuf::from(arg));
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(1);
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: snek run <file> [--root DIR] [--no-prelude]");
                std::process::exit(1);
            };

            run_file(&path, &options, stdio_handler()).map(|_| ())
        }
        "repl" => {
            let config = RunOptions::default().config(None, stdio_handler());
            run_repl(config, std::io::stdout())
        }
        "dis" => {
            if args.len() < 3 {
                eprintln!("Usage: snek dis <file>");
                std::process::exit(1);
            }
            disassemble(&PathBuf::from(&args[2])).map(|listing| print!("{listing}"))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("snek {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        report(&err);
        std::process::exit(1);
    }
}

fn report(err: &CliError) {
    if !err.is_reported() {
        eprintln!("error: {err}");
    }
}

fn print_usage() {
    println!("Snek interpreter");
    println!();
    println!("Usage: snek <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a Snek script");
    println!("  repl             Start an interactive session");
    println!("  dis <file>       Print the compiled instructions of a file");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --root <dir>     Directory imports resolve against");
    println!("                   (default: $SNEK_ROOT, else the script's directory)");
    println!("  --no-prelude     Do not import the prelude");
    println!();
    println!("Environment:");
    println!("  SNEK_LOG         Tracing filter, e.g. snek_vm=debug (falls back to RUST_LOG)");
    println!("  SNEK_LOG_TREE    Render tracing output as an indented tree");
}
