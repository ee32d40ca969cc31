//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = ramble_cli::run() {
        eprintln!("ramble: {err}");
        std::process::exit(1);
    }
}
