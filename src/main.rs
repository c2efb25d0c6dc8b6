use clap::Parser;
use std::path::PathBuf;

mod term;

/// A tiny line-numbered BASIC.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Program to load before the first prompt.
    file: Option<PathBuf>,

    /// Print the syntax tree whenever the program changes.
    #[arg(short, long)]
    tree: bool,

    /// Statements to run between checks for Ctrl-C.
    #[arg(short, long, default_value_t = 5000)]
    cycles: usize,
}

fn main() {
    term::main(Args::parse());
}
