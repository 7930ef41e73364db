use clap::Parser;
use datavault::cli::{run, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        datavault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
