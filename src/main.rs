//! CLI entry point for entropy-maximizing batch cropping

use clap::Parser;
use entropycrop::io::cli::{Cli, FileProcessor};

fn main() -> entropycrop::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
