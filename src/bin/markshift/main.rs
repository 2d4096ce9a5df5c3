mod cli;

use anyhow::Result;
use clap::Parser;
use log::warn;
use simple_logger::SimpleLogger;
use std::{fs, path::PathBuf};

use markshift::resolver::convert_between;

use cli::{Cli, read_input, read_output};

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .with_colors(true)
        .without_timestamps()
        .init()
        .unwrap();
    let args = Cli::parse();

    if let Err(e) = run(args) {
        eprintln!("Error converting document: {}", e);
        std::process::exit(1)
    }
}

fn run(args: Cli) -> Result<()> {
    let source = read_input(&args);
    let conversion = convert_between(args.from, args.to, &source)?;
    for diagnostic in &conversion.diagnostics {
        warn!("{diagnostic}");
    }
    render_string(conversion.output, read_output(args));
    Ok(())
}

fn render_string(result: String, output_destination: Option<PathBuf>) {
    match output_destination {
        Some(out_file) => fs::write(out_file, result).expect("Error writng file"),
        None => println!("{}", result),
    }
}
