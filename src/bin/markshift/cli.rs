use clap::Parser;
use log::warn;
use markshift::writers::Format;
use std::{fs, io, path::PathBuf};

/// Main entrypoint for markshift when called as executable
#[derive(Parser)]
#[command(name = "markshift", version, about)]
pub struct Cli {
    /// Document for processing. To read from standard input (stdin), use "-".
    pub file: String,

    /// Provide a filename for the output.
    /// To send to standard out (stdout), use "-".
    #[arg(short = 'o', long = "out-file")]
    pub output: Option<String>,

    /// Source language of the document.
    #[arg(value_enum, short = 'f', long = "from", default_value = "asciidoc")]
    pub from: Format,

    /// Target language for the conversion.
    #[arg(value_enum, short = 't', long = "to", default_value = "html")]
    pub to: Format,
}

pub fn read_input(args: &Cli) -> String {
    match args.file.as_str() {
        "-" => io::read_to_string(io::stdin()).expect("Error reading from stdin"),
        _ => match fs::read_to_string(args.file.as_str()) {
            Ok(file_string) => file_string,
            Err(e) => {
                warn!("Unable to read file {:?}: {e}", &args.file.as_str());
                std::process::exit(1)
            }
        },
    }
}

pub fn read_output(args: Cli) -> Option<PathBuf> {
    match args.output {
        Some(ref output) => {
            if output == "-" {
                None
            } else {
                Some(PathBuf::from(output.clone()))
            }
        }
        None => {
            if args.file == "-" {
                // we put to stdout if stdin
                None
            } else {
                let mut out_destination = PathBuf::new();
                out_destination.push(args.file.clone());
                match args.to {
                    Format::Asciidoc => out_destination.set_extension("adoc"),
                    Format::Html => out_destination.set_extension("html"),
                };
                Some(out_destination)
            }
        }
    }
}
