#![forbid(unsafe_code)]

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use webpify::{ConversionOptions, WebpifyOptions};

mod cli;

const INPUT_FOLDER: &str = "input";
const OUTPUT_FOLDER: &str = "output";

fn main() -> ExitCode {
    env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .filter_level(LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .init();

    let args = cli::WebpifyCli::parse();

    if let Some(completion_generator) = args.completions {
        cli::WebpifyCli::print_completions(completion_generator);
        return ExitCode::SUCCESS;
    }

    let conversion = match ConversionOptions::new(args.quality, args.method, args.lossless) {
        Ok(conversion) => conversion,
        Err(error) => {
            log::error!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let options = WebpifyOptions {
        input_dir: PathBuf::from(INPUT_FOLDER),
        output_dir: PathBuf::from(OUTPUT_FOLDER),
        conversion,
    };

    webpify::run(options)
}
