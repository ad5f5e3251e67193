use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use webpify::{DEFAULT_METHOD, DEFAULT_QUALITY, METHOD_RANGE, QUALITY_RANGE};

#[derive(Debug, Parser)]
#[command(
    name = "webpify",
    version,
    about,
    long_about = "Converts every JPEG and PNG image below the folder 'input' to WebP and copies all other files along. \
    The results are written to the folder 'output', mirroring the folder structure of 'input'.\n\n\
    WARNING: Everything inside 'output' is deleted at the start of every run. This cannot be undone."
)]
pub(crate) struct WebpifyCli {
    #[clap(
        long,
        short,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(i64::from(*QUALITY_RANGE.start())..=i64::from(*QUALITY_RANGE.end())),
        help = "WebP quality from 0 to 100. In lossless mode this is the compression effort instead."
    )]
    pub(crate) quality: u8,

    #[clap(
        long,
        short,
        default_value_t = DEFAULT_METHOD,
        value_parser = clap::value_parser!(u8).range(i64::from(*METHOD_RANGE.start())..=i64::from(*METHOD_RANGE.end())),
        help = "Compression method from 0 (fast) to 6 (slowest, smallest files)."
    )]
    pub(crate) method: u8,

    #[clap(long, default_value_t = false, help = "Encode lossless WebP images, keeping every pixel exactly as it is.")]
    pub(crate) lossless: bool,

    #[clap(long, value_name = "SHELL", help = "Print the completion script for the given shell and exit.")]
    pub(crate) completions: Option<Shell>,
}

impl WebpifyCli {
    pub(crate) fn print_completions(shell: Shell) {
        let mut command = Self::command();
        let binary_name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, binary_name, &mut std::io::stdout());
    }
}
