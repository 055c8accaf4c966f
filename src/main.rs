use clap::Parser;
use pro_image_viewer::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose || cfg!(debug_assertions) {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = cli::run(cli) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
