use clap::Parser;
use climenu::Cli;

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file
        && let Err(e) = climenu::init_logging(path)
    {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = climenu::run_demo(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
