use clap::Parser;
use log::debug;

mod args;
mod pipeline;

fn main() {
    let args = args::Args::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }
    debug!("arguments: {:?}", args);

    if let Err(e) = pipeline::run(&args.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
