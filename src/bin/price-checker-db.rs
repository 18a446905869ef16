use price_checker::args::DbArgs;
use price_checker::job;
use std::process;

fn main() {
    price_checker::init_logging();
    let args = DbArgs::parse();
    let config = args.into_config(chrono::Local::now().date_naive());

    if let Err(err) = job::run(&config) {
        eprintln!("price check failed: {}", err);
        process::exit(1);
    }
}
