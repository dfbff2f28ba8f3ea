// src/main.rs

use upkeep::errors::Interrupted;
use upkeep::{cli, logging, run};

#[tokio::main]
async fn main() {
    std::process::exit(run_main().await);
}

async fn run_main() -> i32 {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("upkeep error: {err:?}");
        return 1;
    }

    match run(args).await {
        Ok(()) => 0,
        // Operator interrupts use the conventional signal exit status so that
        // calling scripts can tell "aborted" apart from "failed".
        Err(err) if err.is::<Interrupted>() => {
            eprintln!("\nInterrupted by operator. Exiting...");
            130
        }
        Err(err) => {
            eprintln!("upkeep error: {err:?}");
            1
        }
    }
}
