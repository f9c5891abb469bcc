use poll_scheduler::config::ServerConfig;
use poll_scheduler::display::{print_best_windows, write_best_windows_to_file};
use poll_scheduler::parser::{load_poll, load_responses, load_snapshot, PollSnapshot};
use poll_scheduler::sample::sample_snapshot;
use poll_scheduler::web;

const REPORT_FILE: &str = "best_windows.txt";

fn usage() {
    eprintln!("Usage:");
    eprintln!("  poll-scheduler web [port]                   start the HTTP server");
    eprintln!("  poll-scheduler demo [seed]                  rank a random sample poll");
    eprintln!("  poll-scheduler <snapshot.json>              rank a poll with its responses");
    eprintln!("  poll-scheduler <poll.json> <responses.csv>  rank a poll grid with CSV responses");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        usage();
        return Ok(());
    };

    // Web mode
    if command == "web" {
        let config = ServerConfig::from_args_and_env(&args);
        web::start_server(config).await?;
        return Ok(());
    }

    let snapshot = if command == "demo" {
        let seed = args.get(2).and_then(|s| s.parse::<u64>().ok()).unwrap_or(42);
        log::info!("Generating sample poll with seed {}", seed);
        sample_snapshot(seed)
    } else if let Some(csv_path) = args.get(2) {
        log::info!("Loading poll from {} and responses from {}", command, csv_path);
        PollSnapshot {
            poll: load_poll(command)?,
            responses: load_responses(csv_path)?,
        }
    } else {
        log::info!("Loading poll snapshot from {}", command);
        load_snapshot(command)?
    };

    snapshot.poll.validate()?;
    log::info!("Loaded {} responses (resubmissions merged)", snapshot.responses.len());

    print_best_windows(&snapshot.poll, &snapshot.responses);

    write_best_windows_to_file(&snapshot.poll, &snapshot.responses, REPORT_FILE)?;
    println!("\nReport saved to {}", REPORT_FILE);

    Ok(())
}
