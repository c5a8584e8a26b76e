use clap::Parser;
use staff_page::results::RecordEvent;

mod args;
use args::{Args, build_harvest};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let harvest = match build_harvest(&args) {
        Ok(harvest) => harvest,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    ::log::info!(
        "Starting harvest for origin: {}",
        harvest.config().base_origin
    );

    println!("Note: Fetching pages requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    // Start the harvest and get a receiver for record events
    let mut rx = match harvest.generate().await {
        Ok(rx) => rx,
        Err(e) => {
            ::log::error!("Failed to start harvest: {}", e);
            return;
        }
    };

    // Print records as they come in
    let mut records_received = 0;
    let start_time = std::time::Instant::now();

    while let Some(event) = rx.recv().await {
        records_received += 1;
        print_record(&event);
    }

    let duration = start_time.elapsed();
    ::log::info!(
        "Harvest complete - received {} records in {:.2} seconds",
        records_received,
        duration.as_secs_f64()
    );
}

/// Print one record as a numbered block
fn print_record(event: &RecordEvent) {
    println!("Staff #{}", event.index + 1);
    println!("  Name: {}", event.record.name.as_deref().unwrap_or("-"));
    println!("  Room: {}", event.record.room.as_deref().unwrap_or("-"));
    println!(
        "  Office hours: {}",
        event.record.office_hours.as_deref().unwrap_or("-")
    );
}
