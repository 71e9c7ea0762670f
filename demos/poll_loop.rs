// demos/poll_loop.rs
//
// Polls the stream reader on a fixed cadence and prints the JSON an uploader
// would submit to the processed-agent-data store.
//
// Usage: cargo run --example poll_loop -- accelerometer.csv gps.csv

use roadsense_rs::*;
use std::env;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let acc_path = args.next().unwrap_or_else(|| "data/accelerometer.csv".to_string());
    let gps_path = args.next().unwrap_or_else(|| "data/gps.csv".to_string());

    let mut reader = StreamReader::new(acc_path, gps_path);
    reader.start_reading()?;

    for _ in 0..20 {
        let reading = reader.read()?;

        // Road state classification happens downstream; use a placeholder.
        let payload = ProcessedReading::new("unknown", reading);
        println!(
            "{}",
            serde_json::to_string(&payload).expect("reading serializes")
        );

        thread::sleep(Duration::from_millis(250));
    }

    reader.stop_reading();
    Ok(())
}
