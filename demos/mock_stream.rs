//! Stream a synthetic VN-100 capture through the full pipeline.
//!
//! Generates binary records at the configured IMU rate, with a few corrupted
//! ones and a reported device error, and prints the decoded timeline.
//!
//! Usage: cargo run --example mock_stream

use std::io::Cursor;
use std::time::Duration;
use vn100::protocol;
use vn100::{DecodedRecord, OutputGroups};

fn main() {
    env_logger::init();

    let settings = match vn100::DriverConfig::default().resolve() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rate = settings.imu_rate.actual_rate as u64;
    let period_ns = 1_000_000_000 / rate;
    let mut capture = Vec::new();
    for n in 0..(2 * rate) {
        let t = n as f32 / rate as f32;
        let record = DecodedRecord {
            timestamp_ticks: Some(5_000_000_000 + n * period_ns),
            orientation: [0.0, 0.0, (t / 2.0).sin(), (t / 2.0).cos()],
            magnetic_field: [0.21, 0.02, 0.43],
            temperature: Some(24.0),
            pressure: Some(101.3),
            sync_counter: Some((n / 5) as u32),
            linear_acceleration: [0.0, 0.0, -9.81],
            angular_rate: [0.0, 0.0, 1.0],
            event_time: None,
        };
        let mut packet = protocol::encode_binary(&record, OutputGroups::DEFAULT_BINARY);
        if n % 50 == 25 {
            packet[12] ^= 0x55;
        }
        capture.extend_from_slice(&packet);
        if n == rate {
            capture.extend_from_slice(protocol::encode_error(11).as_bytes());
        }
    }

    let link = vn100::ReaderLink::new(Cursor::new(capture));
    let (sink, records) = vn100::ChannelSink::new(1024);
    let mut stream = vn100::StreamController::new(link, settings, sink);
    if let Err(e) = stream.start() {
        eprintln!("Failed to start stream: {}", e);
        std::process::exit(1);
    }

    let mut count: u64 = 0;
    let mut first = None;
    while let Ok(record) = records.recv_timeout(Duration::from_millis(500)) {
        count += 1;
        let Some(time) = record.event_time else {
            continue;
        };
        let first = *first.get_or_insert(time);
        if count % 50 == 1 {
            println!(
                "t=+{:<12?} ticks={:<12} quat=[{:+.3}, {:+.3}, {:+.3}, {:+.3}] sync={:?}",
                time.duration_since(first).unwrap_or_default(),
                record.timestamp_ticks.unwrap_or(0),
                record.orientation[0],
                record.orientation[1],
                record.orientation[2],
                record.orientation[3],
                record.sync_counter,
            );
        }
    }

    if let Some(sync) = stream.sync_info() {
        println!("Last sync pulse: count={} time={:?}", sync.count, sync.time);
    }
    if let Some(stats) = stream.stats() {
        println!(
            "{} records: {} published, {} dropped, {} device errors",
            count, stats.published, stats.dropped, stats.device_errors
        );
    }
}
