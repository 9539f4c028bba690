//! Decode a captured VN-100 serial dump and print JSON lines.
//!
//! Output mode and rates come from `VN100_*` environment variables and must
//! match what the device was sending when the capture was taken.
//!
//! Usage: cargo run --example decode_dump -- capture.bin

use std::io::{self, Write};
use std::time::{Duration, UNIX_EPOCH};

fn main() {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: decode_dump <capture file>");
            std::process::exit(2);
        }
    };

    let settings = match vn100::DriverConfig::from_env().resolve() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let publish = settings.publish;

    let file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let link = vn100::ReaderLink::new(file);

    let (sink, records) = vn100::ChannelSink::new(4096);
    let mut stream = vn100::StreamController::new(link, settings, sink);
    if let Err(e) = stream.start() {
        eprintln!("Failed to start stream: {}", e);
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    loop {
        match records.recv_timeout(Duration::from_millis(500)) {
            Ok(r) => {
                let t = r
                    .event_time
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map_or(0.0, |d| d.as_secs_f64());
                let mut line = format!(
                    "{{\"t\":{:.9},\"q\":[{},{},{},{}],\"acc\":[{},{},{}],\"gyro\":[{},{},{}]",
                    t,
                    r.orientation[0], r.orientation[1], r.orientation[2], r.orientation[3],
                    r.linear_acceleration[0], r.linear_acceleration[1], r.linear_acceleration[2],
                    r.angular_rate[0], r.angular_rate[1], r.angular_rate[2],
                );
                if publish.magnetic_field {
                    line.push_str(&format!(
                        ",\"mag\":[{},{},{}]",
                        r.magnetic_field[0], r.magnetic_field[1], r.magnetic_field[2]
                    ));
                }
                if let (true, Some(temp)) = (publish.temperature, r.temperature) {
                    line.push_str(&format!(",\"temp\":{}", temp));
                }
                if let (true, Some(pres)) = (publish.pressure, r.pressure) {
                    line.push_str(&format!(",\"pres\":{}", pres));
                }
                if let Some(count) = r.sync_counter {
                    line.push_str(&format!(",\"sync\":{}", count));
                }
                let _ = writeln!(out, "{}}}", line);
            }
            Err(vn100::Vn100Error::Timeout) => {
                if !stream.link().is_active() {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }

        if let Err(e) = stream.check_health() {
            eprintln!("Stream halted: {}", e);
            break;
        }
    }
    let _ = out.flush();

    if let Some(stats) = stream.stats() {
        eprintln!(
            "{} published, {} dropped, {} device errors",
            stats.published, stats.dropped, stats.device_errors
        );
    }
}
