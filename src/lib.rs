//! # vn100 - telemetry core for the VectorNav VN-100 IMU
//!
//! Decodes the device's binary and ASCII async output, stamps each sample
//! on a host timeline driven by the device clock, and fits requested output
//! and sync-pulse rates onto the fixed 800 Hz base rate. Provides:
//! - Rate normalization for IMU output and sync-out pulses
//! - Binary/ASCII record validation and field extraction
//! - Seed-then-integrate event timestamps and sync-counter correlation
//! - A stream controller over any [`link::DeviceLink`]
//! - C FFI for decoding from C/C++
//!
//! ## Quick Start
//! ```no_run
//! use std::time::Duration;
//! use vn100::{ChannelSink, DriverConfig, ReaderLink, StreamController};
//!
//! let settings = DriverConfig::from_env().resolve().unwrap();
//! let file = std::fs::File::open("capture.bin").unwrap();
//! let link = ReaderLink::new(file);
//! let (sink, records) = ChannelSink::new(256);
//!
//! let mut stream = StreamController::new(link, settings, sink);
//! stream.start().unwrap();
//! while let Ok(record) = records.recv_timeout(Duration::from_secs(1)) {
//!     println!("{:?} {:?}", record.event_time, record.orientation);
//! }
//! ```

pub mod error;
pub mod types;
pub mod rate;
pub mod protocol;
pub mod decoder;
pub mod framer;
pub mod sync;
pub mod timeline;
pub mod config;
pub mod link;
pub mod stream;
pub mod ffi;

pub use error::{SensorError, Vn100Error};
pub use types::*;
pub use config::{DriverConfig, StreamSettings};
pub use decoder::PacketDecoder;
pub use link::{DeviceLink, ReaderLink};
pub use stream::{ChannelSink, RecordSink, RecordStream, StreamController};

/// Result type alias for vn100 operations.
pub type Result<T> = std::result::Result<T, Vn100Error>;
