//! The device-link boundary.
//!
//! A link owns the physical connection and pushes whole records to the
//! registered handlers from its own reader thread. [`ReaderLink`] does this
//! for any byte source: a capture file, or a serial port handle opened
//! and configured elsewhere.

use crate::config::StreamSettings;
use crate::error::SensorError;
use crate::framer::PacketFinder;
use crate::protocol;
use crate::{Result, Vn100Error};
use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Called with each raw record and its sequence index.
pub type RecordHandler = Box<dyn FnMut(&[u8], u64) + Send>;
/// Called with each device-reported error and its sequence index.
pub type ErrorHandler = Box<dyn FnMut(SensorError, u64) + Send>;

/// Operations the stream controller needs from the connection to the device.
pub trait DeviceLink {
    /// Program output mode and rates.
    fn configure_output(&mut self, settings: &StreamSettings) -> Result<()>;

    /// Turn async output off.
    fn mute_output(&mut self) -> Result<()>;

    fn register_record_handler(&mut self, handler: RecordHandler) -> Result<()>;

    /// Fails with [`Vn100Error::HandlerNotRegistered`] when nothing is registered.
    fn unregister_record_handler(&mut self) -> Result<()>;

    fn register_error_handler(&mut self, handler: ErrorHandler) -> Result<()>;

    fn unregister_error_handler(&mut self) -> Result<()>;
}

#[derive(Default)]
struct Handlers {
    record: Mutex<Option<RecordHandler>>,
    error: Mutex<Option<ErrorHandler>>,
}

/// [`DeviceLink`] over a byte stream read on a background thread.
///
/// The reader thread starts when the first record handler registers, so no
/// record is read before someone is listening. The device is expected to be
/// configured already; `configure_output` only records the settings it was
/// asked for.
pub struct ReaderLink {
    source: Option<Box<dyn Read + Send>>,
    handlers: Arc<Handlers>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
    configured: Option<StreamSettings>,
}

impl ReaderLink {
    /// Wrap `source`. Read timeouts are retried; end of stream or any other
    /// I/O error ends the reader.
    ///
    /// The stop flag is only checked between reads, and dropping the link
    /// joins the reader. A live port must therefore be opened with a read
    /// timeout (100 ms is plenty), or a drop blocks until the next byte.
    pub fn new<R: Read + Send + 'static>(source: R) -> ReaderLink {
        ReaderLink {
            source: Some(Box::new(source)),
            handlers: Arc::new(Handlers::default()),
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread: None,
            configured: None,
        }
    }

    /// Settings from the last `configure_output` call.
    pub fn configured(&self) -> Option<&StreamSettings> {
        self.configured.as_ref()
    }

    /// True while the reader thread is running.
    pub fn is_active(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Block until the reader thread has consumed the whole source.
    pub fn wait(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    fn spawn_reader(&mut self) -> Result<()> {
        let Some(source) = self.source.take() else {
            return Ok(());
        };
        let handlers = self.handlers.clone();
        let stop_flag = self.stop_flag.clone();
        let thread = std::thread::Builder::new()
            .name("vn100-reader".into())
            .spawn(move || reader_loop(source, handlers, stop_flag))?;
        self.thread = Some(thread);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ReaderLink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl DeviceLink for ReaderLink {
    fn configure_output(&mut self, settings: &StreamSettings) -> Result<()> {
        log::info!(
            "Reader link output: binary={} groups={:?} rate={} Hz",
            settings.mode.binary,
            settings.mode.groups,
            settings.imu_rate.actual_rate
        );
        self.configured = Some(settings.clone());
        Ok(())
    }

    fn mute_output(&mut self) -> Result<()> {
        log::debug!("Reader link cannot mute a recorded source");
        Ok(())
    }

    fn register_record_handler(&mut self, handler: RecordHandler) -> Result<()> {
        set_handler(&self.handlers.record, handler)?;
        self.spawn_reader()
    }

    fn unregister_record_handler(&mut self) -> Result<()> {
        take_handler(&self.handlers.record)
    }

    fn register_error_handler(&mut self, handler: ErrorHandler) -> Result<()> {
        set_handler(&self.handlers.error, handler)
    }

    fn unregister_error_handler(&mut self) -> Result<()> {
        take_handler(&self.handlers.error)
    }
}

fn set_handler<H>(slot: &Mutex<Option<H>>, handler: H) -> Result<()> {
    let mut slot = slot
        .lock()
        .map_err(|_| Vn100Error::Link("handler lock poisoned".into()))?;
    *slot = Some(handler);
    Ok(())
}

fn take_handler<H>(slot: &Mutex<Option<H>>) -> Result<()> {
    let mut slot = slot
        .lock()
        .map_err(|_| Vn100Error::Link("handler lock poisoned".into()))?;
    slot.take().map(|_| ()).ok_or(Vn100Error::HandlerNotRegistered)
}

/// Reads the source, frames records and dispatches them to the handlers.
fn reader_loop(
    mut source: Box<dyn Read + Send>,
    handlers: Arc<Handlers>,
    stop_flag: Arc<AtomicBool>,
) {
    let mut finder = PacketFinder::new();
    let mut buf = [0u8; 1024];
    let mut index: u64 = 0;

    log::info!("VN-100 reader started");

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            log::info!("VN-100 reader stopping (stop flag set)");
            break;
        }

        let len = match source.read(&mut buf) {
            Ok(0) => {
                log::info!("VN-100 reader reached end of stream");
                break;
            }
            Ok(n) => n,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                continue
            }
            Err(e) => {
                log::warn!("VN-100 read error: {}", e);
                break;
            }
        };

        finder.push(&buf[..len], |raw| {
            dispatch(raw, index, &handlers);
            index += 1;
        });
    }

    if finder.skipped() > 0 {
        log::debug!("Skipped {} bytes outside records", finder.skipped());
    }
}

fn dispatch(raw: &[u8], index: u64, handlers: &Handlers) {
    if protocol::is_error_sentence(raw) {
        let sentence = String::from_utf8_lossy(raw);
        match protocol::parse_error_sentence(&sentence) {
            Ok(Some(err)) => {
                if let Ok(mut slot) = handlers.error.lock() {
                    if let Some(handler) = slot.as_mut() {
                        handler(err, index);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Unreadable error sentence {}: {}", index, e),
        }
        return;
    }

    if let Ok(mut slot) = handlers.record.lock() {
        if let Some(handler) = slot.as_mut() {
            handler(raw, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{encode_binary, encode_error};
    use crate::types::{DecodedRecord, OutputGroups};
    use std::io::Cursor;

    fn packet(n: u32) -> Vec<u8> {
        let record = DecodedRecord {
            timestamp_ticks: Some(n as u64),
            orientation: [0.0, 0.0, 0.0, 1.0],
            magnetic_field: [0.0; 3],
            temperature: Some(20.0),
            pressure: Some(100.0),
            sync_counter: Some(n),
            linear_acceleration: [0.0; 3],
            angular_rate: [0.0; 3],
            event_time: None,
        };
        encode_binary(&record, OutputGroups::DEFAULT_BINARY)
    }

    #[test]
    fn test_dispatches_records_and_errors() {
        let stream = [packet(1), encode_error(11).into_bytes(), packet(2)].concat();
        let mut link = ReaderLink::new(Cursor::new(stream));
        assert!(!link.is_active());

        let records = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));
        {
            let errors = errors.clone();
            link.register_error_handler(Box::new(move |err, index| {
                errors.lock().unwrap().push((err, index));
            }))
            .unwrap();
            let records = records.clone();
            link.register_record_handler(Box::new(move |raw, index| {
                records.lock().unwrap().push((raw.to_vec(), index));
            }))
            .unwrap();
        }
        link.wait();

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], (packet(1), 0));
        assert_eq!(records[1], (packet(2), 2));
        assert_eq!(
            *errors.lock().unwrap(),
            vec![(SensorError::OutputBufferOverflow, 1)]
        );
        assert!(!link.is_active());
    }

    /// Source that never yields data, only read timeouts.
    struct Silent;

    impl Read for Silent {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            std::thread::sleep(std::time::Duration::from_millis(5));
            Err(std::io::Error::new(ErrorKind::TimedOut, "no data"))
        }
    }

    #[test]
    fn test_drop_stops_reader_on_timeouts() {
        let mut link = ReaderLink::new(Silent);
        link.register_record_handler(Box::new(|_, _| {})).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(link.is_active());
        drop(link);
    }

    #[test]
    fn test_unregister_twice() {
        let mut link = ReaderLink::new(Cursor::new(Vec::new()));
        link.register_record_handler(Box::new(|_, _| {})).unwrap();
        assert!(link.unregister_record_handler().is_ok());
        assert!(matches!(
            link.unregister_record_handler(),
            Err(Vn100Error::HandlerNotRegistered)
        ));
        assert!(matches!(
            link.unregister_error_handler(),
            Err(Vn100Error::HandlerNotRegistered)
        ));
    }

    #[test]
    fn test_configure_is_recorded() {
        let mut link = ReaderLink::new(Cursor::new(Vec::new()));
        let settings = crate::config::DriverConfig::default().resolve().unwrap();
        link.configure_output(&settings).unwrap();
        assert_eq!(link.configured(), Some(&settings));
    }
}
