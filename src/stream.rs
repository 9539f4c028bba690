//! Stream control: drives a [`DeviceLink`] and turns its raw records into
//! timestamped [`DecodedRecord`]s for a [`RecordSink`].

use crate::config::StreamSettings;
use crate::decoder::PacketDecoder;
use crate::error::SensorError;
use crate::link::DeviceLink;
use crate::sync::{SyncInfo, SyncState};
use crate::timeline::{HostClock, SystemClock, TimelineTracker};
use crate::types::DecodedRecord;
use crate::{Result, Vn100Error};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Receives every successfully decoded, timestamped record.
pub trait RecordSink: Send + Sync {
    /// Returns false when the record was discarded instead of delivered.
    fn publish(&self, record: DecodedRecord) -> bool;

    /// Called once when a fatal device error ends the stream.
    fn halt(&self, _error: &Vn100Error) {}

    /// True once the sink no longer accepts records. A controller refuses to
    /// start on a halted sink.
    fn is_halted(&self) -> bool {
        false
    }
}

/// Record counters for diagnostics. `dropped` counts records rejected by the
/// decoder as well as records the sink discarded.
#[derive(Debug, Default)]
pub struct StreamStats {
    published: AtomicU64,
    dropped: AtomicU64,
    device_errors: AtomicU64,
}

/// Point-in-time copy of [`StreamStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub published: u64,
    pub dropped: u64,
    pub device_errors: u64,
}

impl StreamStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            device_errors: self.device_errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Streaming,
}

/// State shared with the handlers running on the link's reader thread.
struct Shared {
    decoder: PacketDecoder,
    timeline: TimelineTracker,
    sync: SyncState,
    sink: Arc<dyn RecordSink>,
    stats: StreamStats,
    halted: AtomicBool,
    fatal: Mutex<Option<SensorError>>,
}

impl Shared {
    fn handle_record(&self, raw: &[u8], index: u64) {
        if self.halted.load(Ordering::Acquire) {
            return;
        }

        let mut record = match self.decoder.decode(raw) {
            Ok(record) => record,
            Err(e) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("Dropped record {}: {}", index, e);
                return;
            }
        };

        let event_time = match record.timestamp_ticks {
            Some(ticks) => self.timeline.assign_time(ticks),
            None => self.timeline.host_now(),
        };
        record.event_time = Some(event_time);

        if let Some(count) = record.sync_counter {
            self.sync.update(count, event_time);
        }

        log::trace!("Record {} at {:?}", index, event_time);
        if self.sink.publish(record) {
            self.stats.published.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn handle_device_error(&self, err: SensorError, index: u64) {
        self.stats.device_errors.fetch_add(1, Ordering::Relaxed);

        if !err.is_fatal() {
            log::warn!("VN-100 reported {} (record {})", err, index);
            return;
        }

        log::error!("VN-100 reported fatal {} (record {}), halting stream", err, index);
        if self.halted.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Ok(mut fatal) = self.fatal.lock() {
            *fatal = Some(err);
        }
        self.sink.halt(&Vn100Error::DeviceProtocol(err));
    }

    fn fatal(&self) -> Option<SensorError> {
        self.fatal.lock().ok().and_then(|f| *f)
    }
}

/// Starts and stops streaming on a device link.
pub struct StreamController<L: DeviceLink> {
    link: L,
    settings: StreamSettings,
    sink: Arc<dyn RecordSink>,
    clock: Arc<dyn HostClock>,
    shared: Option<Arc<Shared>>,
}

impl<L: DeviceLink> StreamController<L> {
    pub fn new(link: L, settings: StreamSettings, sink: Arc<dyn RecordSink>) -> Self {
        Self::with_clock(link, settings, sink, Arc::new(SystemClock))
    }

    /// Like [`StreamController::new`] with a custom host clock for the timeline.
    pub fn with_clock(
        link: L,
        settings: StreamSettings,
        sink: Arc<dyn RecordSink>,
        clock: Arc<dyn HostClock>,
    ) -> Self {
        Self {
            link,
            settings,
            sink,
            clock,
            shared: None,
        }
    }

    pub fn state(&self) -> StreamState {
        if self.shared.is_some() {
            StreamState::Streaming
        } else {
            StreamState::Idle
        }
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Configure the device and begin delivering records to the sink.
    ///
    /// Timeline and sync state start fresh for every stream.
    pub fn start(&mut self) -> Result<()> {
        if self.shared.is_some() {
            return Err(Vn100Error::AlreadyStreaming);
        }
        if self.sink.is_halted() {
            return Err(Vn100Error::StreamStopped);
        }

        let shared = Arc::new(Shared {
            decoder: PacketDecoder::new(self.settings.mode)?,
            timeline: TimelineTracker::new(Box::new(ClockRef(self.clock.clone()))),
            sync: SyncState::new(self.settings.sync_rate()),
            sink: self.sink.clone(),
            stats: StreamStats::default(),
            halted: AtomicBool::new(false),
            fatal: Mutex::new(None),
        });

        self.link.mute_output()?;
        self.link.configure_output(&self.settings)?;

        let on_error = shared.clone();
        self.link
            .register_error_handler(Box::new(move |err, index| on_error.handle_device_error(err, index)))?;
        let on_record = shared.clone();
        if let Err(e) = self
            .link
            .register_record_handler(Box::new(move |raw, index| on_record.handle_record(raw, index)))
        {
            if let Err(unregister) = self.link.unregister_error_handler() {
                log::warn!("Unable to unregister error handler: {}", unregister);
            }
            return Err(e);
        }

        log::info!("Streaming at {} Hz", self.settings.imu_rate.actual_rate);
        self.shared = Some(shared);
        Ok(())
    }

    /// Mute the device and unregister the handlers.
    pub fn stop(&mut self) -> Result<()> {
        let Some(shared) = self.shared.take() else {
            log::debug!("Stop requested while idle");
            return Ok(());
        };
        shared.halted.store(true, Ordering::Release);

        if let Err(e) = self.link.mute_output() {
            log::warn!("Unable to mute output: {}", e);
        }
        let mut first_error = None;
        for result in [
            self.link.unregister_record_handler(),
            self.link.unregister_error_handler(),
        ] {
            match result {
                Ok(()) => {}
                Err(Vn100Error::HandlerNotRegistered) => {
                    log::warn!("Unable to unregister handler: none registered")
                }
                Err(e) => {
                    log::warn!("Unable to unregister handler: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        let stats = shared.stats.snapshot();
        log::info!(
            "Stream stopped: {} published, {} dropped, {} device errors",
            stats.published,
            stats.dropped,
            stats.device_errors
        );
        first_error.map_or(Ok(()), Err)
    }

    /// Swap the sink, e.g. for a fresh one after a fatal error halted the old.
    /// Only allowed while idle.
    pub fn replace_sink(&mut self, sink: Arc<dyn RecordSink>) -> Result<()> {
        if self.shared.is_some() {
            return Err(Vn100Error::AlreadyStreaming);
        }
        self.sink = sink;
        Ok(())
    }

    /// Tear the stream down if a fatal device error was reported.
    ///
    /// Fails with [`Vn100Error::NotStreaming`] once the stream is idle.
    pub fn check_health(&mut self) -> Result<()> {
        let Some(shared) = self.shared.as_ref() else {
            return Err(Vn100Error::NotStreaming);
        };
        match shared.fatal() {
            Some(err) => {
                self.stop()?;
                Err(Vn100Error::DeviceProtocol(err))
            }
            None => Ok(()),
        }
    }

    pub fn sync_info(&self) -> Option<SyncInfo> {
        self.shared.as_ref().map(|s| s.sync.info())
    }

    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.shared.as_ref().map(|s| s.stats.snapshot())
    }
}

impl<L: DeviceLink> Drop for StreamController<L> {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("Failed to stop stream: {}", e);
        }
    }
}

struct ClockRef(Arc<dyn HostClock>);

impl HostClock for ClockRef {
    fn now(&self) -> std::time::SystemTime {
        self.0.now()
    }
}

/// Sink that forwards records over a bounded channel.
///
/// Records are dropped when the channel is full.
pub struct ChannelSink {
    sender: Mutex<Option<Sender<DecodedRecord>>>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Arc<ChannelSink>, RecordStream) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        let sink = Arc::new(ChannelSink {
            sender: Mutex::new(Some(sender)),
        });
        (sink, RecordStream { receiver })
    }
}

impl RecordSink for ChannelSink {
    fn publish(&self, record: DecodedRecord) -> bool {
        let Ok(sender) = self.sender.lock() else {
            return false;
        };
        let Some(sender) = sender.as_ref() else {
            return false;
        };
        match sender.try_send(record) {
            Ok(()) => true,
            Err(crossbeam_channel::TrySendError::Full(_)) => {
                log::trace!("Record channel full, dropping record");
                false
            }
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => {
                log::trace!("Record channel disconnected");
                false
            }
        }
    }

    fn halt(&self, _error: &Vn100Error) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
    }

    fn is_halted(&self) -> bool {
        self.sender.lock().map_or(true, |sender| sender.is_none())
    }
}

/// Receiving end of a [`ChannelSink`].
pub struct RecordStream {
    receiver: Receiver<DecodedRecord>,
}

impl RecordStream {
    /// Receive the next record (blocks until available).
    pub fn recv(&self) -> Result<DecodedRecord> {
        self.receiver.recv().map_err(|_| Vn100Error::StreamStopped)
    }

    /// Try to receive a record without blocking.
    pub fn try_recv(&self) -> Option<DecodedRecord> {
        self.receiver.try_recv().ok()
    }

    /// Receive a record with a timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DecodedRecord> {
        self.receiver.recv_timeout(timeout).map_err(|e| match e {
            crossbeam_channel::RecvTimeoutError::Timeout => Vn100Error::Timeout,
            crossbeam_channel::RecvTimeoutError::Disconnected => Vn100Error::StreamStopped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverConfig;
    use crate::link::{ErrorHandler, ReaderLink, RecordHandler};
    use crate::protocol::{encode_binary, encode_qmr};
    use crate::timeline::tests::ManualClock;
    use crate::types::OutputGroups;
    use std::time::SystemTime;

    const T0: u64 = 1_700_000_000_000_000_000;

    fn at(nanos: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_nanos(nanos)
    }

    /// Link driven by the test: records are injected through the handlers.
    #[derive(Default, Clone)]
    struct FakeLink {
        record: Arc<Mutex<Option<RecordHandler>>>,
        error: Arc<Mutex<Option<ErrorHandler>>>,
        log: Arc<Mutex<Vec<&'static str>>>,
        unplugged: Arc<AtomicBool>,
    }

    impl FakeLink {
        fn deliver(&self, raw: &[u8], index: u64) {
            if let Some(h) = self.record.lock().unwrap().as_mut() {
                h(raw, index);
            }
        }

        fn report(&self, err: SensorError, index: u64) {
            if let Some(h) = self.error.lock().unwrap().as_mut() {
                h(err, index);
            }
        }

        fn registered(&self) -> bool {
            self.record.lock().unwrap().is_some()
        }

        fn error_registered(&self) -> bool {
            self.error.lock().unwrap().is_some()
        }

        fn unplug(&self) {
            self.unplugged.store(true, Ordering::SeqCst);
        }

        fn check_plugged(&self) -> Result<()> {
            if self.unplugged.load(Ordering::SeqCst) {
                return Err(Vn100Error::Link("device unplugged".into()));
            }
            Ok(())
        }
    }

    impl DeviceLink for FakeLink {
        fn configure_output(&mut self, _settings: &StreamSettings) -> Result<()> {
            self.log.lock().unwrap().push("configure");
            Ok(())
        }

        fn mute_output(&mut self) -> Result<()> {
            self.log.lock().unwrap().push("mute");
            Ok(())
        }

        fn register_record_handler(&mut self, handler: RecordHandler) -> Result<()> {
            self.check_plugged()?;
            *self.record.lock().unwrap() = Some(handler);
            Ok(())
        }

        fn unregister_record_handler(&mut self) -> Result<()> {
            self.check_plugged()?;
            self.record
                .lock()
                .unwrap()
                .take()
                .map(|_| ())
                .ok_or(Vn100Error::HandlerNotRegistered)
        }

        fn register_error_handler(&mut self, handler: ErrorHandler) -> Result<()> {
            *self.error.lock().unwrap() = Some(handler);
            Ok(())
        }

        fn unregister_error_handler(&mut self) -> Result<()> {
            self.error
                .lock()
                .unwrap()
                .take()
                .map(|_| ())
                .ok_or(Vn100Error::HandlerNotRegistered)
        }
    }

    fn record(ticks: u64, count: u32) -> DecodedRecord {
        DecodedRecord {
            timestamp_ticks: Some(ticks),
            orientation: [0.0, 0.0, 0.0, 1.0],
            magnetic_field: [0.25, -0.5, 0.75],
            temperature: Some(22.5),
            pressure: Some(99.5),
            sync_counter: Some(count),
            linear_acceleration: [0.0, 0.0, -9.75],
            angular_rate: [0.125, 0.0, -0.125],
            event_time: None,
        }
    }

    fn controller(
        config: DriverConfig,
    ) -> (StreamController<FakeLink>, FakeLink, RecordStream, ManualClock) {
        let link = FakeLink::default();
        let (sink, stream) = ChannelSink::new(16);
        let clock = ManualClock::at(T0);
        let ctl = StreamController::with_clock(
            link.clone(),
            config.resolve().unwrap(),
            sink,
            Arc::new(clock.clone()),
        );
        (ctl, link, stream, clock)
    }

    #[test]
    fn test_start_stop_transitions() {
        let (mut ctl, link, _stream, _clock) = controller(DriverConfig::default());
        assert_eq!(ctl.state(), StreamState::Idle);

        ctl.start().unwrap();
        assert_eq!(ctl.state(), StreamState::Streaming);
        assert!(link.registered());
        assert_eq!(*link.log.lock().unwrap(), vec!["mute", "configure"]);
        assert!(matches!(ctl.start(), Err(Vn100Error::AlreadyStreaming)));

        ctl.stop().unwrap();
        assert_eq!(ctl.state(), StreamState::Idle);
        assert!(!link.registered());
        // Stopping again is harmless.
        ctl.stop().unwrap();
    }

    #[test]
    fn test_stop_tolerates_missing_handler() {
        let (mut ctl, mut link, _stream, _clock) = controller(DriverConfig::default());
        ctl.start().unwrap();
        link.unregister_record_handler().unwrap();
        assert!(ctl.stop().is_ok());
    }

    #[test]
    fn test_records_are_timestamped_and_published() {
        let (mut ctl, link, stream, clock) = controller(DriverConfig::default());
        let groups = OutputGroups::DEFAULT_BINARY;
        ctl.start().unwrap();

        link.deliver(&encode_binary(&record(1000, 5), groups), 0);
        clock.set(T0 + 10_000_000);
        link.deliver(&encode_binary(&record(1800, 5), groups), 1);
        link.deliver(&encode_binary(&record(2600, 6), groups), 2);

        let first = stream.try_recv().unwrap();
        let second = stream.try_recv().unwrap();
        let third = stream.try_recv().unwrap();
        assert_eq!(first.event_time, Some(at(T0)));
        assert_eq!(second.event_time, Some(at(T0 + 800)));
        assert_eq!(third.event_time, Some(at(T0 + 1600)));
        assert_eq!(third.magnetic_field, [0.25, -0.5, 0.75]);

        let sync = ctl.sync_info().unwrap();
        assert_eq!(sync.rate, 20);
        assert_eq!(sync.count, 6);
        assert_eq!(sync.time, Some(at(T0 + 1600)));
        assert_eq!(ctl.stats().unwrap().published, 3);
    }

    #[test]
    fn test_bad_records_are_dropped() {
        let (mut ctl, link, stream, _clock) = controller(DriverConfig::default());
        ctl.start().unwrap();

        let mut corrupt = encode_binary(&record(1000, 1), OutputGroups::DEFAULT_BINARY);
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0xFF;
        link.deliver(&corrupt, 0);
        link.deliver(&encode_binary(&record(1000, 1), OutputGroups::REQUIRED), 1);
        link.deliver(&encode_binary(&record(1000, 1), OutputGroups::DEFAULT_BINARY), 2);

        let published = stream.try_recv().unwrap();
        assert_eq!(published.timestamp_ticks, Some(1000));
        assert!(stream.try_recv().is_none());

        let stats = ctl.stats().unwrap();
        assert_eq!(stats.dropped, 2);
        assert_eq!(stats.published, 1);
        assert_eq!(ctl.state(), StreamState::Streaming);
    }

    #[test]
    fn test_ascii_records_use_host_clock() {
        let config = DriverConfig {
            binary_output: false,
            ..DriverConfig::default()
        };
        let (mut ctl, link, stream, clock) = controller(config);
        ctl.start().unwrap();

        link.deliver(encode_qmr(&record(0, 3)).as_bytes(), 0);
        clock.set(T0 + 42);
        link.deliver(encode_qmr(&record(0, 3)).as_bytes(), 1);

        assert_eq!(stream.try_recv().unwrap().event_time, Some(at(T0)));
        let second = stream.try_recv().unwrap();
        assert_eq!(second.event_time, Some(at(T0 + 42)));
        assert_eq!(second.temperature, None);
        assert_eq!(ctl.sync_info().unwrap().time, Some(at(T0)));
    }

    #[test]
    fn test_reported_device_error_keeps_streaming() {
        let (mut ctl, link, stream, _clock) = controller(DriverConfig::default());
        ctl.start().unwrap();

        link.report(SensorError::InvalidChecksum, 0);
        link.deliver(&encode_binary(&record(1000, 1), OutputGroups::DEFAULT_BINARY), 1);

        assert!(ctl.check_health().is_ok());
        assert!(stream.try_recv().is_some());
        assert_eq!(ctl.stats().unwrap().device_errors, 1);
    }

    #[test]
    fn test_fatal_device_error_ends_stream() {
        let (mut ctl, link, stream, _clock) = controller(DriverConfig::default());
        ctl.start().unwrap();

        link.report(SensorError::HardFault, 0);
        link.deliver(&encode_binary(&record(1000, 1), OutputGroups::DEFAULT_BINARY), 1);

        assert!(matches!(
            stream.recv_timeout(Duration::from_millis(10)),
            Err(Vn100Error::StreamStopped)
        ));
        assert!(matches!(
            ctl.check_health(),
            Err(Vn100Error::DeviceProtocol(SensorError::HardFault))
        ));
        assert_eq!(ctl.state(), StreamState::Idle);
        assert!(!link.registered());
        assert!(matches!(ctl.check_health(), Err(Vn100Error::NotStreaming)));
    }

    #[test]
    fn test_restart_resets_timeline() {
        let (mut ctl, link, stream, clock) = controller(DriverConfig::default());
        let groups = OutputGroups::DEFAULT_BINARY;

        ctl.start().unwrap();
        link.deliver(&encode_binary(&record(1000, 1), groups), 0);
        ctl.stop().unwrap();

        clock.set(T0 + 5_000);
        ctl.start().unwrap();
        link.deliver(&encode_binary(&record(2000, 2), groups), 0);

        assert_eq!(stream.try_recv().unwrap().event_time, Some(at(T0)));
        assert_eq!(stream.try_recv().unwrap().event_time, Some(at(T0 + 5_000)));
    }

    #[test]
    fn test_failed_start_unregisters_error_handler() {
        let (mut ctl, link, _stream, _clock) = controller(DriverConfig::default());
        link.unplug();
        assert!(matches!(ctl.start(), Err(Vn100Error::Link(_))));
        assert_eq!(ctl.state(), StreamState::Idle);
        assert!(!link.error_registered());
    }

    #[test]
    fn test_stop_unregisters_both_on_link_error() {
        let (mut ctl, link, _stream, _clock) = controller(DriverConfig::default());
        ctl.start().unwrap();
        link.unplug();

        assert!(matches!(ctl.stop(), Err(Vn100Error::Link(_))));
        assert_eq!(ctl.state(), StreamState::Idle);
        assert!(!link.error_registered());
    }

    #[test]
    fn test_restart_after_fatal_needs_new_sink() {
        let (mut ctl, link, stream, _clock) = controller(DriverConfig::default());
        let groups = OutputGroups::DEFAULT_BINARY;
        ctl.start().unwrap();
        link.report(SensorError::HardFault, 0);
        assert!(ctl.check_health().is_err());

        assert!(matches!(ctl.start(), Err(Vn100Error::StreamStopped)));
        assert_eq!(ctl.state(), StreamState::Idle);
        assert!(matches!(stream.recv(), Err(Vn100Error::StreamStopped)));

        let (sink, fresh) = ChannelSink::new(4);
        ctl.replace_sink(sink).unwrap();
        ctl.start().unwrap();
        link.deliver(&encode_binary(&record(1000, 1), groups), 0);
        assert_eq!(fresh.try_recv().unwrap().timestamp_ticks, Some(1000));
        assert_eq!(ctl.stats().unwrap().published, 1);

        let (other, _unused) = ChannelSink::new(4);
        assert!(matches!(ctl.replace_sink(other), Err(Vn100Error::AlreadyStreaming)));
    }

    #[test]
    fn test_full_channel_counts_as_dropped() {
        let link = FakeLink::default();
        let (sink, stream) = ChannelSink::new(1);
        let settings = DriverConfig::default().resolve().unwrap();
        let mut ctl = StreamController::new(link.clone(), settings, sink);
        ctl.start().unwrap();

        let groups = OutputGroups::DEFAULT_BINARY;
        link.deliver(&encode_binary(&record(1000, 1), groups), 0);
        link.deliver(&encode_binary(&record(1800, 1), groups), 1);

        let stats = ctl.stats().unwrap();
        assert_eq!(stats.published, 1);
        assert_eq!(stats.dropped, 1);
        assert!(stream.try_recv().is_some());
        assert!(stream.try_recv().is_none());
    }

    #[test]
    fn test_reader_link_reports_corrupt_record() {
        let groups = OutputGroups::DEFAULT_BINARY;
        let mut corrupt = encode_binary(&record(1800, 2), groups);
        corrupt[20] ^= 0x10;
        let capture = [
            encode_binary(&record(1000, 1), groups),
            corrupt,
            encode_binary(&record(2600, 3), groups),
        ]
        .concat();

        let link = ReaderLink::new(std::io::Cursor::new(capture));
        let (sink, stream) = ChannelSink::new(16);
        let settings = DriverConfig::default().resolve().unwrap();
        let clock = Arc::new(ManualClock::at(T0));
        let mut ctl = StreamController::with_clock(link, settings, sink, clock);
        ctl.start().unwrap();

        let first = stream.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = stream.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.timestamp_ticks, Some(1000));
        assert_eq!(second.timestamp_ticks, Some(2600));
        assert_eq!(second.event_time, Some(at(T0 + 1600)));
        assert_eq!(ctl.stats().unwrap().dropped, 1);
        assert_eq!(ctl.sync_info().unwrap().count, 3);
    }
}
