use std::sync::Mutex;
use std::time::SystemTime;

/// Snapshot of the sync-pulse correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncInfo {
    /// Sync-out rate in Hz; 0 when sync is disabled.
    pub rate: i32,
    /// Last observed sync counter, 0 before the first one.
    pub count: u32,
    /// Host time assigned to the record that carried `count`.
    pub time: Option<SystemTime>,
}

/// Correlates the external sync counter with host event times.
///
/// Written from the link's reader thread, readable from any other.
#[derive(Debug)]
pub struct SyncState {
    rate: i32,
    inner: Mutex<SyncSample>,
}

#[derive(Debug, Default)]
struct SyncSample {
    count: Option<u32>,
    time: Option<SystemTime>,
}

impl SyncState {
    pub fn new(rate: i32) -> Self {
        Self {
            rate,
            inner: Mutex::new(SyncSample::default()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn enabled(&self) -> bool {
        self.rate > 0
    }

    /// Record `new_count` at `candidate_time` unless it repeats the last counter.
    ///
    /// A counter that goes backwards is taken as a new value: the 32-bit
    /// counter wraps and restarts with the device.
    pub fn update(&self, new_count: u32, candidate_time: SystemTime) {
        if !self.enabled() {
            return;
        }
        let Ok(mut sample) = self.inner.lock() else {
            return;
        };
        match sample.count {
            Some(count) if count == new_count => return,
            Some(count) if new_count < count => {
                log::debug!("Sync counter went from {} to {}", count, new_count);
            }
            _ => {}
        }
        sample.count = Some(new_count);
        sample.time = Some(candidate_time);
    }

    pub fn info(&self) -> SyncInfo {
        let (count, time) = match self.inner.lock() {
            Ok(sample) => (sample.count.unwrap_or(0), sample.time),
            Err(_) => (0, None),
        };
        SyncInfo {
            rate: self.rate,
            count,
            time,
        }
    }
}
