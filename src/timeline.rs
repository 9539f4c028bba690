//! Host timestamps for device samples.
//!
//! The first timestamped record is stamped with the host clock. Every later
//! record is stamped by adding the device-clock delta to the previous stamp,
//! so sample-to-sample intervals follow the device oscillator and host
//! scheduling jitter never enters the timeline.

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Source of host time.
pub trait HostClock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl HostClock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineAnchor {
    pub host_time: SystemTime,
    /// Nanoseconds since device startup.
    pub device_ticks: u64,
}

pub struct TimelineTracker {
    clock: Box<dyn HostClock>,
    anchor: Mutex<Option<TimelineAnchor>>,
}

impl TimelineTracker {
    pub fn new(clock: Box<dyn HostClock>) -> Self {
        Self {
            clock,
            anchor: Mutex::new(None),
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Box::new(SystemClock))
    }

    /// Current host time from the tracker's clock.
    pub fn host_now(&self) -> SystemTime {
        self.clock.now()
    }

    /// Stamp a record carrying `device_ticks`.
    ///
    /// The tick counter is 64-bit nanoseconds since startup and cannot wrap
    /// in practice; a decrease means the device restarted, which re-seeds the
    /// anchor from the host clock.
    pub fn assign_time(&self, device_ticks: u64) -> SystemTime {
        let mut anchor = self
            .anchor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let event_time = match *anchor {
            None => self.clock.now(),
            Some(previous) => match integrate(&previous, device_ticks) {
                Some(time) => time,
                None => {
                    log::warn!(
                        "Device clock went from {} ns to {} ns, re-seeding timeline",
                        previous.device_ticks,
                        device_ticks
                    );
                    self.clock.now()
                }
            },
        };

        *anchor = Some(TimelineAnchor {
            host_time: event_time,
            device_ticks,
        });
        event_time
    }

    pub fn anchor(&self) -> Option<TimelineAnchor> {
        self.anchor.lock().ok().and_then(|anchor| *anchor)
    }
}

fn integrate(anchor: &TimelineAnchor, device_ticks: u64) -> Option<SystemTime> {
    let delta = device_ticks.checked_sub(anchor.device_ticks)?;
    anchor.host_time.checked_add(Duration::from_nanos(delta))
}

impl std::fmt::Debug for TimelineTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineTracker")
            .field("anchor", &self.anchor())
            .finish()
    }
}
