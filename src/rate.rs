//! Output-rate normalization against the device's fixed base rate.
//!
//! The VN-100 samples internally at [`BASE_IMU_RATE`] and can only emit (or
//! pulse) every n-th sample, so every configured rate has to divide it.

use crate::{Result, Vn100Error};

/// Internal sampling rate of the VN-100 in Hz.
pub const BASE_IMU_RATE: i32 = 800;
pub const DEFAULT_IMU_RATE: i32 = 100;
pub const DEFAULT_SYNC_OUT_RATE: i32 = 20;
pub const DEFAULT_PULSE_WIDTH_US: u32 = 1000;
pub const MAX_PULSE_WIDTH_US: u32 = 10_000;

/// Result of fitting a requested rate onto the base rate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateConfig {
    pub requested_rate: i32,
    pub base_rate: i32,
    pub actual_rate: i32,
    /// Internal samples skipped between emitted samples.
    pub skip_count: i32,
}

impl RateConfig {
    pub fn adjusted(&self) -> bool {
        self.actual_rate != self.requested_rate
    }

    /// Decimation factor the binary output register expects.
    pub fn divisor(&self) -> i32 {
        self.base_rate / self.actual_rate
    }
}

/// Sync-out pulse configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutConfig {
    pub rate: RateConfig,
    pub pulse_width_us: u32,
}

impl SyncOutConfig {
    /// Normalize a sync-out request. `requested_rate <= 0` disables sync and yields `None`.
    pub fn new(requested_rate: i32, pulse_width_us: u32, base_rate: i32) -> Result<Option<Self>> {
        if requested_rate <= 0 {
            return Ok(None);
        }
        let rate = normalize(requested_rate, base_rate)?;
        if rate.adjusted() {
            log::info!("Set sync out rate to {}", rate.actual_rate);
        }
        let width = clamp_pulse_width(pulse_width_us);
        if width != pulse_width_us {
            log::info!(
                "Sync out pulse width {} us is over {} us, reset to {} us",
                pulse_width_us,
                MAX_PULSE_WIDTH_US,
                width
            );
        }
        log::info!("Sync out rate: {}", rate.actual_rate);
        Ok(Some(SyncOutConfig {
            rate,
            pulse_width_us: width,
        }))
    }

    /// Pulse width in the nanoseconds the synchronization control register takes.
    pub fn pulse_width_ns(&self) -> u64 {
        self.pulse_width_us as u64 * 1000
    }
}

/// Fit `requested_rate` onto a rate that evenly decimates `base_rate`.
///
/// The decimation factor is `base_rate / requested_rate` rounded down, so the
/// resulting rate rounds up. A factor that still leaves a remainder is stepped
/// down until it divides `base_rate`. Requests above the base rate clamp to it.
pub fn normalize(requested_rate: i32, base_rate: i32) -> Result<RateConfig> {
    if base_rate <= 0 {
        return Err(Vn100Error::InvalidConfig(format!(
            "base rate {} must be positive",
            base_rate
        )));
    }
    if requested_rate <= 0 {
        return Err(Vn100Error::InvalidConfig(format!(
            "rate {} must be positive",
            requested_rate
        )));
    }

    let actual_rate = if base_rate % requested_rate == 0 {
        requested_rate
    } else {
        let mut factor = (base_rate / requested_rate).max(1);
        while base_rate % factor != 0 {
            factor -= 1;
        }
        let actual = base_rate / factor;
        log::warn!(
            "Rate {} cannot evenly decimate base rate {}, reset to {}",
            requested_rate,
            base_rate,
            actual
        );
        actual
    };

    Ok(RateConfig {
        requested_rate,
        base_rate,
        actual_rate,
        skip_count: skip_count(base_rate, actual_rate),
    })
}

/// Like [`normalize`], substituting `default_rate` for a non-positive request.
pub fn normalize_or_default(requested_rate: i32, default_rate: i32, base_rate: i32) -> Result<RateConfig> {
    match normalize(requested_rate, base_rate) {
        Err(Vn100Error::InvalidConfig(_)) if requested_rate <= 0 => {
            log::warn!("Rate {} is <= 0, set to {}", requested_rate, default_rate);
            normalize(default_rate, base_rate)
        }
        other => other,
    }
}

/// `round(base / actual) - 1`, rounding half up.
pub fn skip_count(base_rate: i32, actual_rate: i32) -> i32 {
    (base_rate as f64 / actual_rate as f64 + 0.5).floor() as i32 - 1
}

pub fn clamp_pulse_width(pulse_width_us: u32) -> u32 {
    if pulse_width_us > MAX_PULSE_WIDTH_US {
        DEFAULT_PULSE_WIDTH_US
    } else {
        pulse_width_us
    }
}
