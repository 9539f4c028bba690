use crate::{Result, Vn100Error};
use std::time::SystemTime;

bitflags::bitflags! {
    /// Output groups that may be enabled in the device's async output.
    ///
    /// Each flag selects a bundle of fields in every record. The binary wire
    /// masks these map onto live in [`crate::protocol`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OutputGroups: u32 {
        /// Nanoseconds since device startup (u64).
        const TIMESTAMP     = 1 << 0;
        /// Attitude quaternion (x, y, z, w).
        const QUATERNION    = 1 << 1;
        /// Magnetic field, temperature and pressure.
        const MAG_PRES      = 1 << 2;
        /// External sync-in pulse counter (u32).
        const SYNC_IN_COUNT = 1 << 3;
        /// Compensated acceleration.
        const ACCEL         = 1 << 4;
        /// Compensated angular rate.
        const ANGULAR_RATE  = 1 << 5;
    }
}

impl OutputGroups {
    /// Groups every configuration must carry.
    pub const REQUIRED: OutputGroups = OutputGroups::QUATERNION
        .union(OutputGroups::MAG_PRES)
        .union(OutputGroups::ACCEL)
        .union(OutputGroups::ANGULAR_RATE);

    /// The group set the driver enables in binary mode.
    pub const DEFAULT_BINARY: OutputGroups = OutputGroups::REQUIRED
        .union(OutputGroups::TIMESTAMP)
        .union(OutputGroups::SYNC_IN_COUNT);
}

/// Serial port(s) the device sends async output on.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncMode {
    None = 0,
    Port1 = 1,
    Port2 = 2,
    Both = 3,
}

impl AsyncMode {
    pub fn from_index(index: i64) -> Option<AsyncMode> {
        match index {
            0 => Some(AsyncMode::None),
            1 => Some(AsyncMode::Port1),
            2 => Some(AsyncMode::Port2),
            3 => Some(AsyncMode::Both),
            _ => None,
        }
    }
}

/// Immutable description of what the device emits and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModeConfig {
    pub binary: bool,
    pub groups: OutputGroups,
    pub serial_output: AsyncMode,
}

impl OutputModeConfig {
    /// Binary output with the given groups.
    pub fn binary(groups: OutputGroups, serial_output: AsyncMode) -> Result<Self> {
        let mode = OutputModeConfig {
            binary: true,
            groups,
            serial_output,
        };
        mode.validate()?;
        Ok(mode)
    }

    /// ASCII `VNQMR` output. `sync_counter` is set when the device appends
    /// the sync counter to each sentence.
    pub fn ascii(sync_counter: bool, serial_output: AsyncMode) -> Self {
        let mut groups = OutputGroups::REQUIRED;
        groups.set(OutputGroups::SYNC_IN_COUNT, sync_counter);
        OutputModeConfig {
            binary: false,
            groups,
            serial_output,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.groups.contains(OutputGroups::REQUIRED) {
            return Err(Vn100Error::InvalidConfig(format!(
                "output groups {:?} missing required {:?}",
                self.groups,
                OutputGroups::REQUIRED - self.groups
            )));
        }
        if !self.binary && self.groups.contains(OutputGroups::TIMESTAMP) {
            return Err(Vn100Error::InvalidConfig(
                "ASCII output cannot carry the startup timestamp".into(),
            ));
        }
        Ok(())
    }

    pub fn has(&self, group: OutputGroups) -> bool {
        self.groups.contains(group)
    }
}

/// One measurement as decoded from the device.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// Device clock in nanoseconds since startup. Binary mode with `TIMESTAMP` only.
    pub timestamp_ticks: Option<u64>,
    /// Attitude quaternion [x, y, z, w].
    pub orientation: [f32; 4],
    /// Magnetic field [x, y, z] in gauss.
    pub magnetic_field: [f32; 3],
    /// Temperature in °C. Binary mode only.
    pub temperature: Option<f32>,
    /// Pressure in kPa. Binary mode only.
    pub pressure: Option<f32>,
    pub sync_counter: Option<u32>,
    /// Acceleration [x, y, z] in m/s².
    pub linear_acceleration: [f32; 3],
    /// Angular rate [x, y, z] in rad/s.
    pub angular_rate: [f32; 3],
    /// Host event time, assigned by the stream controller before publishing.
    pub event_time: Option<SystemTime>,
}
