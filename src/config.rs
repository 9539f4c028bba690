use crate::rate::{self, RateConfig, SyncOutConfig, BASE_IMU_RATE};
use crate::types::{AsyncMode, OutputGroups, OutputModeConfig};
use crate::Result;

/// Driver parameters as supplied by the user.
///
/// Values are taken as given; [`DriverConfig::resolve`] turns them into the
/// consistent [`StreamSettings`] the stream runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub port: String,
    pub frame_id: String,
    pub baudrate: u32,
    pub imu_rate: i32,
    pub enable_mag: bool,
    pub enable_pres: bool,
    pub enable_temp: bool,
    /// Sync-out rate in Hz, 0 or below disables sync.
    pub sync_rate: i32,
    pub sync_pulse_width_us: u32,
    pub binary_output: bool,
    /// 0 = none, 1 = port 1, 2 = port 2, 3 = both.
    pub serial_output: i64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".into(),
            frame_id: "imu".into(),
            baudrate: 115_200,
            imu_rate: rate::DEFAULT_IMU_RATE,
            enable_mag: true,
            enable_pres: true,
            enable_temp: true,
            sync_rate: rate::DEFAULT_SYNC_OUT_RATE,
            sync_pulse_width_us: rate::DEFAULT_PULSE_WIDTH_US,
            binary_output: true,
            serial_output: 1,
        }
    }
}

/// Which optional measurements the publisher should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSelection {
    pub magnetic_field: bool,
    pub temperature: bool,
    pub pressure: bool,
}

/// Resolved, immutable stream configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    pub mode: OutputModeConfig,
    pub imu_rate: RateConfig,
    pub sync_out: Option<SyncOutConfig>,
    pub publish: PublishSelection,
}

impl StreamSettings {
    pub fn sync_rate(&self) -> i32 {
        self.sync_out.map_or(0, |s| s.rate.actual_rate)
    }
}

impl DriverConfig {
    /// Read `VN100_*` environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            port: read_env_string("VN100_PORT", &d.port),
            frame_id: read_env_string("VN100_FRAME_ID", &d.frame_id),
            baudrate: read_env_parse("VN100_BAUDRATE", d.baudrate),
            imu_rate: read_env_parse("VN100_IMU_RATE", d.imu_rate),
            enable_mag: read_env_bool("VN100_ENABLE_MAG", d.enable_mag),
            enable_pres: read_env_bool("VN100_ENABLE_PRES", d.enable_pres),
            enable_temp: read_env_bool("VN100_ENABLE_TEMP", d.enable_temp),
            sync_rate: read_env_parse("VN100_SYNC_RATE", d.sync_rate),
            sync_pulse_width_us: read_env_parse("VN100_SYNC_PULSE_WIDTH_US", d.sync_pulse_width_us),
            binary_output: read_env_bool("VN100_BINARY_OUTPUT", d.binary_output),
            serial_output: read_env_parse("VN100_SERIAL_OUTPUT", d.serial_output),
        }
    }

    /// Apply the device constraints and produce the stream settings.
    pub fn resolve(&self) -> Result<StreamSettings> {
        let mut publish = PublishSelection {
            magnetic_field: self.enable_mag,
            temperature: self.enable_temp,
            pressure: self.enable_pres,
        };
        if !self.binary_output && (publish.pressure || publish.temperature) {
            log::error!("ASCII mode cannot support pressure and temperature, disabling both");
            publish.pressure = false;
            publish.temperature = false;
        }

        let serial_output = AsyncMode::from_index(self.serial_output).unwrap_or_else(|| {
            log::error!(
                "Incorrect serial output {} (expected 0-3), using port 1",
                self.serial_output
            );
            AsyncMode::Port1
        });

        let imu_rate = rate::normalize_or_default(self.imu_rate, rate::DEFAULT_IMU_RATE, BASE_IMU_RATE)?;
        let sync_out = SyncOutConfig::new(self.sync_rate, self.sync_pulse_width_us, BASE_IMU_RATE)?;

        let mode = if self.binary_output {
            OutputModeConfig::binary(OutputGroups::DEFAULT_BINARY, serial_output)?
        } else {
            OutputModeConfig::ascii(sync_out.is_some(), serial_output)
        };

        log::info!(
            "IMU rate {} Hz (divisor {}), sync out {}",
            imu_rate.actual_rate,
            imu_rate.divisor(),
            match sync_out {
                Some(s) => format!("{} Hz / {} us", s.rate.actual_rate, s.pulse_width_us),
                None => "disabled".into(),
            }
        );

        Ok(StreamSettings {
            mode,
            imu_rate,
            sync_out,
            publish,
        })
    }
}

fn read_env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| {
            let v = v.trim().to_ascii_lowercase();
            match v.as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            }
        })
        .unwrap_or(default)
}

fn read_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn read_env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let settings = DriverConfig::default().resolve().unwrap();
        assert!(settings.mode.binary);
        assert_eq!(settings.mode.groups, OutputGroups::DEFAULT_BINARY);
        assert_eq!(settings.mode.serial_output, AsyncMode::Port1);
        assert_eq!(settings.imu_rate.actual_rate, 100);
        assert_eq!(settings.imu_rate.divisor(), 8);
        assert_eq!(settings.sync_rate(), 20);
        assert_eq!(settings.sync_out.unwrap().rate.skip_count, 39);
        assert!(settings.publish.temperature && settings.publish.pressure);
    }

    #[test]
    fn test_ascii_disables_temp_and_pressure() {
        let config = DriverConfig {
            binary_output: false,
            ..DriverConfig::default()
        };
        let settings = config.resolve().unwrap();
        assert!(!settings.mode.binary);
        assert!(!settings.publish.temperature);
        assert!(!settings.publish.pressure);
        assert!(settings.publish.magnetic_field);
        assert!(settings.mode.has(OutputGroups::SYNC_IN_COUNT));
        assert!(!settings.mode.has(OutputGroups::TIMESTAMP));
    }

    #[test]
    fn test_ascii_without_sync_has_no_counter() {
        let config = DriverConfig {
            binary_output: false,
            sync_rate: 0,
            ..DriverConfig::default()
        };
        let settings = config.resolve().unwrap();
        assert_eq!(settings.sync_out, None);
        assert!(!settings.mode.has(OutputGroups::SYNC_IN_COUNT));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DriverConfig {
            imu_rate: 0,
            serial_output: 7,
            sync_rate: 150,
            sync_pulse_width_us: 15_000,
            ..DriverConfig::default()
        };
        let settings = config.resolve().unwrap();
        assert_eq!(settings.imu_rate.actual_rate, rate::DEFAULT_IMU_RATE);
        assert_eq!(settings.mode.serial_output, AsyncMode::Port1);
        let sync = settings.sync_out.unwrap();
        assert_eq!(sync.rate.actual_rate, 160);
        assert_eq!(sync.rate.skip_count, 4);
        assert_eq!(sync.pulse_width_us, 1000);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("VN100_IMU_RATE", " 200 ");
        std::env::set_var("VN100_BINARY_OUTPUT", "off");
        std::env::set_var("VN100_SERIAL_OUTPUT", "not-a-number");
        let config = DriverConfig::from_env();
        std::env::remove_var("VN100_IMU_RATE");
        std::env::remove_var("VN100_BINARY_OUTPUT");
        std::env::remove_var("VN100_SERIAL_OUTPUT");

        assert_eq!(config.imu_rate, 200);
        assert!(!config.binary_output);
        assert_eq!(config.serial_output, 1);
        assert_eq!(config.port, "/dev/ttyUSB0");
    }
}
