use std::fmt;

/// Errors produced while configuring, decoding or streaming VN-100 telemetry.
#[derive(Debug, thiserror::Error)]
pub enum Vn100Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Incompatible record format: {0}")]
    IncompatibleFormat(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Device reported error: {0}")]
    DeviceProtocol(SensorError),

    #[error("Device link error: {0}")]
    Link(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stream already running")]
    AlreadyStreaming,

    #[error("Stream not running")]
    NotStreaming,

    #[error("No handler registered")]
    HandlerNotRegistered,

    #[error("Record stream stopped")]
    StreamStopped,

    #[error("Timeout waiting for data")]
    Timeout,
}

/// Error codes the VN-100 reports asynchronously through `$VNERR` sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("hard fault, processor will force restart")]
    HardFault,
    #[error("serial buffer overflow")]
    SerialBufferOverflow,
    #[error("invalid checksum")]
    InvalidChecksum,
    #[error("invalid command")]
    InvalidCommand,
    #[error("not enough parameters")]
    NotEnoughParameters,
    #[error("too many parameters")]
    TooManyParameters,
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("invalid register")]
    InvalidRegister,
    #[error("unauthorized access to a register")]
    UnauthorizedAccess,
    #[error("watchdog reset, device should restart within 50 ms")]
    WatchdogReset,
    #[error("output buffer overflow")]
    OutputBufferOverflow,
    #[error("insufficient baud rate for requested async output and rate")]
    InsufficientBaudRate,
    #[error("system error buffer overflow")]
    ErrorBufferOverflow,
    #[error("unknown error code {0}")]
    Unknown(u8),
}

impl SensorError {
    /// Map a raw device error code. Returns `None` for 0 (no error).
    pub fn from_code(code: u8) -> Option<SensorError> {
        let err = match code {
            0 => return None,
            1 => SensorError::HardFault,
            2 => SensorError::SerialBufferOverflow,
            3 => SensorError::InvalidChecksum,
            4 => SensorError::InvalidCommand,
            5 => SensorError::NotEnoughParameters,
            6 => SensorError::TooManyParameters,
            7 => SensorError::InvalidParameter,
            8 => SensorError::InvalidRegister,
            9 => SensorError::UnauthorizedAccess,
            10 => SensorError::WatchdogReset,
            11 => SensorError::OutputBufferOverflow,
            12 => SensorError::InsufficientBaudRate,
            255 => SensorError::ErrorBufferOverflow,
            other => SensorError::Unknown(other),
        };
        Some(err)
    }

    pub fn code(self) -> u8 {
        match self {
            SensorError::HardFault => 1,
            SensorError::SerialBufferOverflow => 2,
            SensorError::InvalidChecksum => 3,
            SensorError::InvalidCommand => 4,
            SensorError::NotEnoughParameters => 5,
            SensorError::TooManyParameters => 6,
            SensorError::InvalidParameter => 7,
            SensorError::InvalidRegister => 8,
            SensorError::UnauthorizedAccess => 9,
            SensorError::WatchdogReset => 10,
            SensorError::OutputBufferOverflow => 11,
            SensorError::InsufficientBaudRate => 12,
            SensorError::ErrorBufferOverflow => 255,
            SensorError::Unknown(code) => code,
        }
    }

    /// Errors after which the device is in an undefined state and streaming must end.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            SensorError::HardFault | SensorError::SerialBufferOverflow | SensorError::Unknown(_)
        )
    }
}

/// Thread-safe last-error storage for the C FFI layer.
pub(crate) struct LastError {
    message: std::sync::Mutex<String>,
}

impl LastError {
    pub const fn new() -> Self {
        Self {
            message: std::sync::Mutex::new(String::new()),
        }
    }

    pub fn set(&self, err: &Vn100Error) {
        if let Ok(mut msg) = self.message.lock() {
            *msg = fmt::format(format_args!("{}\0", err));
        }
    }

    pub fn as_ptr(&self) -> *const std::ffi::c_char {
        match self.message.lock() {
            Ok(msg) if !msg.is_empty() => msg.as_ptr() as *const std::ffi::c_char,
            _ => std::ptr::null(),
        }
    }
}
