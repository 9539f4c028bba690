//! C FFI layer for vn100.
//!
//! Exposes rate normalization and record decoding to C/C++ consumers
//! through an opaque decoder handle. The generated C header is written to
//! `include/vn100.h` by cbindgen.

use crate::decoder::PacketDecoder;
use crate::error::LastError;
use crate::rate::{self, RateConfig};
use crate::types::{AsyncMode, OutputGroups, OutputModeConfig};
use std::ffi::c_int;

/// Last error message for C consumers.
static LAST_ERROR: LastError = LastError::new();

/// Opaque decoder handle for C consumers.
pub struct VnDecoder(PacketDecoder);

/// Decoded record in C-compatible layout.
#[repr(C)]
pub struct VnRecord {
    /// Device clock in nanoseconds; valid when `has_timestamp` is set.
    pub timestamp_ticks: u64,
    pub has_timestamp: bool,
    /// Quaternion [x, y, z, w].
    pub orientation: [f32; 4],
    pub magnetic_field: [f32; 3],
    /// Valid when `has_mag_pres_scalars` is set (binary mode).
    pub temperature: f32,
    pub pressure: f32,
    pub has_mag_pres_scalars: bool,
    /// Valid when `has_sync_counter` is set.
    pub sync_counter: u32,
    pub has_sync_counter: bool,
    pub linear_acceleration: [f32; 3],
    pub angular_rate: [f32; 3],
}

/// Fit `requested` onto a rate dividing `base_rate`.
/// Returns 0 on success, -1 on invalid input (check vn_last_error()).
///
/// # Safety
/// `out` must point to a writable `RateConfig`, or be null.
#[no_mangle]
pub unsafe extern "C" fn vn_normalize_rate(requested: c_int, base_rate: c_int, out: *mut RateConfig) -> c_int {
    match rate::normalize(requested, base_rate) {
        Ok(cfg) => {
            if !out.is_null() {
                out.write(cfg);
            }
            0
        }
        Err(e) => {
            LAST_ERROR.set(&e);
            -1
        }
    }
}

/// Clamp a sync pulse width in microseconds.
#[no_mangle]
pub extern "C" fn vn_clamp_pulse_width(pulse_width_us: u32) -> u32 {
    rate::clamp_pulse_width(pulse_width_us)
}

/// Create a decoder. `groups` is an `OutputGroups` bit set; ASCII mode
/// ignores it apart from the sync counter bit.
/// Returns NULL on an invalid configuration.
#[no_mangle]
pub extern "C" fn vn_decoder_new(binary: bool, groups: u32) -> *mut VnDecoder {
    let groups = OutputGroups::from_bits_truncate(groups);
    let mode = if binary {
        OutputModeConfig::binary(groups, AsyncMode::Port1)
    } else {
        Ok(OutputModeConfig::ascii(
            groups.contains(OutputGroups::SYNC_IN_COUNT),
            AsyncMode::Port1,
        ))
    };

    match mode.and_then(PacketDecoder::new) {
        Ok(decoder) => Box::into_raw(Box::new(VnDecoder(decoder))),
        Err(e) => {
            LAST_ERROR.set(&e);
            std::ptr::null_mut()
        }
    }
}

/// Decode one record. Returns 0 on success, -1 on a rejected record.
///
/// # Safety
/// `decoder` must come from `vn_decoder_new`, `data` must point to `len`
/// readable bytes and `out` to a writable `VnRecord`. Any may be null.
#[no_mangle]
pub unsafe extern "C" fn vn_decode(
    decoder: *const VnDecoder,
    data: *const u8,
    len: usize,
    out: *mut VnRecord,
) -> c_int {
    if decoder.is_null() || data.is_null() || out.is_null() {
        return -1;
    }
    let decoder = &*decoder;
    let raw = std::slice::from_raw_parts(data, len);

    match decoder.0.decode(raw) {
        Ok(record) => {
            out.write(VnRecord {
                timestamp_ticks: record.timestamp_ticks.unwrap_or(0),
                has_timestamp: record.timestamp_ticks.is_some(),
                orientation: record.orientation,
                magnetic_field: record.magnetic_field,
                temperature: record.temperature.unwrap_or(0.0),
                pressure: record.pressure.unwrap_or(0.0),
                has_mag_pres_scalars: record.temperature.is_some(),
                sync_counter: record.sync_counter.unwrap_or(0),
                has_sync_counter: record.sync_counter.is_some(),
                linear_acceleration: record.linear_acceleration,
                angular_rate: record.angular_rate,
            });
            0
        }
        Err(e) => {
            LAST_ERROR.set(&e);
            -1
        }
    }
}

/// Free a decoder.
///
/// # Safety
/// `decoder` must be a pointer returned by `vn_decoder_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vn_decoder_free(decoder: *mut VnDecoder) {
    if !decoder.is_null() {
        drop(Box::from_raw(decoder));
    }
}

/// Get the last error message. Returns NULL if no error.
/// The returned pointer is valid until the next vn100 API call.
#[no_mangle]
pub extern "C" fn vn_last_error() -> *const std::ffi::c_char {
    LAST_ERROR.as_ptr()
}
