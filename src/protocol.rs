use crate::error::SensorError;
use crate::types::{DecodedRecord, OutputGroups};
use crate::{Result, Vn100Error};
use crc::{Crc, CRC_16_XMODEM};

// -- Binary framing --
pub const BINARY_SYNC: u8 = 0xFA;
pub const CRC_SIZE: usize = 2;

/// CRC-16/CCITT as used by the VN-100: poly 0x1021, init 0, no reflection.
pub const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

// -- Binary group selector bits (byte 1 of a binary record) --
pub const GROUP_COMMON: u8 = 1 << 0;
pub const GROUP_TIME: u8 = 1 << 1;
pub const GROUP_IMU: u8 = 1 << 2;
pub const GROUP_GPS: u8 = 1 << 3;
pub const GROUP_ATTITUDE: u8 = 1 << 4;
pub const GROUP_INS: u8 = 1 << 5;
pub const GROUP_GPS2: u8 = 1 << 6;

// -- Common group field bits --
pub const COMMON_TIME_STARTUP: u16 = 1 << 0;
pub const COMMON_QUATERNION: u16 = 1 << 4;
pub const COMMON_MAG_PRES: u16 = 1 << 10;
pub const COMMON_SYNC_IN_CNT: u16 = 1 << 13;

// -- IMU group field bits --
pub const IMU_ACCEL: u16 = 1 << 9;
pub const IMU_ANGULAR_RATE: u16 = 1 << 10;

/// Payload size of each common group field, indexed by bit.
const COMMON_FIELD_SIZES: &[usize] = &[8, 8, 8, 12, 16, 12, 24, 12, 12, 24, 20, 28, 2, 4, 8];
/// Time group: startup, gps, gps tow, gps week, sync-in time, pps, utc, sync-in cnt, sync-out cnt, status.
const TIME_FIELD_SIZES: &[usize] = &[8, 8, 8, 2, 8, 8, 8, 4, 4, 1];
/// IMU group: status, uncomp mag/accel/gyro, temp, pres, delta theta, delta vel, mag, accel, rate, sat.
const IMU_FIELD_SIZES: &[usize] = &[2, 12, 12, 12, 4, 4, 16, 12, 12, 12, 12, 2];
/// Attitude group: vpe status, ypr, quaternion, dcm, mag/accel ned, lin accel body/ned, ypr uncertainty.
const ATTITUDE_FIELD_SIZES: &[usize] = &[2, 12, 16, 36, 12, 12, 12, 12, 12];

// -- ASCII framing --
pub const ASCII_START: u8 = b'$';
pub const ASCII_CHECKSUM_DELIM: u8 = b'*';
/// Every sentence the device sends starts with this.
pub const SENTENCE_PREFIX: &str = "$VN";
pub const QMR_HEADER: &str = "VNQMR";
pub const ERR_HEADER: &str = "VNERR";
/// qx qy qz qw, mag xyz, accel xyz, gyro xyz.
pub const QMR_FIELD_COUNT: usize = 13;
/// Prefix of the sync counter the device appends to ASCII output.
pub const QMR_SYNC_COUNT_PREFIX: char = 'S';
pub const MAX_ASCII_LEN: usize = 256;

/// Parsed binary record header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHeader {
    pub groups: u8,
    /// One field mask per set bit of `groups`, in ascending group order.
    pub fields: Vec<u16>,
}

impl BinaryHeader {
    /// Bytes taken by sync, group byte and field masks.
    pub fn len(&self) -> usize {
        2 + 2 * self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field mask for `group`, or 0 when the group is absent.
    pub fn field_mask(&self, group: u8) -> u16 {
        let mut index = 0;
        for bit in 0..8 {
            let g = 1u8 << bit;
            if self.groups & g == 0 {
                continue;
            }
            if g == group {
                return self.fields[index];
            }
            index += 1;
        }
        0
    }

    /// Payload size implied by the masks, or `None` when a field is not in the size tables.
    pub fn payload_len(&self) -> Option<usize> {
        let mut total = 0;
        let mut index = 0;
        for bit in 0..8 {
            let g = 1u8 << bit;
            if self.groups & g == 0 {
                continue;
            }
            total += group_payload_len(g, self.fields[index])?;
            index += 1;
        }
        Some(total)
    }

    /// Total record length including the trailing CRC.
    pub fn record_len(&self) -> Option<usize> {
        Some(self.len() + self.payload_len()? + CRC_SIZE)
    }
}

fn group_payload_len(group: u8, fields: u16) -> Option<usize> {
    let sizes = match group {
        GROUP_COMMON => COMMON_FIELD_SIZES,
        GROUP_TIME => TIME_FIELD_SIZES,
        GROUP_IMU => IMU_FIELD_SIZES,
        GROUP_ATTITUDE => ATTITUDE_FIELD_SIZES,
        _ => return None,
    };
    let mut total = 0;
    for bit in 0..16 {
        if fields & (1 << bit) != 0 {
            total += sizes.get(bit)?;
        }
    }
    Some(total)
}

/// Parse the header of a binary record: `[0xFA, groups, mask_le...]`.
///
/// Returns `Ok(None)` when more bytes are needed.
pub fn parse_binary_header(data: &[u8]) -> Result<Option<BinaryHeader>> {
    if data.is_empty() {
        return Ok(None);
    }
    if data[0] != BINARY_SYNC {
        return Err(Vn100Error::IncompatibleFormat(format!(
            "expected binary sync 0xFA, got 0x{:02x}",
            data[0]
        )));
    }
    if data.len() < 2 {
        return Ok(None);
    }
    let groups = data[1];
    let count = groups.count_ones() as usize;
    if data.len() < 2 + 2 * count {
        return Ok(None);
    }
    let fields = (0..count)
        .map(|i| u16::from_le_bytes([data[2 + 2 * i], data[3 + 2 * i]]))
        .collect();
    Ok(Some(BinaryHeader { groups, fields }))
}

/// Wire header the device emits for `groups` in binary mode.
pub fn binary_header_for(groups: OutputGroups) -> BinaryHeader {
    let mut common = 0u16;
    if groups.contains(OutputGroups::TIMESTAMP) {
        common |= COMMON_TIME_STARTUP;
    }
    if groups.contains(OutputGroups::QUATERNION) {
        common |= COMMON_QUATERNION;
    }
    if groups.contains(OutputGroups::MAG_PRES) {
        common |= COMMON_MAG_PRES;
    }
    if groups.contains(OutputGroups::SYNC_IN_COUNT) {
        common |= COMMON_SYNC_IN_CNT;
    }

    let mut imu = 0u16;
    if groups.contains(OutputGroups::ACCEL) {
        imu |= IMU_ACCEL;
    }
    if groups.contains(OutputGroups::ANGULAR_RATE) {
        imu |= IMU_ANGULAR_RATE;
    }

    let mut header = BinaryHeader {
        groups: 0,
        fields: Vec::with_capacity(2),
    };
    if common != 0 {
        header.groups |= GROUP_COMMON;
        header.fields.push(common);
    }
    if imu != 0 {
        header.groups |= GROUP_IMU;
        header.fields.push(imu);
    }
    header
}

/// True when a CRC-16 over `data` (trailing big-endian CRC included) comes out zero.
pub fn crc_valid(data: &[u8]) -> bool {
    data.len() > CRC_SIZE && CRC16.checksum(data) == 0
}

/// 8-bit XOR checksum used by ASCII sentences.
pub fn xor_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, b| acc ^ b)
}

/// Encode a record as the binary packet the device would send for `groups`.
pub fn encode_binary(record: &DecodedRecord, groups: OutputGroups) -> Vec<u8> {
    let header = binary_header_for(groups);
    let mut buf = Vec::with_capacity(header.record_len().unwrap_or(64));
    buf.push(BINARY_SYNC);
    buf.push(header.groups);
    for mask in &header.fields {
        buf.extend_from_slice(&mask.to_le_bytes());
    }

    if groups.contains(OutputGroups::TIMESTAMP) {
        buf.extend_from_slice(&record.timestamp_ticks.unwrap_or(0).to_le_bytes());
    }
    if groups.contains(OutputGroups::QUATERNION) {
        push_floats(&mut buf, &record.orientation);
    }
    if groups.contains(OutputGroups::MAG_PRES) {
        push_floats(&mut buf, &record.magnetic_field);
        push_floats(&mut buf, &[record.temperature.unwrap_or(0.0)]);
        push_floats(&mut buf, &[record.pressure.unwrap_or(0.0)]);
    }
    if groups.contains(OutputGroups::SYNC_IN_COUNT) {
        buf.extend_from_slice(&record.sync_counter.unwrap_or(0).to_le_bytes());
    }
    if groups.contains(OutputGroups::ACCEL) {
        push_floats(&mut buf, &record.linear_acceleration);
    }
    if groups.contains(OutputGroups::ANGULAR_RATE) {
        push_floats(&mut buf, &record.angular_rate);
    }

    let crc = CRC16.checksum(&buf[1..]);
    buf.extend_from_slice(&crc.to_be_bytes());
    buf
}

fn push_floats(buf: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Encode a record as a `$VNQMR` sentence with an 8-bit checksum.
pub fn encode_qmr(record: &DecodedRecord) -> String {
    let mut body = String::from(QMR_HEADER);
    let values = record
        .orientation
        .iter()
        .chain(record.magnetic_field.iter())
        .chain(record.linear_acceleration.iter())
        .chain(record.angular_rate.iter());
    for v in values {
        body.push_str(&format!(",{:+.6}", v));
    }
    if let Some(count) = record.sync_counter {
        body.push_str(&format!(",{}{:010}", QMR_SYNC_COUNT_PREFIX, count));
    }
    format!("{}{}*{:02X}\r\n", ASCII_START as char, body, xor_checksum(body.as_bytes()))
}

/// Split an ASCII sentence into its body (between `$` and `*`) after checking its checksum.
///
/// Two hex digits select the 8-bit XOR checksum, four select CRC-16.
pub fn verify_sentence(sentence: &str) -> Result<&str> {
    let trimmed = sentence.trim_end_matches(['\r', '\n']);
    let rest = trimmed.strip_prefix(ASCII_START as char).ok_or_else(|| {
        Vn100Error::IncompatibleFormat("ASCII sentence must start with '$'".into())
    })?;
    let (body, checksum) = rest
        .rsplit_once(ASCII_CHECKSUM_DELIM as char)
        .ok_or_else(|| Vn100Error::CorruptRecord("ASCII sentence missing checksum".into()))?;

    let valid = match checksum.len() {
        2 => u8::from_str_radix(checksum, 16)
            .map(|expected| expected == xor_checksum(body.as_bytes()))
            .unwrap_or(false),
        4 => u16::from_str_radix(checksum, 16)
            .map(|expected| expected == CRC16.checksum(body.as_bytes()))
            .unwrap_or(false),
        _ => false,
    };
    if !valid {
        return Err(Vn100Error::CorruptRecord(format!(
            "ASCII checksum '{}' does not match sentence",
            checksum
        )));
    }
    Ok(body)
}

/// Sentence kind, e.g. `VNQMR`, from a verified body.
pub fn sentence_kind(body: &str) -> &str {
    body.split(',').next().unwrap_or("")
}

/// Parse a `$VNERR,XX*CS` sentence. `Ok(None)` for error code 0.
pub fn parse_error_sentence(sentence: &str) -> Result<Option<SensorError>> {
    let body = verify_sentence(sentence)?;
    let mut tokens = body.split(',');
    if tokens.next() != Some(ERR_HEADER) {
        return Err(Vn100Error::IncompatibleFormat(format!(
            "expected {} sentence",
            ERR_HEADER
        )));
    }
    let code = tokens
        .next()
        .and_then(|t| u8::from_str_radix(t.trim(), 16).ok())
        .ok_or_else(|| Vn100Error::CorruptRecord("VNERR without error code".into()))?;
    Ok(SensorError::from_code(code))
}

/// True when `raw` looks like a `$VNERR` sentence.
pub fn is_error_sentence(raw: &[u8]) -> bool {
    raw.len() > ERR_HEADER.len()
        && raw[0] == ASCII_START
        && &raw[1..1 + ERR_HEADER.len()] == ERR_HEADER.as_bytes()
}

/// Build a `$VNERR` sentence for `code`.
pub fn encode_error(code: u8) -> String {
    let body = format!("{},{:02X}", ERR_HEADER, code);
    format!("{}{}*{:02X}\r\n", ASCII_START as char, body, xor_checksum(body.as_bytes()))
}
