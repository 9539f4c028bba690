//! Record validation and field extraction.
//!
//! Binary payloads carry no per-field framing, so fields are read in the
//! fixed order the device writes them:
//! timestamp, quaternion, magnetic field, temperature, pressure, sync
//! counter, acceleration, angular rate. Only the groups enabled in the
//! active [`OutputModeConfig`] are present.

use crate::protocol::{self, BinaryHeader, CRC_SIZE, QMR_FIELD_COUNT, QMR_HEADER};
use crate::types::{DecodedRecord, OutputGroups, OutputModeConfig};
use crate::{Result, Vn100Error};

/// Decodes records for one output mode.
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    mode: OutputModeConfig,
    expected: BinaryHeader,
}

impl PacketDecoder {
    pub fn new(mode: OutputModeConfig) -> Result<PacketDecoder> {
        mode.validate()?;
        Ok(PacketDecoder {
            mode,
            expected: protocol::binary_header_for(mode.groups),
        })
    }

    pub fn mode(&self) -> &OutputModeConfig {
        &self.mode
    }

    /// Validate `raw` against the configured mode and extract its fields.
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedRecord> {
        if self.mode.binary {
            self.decode_binary(raw)
        } else {
            self.decode_ascii(raw)
        }
    }

    fn decode_binary(&self, raw: &[u8]) -> Result<DecodedRecord> {
        let header = protocol::parse_binary_header(raw)?
            .ok_or_else(|| Vn100Error::CorruptRecord("truncated binary header".into()))?;

        if header != self.expected {
            return Err(Vn100Error::IncompatibleFormat(format!(
                "groups 0x{:02x} fields {:04x?}, expected 0x{:02x} fields {:04x?}",
                header.groups, header.fields, self.expected.groups, self.expected.fields
            )));
        }

        if raw.len() < header.len() + CRC_SIZE {
            return Err(Vn100Error::CorruptRecord(format!(
                "{} bytes is shorter than header and CRC",
                raw.len()
            )));
        }
        if !protocol::crc_valid(&raw[1..]) {
            return Err(Vn100Error::CorruptRecord("CRC mismatch".into()));
        }

        let payload = &raw[header.len()..raw.len() - CRC_SIZE];
        let groups = self.mode.groups;
        let mut reader = FieldReader::new(payload);

        let timestamp_ticks = if groups.contains(OutputGroups::TIMESTAMP) {
            Some(reader.read_u64()?)
        } else {
            None
        };
        let orientation = reader.read_vec4()?;
        let magnetic_field = reader.read_vec3()?;
        let temperature = reader.read_f32()?;
        let pressure = reader.read_f32()?;
        let sync_counter = if groups.contains(OutputGroups::SYNC_IN_COUNT) {
            Some(reader.read_u32()?)
        } else {
            None
        };
        let linear_acceleration = reader.read_vec3()?;
        let angular_rate = reader.read_vec3()?;
        reader.finish()?;

        Ok(DecodedRecord {
            timestamp_ticks,
            orientation,
            magnetic_field,
            temperature: Some(temperature),
            pressure: Some(pressure),
            sync_counter,
            linear_acceleration,
            angular_rate,
            event_time: None,
        })
    }

    fn decode_ascii(&self, raw: &[u8]) -> Result<DecodedRecord> {
        if raw.first() != Some(&protocol::ASCII_START) {
            return Err(Vn100Error::IncompatibleFormat(
                "expected an ASCII sentence, got binary data".into(),
            ));
        }
        let sentence = std::str::from_utf8(raw)
            .map_err(|_| Vn100Error::CorruptRecord("sentence is not valid ASCII".into()))?;

        let kind = sentence[1..].split([',', '*']).next().unwrap_or("");
        if kind != QMR_HEADER {
            return Err(Vn100Error::IncompatibleFormat(format!(
                "expected {} sentence, got '{}'",
                QMR_HEADER, kind
            )));
        }

        let body = protocol::verify_sentence(sentence)?;
        let tokens: Vec<&str> = body.split(',').skip(1).collect();

        let with_sync = self.mode.has(OutputGroups::SYNC_IN_COUNT);
        let expected = QMR_FIELD_COUNT + usize::from(with_sync);
        if tokens.len() != expected {
            return Err(Vn100Error::CorruptRecord(format!(
                "{} fields in {} sentence, expected {}",
                tokens.len(),
                QMR_HEADER,
                expected
            )));
        }

        let mut values = [0f32; QMR_FIELD_COUNT];
        for (value, token) in values.iter_mut().zip(&tokens) {
            *value = parse_ascii_float(token)?;
        }

        let sync_counter = if with_sync {
            Some(parse_ascii_count(tokens[QMR_FIELD_COUNT])?)
        } else {
            None
        };

        Ok(DecodedRecord {
            timestamp_ticks: None,
            orientation: [values[0], values[1], values[2], values[3]],
            magnetic_field: [values[4], values[5], values[6]],
            temperature: None,
            pressure: None,
            sync_counter,
            linear_acceleration: [values[7], values[8], values[9]],
            angular_rate: [values[10], values[11], values[12]],
            event_time: None,
        })
    }
}

/// Decode a single record against `mode`.
pub fn decode(raw: &[u8], mode: &OutputModeConfig) -> Result<DecodedRecord> {
    PacketDecoder::new(*mode)?.decode(raw)
}

fn parse_ascii_float(token: &str) -> Result<f32> {
    token
        .trim()
        .parse::<f32>()
        .map_err(|_| Vn100Error::CorruptRecord(format!("bad numeric field '{}'", token)))
}

fn parse_ascii_count(token: &str) -> Result<u32> {
    token
        .trim()
        .strip_prefix(protocol::QMR_SYNC_COUNT_PREFIX)
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| Vn100Error::CorruptRecord(format!("bad sync counter field '{}'", token)))
}

/// Little-endian cursor over a binary payload.
struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| {
            Vn100Error::CorruptRecord(format!(
                "payload ends at {} bytes, field needs {}",
                self.data.len(),
                end
            ))
        })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    fn read_vec3(&mut self) -> Result<[f32; 3]> {
        Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
    }

    fn read_vec4(&mut self) -> Result<[f32; 4]> {
        Ok([
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ])
    }

    /// Every payload byte must have been consumed.
    fn finish(&self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(Vn100Error::CorruptRecord(format!(
                "{} trailing payload bytes",
                self.data.len() - self.pos
            )));
        }
        Ok(())
    }
}
