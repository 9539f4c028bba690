use crate::protocol::{self, ASCII_START, BINARY_SYNC, MAX_ASCII_LEN};

/// Splits a raw serial byte stream into whole records.
///
/// Binary records start with 0xFA and their length follows from the group
/// masks. ASCII sentences run from `$` to the line feed. Bytes that fit
/// neither are skipped one at a time until the stream resynchronises.
#[derive(Debug, Default)]
pub struct PacketFinder {
    buf: Vec<u8>,
    skipped: u64,
}

impl PacketFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes discarded while hunting for a record start.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Append `data` and pass every complete record to `on_record`.
    ///
    /// A binary record that fails its CRC is still passed on when another
    /// record starts right after it, so the decoder can reject and report it.
    /// Otherwise the 0xFA was payload and the finder moves on one byte.
    pub fn push(&mut self, data: &[u8], mut on_record: impl FnMut(&[u8])) {
        self.buf.extend_from_slice(data);
        let mut start = 0;

        while start < self.buf.len() {
            match self.buf[start] {
                BINARY_SYNC => match binary_len(&self.buf[start..]) {
                    Frame::Complete(len) => {
                        let end = start + len;
                        if protocol::crc_valid(&self.buf[start + 1..end]) {
                            on_record(&self.buf[start..end]);
                            start = end;
                            continue;
                        }
                        match self.buf.get(end).copied() {
                            None => break,
                            Some(next) if next == BINARY_SYNC || next == ASCII_START => {
                                on_record(&self.buf[start..end]);
                                start = end;
                            }
                            Some(_) => self.skip(&mut start),
                        }
                    }
                    Frame::Incomplete => break,
                    Frame::Invalid => self.skip(&mut start),
                },
                ASCII_START => match ascii_len(&self.buf[start..]) {
                    Frame::Complete(len) if is_sentence(&self.buf[start..start + len]) => {
                        on_record(&self.buf[start..start + len]);
                        start += len;
                    }
                    Frame::Incomplete => break,
                    Frame::Complete(_) | Frame::Invalid => self.skip(&mut start),
                },
                _ => self.skip(&mut start),
            }
        }

        self.buf.drain(..start);
    }

    fn skip(&mut self, start: &mut usize) {
        *start += 1;
        self.skipped += 1;
    }
}

enum Frame {
    Complete(usize),
    Incomplete,
    Invalid,
}

fn binary_len(data: &[u8]) -> Frame {
    let header = match protocol::parse_binary_header(data) {
        Ok(Some(header)) => header,
        Ok(None) => return Frame::Incomplete,
        Err(_) => return Frame::Invalid,
    };
    if header.is_empty() {
        return Frame::Invalid;
    }
    match header.record_len() {
        Some(len) if data.len() >= len => Frame::Complete(len),
        Some(_) => Frame::Incomplete,
        None => Frame::Invalid,
    }
}

fn ascii_len(data: &[u8]) -> Frame {
    let window = &data[..data.len().min(MAX_ASCII_LEN)];
    match window.iter().position(|&b| b == b'\n') {
        Some(end) => Frame::Complete(end + 1),
        None if data.len() >= MAX_ASCII_LEN => Frame::Invalid,
        None => Frame::Incomplete,
    }
}

/// `$VN...` followed by printable ASCII up to the line ending. A `$` inside
/// binary payload fails this long before the next line feed.
fn is_sentence(frame: &[u8]) -> bool {
    let body = frame.strip_suffix(b"\n").unwrap_or(frame);
    let body = body.strip_suffix(b"\r").unwrap_or(body);
    body.starts_with(protocol::SENTENCE_PREFIX.as_bytes())
        && body.iter().all(|&b| b == b' ' || b.is_ascii_graphic())
}
