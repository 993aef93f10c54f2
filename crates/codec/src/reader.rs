//! Positional, bounds-checked reads over an immutable wire buffer.

use crate::name::{push_label_text, LabelControl};
use ferrous_wire_domain::WireError;
use tracing::debug;

/// Cursor-free reader over a received message.
///
/// Every read takes an explicit offset and returns the offset just past the
/// value, so decoders thread positions through without shared mutable state.
/// Variable-length values are copied out of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn out_of_bounds(&self, offset: usize) -> WireError {
        WireError::OutOfBounds {
            offset,
            len: self.buf.len(),
        }
    }

    pub fn read_u8(&self, pos: usize) -> Result<u8, WireError> {
        self.buf
            .get(pos)
            .copied()
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    pub fn read_u16(&self, pos: usize) -> Result<(u16, usize), WireError> {
        let bytes = self.fixed::<2>(pos)?;
        Ok((u16::from_be_bytes(bytes), pos + 2))
    }

    pub fn read_u32(&self, pos: usize) -> Result<(u32, usize), WireError> {
        let bytes = self.fixed::<4>(pos)?;
        Ok((u32::from_be_bytes(bytes), pos + 4))
    }

    /// Tests bit `bit` (7 = most significant) of the byte at `byte_offset`.
    ///
    /// A bit index of 8 or more lies outside the byte and is reported as
    /// out of bounds.
    pub fn read_bit(&self, byte_offset: usize, bit: u32) -> Result<bool, WireError> {
        let byte = self.read_u8(byte_offset)?;
        let mask = 1u8
            .checked_shl(bit)
            .ok_or_else(|| self.out_of_bounds(byte_offset))?;
        Ok(byte & mask != 0)
    }

    /// Copies bytes `[start, end)` out of the buffer.
    pub fn read_slice(&self, start: usize, end: usize) -> Result<Vec<u8>, WireError> {
        self.borrow_slice(start, end).map(<[u8]>::to_vec)
    }

    fn borrow_slice(&self, start: usize, end: usize) -> Result<&'a [u8], WireError> {
        if start > end {
            return Err(self.out_of_bounds(start));
        }
        self.buf
            .get(start..end)
            .ok_or_else(|| self.out_of_bounds(end.saturating_sub(1).max(start)))
    }

    fn fixed<const N: usize>(&self, pos: usize) -> Result<[u8; N], WireError> {
        let end = pos.checked_add(N).ok_or_else(|| self.out_of_bounds(pos))?;
        let slice = self.borrow_slice(pos, end)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Decodes a possibly compressed name starting at `pos`.
    ///
    /// Returns the dotted name in presentation form (see
    /// [`push_label_text`]) and the offset just past the name as it
    /// appears at `pos`: after the terminating zero byte, or after the first
    /// compression pointer. Pointers must target an offset strictly below
    /// the start of the name segment containing them, so every hop moves
    /// backwards and the walk terminates; the hop count is also capped at
    /// the buffer length.
    pub fn read_name(&self, pos: usize) -> Result<(String, usize), WireError> {
        let mut name = String::new();
        let mut cursor = pos;
        let mut segment_start = pos;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0usize;

        loop {
            match LabelControl::from_byte(self.read_u8(cursor)?) {
                LabelControl::End => {
                    cursor += 1;
                    break;
                }
                LabelControl::Label(len) => {
                    let start = cursor + 1;
                    let label = self.borrow_slice(start, start + len as usize)?;
                    if !name.is_empty() {
                        name.push('.');
                    }
                    push_label_text(&mut name, label);
                    cursor = start + len as usize;
                }
                LabelControl::Pointer(high) => {
                    let low = self.read_u8(cursor + 1)?;
                    let target = LabelControl::pointer_offset(high, low);

                    if target >= segment_start {
                        debug!(
                            offset = cursor,
                            pointer = target,
                            segment_start,
                            "Rejecting non-backward compression pointer"
                        );
                        return Err(WireError::MalformedName {
                            offset: cursor,
                            reason: "compression pointer does not point backwards",
                        });
                    }

                    hops += 1;
                    if hops > self.buf.len() {
                        return Err(WireError::MalformedName {
                            offset: cursor,
                            reason: "too many compression pointer hops",
                        });
                    }

                    resume_at.get_or_insert(cursor + 2);
                    cursor = target;
                    segment_start = target;
                }
                LabelControl::Reserved(byte) => {
                    debug!(offset = cursor, byte, "Rejecting reserved label type");
                    return Err(WireError::MalformedName {
                        offset: cursor,
                        reason: "reserved label type",
                    });
                }
            }
        }

        Ok((name, resume_at.unwrap_or(cursor)))
    }
}
