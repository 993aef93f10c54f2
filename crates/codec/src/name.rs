//! Label-length control byte classification and name splitting.

use ferrous_wire_domain::WireError;

/// Longest label a length byte can announce.
pub const MAX_LABEL_LEN: usize = 63;

const POINTER_TAG: u8 = 0xC0;

/// Meaning of the byte that starts every label on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelControl {
    /// Zero byte: the name ends here.
    End,
    /// `00xxxxxx`: a label of 1..=63 bytes follows.
    Label(u8),
    /// `11xxxxxx`: the low six bits are the high bits of a 14-bit offset;
    /// the next byte holds the low eight.
    Pointer(u8),
    /// `01xxxxxx` or `10xxxxxx`: extended label types, rejected.
    Reserved(u8),
}

impl LabelControl {
    pub fn from_byte(byte: u8) -> Self {
        match byte & POINTER_TAG {
            0x00 if byte == 0 => LabelControl::End,
            0x00 => LabelControl::Label(byte),
            POINTER_TAG => LabelControl::Pointer(byte & !POINTER_TAG),
            _ => LabelControl::Reserved(byte),
        }
    }

    /// Combines the high bits carried by a pointer byte with the byte after it.
    pub fn pointer_offset(high: u8, low: u8) -> usize {
        ((high as usize) << 8) | low as usize
    }
}

/// Appends `label` to `out` in presentation form.
///
/// Printable ASCII other than `.` and `\` is copied as is; every other byte
/// becomes a `\DDD` decimal escape, so the text maps back to the exact
/// label bytes through [`split_labels`].
pub fn push_label_text(out: &mut String, label: &[u8]) {
    for &byte in label {
        match byte {
            b'.' | b'\\' => push_decimal_escape(out, byte),
            0x21..=0x7E => out.push(byte as char),
            _ => push_decimal_escape(out, byte),
        }
    }
}

fn push_decimal_escape(out: &mut String, byte: u8) {
    out.push('\\');
    out.push(char::from(b'0' + byte / 100));
    out.push(char::from(b'0' + byte / 10 % 10));
    out.push(char::from(b'0' + byte % 10));
}

/// Splits a dotted name into labels ready for the wire.
///
/// `""` and `"."` are the root name and yield no labels; a single trailing dot
/// is accepted. `\DDD` (decimal) and `\X` escapes inside a label stand for
/// one byte, so `a\.b` is a single label. Every label is checked before any
/// is returned, so callers can validate a name without emitting a partial
/// encoding.
pub fn split_labels(name: &str) -> Result<Vec<Vec<u8>>, WireError> {
    if name.is_empty() || name == "." {
        return Ok(Vec::new());
    }

    let bytes = name.as_bytes();
    let mut labels = Vec::new();
    let mut label = Vec::new();
    let mut closed = false;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'.' => {
                finish_label(name, &mut labels, std::mem::take(&mut label))?;
                closed = true;
                pos += 1;
            }
            b'\\' => {
                let (byte, used) =
                    unescape(&bytes[pos + 1..]).ok_or_else(|| WireError::InvalidEscape {
                        name: name.to_string(),
                    })?;
                label.push(byte);
                closed = false;
                pos += 1 + used;
            }
            byte => {
                label.push(byte);
                closed = false;
                pos += 1;
            }
        }
    }

    // A trailing unescaped dot has already closed the last label.
    if !closed {
        finish_label(name, &mut labels, label)?;
    }

    Ok(labels)
}

fn finish_label(name: &str, labels: &mut Vec<Vec<u8>>, label: Vec<u8>) -> Result<(), WireError> {
    if label.is_empty() {
        return Err(WireError::EmptyLabel {
            name: name.to_string(),
        });
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(WireError::LabelTooLong {
            label: String::from_utf8_lossy(&label).into_owned(),
            len: label.len(),
        });
    }
    labels.push(label);
    Ok(())
}

/// Decodes the escape following a backslash: three decimal digits (at most
/// 255) or one literal byte. Returns the byte and how many input bytes the
/// escape used.
fn unescape(rest: &[u8]) -> Option<(u8, usize)> {
    match rest {
        [a, b, c, ..] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            let value = u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0');
            u8::try_from(value).ok().map(|byte| (byte, 3))
        }
        [first, ..] if first.is_ascii_digit() => None,
        [literal, ..] => Some((*literal, 1)),
        [] => None,
    }
}
