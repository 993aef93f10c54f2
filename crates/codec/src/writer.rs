//! Append-only construction of wire-format messages.

use crate::name::split_labels;
use ferrous_wire_domain::WireError;

/// Growable output buffer for an encoded message.
///
/// Names are always written uncompressed.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn append_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn append_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn append_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `name` as length-prefixed labels followed by a zero byte.
    /// Escapes in `name` are resolved by [`split_labels`].
    ///
    /// The whole name is validated first; on error nothing is appended.
    pub fn append_name(&mut self, name: &str) -> Result<(), WireError> {
        let labels = split_labels(name)?;

        for label in labels {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(&label);
        }
        self.buf.push(0);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_integers() {
        let mut writer = WireWriter::new();
        writer.append_u8(0xAB);
        writer.append_u16(0x1234);
        writer.append_u32(0xDEAD_BEEF);

        assert_eq!(
            writer.as_bytes(),
            &[0xAB, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[test]
    fn test_append_name() {
        let mut writer = WireWriter::new();
        writer.append_name("a.bc").unwrap();

        assert_eq!(writer.into_bytes(), vec![1, b'a', 2, b'b', b'c', 0]);
    }

    #[test]
    fn test_append_root_name() {
        let mut writer = WireWriter::new();
        writer.append_name("").unwrap();
        writer.append_name(".").unwrap();

        assert_eq!(writer.into_bytes(), vec![0, 0]);
    }

    #[test]
    fn test_long_label_leaves_buffer_untouched() {
        let mut writer = WireWriter::new();
        writer.append_u16(7);

        let name = format!("ok.{}", "y".repeat(64));
        let result = writer.append_name(&name);

        assert!(matches!(result, Err(WireError::LabelTooLong { len: 64, .. })));
        assert_eq!(writer.as_bytes(), &[0x00, 0x07]);
    }
}
