//! Fixed 12-byte message header.

use crate::reader::WireReader;
use crate::writer::WireWriter;
use ferrous_wire_domain::WireError;

pub const HEADER_LEN: usize = 12;

const QR_BIT: u32 = 7;
const AA_BIT: u32 = 2;
const TC_BIT: u32 = 1;
const RD_BIT: u32 = 0;
const RA_BIT: u32 = 7;

const OPCODE_SHIFT: u8 = 3;
const Z_SHIFT: u8 = 4;
const NIBBLE: u8 = 0x0F;
const Z_MASK: u8 = 0x07;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// `false` for a query, `true` for a response.
    pub qr: bool,
    /// 4 bits.
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    /// 3 reserved bits, carried through unchanged.
    pub z: u8,
    /// 4 bits.
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Number of resource records the header announces across all three
    /// record sections.
    pub fn record_count(&self) -> usize {
        self.ancount as usize + self.nscount as usize + self.arcount as usize
    }

    pub fn decode(reader: &WireReader<'_>) -> Result<Self, WireError> {
        if reader.len() < HEADER_LEN {
            return Err(WireError::TruncatedMessage {
                len: reader.len(),
                needed: HEADER_LEN,
            });
        }

        let (id, _) = reader.read_u16(0)?;
        let flags = reader.read_u8(2)?;
        let codes = reader.read_u8(3)?;
        let (qdcount, pos) = reader.read_u16(4)?;
        let (ancount, pos) = reader.read_u16(pos)?;
        let (nscount, pos) = reader.read_u16(pos)?;
        let (arcount, _) = reader.read_u16(pos)?;

        Ok(Self {
            id,
            qr: reader.read_bit(2, QR_BIT)?,
            opcode: (flags >> OPCODE_SHIFT) & NIBBLE,
            aa: reader.read_bit(2, AA_BIT)?,
            tc: reader.read_bit(2, TC_BIT)?,
            rd: reader.read_bit(2, RD_BIT)?,
            ra: reader.read_bit(3, RA_BIT)?,
            z: (codes >> Z_SHIFT) & Z_MASK,
            rcode: codes & NIBBLE,
            qdcount,
            ancount,
            nscount,
            arcount,
        })
    }

    /// Writes the header exactly as stored, counts included.
    ///
    /// Out-of-range `opcode`, `z` and `rcode` values are masked to their
    /// field widths so they cannot spill into neighbouring bits.
    pub fn encode(&self, writer: &mut WireWriter) {
        writer.append_u16(self.id);
        writer.append_u8(self.flags_byte());
        writer.append_u8(self.codes_byte());
        writer.append_u16(self.qdcount);
        writer.append_u16(self.ancount);
        writer.append_u16(self.nscount);
        writer.append_u16(self.arcount);
    }

    fn flags_byte(&self) -> u8 {
        bit(self.qr, QR_BIT)
            | ((self.opcode & NIBBLE) << OPCODE_SHIFT)
            | bit(self.aa, AA_BIT)
            | bit(self.tc, TC_BIT)
            | bit(self.rd, RD_BIT)
    }

    fn codes_byte(&self) -> u8 {
        bit(self.ra, RA_BIT) | ((self.z & Z_MASK) << Z_SHIFT) | (self.rcode & NIBBLE)
    }
}

fn bit(set: bool, position: u32) -> u8 {
    if set {
        1 << position
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(header: Header) -> Header {
        let mut writer = WireWriter::new();
        header.encode(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        Header::decode(&WireReader::new(&bytes)).unwrap()
    }

    #[test]
    fn test_flag_bit_positions() {
        let header = Header {
            qr: true,
            opcode: 0b1010,
            rd: true,
            ..Default::default()
        };
        let mut writer = WireWriter::new();
        header.encode(&mut writer);
        let bytes = writer.into_bytes();

        assert_eq!(bytes[2], 0b1101_0001);
        assert_eq!(bytes[3], 0);
    }

    #[test]
    fn test_codes_bit_positions() {
        let header = Header {
            ra: true,
            z: 0b101,
            rcode: 0b0011,
            ..Default::default()
        };
        let mut writer = WireWriter::new();
        header.encode(&mut writer);

        assert_eq!(writer.as_bytes()[3], 0b1101_0011);
    }

    #[test]
    fn test_reserved_bits_survive() {
        let header = Header {
            id: 0xBEEF,
            qr: true,
            opcode: 2,
            aa: false,
            tc: true,
            rd: false,
            ra: true,
            z: 5,
            rcode: 3,
            ..Default::default()
        };

        assert_eq!(round_trip(header), header);
    }

    #[test]
    fn test_oversized_fields_are_masked() {
        let header = Header {
            opcode: 0xFF,
            z: 0xFF,
            rcode: 0xFF,
            ..Default::default()
        };
        let decoded = round_trip(header);

        assert_eq!(decoded.opcode, 0x0F);
        assert_eq!(decoded.z, 0x07);
        assert_eq!(decoded.rcode, 0x0F);
        assert!(!decoded.qr);
        assert!(!decoded.ra);
    }

    #[test]
    fn test_short_buffer() {
        let result = Header::decode(&WireReader::new(&[0u8; 11]));
        assert!(matches!(
            result,
            Err(WireError::TruncatedMessage { len: 11, needed: 12 })
        ));
    }
}
