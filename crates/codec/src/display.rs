//! Human-readable rendering of messages and raw wire bytes.

use crate::header::Header;
use crate::message::{Message, Question, ResourceRecord};
use ferrous_wire_domain::{RecordClass, RecordType};
use std::fmt::{self, Write};

const DUMP_WIDTH: usize = 16;

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "QR: {}", self.qr)?;
        writeln!(f, "OpCode: {}", self.opcode)?;
        writeln!(f, "AA: {}", self.aa)?;
        writeln!(f, "TC: {}", self.tc)?;
        writeln!(f, "RD: {}", self.rd)?;
        writeln!(f, "RA: {}", self.ra)?;
        writeln!(f, "Z: {}", self.z)?;
        writeln!(f, "RCode: {}", self.rcode)?;
        writeln!(f, "QDCount: {}", self.qdcount)?;
        writeln!(f, "ANCount: {}", self.ancount)?;
        writeln!(f, "NSCount: {}", self.nscount)?;
        writeln!(f, "ARCount: {}", self.arcount)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {}; {}; {} }}",
            display_name(&self.name),
            RecordType::describe(self.qtype),
            RecordClass::describe(self.qclass)
        )
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {}; {}; {}; {}; {}; {:02x?} }}",
            display_name(&self.name),
            RecordType::describe(self.rtype),
            RecordClass::describe(self.rclass),
            self.ttl,
            self.rdlength(),
            self.rdata
        )
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;

        if !self.questions.is_empty() {
            writeln!(f, "Questions:")?;
            for question in &self.questions {
                writeln!(f, "{}", question)?;
            }
        }

        for (title, records) in [
            ("Answers", self.answers()),
            ("Authorities", self.authorities()),
            ("Additionals", self.additionals()),
        ] {
            if records.is_empty() {
                continue;
            }
            writeln!(f, "{}:", title)?;
            for record in records {
                writeln!(f, "{}", record)?;
            }
        }

        Ok(())
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "."
    } else {
        name
    }
}

/// Canonical hex dump: offset, sixteen hex bytes split into two groups of
/// eight, then the printable ASCII rendering.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();

    for (row, chunk) in bytes.chunks(DUMP_WIDTH).enumerate() {
        let _ = write!(out, "{:08x} ", row * DUMP_WIDTH);

        for column in 0..DUMP_WIDTH {
            if column == DUMP_WIDTH / 2 {
                out.push(' ');
            }
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, " {:02x}", byte);
                }
                None => out.push_str("   "),
            }
        }

        out.push_str("  |");
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }

    out
}
