//! Owned message model.
//!
//! Decoded names and rdata are copied out of the receive buffer, so a
//! [`Message`] never borrows from the bytes it was decoded from.

use crate::header::Header;
use crate::reader::WireReader;
use crate::writer::WireWriter;
use ferrous_wire_domain::WireError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    pub(crate) fn decode(reader: &WireReader<'_>, pos: usize) -> Result<(Self, usize), WireError> {
        let (name, pos) = reader.read_name(pos)?;
        let (qtype, pos) = reader.read_u16(pos)?;
        let (qclass, pos) = reader.read_u16(pos)?;

        Ok((Self { name, qtype, qclass }, pos))
    }

    pub(crate) fn encode(&self, writer: &mut WireWriter) -> Result<(), WireError> {
        writer.append_name(&self.name)?;
        writer.append_u16(self.qtype);
        writer.append_u16(self.qclass);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    /// Seconds.
    pub ttl: u32,
    /// Uninterpreted payload; its length is the on-wire `rdlength`.
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, rtype: u16, rclass: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    pub fn rdlength(&self) -> usize {
        self.rdata.len()
    }

    pub(crate) fn decode(reader: &WireReader<'_>, pos: usize) -> Result<(Self, usize), WireError> {
        let (name, pos) = reader.read_name(pos)?;
        let (rtype, pos) = reader.read_u16(pos)?;
        let (rclass, pos) = reader.read_u16(pos)?;
        let (ttl, pos) = reader.read_u32(pos)?;
        let (rdlength, pos) = reader.read_u16(pos)?;
        let end = pos + rdlength as usize;
        let rdata = reader.read_slice(pos, end)?;

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            end,
        ))
    }

    pub(crate) fn encode(&self, writer: &mut WireWriter) -> Result<(), WireError> {
        let rdlength = u16::try_from(self.rdata.len()).map_err(|_| WireError::RdataTooLong {
            len: self.rdata.len(),
        })?;

        writer.append_name(&self.name)?;
        writer.append_u16(self.rtype);
        writer.append_u16(self.rclass);
        writer.append_u32(self.ttl);
        writer.append_u16(rdlength);
        writer.append_bytes(&self.rdata);
        Ok(())
    }
}

/// A complete message: header, questions, and the answer, authority and
/// additional records concatenated in that order.
///
/// The header's `ancount`, `nscount` and `arcount` mark where one record
/// section ends and the next begins. The `push_*` methods keep those
/// boundaries and the counts in step with the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub resources: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn push_question(&mut self, question: Question) -> &mut Self {
        self.questions.push(question);
        self.header.qdcount = self.header.qdcount.saturating_add(1);
        self
    }

    pub fn push_answer(&mut self, record: ResourceRecord) -> &mut Self {
        let at = self.section_bounds().0.end;
        self.resources.insert(at, record);
        self.header.ancount = self.header.ancount.saturating_add(1);
        self
    }

    pub fn push_authority(&mut self, record: ResourceRecord) -> &mut Self {
        let at = self.section_bounds().1.end;
        self.resources.insert(at, record);
        self.header.nscount = self.header.nscount.saturating_add(1);
        self
    }

    pub fn push_additional(&mut self, record: ResourceRecord) -> &mut Self {
        let at = self.section_bounds().2.end;
        self.resources.insert(at, record);
        self.header.arcount = self.header.arcount.saturating_add(1);
        self
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.resources[self.section_bounds().0]
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.resources[self.section_bounds().1]
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.resources[self.section_bounds().2]
    }

    /// Index ranges of the three record sections, clamped to the record list
    /// so a hand-built message with inconsistent counts never panics.
    fn section_bounds(
        &self,
    ) -> (
        std::ops::Range<usize>,
        std::ops::Range<usize>,
        std::ops::Range<usize>,
    ) {
        let total = self.resources.len();
        let an_end = (self.header.ancount as usize).min(total);
        let ns_end = (an_end + self.header.nscount as usize).min(total);
        let ar_end = (ns_end + self.header.arcount as usize).min(total);
        (0..an_end, an_end..ns_end, ns_end..ar_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ResourceRecord {
        ResourceRecord::new(name, 1, 1, 60, vec![127, 0, 0, 1])
    }

    #[test]
    fn test_push_keeps_section_order() {
        let mut message = Message::default();
        message
            .push_additional(record("ar1"))
            .push_answer(record("an1"))
            .push_authority(record("ns1"))
            .push_answer(record("an2"));

        let names: Vec<&str> = message.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["an1", "an2", "ns1", "ar1"]);
        assert_eq!(message.header.ancount, 2);
        assert_eq!(message.header.nscount, 1);
        assert_eq!(message.header.arcount, 1);
        assert_eq!(message.answers().len(), 2);
        assert_eq!(message.authorities()[0].name, "ns1");
        assert_eq!(message.additionals()[0].name, "ar1");
    }

    #[test]
    fn test_sections_clamped_when_counts_overstate() {
        let mut message = Message::default();
        message.resources.push(record("only"));
        message.header.ancount = 3;
        message.header.arcount = 2;

        assert_eq!(message.answers().len(), 1);
        assert!(message.authorities().is_empty());
        assert!(message.additionals().is_empty());
    }

    #[test]
    fn test_push_question_counts() {
        let mut message = Message::default();
        message.push_question(Question::new("example.com", 1, 1));

        assert_eq!(message.header.qdcount, 1);
        assert_eq!(message.questions[0].name, "example.com");
    }
}
