#![allow(dead_code)]
use ferrous_wire_codec::{Header, Message, Question, ResourceRecord};

pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            message: Message::new(Header {
                id: 0x1234,
                rd: true,
                ..Default::default()
            }),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.message.header.id = id;
        self
    }

    pub fn response(mut self) -> Self {
        self.message.header.qr = true;
        self.message.header.ra = true;
        self
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.message.push_question(Question::new(name, qtype, 1));
        self
    }

    pub fn answer(mut self, name: &str, ttl: u32, rdata: &[u8]) -> Self {
        self.message
            .push_answer(ResourceRecord::new(name, 1, 1, ttl, rdata.to_vec()));
        self
    }

    pub fn authority(mut self, name: &str, rdata: &[u8]) -> Self {
        self.message
            .push_authority(ResourceRecord::new(name, 2, 1, 3600, rdata.to_vec()));
        self
    }

    pub fn additional(mut self, name: &str, rtype: u16, rdata: &[u8]) -> Self {
        self.message
            .push_additional(ResourceRecord::new(name, rtype, 1, 60, rdata.to_vec()));
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// Header bytes with the given counts and no flags set.
pub fn header_bytes(id: u16, qd: u16, an: u16, ns: u16, ar: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.extend_from_slice(&[0, 0]);
    for count in [qd, an, ns, ar] {
        bytes.extend_from_slice(&count.to_be_bytes());
    }
    bytes
}

/// A typical response: one question, answers, an authority and an additional.
pub fn sample_response() -> Message {
    MessageBuilder::new()
        .id(0xABCD)
        .response()
        .question("www.example.com", 1)
        .answer("www.example.com", 300, &[93, 184, 216, 34])
        .answer("www.example.com", 300, &[93, 184, 216, 35])
        .authority("example.com", b"\x01a\x0ciana-servers\x03net\x00")
        .additional("a.iana-servers.net", 1, &[199, 43, 135, 53])
        .build()
}
