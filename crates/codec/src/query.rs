//! Query construction.

use crate::header::Header;
use crate::message::{Message, Question};
use ferrous_wire_domain::CLASS_IN;

/// Source of query IDs.
///
/// Callers own the generator and pass IDs into [`Message::query`]; the codec
/// keeps no ID state of its own. IDs increase by one per query, wrapping at
/// `u16::MAX`, starting from a random or fixed seed.
#[derive(Debug, Clone)]
pub struct QueryIds {
    next: u16,
}

impl QueryIds {
    pub fn random() -> Self {
        Self::seeded(fastrand::u16(..))
    }

    pub fn seeded(seed: u16) -> Self {
        Self { next: seed }
    }

    pub fn next_id(&mut self) -> u16 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl Default for QueryIds {
    fn default() -> Self {
        Self::random()
    }
}

impl Iterator for QueryIds {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        Some(self.next_id())
    }
}

impl Message {
    /// Standard recursive query for `name` in the Internet class.
    pub fn query(id: u16, name: impl Into<String>, qtype: u16) -> Self {
        let mut message = Message::new(Header {
            id,
            rd: true,
            ..Default::default()
        });
        message.push_question(Question::new(name, qtype, CLASS_IN));
        message
    }
}
