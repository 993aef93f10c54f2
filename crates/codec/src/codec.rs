//! Whole-message decode and encode.

use crate::header::{Header, HEADER_LEN};
use crate::message::{Message, Question, ResourceRecord};
use crate::reader::WireReader;
use crate::writer::WireWriter;
use ferrous_wire_domain::{Section, WireError};
use tracing::trace;

/// Smallest possible question: a one-byte root name plus type and class.
const MIN_QUESTION_LEN: usize = 1 + 4;

/// Smallest possible record: root name, type, class, ttl, rdlength.
const MIN_RECORD_LEN: usize = 1 + 10;

const ENCODE_CAPACITY: usize = 512;

/// How [`encode_with`] treats the header counts of the message it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountPolicy {
    /// Derive the counts from the entry lists. `qdcount` is the number of
    /// questions; the declared authority and additional counts are kept when
    /// they fit inside the record list and the answer count takes the rest,
    /// otherwise every record is counted as an answer.
    #[default]
    Derive,
    /// Fail with [`WireError::CountMismatch`] when the declared counts
    /// disagree with the entry lists.
    Strict,
}

/// Decodes one message from `buf`.
///
/// `buf` should hold exactly the bytes received; trailing bytes after the
/// last record are ignored. The returned message owns all of its data.
pub fn decode(buf: &[u8]) -> Result<Message, WireError> {
    let reader = WireReader::new(buf);
    let header = Header::decode(&reader)?;

    let question_count = header.qdcount as usize;
    let record_count = header.record_count();

    let needed = HEADER_LEN + question_count * MIN_QUESTION_LEN + record_count * MIN_RECORD_LEN;
    if needed > buf.len() {
        return Err(WireError::TruncatedMessage {
            len: buf.len(),
            needed,
        });
    }

    trace!(
        id = header.id,
        questions = question_count,
        records = record_count,
        len = buf.len(),
        "Decoding message"
    );

    let mut pos = HEADER_LEN;

    let mut questions = Vec::with_capacity(question_count);
    for _ in 0..question_count {
        let (question, next) = Question::decode(&reader, pos)?;
        questions.push(question);
        pos = next;
    }

    let mut resources = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        let (record, next) = ResourceRecord::decode(&reader, pos)?;
        resources.push(record);
        pos = next;
    }

    if pos < buf.len() {
        trace!(trailing = buf.len() - pos, "Ignoring trailing bytes");
    }

    Ok(Message {
        header,
        questions,
        resources,
    })
}

/// Encodes `message`, deriving header counts from its entry lists.
pub fn encode(message: &Message) -> Result<Vec<u8>, WireError> {
    encode_with(message, CountPolicy::Derive)
}

/// Encodes `message` under the given count policy.
///
/// Names are written uncompressed. No size ceiling is applied. On error no
/// bytes are returned.
pub fn encode_with(message: &Message, policy: CountPolicy) -> Result<Vec<u8>, WireError> {
    let header = counted_header(message, policy)?;

    let mut writer = WireWriter::with_capacity(ENCODE_CAPACITY);
    header.encode(&mut writer);

    for question in &message.questions {
        question.encode(&mut writer)?;
    }

    for record in &message.resources {
        record.encode(&mut writer)?;
    }

    trace!(id = header.id, len = writer.len(), "Encoded message");
    Ok(writer.into_bytes())
}

fn counted_header(message: &Message, policy: CountPolicy) -> Result<Header, WireError> {
    let mut header = message.header;
    let questions = message.questions.len();
    let records = message.resources.len();

    match policy {
        CountPolicy::Strict => {
            if header.qdcount as usize != questions {
                return Err(WireError::CountMismatch {
                    section: Section::Question,
                    declared: header.qdcount as usize,
                    actual: questions,
                });
            }
            if header.record_count() != records {
                return Err(WireError::CountMismatch {
                    section: Section::Records,
                    declared: header.record_count(),
                    actual: records,
                });
            }
        }
        CountPolicy::Derive => {
            header.qdcount = to_count(Section::Question, questions)?;

            let tail = header.nscount as usize + header.arcount as usize;
            if tail <= records {
                header.ancount = to_count(Section::Answer, records - tail)?;
            } else {
                header.ancount = to_count(Section::Records, records)?;
                header.nscount = 0;
                header.arcount = 0;
            }
        }
    }

    Ok(header)
}

fn to_count(section: Section, count: usize) -> Result<u16, WireError> {
    u16::try_from(count).map_err(|_| WireError::TooManyEntries { section, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_record(name: &str) -> ResourceRecord {
        ResourceRecord::new(name, 1, 1, 300, vec![10, 0, 0, 1])
    }

    #[test]
    fn test_derive_overrides_stale_question_count() {
        let mut message = Message::default();
        message.questions.push(Question::new("example.com", 1, 1));
        message.header.qdcount = 9;

        let bytes = encode(&message).unwrap();
        assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), 1);
    }

    #[test]
    fn test_derive_keeps_fitting_split() {
        let mut message = Message::default();
        message.resources = vec![a_record("a"), a_record("b"), a_record("c")];
        message.header.nscount = 1;
        message.header.arcount = 1;

        let header = counted_header(&message, CountPolicy::Derive).unwrap();
        assert_eq!((header.ancount, header.nscount, header.arcount), (1, 1, 1));
    }

    #[test]
    fn test_derive_counts_everything_as_answers_when_split_overflows() {
        let mut message = Message::default();
        message.resources = vec![a_record("a")];
        message.header.nscount = 4;

        let header = counted_header(&message, CountPolicy::Derive).unwrap();
        assert_eq!((header.ancount, header.nscount, header.arcount), (1, 0, 0));
    }

    #[test]
    fn test_strict_rejects_mismatch() {
        let mut message = Message::default();
        message.resources = vec![a_record("a")];

        let result = encode_with(&message, CountPolicy::Strict);
        assert_eq!(
            result,
            Err(WireError::CountMismatch {
                section: Section::Records,
                declared: 0,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_counts_exceeding_buffer_fail_fast() {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[6] = 0xFF;
        bytes[7] = 0xFF;

        assert!(matches!(
            decode(&bytes),
            Err(WireError::TruncatedMessage { len: 12, .. })
        ));
    }
}
