//! Ferrous Wire Codec
//!
//! Decodes DNS messages from wire format into owned [`Message`] values and
//! encodes them back. Decoding never reads past the buffer it is given and
//! never follows a compression pointer forwards, so arbitrary network input
//! produces either a message or a [`WireError`].
pub mod codec;
pub mod display;
pub mod header;
pub mod message;
pub mod name;
pub mod query;
pub mod reader;
pub mod writer;

pub use codec::{decode, encode, encode_with, CountPolicy};
pub use display::hex_dump;
pub use ferrous_wire_domain::{Section, WireError};
pub use header::{Header, HEADER_LEN};
pub use message::{Message, Question, ResourceRecord};
pub use name::{LabelControl, MAX_LABEL_LEN};
pub use query::QueryIds;
pub use reader::WireReader;
pub use writer::WireWriter;
