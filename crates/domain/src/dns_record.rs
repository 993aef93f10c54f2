mod record_class;
mod record_type;

pub use record_class::RecordClass;
pub use record_type::RecordType;

/// Host address record type code.
pub const TYPE_A: u16 = 1;

/// Internet class code.
pub const CLASS_IN: u16 = 1;
