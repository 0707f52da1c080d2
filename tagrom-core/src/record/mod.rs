//! Tagged-record storage
//!
//! Record framing, header-scan location, and the public read/write
//! operations.

pub mod header;
pub mod locator;
pub mod store;

pub use header::{Header, FRESH_RECORD_ID, HEADER_LEN, MAGIC};
pub use store::{ReadError, RecordStore, WriteError};
