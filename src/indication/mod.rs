//! Indication header/message shaping (spec §4.5, C5): converts a report
//! service's in-memory row buffer into the two values the transport
//! collaborator is expected to pack into byte-strings.
//!
//! The ASN.1 PER codec itself is out of scope (spec §1's Non-goals); this
//! module only defines the in-memory shapes and the `IndicationCodec` trait
//! boundary the codec collaborator implements.

pub mod codec;
pub mod header;
pub mod message;

pub use codec::IndicationCodec;
pub use header::IndicationHeader;
pub use message::{IndicationMessage, UeMeasReport};
