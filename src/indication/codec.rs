//! Codec collaborator boundary. The ASN.1 PER encoder/decoder lives outside
//! this crate (spec §1 Non-goals); `IndicationCodec` is the trait a host
//! implementation satisfies to turn the in-memory shapes above into the
//! byte-strings E2AP carries.

use super::{IndicationHeader, IndicationMessage};

pub trait IndicationCodec: Send + Sync {
    fn encode_header(&self, header: &IndicationHeader) -> Vec<u8>;
    fn encode_message(&self, message: &IndicationMessage) -> Vec<u8>;
}
