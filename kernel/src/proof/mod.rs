//! Content addressing: canonical JSON bytes and domain-separated hashing.

pub mod canon;
pub mod hash;
pub mod hash_domain;
