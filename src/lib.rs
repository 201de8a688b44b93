//! # SSTable Block Encoder
//!
//! Packs sorted key/value pairs into one immutable, prefix-compressed
//! data block, the unit a table writer later places on disk and indexes.
//!
//! ## Core idea
//! Neighbouring keys in sorted order tend to share a prefix. Each record
//! stores only the bytes that differ from the previous key. Every
//! `restart_interval` records a key is stored in full (a restart point),
//! so a reader can binary search the restart table and decode from there
//! without replaying the whole block.

pub mod coding;
pub mod error;
pub mod sstable;

// Public re-exports for the top-level API
pub use error::{Error, Result, Violation};
pub use sstable::block::{BlockBuilder, BlockOptions};
