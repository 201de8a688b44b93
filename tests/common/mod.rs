// Test-side block decoder. The crate only builds blocks, so tests read them
// back here to check the layout.

#![allow(dead_code)]

use sst_block::coding::{fixed, varint};

/// One record as laid out in the block.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub offset: usize,
    pub shared: usize,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// A block split back into its records and restart table.
#[derive(Debug)]
pub struct DecodedBlock {
    pub records: Vec<DecodedRecord>,
    pub restarts: Vec<u32>,
}

impl DecodedBlock {
    pub fn pairs(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.records
            .iter()
            .map(|r| (r.key.clone(), r.value.clone()))
            .collect()
    }
}

pub fn decode_block(block: &[u8]) -> DecodedBlock {
    assert!(block.len() >= fixed::LEN, "block shorter than restart count");
    let count_at = block.len() - fixed::LEN;
    let num_restarts = fixed::decode_u32(&block[count_at..]).unwrap() as usize;
    let restarts_at = count_at - num_restarts * fixed::LEN;

    let restarts = (0..num_restarts)
        .map(|i| fixed::decode_u32(&block[restarts_at + i * fixed::LEN..]).unwrap())
        .collect();

    let data = &block[..restarts_at];
    let mut records = Vec::new();
    let mut prev_key: Vec<u8> = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let offset = pos;
        let (shared, n) = varint::decode_u32(&data[pos..]).unwrap();
        pos += n;
        let (non_shared, n) = varint::decode_u32(&data[pos..]).unwrap();
        pos += n;
        let (value_len, n) = varint::decode_u32(&data[pos..]).unwrap();
        pos += n;

        let (shared, non_shared, value_len) =
            (shared as usize, non_shared as usize, value_len as usize);
        assert!(shared <= prev_key.len(), "shared prefix longer than previous key");

        let mut key = prev_key[..shared].to_vec();
        key.extend_from_slice(&data[pos..pos + non_shared]);
        pos += non_shared;
        let value = data[pos..pos + value_len].to_vec();
        pos += value_len;

        prev_key = key.clone();
        records.push(DecodedRecord {
            offset,
            shared,
            key,
            value,
        });
    }
    assert_eq!(pos, data.len(), "records overran the restart table");

    DecodedBlock { records, restarts }
}
