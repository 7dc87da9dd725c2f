use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use thiserror::Error;

const COUNTER_MASK: u32 = 0x00ff_ffff;

/// 12-byte document identifier: 4-byte timestamp, 5 process-random bytes,
/// 3-byte counter. Rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid object id: {0:?}")]
pub struct InvalidObjectId(pub String);

fn process_unique() -> &'static [u8; 5] {
    static BYTES: OnceLock<[u8; 5]> = OnceLock::new();
    BYTES.get_or_init(|| rand::thread_rng().gen())
}

fn next_count() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..=COUNTER_MASK)))
        .fetch_add(1, Ordering::SeqCst)
        & COUNTER_MASK
}

impl ObjectId {
    pub fn new() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let count = next_count();

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        ObjectId(bytes)
    }

    pub fn parse_str(s: &str) -> Result<Self, InvalidObjectId> {
        let raw = s.as_bytes();
        if raw.len() != 24 {
            return Err(InvalidObjectId(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, pair) in raw.chunks(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or_else(|| InvalidObjectId(s.to_string()))?;
            let lo = hex_value(pair[1]).ok_or_else(|| InvalidObjectId(s.to_string()))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(ObjectId(bytes))
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
