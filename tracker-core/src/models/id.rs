use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{Error, Result};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Store-assigned document identifier.
///
/// Twelve bytes rendered as 24 lowercase hex characters: a big-endian unix
/// timestamp (seconds), five random bytes and a three byte process counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    pub const LEN: usize = 24;

    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        let secs = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);

        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&random.as_bytes()[0..5]);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);

        Self(bytes)
    }

    /// Returns true if `s` is 24 hex characters.
    pub fn is_valid(s: &str) -> bool {
        s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parses an identifier supplied by a caller.
    pub fn parse(s: &str) -> Result<Self> {
        if !Self::is_valid(s) {
            return Err(Error::InvalidArgument(format!("'{}' is not a valid id", s)));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::InvalidArgument(e.to_string()))?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DocumentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
