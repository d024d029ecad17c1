//! Request DTOs for the store server API
//!
//! Defines the command body accepted by `POST /command`.

use serde::Deserialize;

use crate::storage::Value;

/// One store operation with its operands.
///
/// Serialized as a JSON object tagged by `op`, e.g.
/// `{"op": "lrange", "key": "L", "start": 0, "end": 10}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    // Scalars
    Store { key: String, value: Value },
    Get { key: String },
    Remove { key: String },
    Replace { key: String, value: Value },

    // Lists
    LPush { key: String, value: Value },
    RPush { key: String, value: Value },
    LPop { key: String },
    RPop { key: String },
    LIndex { key: String, index: i64 },
    LLen { key: String },
    LSet { key: String, index: i64, value: Value },
    LRange { key: String, start: i64, end: i64 },
    LTrim { key: String, start: i64, end: i64 },
    LRem { key: String, count: i64, value: Value },

    // Sets
    SAdd { key: String, member: Value },
    SRem { key: String, member: Value },
    SIsMember { key: String, member: Value },
    SCard { key: String },
    SMembers { key: String },
    SInter { keys: Vec<String> },
    SInterStore { keys: Vec<String> },
    SUnion { keys: Vec<String> },
    SUnionStore { keys: Vec<String> },
    SDiff { keys: Vec<String> },
    SDiffStore { keys: Vec<String> },
    SMove {
        source: String,
        destination: String,
        member: Value,
    },
    SPop { key: String },
    SRandMember { key: String },
}

impl Command {
    /// Lowercase operation name, as it appears in the `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Store { .. } => "store",
            Command::Get { .. } => "get",
            Command::Remove { .. } => "remove",
            Command::Replace { .. } => "replace",
            Command::LPush { .. } => "lpush",
            Command::RPush { .. } => "rpush",
            Command::LPop { .. } => "lpop",
            Command::RPop { .. } => "rpop",
            Command::LIndex { .. } => "lindex",
            Command::LLen { .. } => "llen",
            Command::LSet { .. } => "lset",
            Command::LRange { .. } => "lrange",
            Command::LTrim { .. } => "ltrim",
            Command::LRem { .. } => "lrem",
            Command::SAdd { .. } => "sadd",
            Command::SRem { .. } => "srem",
            Command::SIsMember { .. } => "sismember",
            Command::SCard { .. } => "scard",
            Command::SMembers { .. } => "smembers",
            Command::SInter { .. } => "sinter",
            Command::SInterStore { .. } => "sinterstore",
            Command::SUnion { .. } => "sunion",
            Command::SUnionStore { .. } => "sunionstore",
            Command::SDiff { .. } => "sdiff",
            Command::SDiffStore { .. } => "sdiffstore",
            Command::SMove { .. } => "smove",
            Command::SPop { .. } => "spop",
            Command::SRandMember { .. } => "srandmember",
        }
    }

    /// Validates the command operands
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self {
            // The first key names the destination
            Command::SInterStore { keys }
            | Command::SUnionStore { keys }
            | Command::SDiffStore { keys }
                if keys.is_empty() =>
            {
                Some(format!("'{}' requires a destination key", self.name()))
            }
            _ => None,
        }
    }
}
