//! Command Dispatch
//!
//! Runs one validated [`Command`] against the [`Storage`] and turns the
//! outcome into a [`Reply`]. Type mismatches become the in-band sentinels
//! callers expect (`-1`, `nil`, `not_applicable`) rather than errors.

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::{Command, Reply};
use crate::storage::{Storage, Value};

/// Converts a count to an integer reply, mapping `WrongType` to `-1`.
fn count_reply(result: Result<usize>) -> Result<Reply> {
    match result {
        Ok(n) => Ok(Reply::Integer(i64::try_from(n).unwrap_or(i64::MAX))),
        Err(StoreError::WrongType(_)) => Ok(Reply::Integer(-1)),
        Err(e) => Err(e),
    }
}

/// Converts a yes/no outcome to `1` / `0`, mapping `WrongType` to `-1`.
fn flag_reply(result: Result<bool>) -> Result<Reply> {
    count_reply(result.map(usize::from))
}

/// Reports success of a store-variant as `1`, mapping `WrongType` to `-1`.
fn stored_reply(result: Result<usize>) -> Result<Reply> {
    count_reply(result.map(|_| 1))
}

/// Wraps a collection, mapping `WrongType` to `not_applicable`.
fn values_reply(result: Result<Vec<Value>>) -> Result<Reply> {
    match result {
        Ok(values) => Ok(Reply::Values(values)),
        Err(StoreError::WrongType(_)) => Ok(Reply::NotApplicable),
        Err(e) => Err(e),
    }
}

/// How many times `store` is tried when the key keeps vanishing between the
/// `store` and `replace` calls.
const STORE_ATTEMPTS: usize = 3;

/// Stores `value`, falling back to `replace` when the key already exists.
///
/// The two calls take the lock separately, so the key can vanish in between;
/// in that case `store` is tried again.
fn store_or_replace(storage: &Storage, key: &str, value: Value) -> Result<Reply> {
    for _ in 0..STORE_ATTEMPTS {
        match storage.store(key, value.clone()) {
            Ok(()) => return Ok(Reply::Ok),
            Err(StoreError::DuplicatedKey(_)) => {
                if storage.replace(key, value.clone()) {
                    return Ok(Reply::Ok);
                }
                debug!("Key '{}' removed before replace, retrying store", key);
            }
            Err(e) => return Err(e),
        }
    }

    warn!("Giving up on store of '{}' after {} attempts", key, STORE_ATTEMPTS);
    Err(StoreError::DuplicatedKey(key.to_string()))
}

/// Executes the storage operation named by `command`.
///
/// `store` on an existing key falls back to `replace`, and `get` on a missing
/// key replies `nil`. `remove` on a missing key is reported as an error.
pub fn execute(storage: &Storage, command: Command) -> Result<Reply> {
    debug!("Executing '{}'", command.name());

    match command {
        Command::Store { key, value } => store_or_replace(storage, &key, value),
        Command::Get { key } => match storage.get(&key) {
            Ok(value) => Ok(Reply::Value(value)),
            Err(StoreError::NonExistentKey(_)) => Ok(Reply::Nil),
            Err(e) => Err(e),
        },
        Command::Remove { key } => storage.remove(&key).map(|()| Reply::Ok),
        Command::Replace { key, value } => {
            storage.replace(&key, value);
            Ok(Reply::Ok)
        }

        Command::LPush { key, value } => Ok(Reply::Bool(storage.lpush(&key, value))),
        Command::RPush { key, value } => Ok(Reply::Bool(storage.rpush(&key, value))),
        Command::LPop { key } => Ok(storage.lpop(&key).into()),
        Command::RPop { key } => Ok(storage.rpop(&key).into()),
        Command::LIndex { key, index } => Ok(storage.lindex(&key, index).into()),
        Command::LLen { key } => count_reply(storage.llen(&key)),
        Command::LSet { key, index, value } => {
            Ok(Reply::Bool(storage.lset(&key, index, value)))
        }
        Command::LRange { key, start, end } => values_reply(storage.lrange(&key, start, end)),
        Command::LTrim { key, start, end } => Ok(Reply::Bool(storage.ltrim(&key, start, end))),
        Command::LRem { key, count, value } => count_reply(Ok(storage.lrem(&key, count, value))),

        Command::SAdd { key, member } => flag_reply(storage.sadd(&key, member)),
        Command::SRem { key, member } => flag_reply(storage.srem(&key, member)),
        Command::SIsMember { key, member } => flag_reply(storage.sismember(&key, member)),
        Command::SCard { key } => count_reply(storage.scard(&key)),
        Command::SMembers { key } => values_reply(storage.smembers(&key)),
        Command::SInter { keys } => values_reply(storage.sinter(&keys)),
        Command::SUnion { keys } => values_reply(storage.sunion(&keys)),
        Command::SDiff { keys } => values_reply(storage.sdiff(&keys)),
        Command::SInterStore { keys } => stored_reply(storage.sinterstore(&keys)),
        Command::SUnionStore { keys } => stored_reply(storage.sunionstore(&keys)),
        Command::SDiffStore { keys } => stored_reply(storage.sdiffstore(&keys)),
        Command::SMove {
            source,
            destination,
            member,
        } => flag_reply(storage.smove(&source, &destination, member)),
        Command::SPop { key } => Ok(storage.spop(&key).into()),
        Command::SRandMember { key } => Ok(storage.srandmember(&key).into()),
    }
}
