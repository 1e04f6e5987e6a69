use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::Script;

use super::{CounterRecord, CounterStore, Delta, StoreError, COUNTER_ID};

const BACKEND: &str = "redis";

/// KEYS[1] = record key, ARGV[1] = delta, ARGV[2] = timestamp.
///
/// Replies `{status, value}`: status 0 when the record is missing, 1 with the
/// new value, 2 with the untouched value when the delta would overflow. The
/// value is read back with HGET so it stays exact beyond 2^53.
const APPLY_DELTA: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return {0, ''}
end
local res = redis.pcall('HINCRBY', KEYS[1], 'value', ARGV[1])
if type(res) == 'table' and res.err then
  if string.find(res.err, 'overflow') then
    return {2, redis.call('HGET', KEYS[1], 'value')}
  end
  return res
end
redis.call('HSET', KEYS[1], 'updated_at', ARGV[2])
return {1, redis.call('HGET', KEYS[1], 'value')}
"#;

const APPLIED: i64 = 1;
const OVERFLOW: i64 = 2;

/// Counter kept in a Redis hash `<prefix>:main` with fields `value` and
/// `updated_at` (RFC 3339).
pub struct RedisStore {
    conn: ConnectionManager,
    key: String,
    apply_delta: Script,
}

impl RedisStore {
    /// Connect eagerly; an unreachable server is reported here.
    pub async fn connect(url: &str, prefix: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(|err| StoreError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|err| StoreError::unavailable(BACKEND, err))?;
        Ok(Self {
            conn,
            key: record_key(prefix),
            apply_delta: Script::new(APPLY_DELTA),
        })
    }

    /// Redis key holding the record.
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn record_key(prefix: &str) -> String {
    if prefix.is_empty() {
        COUNTER_ID.to_string()
    } else {
        format!("{prefix}:{COUNTER_ID}")
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let now = Utc::now().to_rfc3339();
        let _: () = redis::pipe()
            .atomic()
            .hset_nx(&self.key, "value", 0_i64)
            .ignore()
            .hset_nx(&self.key, "updated_at", &now)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreError::unavailable(BACKEND, err))?;
        Ok(())
    }

    async fn record(&self) -> Result<CounterRecord, StoreError> {
        let mut conn = self.conn.clone();
        let (value, updated_at): (Option<i64>, Option<String>) = redis::cmd("HMGET")
            .arg(&self.key)
            .arg("value")
            .arg("updated_at")
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreError::unavailable(BACKEND, err))?;

        let value = value.ok_or(StoreError::InvariantViolation { id: COUNTER_ID })?;
        let updated_at = match updated_at {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|err| StoreError::corrupt(BACKEND, err))?
                .with_timezone(&Utc),
            None => return Err(StoreError::corrupt(BACKEND, "updated_at field missing")),
        };
        Ok(CounterRecord { value, updated_at })
    }

    async fn apply(&self, delta: Delta) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        let (status, raw): (i64, String) = self
            .apply_delta
            .key(&self.key)
            .arg(delta.amount())
            .arg(Utc::now().to_rfc3339())
            .invoke_async(&mut conn)
            .await
            .map_err(|err| StoreError::unavailable(BACKEND, err))?;
        if status != APPLIED && status != OVERFLOW {
            return Err(StoreError::InvariantViolation { id: COUNTER_ID });
        }

        let value: i64 = raw
            .parse()
            .map_err(|err| StoreError::corrupt(BACKEND, format!("value '{raw}': {err}")))?;
        if status == OVERFLOW {
            return Err(StoreError::Overflow {
                value,
                delta: delta.amount(),
            });
        }
        Ok(value)
    }
}
