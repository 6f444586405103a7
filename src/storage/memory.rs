//! 프로세스 메모리 토큰 저장소

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use chrono::Duration;
use log::debug;
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{ClientError, ClientResult};
use super::{StoredEntry, TokenStore};

/// 메모리 기반 저장소
///
/// 만료된 항목은 읽을 때 없는 것으로 보이고, 다음 쓰기 때 정리됩니다.
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 만료 판단에 사용할 시계를 지정합니다.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        MemoryTokenStore {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// 만료되지 않은 항목 수
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .map(|entries| entries.values().filter(|e| !e.is_expired_at(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> ClientError {
    ClientError::Storage("메모리 저장소 잠금이 손상되었습니다".to_string())
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let now = self.clock.now();
        let entries = self.entries.read().map_err(poisoned)?;

        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, max_age: Option<Duration>) -> ClientResult<()> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.retain(|_, entry| !entry.is_expired_at(now));

        match StoredEntry::new(value, max_age, now) {
            Some(entry) => {
                entries.insert(key.to_string(), entry);
            }
            None => {
                debug!("수명이 0 이하인 값이므로 삭제합니다: {}", key);
                entries.remove(key);
            }
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
