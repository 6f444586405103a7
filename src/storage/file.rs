//! JSON 파일 토큰 저장소
//!
//! 데모 바이너리가 실행 사이에 세션을 유지하기 위해 사용합니다.
//! 파일 형식은 키별 [`StoredEntry`]를 담은 JSON 객체입니다.
//!
//! ```json
//! { "jwt-token": { "value": "aaa.bbb.ccc", "expires_at": "2025-01-01T00:00:00Z" } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use chrono::Duration;
use log::{debug, warn};
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{ClientError, ClientResult, ErrorContext};
use super::{StoredEntry, TokenStore};

type Entries = HashMap<String, StoredEntry>;

/// 파일 기반 저장소
pub struct FileTokenStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    /// 읽기-수정-쓰기 구간 직렬화
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        FileTokenStore {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일이 없으면 빈 저장소로 봅니다.
    fn load(&self) -> ClientResult<Entries> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "세션 파일 읽기 실패 ({}): {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&raw).storage_context("세션 파일 형식 오류")
    }

    fn save(&self, entries: &Entries) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).storage_context("세션 디렉터리 생성 실패")?;
        }

        let json = serde_json::to_string_pretty(entries).storage_context("세션 직렬화 실패")?;
        fs::write(&self.path, json).storage_context("세션 파일 쓰기 실패")?;
        debug!("세션 파일 저장: {}", self.path.display());
        Ok(())
    }

    fn update<F>(&self, f: F) -> ClientResult<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::Storage("세션 파일 잠금이 손상되었습니다".to_string()))?;

        let now = self.clock.now();
        let mut entries = self.load()?;
        entries.retain(|_, entry| !entry.is_expired_at(now));
        f(&mut entries);
        self.save(&entries)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let now = self.clock.now();
        let entries = self.load().map_err(|e| {
            warn!("세션 파일을 읽을 수 없습니다: {}", e);
            e
        })?;

        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, max_age: Option<Duration>) -> ClientResult<()> {
        let now = self.clock.now();
        self.update(|entries| match StoredEntry::new(value, max_age, now) {
            Some(entry) => {
                entries.insert(key.to_string(), entry);
            }
            None => {
                entries.remove(key);
            }
        })
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileTokenStore::new(&path).set("jwt-token", "a.b.c", None).unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get("jwt-token").unwrap().as_deref(), Some("a.b.c"));

        reopened.delete("jwt-token").unwrap();
        assert_eq!(FileTokenStore::new(&path).get("jwt-token").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.get("jwt-token").unwrap(), None);
        store.set("jwt-token", "x.y.z", None).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_expired_entry_is_hidden() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileTokenStore::with_clock(&path, Arc::new(FixedClock::at_timestamp(1_000)))
            .set("jwt-token", "a.b.c", Some(Duration::seconds(60)))
            .unwrap();

        let later = FileTokenStore::with_clock(&path, Arc::new(FixedClock::at_timestamp(1_060)));
        assert_eq!(later.get("jwt-token").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let result = FileTokenStore::new(&path).get("jwt-token");
        assert!(matches!(result, Err(ClientError::Storage(_))));
    }
}
