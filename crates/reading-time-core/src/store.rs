//! Small persistent key-value store for values that outlive a page view.
//!
//! Values are plain strings with a retention period in days. Primitive values
//! are stored as their text form; anything structured goes into a JSON
//! envelope `{"v": ...}` so it can be told apart on the way back.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

pub trait KeyValueStore {
    /// Stored value for `key`, or `None` when missing or expired.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` for `ttl_days`; a zero TTL removes the key.
    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Encodes a value for storage.
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_value(value).context("value cannot be serialized for storage")?;
    let encoded = match json {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => "undefined".to_string(),
        primitive @ (serde_json::Value::Bool(_) | serde_json::Value::Number(_)) => {
            primitive.to_string()
        }
        structured => serde_json::json!({ "v": structured }).to_string(),
    };
    Ok(encoded)
}

/// Reverses [`encode_value`] as far as the text allows.
///
/// An envelope yields its inner value; text that only looks like an envelope
/// is returned as-is; the literal `undefined` means absent.
pub fn decode_value(raw: &str) -> Option<serde_json::Value> {
    if raw == "undefined" {
        return None;
    }
    if raw.starts_with('{') {
        if let Ok(serde_json::Value::Object(mut map)) = serde_json::from_str(raw) {
            if let Some(inner) = map.remove("v") {
                return Some(inner);
            }
        }
    }
    Some(serde_json::Value::String(raw.to_string()))
}

/// Stores `value` under `key`, failing hard if it cannot be encoded.
pub fn store_value<S, T>(store: &mut S, key: &str, value: &T, ttl_days: u32) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = encode_value(value)?;
    store.set(key, &encoded, ttl_days)
}

/// Loads a structured value written with [`store_value`].
pub fn load_value<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store.get(key)?;
    let value = decode_value(&raw)?;
    serde_json::from_value(value).ok()
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn expiry_after(ttl_days: u32) -> u64 {
    now_unix_secs().saturating_add(u64::from(ttl_days) * SECS_PER_DAY)
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct StoredEntry {
    value: String,
    expires_at: u64,
}

impl StoredEntry {
    fn is_live(&self) -> bool {
        self.expires_at > now_unix_secs()
    }
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        if ttl_days == 0 {
            self.entries.remove(key);
            return Ok(());
        }
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: expiry_after(ttl_days),
            },
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// TOML-backed store, one file per namespace.
///
/// The namespace (typically a site origin) is hashed into a directory name
/// under `cache_dir` to keep arbitrary strings off the filesystem.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

impl FileStore {
    /// Opens the namespace's store. A missing file is an empty store; a file
    /// that exists but cannot be read is an error, so it is never overwritten.
    pub fn open(cache_dir: &Path, namespace: &str) -> Result<Self> {
        let path = namespace_dir(cache_dir, namespace).join("store.toml");
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match toml::from_str::<StoreFile>(&data) {
                Ok(file) => file.entries,
                Err(err) => {
                    warn!(path = %path.display(), "Ignoring unreadable store file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), "Failed to read store file: {err}");
                return Err(err).with_context(|| format!("reading store {}", path.display()));
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened store");
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> Result<()> {
        self.entries.retain(|_, entry| entry.is_live());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating store dir {}", parent.display()))?;
        }
        let file = StoreFile {
            entries: self.entries.clone(),
        };
        let contents = toml::to_string(&file).context("serializing store")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing store {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        if ttl_days == 0 {
            return self.remove(key);
        }
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: expiry_after(ttl_days),
            },
        );
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        self.flush()
    }
}

pub fn namespace_dir(cache_dir: &Path, namespace: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    cache_dir.join(hash)
}
