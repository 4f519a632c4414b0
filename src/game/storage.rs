use log::{trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::seeded_random::string_hash;

/// String-keyed store of JSON documents, one record per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Addresses of every persisted record. Readers and writers both go through
/// here so the key format cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey<'a> {
    Board(&'a str, usize),
    Reroll(&'a str, usize),
    Timer(&'a str, usize),
    Streak,
    ScoreHistory,
    Settings,
}

impl fmt::Display for RecordKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Board(seed, n) => write!(f, "board:{}:{}", seed, n),
            RecordKey::Reroll(seed, n) => write!(f, "reroll:{}:{}", seed, n),
            RecordKey::Timer(seed, n) => write!(f, "timer:{}:{}", seed, n),
            RecordKey::Streak => write!(f, "streak:global"),
            RecordKey::ScoreHistory => write!(f, "scoreHistory:global"),
            RecordKey::Settings => write!(f, "settings:global"),
        }
    }
}

/// Read and decode a record. Missing and unparseable records both come back
/// as `None`; the latter is logged.
pub fn load_record<T, S>(store: &S, key: RecordKey) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let key = key.to_string();
    let contents = store.get(&key)?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(target: "storage", "Ignoring corrupt record {}: {}", key, e);
            None
        }
    }
}

pub fn save_record<T, S>(store: &mut S, key: RecordKey, value: &T) -> io::Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let key = key.to_string();
    let contents = serde_json::to_string(value)?;
    trace!(target: "storage", "Saving {} ({} bytes)", key, contents.len());
    store.set(&key, &contents)
}

pub fn remove_record<S>(store: &mut S, key: RecordKey) -> io::Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(&key.to_string())
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.records.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `<platform data dir>/bingle`, or `./bingle` when the platform has none.
    pub fn default_data_dir() -> PathBuf {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bingle")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", escape_key(key)))
    }
}

/// Longest escaped key kept verbatim; file names are capped at 255 bytes.
const MAX_ESCAPED_KEY_LEN: usize = 160;
const TRUNCATED_PREFIX_LEN: usize = 120;

/// Bytes outside `[A-Za-z0-9_-]` become `%XX`. Overlong results keep a prefix
/// and end in `~` plus a hash and length of the full key.
fn escape_key(key: &str) -> String {
    let escaped = percent_escape(key);
    if escaped.len() <= MAX_ESCAPED_KEY_LEN {
        return escaped;
    }
    // escaped text is ASCII, so any byte index is a char boundary
    format!(
        "{}~{:08x}{:x}",
        &escaped[..TRUNCATED_PREFIX_LEN],
        string_hash(key),
        key.len()
    )
}

fn percent_escape(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(target: "storage", "Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StreakState;
    use crate::tests::UsingLogger;
    use chrono::NaiveDate;
    use test_context::test_context;

    #[test]
    fn test_record_keys() {
        assert_eq!(RecordKey::Board("daily202610193", 3).to_string(), "board:daily202610193:3");
        assert_eq!(RecordKey::Reroll("abc", 5).to_string(), "reroll:abc:5");
        assert_eq!(RecordKey::Timer("abc", 4).to_string(), "timer:abc:4");
        assert_eq!(RecordKey::Streak.to_string(), "streak:global");
        assert_eq!(RecordKey::ScoreHistory.to_string(), "scoreHistory:global");
        assert_eq!(RecordKey::Settings.to_string(), "settings:global");
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("board:my seed:3"), "board%3Amy%20seed%3A3");
        assert_eq!(escape_key("a/b"), "a%2Fb");
        assert_eq!(escape_key("plain_key-1"), "plain_key-1");
    }

    #[test]
    fn test_long_keys_are_shortened() {
        let seed = "é".repeat(200);
        let key = RecordKey::Board(&seed, 3).to_string();
        let escaped = escape_key(&key);
        assert!(escaped.len() <= MAX_ESCAPED_KEY_LEN);
        assert!(escaped.starts_with("board%3A%C3%A9"));

        let other_seed = format!("{}x", "é".repeat(200));
        let other = escape_key(&RecordKey::Board(&other_seed, 3).to_string());
        assert_ne!(escaped, other);
        assert_eq!(escape_key(&key), escaped);
    }

    #[test]
    fn test_file_store_accepts_long_custom_seed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let seed = "ü".repeat(300);
        let key = RecordKey::Board(&seed, 4).to_string();
        store.set(&key, "{}").unwrap();
        assert_eq!(store.get(&key).as_deref(), Some("{}"));
    }

    #[test]
    fn test_memory_store_typed_round_trip() {
        let mut store = MemoryStore::new();
        let streak = StreakState {
            current_streak: 4,
            best_streak: 9,
            last_played_date: NaiveDate::from_ymd_opt(2026, 10, 18),
        };
        save_record(&mut store, RecordKey::Streak, &streak).unwrap();
        let loaded: Option<StreakState> = load_record(&store, RecordKey::Streak);
        assert_eq!(loaded, Some(streak));

        remove_record(&mut store, RecordKey::Streak).unwrap();
        assert!(store.is_empty());
        assert_eq!(load_record::<StreakState, _>(&store, RecordKey::Streak), None);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_corrupt_record_is_absent(_: &mut UsingLogger) {
        let mut store = MemoryStore::new();
        store.set("streak:global", "{not json").unwrap();
        assert_eq!(load_record::<StreakState, _>(&store, RecordKey::Streak), None);
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("board:x:3"), None);

        store.set("board:x:3", "{\"a\":1}").unwrap();
        assert!(dir.path().join("nested").join("board%3Ax%3A3.json").exists());
        assert_eq!(store.get("board:x:3").as_deref(), Some("{\"a\":1}"));

        store.remove("board:x:3").unwrap();
        assert_eq!(store.get("board:x:3"), None);
        // removing twice is fine
        store.remove("board:x:3").unwrap();
    }

    #[test]
    fn test_file_store_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("board:a:3", "1").unwrap();
        store.set("board:a:4", "2").unwrap();
        store.set("reroll:a:3", "3").unwrap();
        assert_eq!(store.get("board:a:3").as_deref(), Some("1"));
        assert_eq!(store.get("board:a:4").as_deref(), Some("2"));
        assert_eq!(store.get("reroll:a:3").as_deref(), Some("3"));
    }
}
