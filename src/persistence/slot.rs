use super::files::{atomic_write, read_file};
use crate::domain::Todo;
use anyhow::Result;
use std::path::PathBuf;

/// Key-value storage for todo lists: one JSON file per slot key, all under a
/// single data directory
#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the todo list stored under `key`.
    ///
    /// An absent or unreadable slot yields an empty list; the model starts
    /// fresh rather than failing construction.
    pub fn load(&self, key: &str) -> Vec<Todo> {
        let content = match read_file(self.slot_path(key)) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        if content.is_empty() {
            return Vec::new();
        }
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Serialize the full todo list into the slot under `key`
    pub fn save(&self, key: &str, todos: &[Todo]) -> Result<()> {
        let json = serde_json::to_string_pretty(todos)?;
        atomic_write(self.slot_path(key), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PomodoroSettings;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_slot_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = SlotStore::new(temp_dir.path().to_path_buf());

        assert!(store.load("todos").is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let store = SlotStore::new(temp_dir.path().to_path_buf());

        let todos = vec![
            Todo::new("buy milk".to_string(), PomodoroSettings::default()),
            Todo::new("write report".to_string(), PomodoroSettings::default()),
        ];
        store.save("todos", &todos).unwrap();

        let loaded = store.load("todos");
        assert_eq!(loaded, todos);
    }

    #[test]
    fn test_load_malformed_slot_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = SlotStore::new(temp_dir.path().to_path_buf());

        std::fs::write(temp_dir.path().join("todos.json"), "not json {{").unwrap();
        assert!(store.load("todos").is_empty());
    }

    #[test]
    fn test_slots_are_independent() {
        let temp_dir = tempdir().unwrap();
        let store = SlotStore::new(temp_dir.path().to_path_buf());

        let todos = vec![Todo::new("a".to_string(), PomodoroSettings::default())];
        store.save("first", &todos).unwrap();

        assert_eq!(store.load("first").len(), 1);
        assert!(store.load("second").is_empty());
    }
}
