//! CSV quick-shortcut repository, `{data_directory}/shortcuts.csv`.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::QuickShortcut;
use tracing::info;

use super::connection::CsvConnection;
use crate::storage::ShortcutStorage;

const SHORTCUTS_FILE: &str = "shortcuts.csv";
const SHORTCUTS_HEADER: &str = "id,label,prompt,icon";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShortcutRecord {
    id: String,
    label: String,
    prompt: String,
    icon: Option<String>,
}

impl From<&QuickShortcut> for ShortcutRecord {
    fn from(shortcut: &QuickShortcut) -> Self {
        ShortcutRecord {
            id: shortcut.id.clone(),
            label: shortcut.label.clone(),
            prompt: shortcut.prompt.clone(),
            icon: shortcut.icon.clone(),
        }
    }
}

impl From<ShortcutRecord> for QuickShortcut {
    fn from(record: ShortcutRecord) -> Self {
        QuickShortcut {
            id: record.id,
            label: record.label,
            prompt: record.prompt,
            icon: record.icon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShortcutRepository {
    connection: CsvConnection,
}

impl ShortcutRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_shortcuts(&self) -> Result<Vec<QuickShortcut>> {
        let records: Vec<ShortcutRecord> = self
            .connection
            .read_records(SHORTCUTS_FILE, SHORTCUTS_HEADER)?;
        Ok(records.into_iter().map(QuickShortcut::from).collect())
    }

    fn write_shortcuts(&self, shortcuts: &[QuickShortcut]) -> Result<()> {
        let records: Vec<ShortcutRecord> = shortcuts.iter().map(ShortcutRecord::from).collect();
        self.connection
            .write_records(SHORTCUTS_FILE, SHORTCUTS_HEADER, &records)
    }
}

#[async_trait]
impl ShortcutStorage for ShortcutRepository {
    async fn list_shortcuts(&self, defaults: &[QuickShortcut]) -> Result<Vec<QuickShortcut>> {
        let _guard = self.connection.lock_writes().await;
        let shortcuts = self.read_shortcuts()?;
        if shortcuts.is_empty() && !defaults.is_empty() {
            info!("No shortcuts stored yet, seeding {} defaults", defaults.len());
            self.write_shortcuts(defaults)?;
            return Ok(defaults.to_vec());
        }
        Ok(shortcuts)
    }

    async fn add_shortcut(&self, shortcut: &QuickShortcut) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut shortcuts = self.read_shortcuts()?;
        shortcuts.push(shortcut.clone());
        self.write_shortcuts(&shortcuts)
    }

    async fn update_shortcut(&self, shortcut: &QuickShortcut) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut shortcuts = self.read_shortcuts()?;
        if let Some(existing) = shortcuts.iter_mut().find(|s| s.id == shortcut.id) {
            *existing = shortcut.clone();
        }
        self.write_shortcuts(&shortcuts)
    }

    async fn delete_shortcut(&self, shortcut_id: &str) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut shortcuts = self.read_shortcuts()?;
        shortcuts.retain(|s| s.id != shortcut_id);
        self.write_shortcuts(&shortcuts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_shortcuts;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_shortcut_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ShortcutRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        let seeded = repo.list_shortcuts(&default_shortcuts()).await.unwrap();
        assert_eq!(seeded.len(), 3);

        let lunch = QuickShortcut {
            id: "s-lunch".to_string(),
            label: "Lunch".to_string(),
            prompt: "Lunch 12".to_string(),
            icon: Some("🥪".to_string()),
        };
        repo.add_shortcut(&lunch).await.unwrap();

        let mut coffee = seeded[0].clone();
        coffee.prompt = "Coffee 4".to_string();
        repo.update_shortcut(&coffee).await.unwrap();
        repo.delete_shortcut("3").await.unwrap();

        let listed = repo.list_shortcuts(&default_shortcuts()).await.unwrap();
        assert_eq!(listed, vec![coffee, seeded[1].clone(), lunch]);
    }
}
