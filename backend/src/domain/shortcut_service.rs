//! Quick shortcut service.
//!
//! Shortcuts are canned chat prompts ("Coffee 5") shown on the dashboard.

use shared::QuickShortcut;
use tracing::info;

use super::store::{log_write_failure, EntityStore};

#[derive(Clone)]
pub struct ShortcutService {
    store: EntityStore,
}

impl ShortcutService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_shortcuts(&self) -> Vec<QuickShortcut> {
        self.store.read(|data| data.shortcuts.clone()).await
    }

    pub async fn add_shortcut(&self, shortcut: QuickShortcut) -> QuickShortcut {
        info!("Adding shortcut '{}'", shortcut.label);

        self.store.mutate(|data| data.shortcuts.push(shortcut.clone())).await;

        let result = self.store.gateway().shortcuts.add_shortcut(&shortcut).await;
        log_write_failure("add shortcut", result);
        shortcut
    }

    /// Replace the shortcut with the same id. The gateway call is issued even
    /// when no shortcut matched in memory.
    pub async fn update_shortcut(&self, shortcut: QuickShortcut) {
        info!("Updating shortcut {}", shortcut.id);

        self.store
            .mutate(|data| {
                if let Some(existing) = data.shortcuts.iter_mut().find(|s| s.id == shortcut.id) {
                    *existing = shortcut.clone();
                }
            })
            .await;

        let result = self.store.gateway().shortcuts.update_shortcut(&shortcut).await;
        log_write_failure("update shortcut", result);
    }

    pub async fn delete_shortcut(&self, shortcut_id: &str) {
        info!("Deleting shortcut {}", shortcut_id);

        self.store.mutate(|data| data.shortcuts.retain(|s| s.id != shortcut_id)).await;

        let result = self.store.gateway().shortcuts.delete_shortcut(shortcut_id).await;
        log_write_failure("delete shortcut", result);
    }
}
