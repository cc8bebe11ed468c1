//! # CSV Storage
//!
//! File-based gateway. Every collection is one CSV file in the data
//! directory; singleton settings and the guide cache are YAML files.
//!
//! ```text
//! data/
//! ├── settings.yaml
//! ├── guide_cache.yaml
//! ├── transactions.csv
//! ├── categories.csv
//! ├── budgets.csv
//! ├── goals.csv
//! └── shortcuts.csv
//! ```

pub mod budget_repository;
pub mod category_repository;
pub mod connection;
pub mod goal_repository;
pub mod settings_repository;
pub mod shortcut_repository;
pub mod transaction_repository;

pub use budget_repository::BudgetRepository;
pub use category_repository::CategoryRepository;
pub use connection::CsvConnection;
pub use goal_repository::GoalRepository;
pub use settings_repository::SettingsRepository;
pub use shortcut_repository::ShortcutRepository;
pub use transaction_repository::TransactionRepository;
