//! # Domain Module
//!
//! Business logic for the finance tracker: the in-memory entity store, one
//! service per collection, the category cascade rules, the survival guide
//! cache and the view router. Storage is reached only through the
//! [`Gateway`](crate::storage::Gateway) traits.
//!
//! ## Module Organization
//!
//! - **store**: `AppData`, `EntityStore` and the write-through failure policy
//! - **transaction_service**: transaction CRUD, creates unknown categories on entry
//! - **category_service**: category CRUD with rename and delete cascades
//! - **cascade**: pure rewrite rules over transactions and budgets
//! - **budget_service**, **goal_service**, **shortcut_service**: simple collections
//! - **settings_service**: selected country and currency
//! - **guide_service**: per-country guide cache in front of a [`GuideGenerator`]
//! - **loader**: concurrent initial load with fallback to defaults
//! - **view_router**: state slice per view
//!
//! ## Business Rules
//!
//! - In-memory state changes first; a failed gateway write is logged and never rolled back
//! - Category existence on transaction entry ignores case; cascades match names exactly
//! - Guides are cached per country forever; the last generation to resolve is displayed

pub mod budget_service;
pub mod cascade;
pub mod category_service;
pub mod countries;
pub mod defaults;
pub mod goal_service;
pub mod guide_service;
pub mod loader;
pub mod settings_service;
pub mod shortcut_service;
pub mod store;
pub mod transaction_service;
pub mod view_router;

pub use budget_service::*;
pub use category_service::*;
pub use countries::*;
pub use goal_service::*;
pub use guide_service::*;
pub use loader::*;
pub use settings_service::*;
pub use shortcut_service::*;
pub use store::*;
pub use transaction_service::*;
pub use view_router::*;
