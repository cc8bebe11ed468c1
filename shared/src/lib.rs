use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Currencies the tracker can display amounts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Cad,
    Gbp,
    Aud,
    Jpy,
    Inr,
    Pkr,
}

impl Currency {
    /// ISO 4217 code, as stored and sent over the wire
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
            Currency::Pkr => "PKR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "CAD" => Ok(Currency::Cad),
            "GBP" => Ok(Currency::Gbp),
            "AUD" => Ok(Currency::Aud),
            "JPY" => Ok(Currency::Jpy),
            "INR" => Ok(Currency::Inr),
            "PKR" => Ok(Currency::Pkr),
            other => Err(format!("Unknown currency code: {}", other)),
        }
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

/// A single logged transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Signed amount in `currency`
    pub amount: f64,
    pub currency: Currency,
    /// Category name. This is a name reference, not a category id.
    pub category: String,
    /// ISO 8601 date as entered by the user
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A spending category. `name` is the join key used by transactions and budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Create a user category with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            is_default: false,
        }
    }
}

/// Spending limit for a category, keyed by category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// One-tap logging shortcut shown next to the smart logger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickShortcut {
    pub id: String,
    pub label: String,
    /// Text fed to the smart logger when the shortcut is tapped
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Generated shopping guide and survival tips for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivalGuide {
    pub shopping_guide: String,
    pub survival_tips: String,
}

/// Guide cache keyed by country name
pub type GuideCache = BTreeMap<String, SurvivalGuide>;

/// Top-level screens of the web app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Dashboard,
    Transactions,
    Budget,
    Chat,
    Settings,
    Tips,
}

impl FromStr for ViewState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(ViewState::Dashboard),
            "transactions" => Ok(ViewState::Transactions),
            "budget" => Ok(ViewState::Budget),
            "chat" => Ok(ViewState::Chat),
            "settings" => Ok(ViewState::Settings),
            "tips" => Ok(ViewState::Tips),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

/// A selectable country with its display currency and flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub currency: Currency,
    pub flag: String,
}

/// Immutable copy of the whole application state handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
    pub categories: Vec<Category>,
    pub shortcuts: Vec<QuickShortcut>,
    pub country: String,
    pub currency: Currency,
    pub survival_guide: Option<SurvivalGuide>,
    pub is_guide_loading: bool,
    pub is_loaded: bool,
}

/// State slice delivered to the component that renders a given view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewContent {
    /// Initial load has not finished yet
    Loading,
    #[serde(rename_all = "camelCase")]
    Dashboard {
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        currency: Currency,
        shortcuts: Vec<QuickShortcut>,
        categories: Vec<Category>,
    },
    #[serde(rename_all = "camelCase")]
    Transactions {
        transactions: Vec<Transaction>,
        currency: Currency,
        categories: Vec<Category>,
        shortcuts: Vec<QuickShortcut>,
    },
    #[serde(rename_all = "camelCase")]
    Budget {
        budgets: Vec<Budget>,
        goals: Vec<SavingsGoal>,
        currency: Currency,
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
    },
    #[serde(rename_all = "camelCase")]
    Tips {
        country: String,
        guide: Option<SurvivalGuide>,
        loading: bool,
    },
    #[serde(rename_all = "camelCase")]
    Chat {
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        goals: Vec<SavingsGoal>,
        country: String,
    },
    #[serde(rename_all = "camelCase")]
    Settings {
        categories: Vec<Category>,
        shortcuts: Vec<QuickShortcut>,
        transactions: Vec<Transaction>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameCategoryRequest {
    pub name: String,
}

/// Query string for category deletion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryRequest {
    /// Category name that records of the deleted category move to
    pub migrate_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryResponse {
    pub deleted: bool,
    pub migrated_to: Option<String>,
    pub migrated_transactions: usize,
    pub migrated_budgets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryResponse {
    pub renamed: bool,
    pub updated_transactions: usize,
    pub updated_budgets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionResponse {
    pub transaction: Transaction,
    /// Category synthesized because the transaction's category was unknown
    pub created_category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectCountryRequest {
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub country: String,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryListResponse {
    pub countries: Vec<CountryInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideResponse {
    pub country: String,
    pub guide: Option<SurvivalGuide>,
    pub loading: bool,
}

/// Log line forwarded from the web frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}
