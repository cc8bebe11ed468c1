//! Country table: which countries can be selected and which currency each one uses.

use shared::{CountryInfo, Currency};

#[derive(Debug, Clone, PartialEq)]
pub struct CountryTable {
    countries: Vec<CountryInfo>,
}

impl CountryTable {
    pub fn new(countries: Vec<CountryInfo>) -> Self {
        Self { countries }
    }

    /// Countries in display order
    pub fn countries(&self) -> &[CountryInfo] {
        &self.countries
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&CountryInfo> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn currency_of(&self, name: &str) -> Option<Currency> {
        self.get(name).map(|c| c.currency)
    }
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::new(builtin_countries())
    }
}

pub fn builtin_countries() -> Vec<CountryInfo> {
    [
        ("Germany", Currency::Eur, "🇩🇪"),
        ("United States", Currency::Usd, "🇺🇸"),
        ("United Kingdom", Currency::Gbp, "🇬🇧"),
        ("Canada", Currency::Cad, "🇨🇦"),
        ("Australia", Currency::Aud, "🇦🇺"),
        ("Japan", Currency::Jpy, "🇯🇵"),
    ]
    .into_iter()
    .map(|(name, currency, flag)| CountryInfo {
        name: name.to_string(),
        currency,
        flag: flag.to_string(),
    })
    .collect()
}
