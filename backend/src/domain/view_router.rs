//! View router: which slice of state each view receives.

use shared::{StateSnapshot, ViewContent, ViewState};

pub fn route_view(view: ViewState, snapshot: StateSnapshot) -> ViewContent {
    if !snapshot.is_loaded {
        return ViewContent::Loading;
    }

    match view {
        ViewState::Dashboard => ViewContent::Dashboard {
            transactions: snapshot.transactions,
            budgets: snapshot.budgets,
            currency: snapshot.currency,
            shortcuts: snapshot.shortcuts,
            categories: snapshot.categories,
        },
        ViewState::Transactions => ViewContent::Transactions {
            transactions: snapshot.transactions,
            currency: snapshot.currency,
            categories: snapshot.categories,
            shortcuts: snapshot.shortcuts,
        },
        ViewState::Budget => ViewContent::Budget {
            budgets: snapshot.budgets,
            goals: snapshot.goals,
            currency: snapshot.currency,
            categories: snapshot.categories,
            transactions: snapshot.transactions,
        },
        ViewState::Tips => ViewContent::Tips {
            country: snapshot.country,
            guide: snapshot.survival_guide,
            loading: snapshot.is_guide_loading,
        },
        ViewState::Chat => ViewContent::Chat {
            transactions: snapshot.transactions,
            budgets: snapshot.budgets,
            goals: snapshot.goals,
            country: snapshot.country,
        },
        ViewState::Settings => ViewContent::Settings {
            categories: snapshot.categories,
            shortcuts: snapshot.shortcuts,
            transactions: snapshot.transactions,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countries::CountryTable;
    use crate::domain::store::AppData;
    use crate::test_utils::{sample_guide, sample_transaction};

    fn loaded_snapshot() -> StateSnapshot {
        let mut data = AppData::with_defaults(&CountryTable::default(), "Germany");
        data.transactions.push(sample_transaction("t1", "Food"));
        data.survival_guide = Some(sample_guide("Germany"));
        data.is_loaded = true;
        data.snapshot()
    }

    #[test]
    fn test_every_view_waits_for_load() {
        let mut snapshot = loaded_snapshot();
        snapshot.is_loaded = false;

        for view in [
            ViewState::Dashboard,
            ViewState::Transactions,
            ViewState::Budget,
            ViewState::Tips,
            ViewState::Chat,
            ViewState::Settings,
        ] {
            assert_eq!(route_view(view, snapshot.clone()), ViewContent::Loading);
        }
    }

    #[test]
    fn test_tips_gets_guide_slice() {
        let content = route_view(ViewState::Tips, loaded_snapshot());

        assert_eq!(
            content,
            ViewContent::Tips {
                country: "Germany".to_string(),
                guide: Some(sample_guide("Germany")),
                loading: false,
            }
        );
    }

    #[test]
    fn test_settings_gets_categories_and_shortcuts() {
        let snapshot = loaded_snapshot();

        let ViewContent::Settings {
            categories,
            shortcuts,
            transactions,
        } = route_view(ViewState::Settings, snapshot.clone())
        else {
            panic!("expected settings view");
        };
        assert_eq!(categories, snapshot.categories);
        assert_eq!(shortcuts, snapshot.shortcuts);
        assert_eq!(transactions, snapshot.transactions);
    }

    #[test]
    fn test_budget_view_carries_currency() {
        let ViewContent::Budget { currency, transactions, .. } =
            route_view(ViewState::Budget, loaded_snapshot())
        else {
            panic!("expected budget view");
        };
        assert_eq!(currency, shared::Currency::Eur);
        assert_eq!(transactions.len(), 1);
    }
}
