use chrono::NaiveDate;
use group_finance_core::errors::CoreError;
use group_finance_core::models::forecast::{ForecastResult, HealthLevel, MonthlyData};
use group_finance_core::models::ledger::Ledger;
use group_finance_core::models::transaction::{Transaction, TransactionType};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionType
// ═══════════════════════════════════════════════════════════════════

mod transaction_type {
    use super::*;

    #[test]
    fn display_income() {
        assert_eq!(TransactionType::Income.to_string(), "income");
    }

    #[test]
    fn display_expense() {
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn equality() {
        assert_eq!(TransactionType::Income, TransactionType::Income);
        assert_ne!(TransactionType::Income, TransactionType::Expense);
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"income\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"expense\""
        );
        let back: TransactionType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(back, TransactionType::Expense);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_has_no_description() {
        let t = Transaction::new(TransactionType::Income, "dues", 100.0, d(2024, 1, 15));
        assert_eq!(t.transaction_type, TransactionType::Income);
        assert_eq!(t.category, "dues");
        assert_eq!(t.amount, 100.0);
        assert_eq!(t.date, d(2024, 1, 15));
        assert!(t.description.is_none());
        assert!(t.paid_by.is_none());
        assert!(t.receipt_note.is_none());
    }

    #[test]
    fn with_description_attaches_text() {
        let t = Transaction::with_description(
            TransactionType::Expense,
            "venue",
            60_000.0,
            d(2024, 1, 20),
            "venue rental",
        );
        assert_eq!(t.description.as_deref(), Some("venue rental"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(TransactionType::Income, "dues", 1.0, d(2024, 1, 1));
        let b = Transaction::new(TransactionType::Income, "dues", 1.0, d(2024, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn month_key_is_year_dash_month() {
        let t = Transaction::new(TransactionType::Income, "dues", 1.0, d(2023, 9, 30));
        assert_eq!(t.month_key(), "2023-09");
    }

    #[test]
    fn month_key_matches_window_helper() {
        use group_finance_core::services::month_range;

        let date = d(2023, 12, 31);
        let t = Transaction::new(TransactionType::Income, "dues", 1.0, date);
        assert_eq!(t.month_key(), month_range::month_key(date));
    }

    #[test]
    fn serde_roundtrip() {
        let t = Transaction::with_description(
            TransactionType::Income,
            "dues",
            100_000.0,
            d(2024, 1, 15),
            "january dues",
        );
        let json = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn deserialize_without_optional_fields() {
        // description / paid_by / receipt_note may be absent entirely
        let json = format!(
            r#"{{"id":"{}","transaction_type":"income","category":"dues","amount":5.0,"date":"2024-01-15"}}"#,
            uuid::Uuid::new_v4()
        );
        let t: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(t.category, "dues");
        assert!(t.description.is_none());
        assert!(t.paid_by.is_none());
        assert!(t.receipt_note.is_none());
    }

    #[test]
    fn deserialize_requires_category() {
        let json = format!(
            r#"{{"id":"{}","transaction_type":"income","amount":5.0,"date":"2024-01-15"}}"#,
            uuid::Uuid::new_v4()
        );
        assert!(serde_json::from_str::<Transaction>(&json).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;
    use group_finance_core::models::ledger::Category;

    #[test]
    fn new_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.transactions.is_empty());
        assert!(ledger.categories.is_empty());
        assert!(ledger.monthly_budget_limit.is_none());
    }

    #[test]
    fn category_holds_name_and_icon() {
        let c = Category::new("dues", "💰");
        assert_eq!(c.name, "dues");
        assert_eq!(c.icon, "💰");
    }

    #[test]
    fn deserialize_without_categories_or_limit() {
        // Data written before categories and the limit existed still loads
        let ledger: Ledger = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();
        assert!(ledger.categories.is_empty());
        assert!(ledger.monthly_budget_limit.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HealthLevel — classification rules
// ═══════════════════════════════════════════════════════════════════

mod health_level {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(HealthLevel::Stable.to_string(), "Stable");
        assert_eq!(HealthLevel::Caution.to_string(), "Caution");
        assert_eq!(HealthLevel::Risk.to_string(), "Risk");
    }

    #[test]
    fn messages_are_fixed() {
        assert_eq!(
            HealthLevel::Stable.message(),
            "net profit has remained positive"
        );
        assert_eq!(
            HealthLevel::Caution.message(),
            "recent net profit is trending downward, review spending"
        );
        assert_eq!(
            HealthLevel::Risk.message(),
            "net profit is negative or all of the next three months are forecast to run a deficit"
        );
    }

    #[test]
    fn no_data_is_stable() {
        assert_eq!(
            HealthLevel::classify(&[-100.0, -100.0, -100.0], &[-1.0, -1.0, -1.0], false),
            HealthLevel::Stable
        );
    }

    #[test]
    fn any_recent_negative_is_risk() {
        assert_eq!(
            HealthLevel::classify(&[100.0, -1.0, 200.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Risk
        );
    }

    #[test]
    fn all_forecast_negative_is_risk() {
        assert_eq!(
            HealthLevel::classify(&[100.0, 200.0, 300.0], &[-1.0, -2.0, -3.0], true),
            HealthLevel::Risk
        );
    }

    #[test]
    fn mixed_forecast_is_not_risk() {
        assert_eq!(
            HealthLevel::classify(&[100.0, 200.0, 300.0], &[-1.0, 2.0, -3.0], true),
            HealthLevel::Stable
        );
    }

    #[test]
    fn downward_first_vs_last_is_caution() {
        assert_eq!(
            HealthLevel::classify(&[300.0, 200.0, 100.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Caution
        );
    }

    #[test]
    fn dip_then_recovery_is_stable() {
        // Only first and last are compared; the middle dip is ignored.
        assert_eq!(
            HealthLevel::classify(&[300.0, 10.0, 300.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Stable
        );
    }

    #[test]
    fn flat_recent_is_stable() {
        assert_eq!(
            HealthLevel::classify(&[100.0, 100.0, 100.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Stable
        );
    }

    #[test]
    fn single_recent_value_cannot_be_caution() {
        assert_eq!(
            HealthLevel::classify(&[100.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Stable
        );
    }

    #[test]
    fn recent_negative_wins_over_caution() {
        // Both rules fire; Risk has priority.
        assert_eq!(
            HealthLevel::classify(&[300.0, 200.0, -1.0], &[50.0, 50.0, 50.0], true),
            HealthLevel::Risk
        );
    }

    #[test]
    fn serde_roundtrip() {
        for level in [HealthLevel::Stable, HealthLevel::Caution, HealthLevel::Risk] {
            let json = serde_json::to_string(&level).unwrap();
            let back: HealthLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(level, back);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MonthlyData / ForecastResult
// ═══════════════════════════════════════════════════════════════════

mod forecast_models {
    use super::*;

    #[test]
    fn monthly_data_serde_roundtrip() {
        let m = MonthlyData {
            month: "2024-02".to_string(),
            label: "Feb 2024".to_string(),
            income: 120_000.0,
            expense: 70_000.0,
            net_profit: 50_000.0,
            is_forecast: false,
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: MonthlyData = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn forecast_result_serde_roundtrip() {
        let r = ForecastResult {
            monthly: vec![],
            health_level: HealthLevel::Caution,
            health_message: HealthLevel::Caution.message().to_string(),
            forecast_avg_net_profit: 42.0,
            has_data: true,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: ForecastResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CoreError — display
// ═══════════════════════════════════════════════════════════════════

mod errors {
    use super::*;

    #[test]
    fn validation_error_display() {
        let e = CoreError::ValidationError("bad amount".to_string());
        assert_eq!(e.to_string(), "Transaction validation failed: bad amount");
    }

    #[test]
    fn not_found_display() {
        let e = CoreError::TransactionNotFound("abc".to_string());
        assert_eq!(e.to_string(), "Transaction not found: abc");
    }

    #[test]
    fn from_serde_json_error() {
        let parse_err = serde_json::from_str::<Transaction>("not json").unwrap_err();
        let e: CoreError = parse_err.into();
        assert!(matches!(e, CoreError::Deserialization(_)));
    }
}
