//! SeaORM entity modules for the business ledger: one `Business` profile per
//! user and the `Transaction` records feeding its running totals.

pub mod business;
pub mod transaction;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::business::Entity as Business;
    pub use super::transaction::Entity as Transaction;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::transaction::TransactionKind;
    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn sample_business(totals: (i64, i64, i64)) -> business::Model {
        let now = Utc::now();
        business::Model {
            id: 1,
            owner_id: "user-1".to_string(),
            owner_email: Some("owner@example.com".to_string()),
            name: "Acme".to_string(),
            description: String::new(),
            industry: String::new(),
            founded_date: now.date_naive(),
            logo: String::new(),
            total_investment: Decimal::from(totals.0),
            total_expenses: Decimal::from(totals.1),
            total_sales: Decimal::from(totals.2),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn net_profit_is_sales_minus_expenses() {
        let business = sample_business((0, 40, 100));
        assert_eq!(business.net_profit(), Decimal::from(60));
    }

    #[test]
    fn roi_is_zero_without_investment() {
        let business = sample_business((0, 40, 100));
        assert_eq!(business.roi(), Decimal::ZERO);
    }

    #[test]
    fn roi_is_net_profit_over_investment() {
        let business = sample_business((200, 40, 100));
        // (100 - 40) / 200 * 100 = 30%
        assert_eq!(business.roi(), Decimal::from(30));
    }

    #[test]
    fn total_with_delta_targets_the_matching_bucket() {
        let business = sample_business((10, 20, 30));
        assert_eq!(
            business.total_with_delta(TransactionKind::Investment, Decimal::from(5)),
            Decimal::from(15)
        );
        assert_eq!(
            business.total_with_delta(TransactionKind::Expense, Decimal::from(-5)),
            Decimal::from(15)
        );
        assert_eq!(
            business.total_with_delta(TransactionKind::Sale, Decimal::from(70)),
            Decimal::from(100)
        );
    }

    #[test]
    fn total_with_delta_clamps_at_zero() {
        let business = sample_business((0, 0, 30));
        assert_eq!(
            business.total_with_delta(TransactionKind::Sale, Decimal::from(-50)),
            Decimal::ZERO
        );
    }

    #[test]
    fn kind_parses_wire_names_only() {
        assert_eq!(
            TransactionKind::parse("investment"),
            Ok(TransactionKind::Investment)
        );
        assert_eq!(TransactionKind::parse("expense"), Ok(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("sale"), Ok(TransactionKind::Sale));
        assert!(TransactionKind::parse("Sale").is_err());
        assert!(TransactionKind::parse("transfer").is_err());
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now();

        let business1 = business::ActiveModel {
            owner_id: Set("user-1".to_string()),
            owner_email: Set(Some("one@example.com".to_string())),
            name: Set("Acme".to_string()),
            description: Set("Widgets".to_string()),
            industry: Set("Manufacturing".to_string()),
            founded_date: Set(now.date_naive()),
            logo: Set(String::new()),
            total_investment: Set(Decimal::ZERO),
            total_expenses: Set(Decimal::ZERO),
            total_sales: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let business2 = business::ActiveModel {
            owner_id: Set("user-2".to_string()),
            owner_email: Set(None),
            name: Set("Globex".to_string()),
            description: Set(String::new()),
            industry: Set(String::new()),
            founded_date: Set(now.date_naive()),
            logo: Set(String::new()),
            total_investment: Set(Decimal::ZERO),
            total_expenses: Set(Decimal::ZERO),
            total_sales: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The owner key is unique: a second business for user-1 must fail.
        let duplicate = business::ActiveModel {
            owner_id: Set("user-1".to_string()),
            owner_email: Set(None),
            name: Set("Acme Two".to_string()),
            description: Set(String::new()),
            industry: Set(String::new()),
            founded_date: Set(now.date_naive()),
            logo: Set(String::new()),
            total_investment: Set(Decimal::ZERO),
            total_expenses: Set(Decimal::ZERO),
            total_sales: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        let sale = transaction::ActiveModel {
            business_id: Set(business1.id),
            kind: Set(TransactionKind::Sale),
            amount: Set(Decimal::from(100)),
            description: Set("First sale".to_string()),
            date: Set(now),
            category: Set("other".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let expense = transaction::ActiveModel {
            business_id: Set(business1.id),
            kind: Set(TransactionKind::Expense),
            amount: Set(Decimal::from(40)),
            description: Set("Supplies".to_string()),
            date: Set(now),
            category: Set("operations".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Round-trip: amounts and kinds survive the store.
        let fetched = Transaction::find_by_id(sale.id).one(&db).await?.unwrap();
        assert_eq!(fetched.kind, TransactionKind::Sale);
        assert_eq!(fetched.amount, Decimal::from(100));

        // Relation: transactions resolve to their owning business.
        let owner = fetched.find_related(Business).one(&db).await?.unwrap();
        assert_eq!(owner.id, business1.id);
        assert_eq!(owner.owner_id, "user-1");

        // Filtering by business keeps ledgers isolated.
        let business1_txs = Transaction::find()
            .filter(transaction::Column::BusinessId.eq(business1.id))
            .all(&db)
            .await?;
        assert_eq!(business1_txs.len(), 2);
        assert!(business1_txs.iter().any(|t| t.id == expense.id));

        let business2_txs = Transaction::find()
            .filter(transaction::Column::BusinessId.eq(business2.id))
            .all(&db)
            .await?;
        assert!(business2_txs.is_empty());

        Ok(())
    }
}
