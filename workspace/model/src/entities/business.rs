use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::transaction::TransactionKind;

/// The single financial profile owned by one user.
///
/// The three running totals are maintained incrementally by the ledger
/// handlers; `net_profit` and `roi` are derived on read and never stored.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Opaque identifier of the owning user. The sole authorization key;
    /// at most one business exists per owner.
    #[sea_orm(unique)]
    pub owner_id: String,
    /// Display-only email, if the identity layer supplied one. Never used
    /// as a join key.
    pub owner_email: Option<String>,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub founded_date: Date,
    /// Embedded logo image as a `data:image/` URI, or empty.
    pub logo: String,
    pub total_investment: Decimal,
    pub total_expenses: Decimal,
    pub total_sales: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A business owns many ledger transactions.
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The running total matching a transaction kind.
    pub fn total_for(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Investment => self.total_investment,
            TransactionKind::Expense => self.total_expenses,
            TransactionKind::Sale => self.total_sales,
        }
    }

    /// The total for `kind` after applying a signed delta, clamped at zero.
    /// Stored totals are never negative.
    pub fn total_with_delta(&self, kind: TransactionKind, delta: Decimal) -> Decimal {
        (self.total_for(kind) + delta).max(Decimal::ZERO)
    }

    /// Net profit derived from the running totals.
    pub fn net_profit(&self) -> Decimal {
        self.total_sales - self.total_expenses
    }

    /// Return on investment as a percentage. Zero when nothing was invested.
    pub fn roi(&self) -> Decimal {
        if self.total_investment > Decimal::ZERO {
            self.net_profit() / self.total_investment * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}
