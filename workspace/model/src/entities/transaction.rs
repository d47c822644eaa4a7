use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The ledger bucket a transaction belongs to. Each kind maps onto exactly
/// one running total on the owning business.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[sea_orm(string_value = "investment")]
    Investment,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "sale")]
    Sale,
}

impl TransactionKind {
    /// Parse the lowercase wire name used by the HTTP API.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "investment" => Ok(Self::Investment),
            "expense" => Ok(Self::Expense),
            "sale" => Ok(Self::Sale),
            other => Err(format!("invalid transaction type: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Expense => "expense",
            Self::Sale => "sale",
        }
    }
}

/// A dated financial event affecting one business's totals.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_id: i32,
    pub kind: TransactionKind,
    /// Always positive; the kind decides which total it feeds.
    pub amount: Decimal,
    pub description: String,
    pub date: DateTimeUtc,
    pub category: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A transaction belongs to exactly one business, which is also its
    /// authorization boundary.
    #[sea_orm(
        belongs_to = "super::business::Entity",
        from = "Column::BusinessId",
        to = "super::business::Column::Id"
    )]
    Business,
}

impl Related<super::business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
