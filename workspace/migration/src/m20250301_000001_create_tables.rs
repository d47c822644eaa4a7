use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create businesses table (one row per owner)
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(pk_auto(Businesses::Id))
                    .col(string(Businesses::OwnerId).unique_key())
                    .col(string_null(Businesses::OwnerEmail))
                    .col(string(Businesses::Name))
                    .col(string(Businesses::Description).default(""))
                    .col(string(Businesses::Industry).default(""))
                    .col(date(Businesses::FoundedDate))
                    .col(text(Businesses::Logo).default(""))
                    .col(decimal(Businesses::TotalInvestment).decimal_len(16, 4).default(0))
                    .col(decimal(Businesses::TotalExpenses).decimal_len(16, 4).default(0))
                    .col(decimal(Businesses::TotalSales).decimal_len(16, 4).default(0))
                    .col(timestamp_with_time_zone(Businesses::CreatedAt))
                    .col(timestamp_with_time_zone(Businesses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(integer(Transactions::BusinessId))
                    .col(string_len(Transactions::Kind, 20))
                    .col(decimal(Transactions::Amount).decimal_len(16, 4))
                    .col(string(Transactions::Description))
                    .col(timestamp_with_time_zone(Transactions::Date))
                    .col(string(Transactions::Category).default("other"))
                    .col(timestamp_with_time_zone(Transactions::CreatedAt))
                    .col(timestamp_with_time_zone(Transactions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_business")
                            .from(Transactions::Table, Transactions::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes backing the list filters and the date-descending sort
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_business_date")
                    .table(Transactions::Table)
                    .col(Transactions::BusinessId)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_business_kind")
                    .table(Transactions::Table)
                    .col(Transactions::BusinessId)
                    .col(Transactions::Kind)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_business_category")
                    .table(Transactions::Table)
                    .col(Transactions::BusinessId)
                    .col(Transactions::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
    OwnerId,
    OwnerEmail,
    Name,
    Description,
    Industry,
    FoundedDate,
    Logo,
    TotalInvestment,
    TotalExpenses,
    TotalSales,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    BusinessId,
    Kind,
    Amount,
    Description,
    Date,
    Category,
    CreatedAt,
    UpdatedAt,
}
