use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CryptoPrices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CryptoPrices::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(CryptoPrices::Ticker).string_len(10).not_null()) // "btc_usd", "eth_usd"
                    .col(ColumnDef::new(CryptoPrices::Price).double().not_null())
                    .col(ColumnDef::new(CryptoPrices::Timestamp).big_integer().not_null()) // UNIX seconds
                    .to_owned(),
            )
            .await?;

        // Separate statements so the same migration runs on SQLite
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_crypto_prices_ticker")
                    .table(CryptoPrices::Table)
                    .col(CryptoPrices::Ticker)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_crypto_prices_ticker_timestamp")
                    .table(CryptoPrices::Table)
                    .col(CryptoPrices::Ticker)
                    .col(CryptoPrices::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CryptoPrices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CryptoPrices {
    Table,
    Id,
    Ticker,
    Price,
    Timestamp,
}
