//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crypto_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ticker: String, // "btc_usd", "eth_usd"
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub timestamp: i64, // UNIX seconds at ingestion
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
