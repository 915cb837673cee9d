use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Telegram identity of the customer, as reported by the bot transport
    pub id_telegram: String,
    pub name: String,
    pub address: Option<String>,
    /// Personal-data-processing consent flag
    pub consent_to_pd_proc: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
