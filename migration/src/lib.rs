pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_catalog_tables;
mod m20260301_000002_order_tables;
mod m20260301_000003_links_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_catalog_tables::Migration),
            Box::new(m20260301_000002_order_tables::Migration),
            Box::new(m20260301_000003_links_table::Migration),
        ]
    }
}
