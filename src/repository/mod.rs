use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::StorageConfig;
use crate::errors::{BakeCakeError, Result};

pub mod backends;
pub mod models;

pub use models::{
    Cake, CakeParam, Client, Complaint, NewCake, NewClient, NewOrder, NewParam, NewPromoCode,
    Order, ParamKind, PromoCode, TrackedLink,
};

/// Catalog access: the five parameter kinds and the cakes composed of them.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_param(&self, kind: ParamKind, id: i64) -> Result<Option<CakeParam>>;
    async fn list_params(&self, kind: ParamKind) -> Result<Vec<CakeParam>>;
    /// Persist a catalog entry; a duplicate level count is a `Conflict`.
    async fn save_param(&self, kind: ParamKind, param: NewParam) -> Result<i64>;
    async fn set_param_availability(&self, kind: ParamKind, id: i64, available: bool)
    -> Result<()>;
    /// Deleting an entry still referenced by a mandatory cake slot is a
    /// `Conflict`; optional slots are cleared by the schema instead.
    async fn delete_param(&self, kind: ParamKind, id: i64) -> Result<()>;

    async fn save_cake(&self, cake: NewCake) -> Result<i64>;
    /// Fetch a cake with every slot resolved.
    async fn get_cake(&self, id: i64) -> Result<Option<Cake>>;
    /// Catalog cakes currently offerable, i.e. every constituent available.
    async fn list_available_cakes(&self) -> Result<Vec<Cake>>;
    async fn delete_cake(&self, id: i64) -> Result<()>;
}

/// Clients, promo codes, complaints and orders.
#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_client_by_telegram(&self, id_telegram: &str) -> Result<Option<Client>>;
    async fn save_client(&self, client: NewClient) -> Result<i64>;

    async fn find_promo_code(&self, code: &str) -> Result<Option<PromoCode>>;
    /// Persist a promo code; a duplicate code is a `Conflict`.
    async fn save_promo_code(&self, promo: NewPromoCode) -> Result<i64>;

    /// Create an order; the backend stamps `order_dt` at insert.
    async fn create_order(&self, order: NewOrder) -> Result<i64>;
    /// Fetch an order with cake, client and attachments resolved.
    async fn get_order(&self, id: i64) -> Result<Option<Order>>;
    /// Attach a complaint to an order (at most one per order).
    async fn file_complaint(&self, order_id: i64, text: &str) -> Result<i64>;
}

/// Issued short links.
#[async_trait::async_trait]
pub trait LinkRepository: Send + Sync {
    /// Highest numeric identifier ever issued, 0 when none.
    async fn max_external_id(&self) -> Result<i64>;
    async fn insert_link(
        &self,
        external_id: i64,
        short_url: &str,
        place_of_use: &str,
        created_at: DateTime<Utc>,
    ) -> Result<TrackedLink>;
    async fn find_link_by_place(&self, place_of_use: &str) -> Result<Option<TrackedLink>>;
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<backends::sea_orm::SeaOrmRepository>> {
        match config.backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let repository = backends::sea_orm::SeaOrmRepository::new(
                    &config.database_url,
                    &config.backend,
                )
                .await?;
                Ok(Arc::new(repository))
            }
            other => Err(BakeCakeError::database_config(format!(
                "Unknown repository backend: {}. Supported: sqlite, mysql, postgres, mariadb",
                other
            ))),
        }
    }
}
