use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{info, warn};

use crate::errors::{BakeCakeError, Result};
use crate::repository::models::{
    Cake, CakeParam, Client, Complaint, NewCake, NewClient, NewOrder, NewParam, NewPromoCode,
    Order, ParamKind, PromoCode, TrackedLink,
};
use crate::repository::{CatalogRepository, LinkRepository, OrderRepository};

use migration::{
    Migrator, MigratorTrait,
    entities::{berries, cake, client, complaint, decor, level, link, order, promo_code, shape, topping},
};

/// Convert a titled catalog row (shapes, toppings, berries, decors) into
/// the domain parameter. Works for any of the four identical model types.
macro_rules! titled_model_to_param {
    ($model:expr) => {
        CakeParam {
            id: $model.id,
            title: $model.title,
            price: $model.price,
            is_available: $model.is_available,
        }
    };
}

enum ConstraintViolation {
    Unique,
    ForeignKey,
}

#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmRepository {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(BakeCakeError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let repository = SeaOrmRepository {
            db,
            backend_name: backend_name.to_string(),
        };

        repository.run_migrations().await?;

        warn!(
            "{} repository initialized.",
            repository.backend_name.to_uppercase()
        );
        Ok(repository)
    }

    /// Connect to SQLite (auto-create, WAL, pragmas tuned for a small bot)
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                BakeCakeError::database_config(format!("failed to parse SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            BakeCakeError::database_connection(format!("failed to connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Connect to MySQL/MariaDB/PostgreSQL
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(20)
            .min_connections(2)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .idle_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            BakeCakeError::database_connection(format!(
                "failed to connect to {}: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| BakeCakeError::database_operation(format!("migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Classify a driver error as a constraint violation, if it is one.
    ///
    /// Unique: SQLite 2067/1555, MySQL 1062, PostgreSQL 23505.
    /// Foreign key: SQLite 787, MySQL 1451/1452, PostgreSQL 23503.
    fn constraint_violation(err: &sea_orm::DbErr) -> Option<ConstraintViolation> {
        let sqlx_err = match err {
            sea_orm::DbErr::Exec(sea_orm::RuntimeErr::SqlxError(e)) => e,
            sea_orm::DbErr::Query(sea_orm::RuntimeErr::SqlxError(e)) => e,
            _ => return None,
        };

        let sea_orm::sqlx::Error::Database(db_err) = &**sqlx_err else {
            return None;
        };

        match db_err.code().as_deref() {
            Some("2067") | Some("1555") | Some("1062") | Some("23505") => {
                Some(ConstraintViolation::Unique)
            }
            Some("787") | Some("1451") | Some("1452") | Some("23503") => {
                Some(ConstraintViolation::ForeignKey)
            }
            _ => None,
        }
    }

    /// Map an insert/update error, turning unique violations into `Conflict`
    /// and foreign key violations into `Validation` (a referenced row is
    /// missing from the catalog).
    fn map_write_err(err: sea_orm::DbErr, what: &str) -> BakeCakeError {
        match Self::constraint_violation(&err) {
            Some(ConstraintViolation::Unique) => {
                BakeCakeError::conflict(format!("{} already exists", what))
            }
            Some(ConstraintViolation::ForeignKey) => {
                BakeCakeError::validation(format!("{} references a missing row", what))
            }
            None => BakeCakeError::database_operation(format!("failed to save {}: {}", what, err)),
        }
    }

    fn level_model_to_param(model: level::Model) -> CakeParam {
        CakeParam {
            id: model.id,
            title: model.title.to_string(),
            price: model.price,
            is_available: model.is_available,
        }
    }

    /// Resolve every slot of a cake row into the domain model.
    ///
    /// Mandatory slots are protected by RESTRICT; a dangling one is a data
    /// integrity failure. Optional slots are cleared by SET NULL, so a
    /// dangling optional id is simply treated as absent.
    async fn resolve_cake(&self, model: cake::Model) -> Result<Cake> {
        let level = level::Entity::find_by_id(model.level_id)
            .one(&self.db)
            .await?
            .map(Self::level_model_to_param)
            .ok_or_else(|| {
                BakeCakeError::data_integrity(format!(
                    "cake #{} references missing level {}",
                    model.id, model.level_id
                ))
            })?;

        let shape = shape::Entity::find_by_id(model.shape_id)
            .one(&self.db)
            .await?
            .map(|m| titled_model_to_param!(m))
            .ok_or_else(|| {
                BakeCakeError::data_integrity(format!(
                    "cake #{} references missing shape {}",
                    model.id, model.shape_id
                ))
            })?;

        let topping = topping::Entity::find_by_id(model.topping_id)
            .one(&self.db)
            .await?
            .map(|m| titled_model_to_param!(m))
            .ok_or_else(|| {
                BakeCakeError::data_integrity(format!(
                    "cake #{} references missing topping {}",
                    model.id, model.topping_id
                ))
            })?;

        let berries = match model.berries_id {
            Some(id) => berries::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
            None => None,
        };

        let decor = match model.decor_id {
            Some(id) => decor::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
            None => None,
        };

        Ok(Cake {
            id: model.id,
            is_original: model.is_original,
            title: model.title,
            image: model.image,
            description: model.description,
            text: model.text,
            level,
            shape,
            topping,
            berries,
            decor,
        })
    }

    fn client_model_to_client(model: client::Model) -> Client {
        Client {
            id: model.id,
            id_telegram: model.id_telegram,
            name: model.name,
            address: model.address,
            consent_to_pd_proc: model.consent_to_pd_proc,
        }
    }

    fn promo_model_to_promo(model: promo_code::Model) -> PromoCode {
        PromoCode {
            id: model.id,
            code: model.code,
            discount: model.discount,
        }
    }

    fn link_model_to_link(model: link::Model) -> TrackedLink {
        TrackedLink {
            id: model.id,
            external_id: model.external_id,
            short_url: model.short_url,
            place_of_use: model.place_of_use,
            created_at: model.created_at,
        }
    }
}

#[async_trait::async_trait]
impl CatalogRepository for SeaOrmRepository {
    async fn get_param(&self, kind: ParamKind, id: i64) -> Result<Option<CakeParam>> {
        let param = match kind {
            ParamKind::Level => level::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Self::level_model_to_param),
            ParamKind::Shape => shape::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
            ParamKind::Topping => topping::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
            ParamKind::Berries => berries::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
            ParamKind::Decor => decor::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| titled_model_to_param!(m)),
        };
        Ok(param)
    }

    async fn list_params(&self, kind: ParamKind) -> Result<Vec<CakeParam>> {
        let params = match kind {
            ParamKind::Level => level::Entity::find()
                .order_by_asc(level::Column::Title)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Self::level_model_to_param)
                .collect(),
            ParamKind::Shape => shape::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| titled_model_to_param!(m))
                .collect(),
            ParamKind::Topping => topping::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| titled_model_to_param!(m))
                .collect(),
            ParamKind::Berries => berries::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| titled_model_to_param!(m))
                .collect(),
            ParamKind::Decor => decor::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| titled_model_to_param!(m))
                .collect(),
        };
        Ok(params)
    }

    async fn save_param(&self, kind: ParamKind, param: NewParam) -> Result<i64> {
        param.validate(kind)?;

        let id = match kind {
            ParamKind::Level => {
                let count: i32 = param.title.parse().map_err(|_| {
                    BakeCakeError::validation(format!("invalid level count \"{}\"", param.title))
                })?;
                let model = level::ActiveModel {
                    title: Set(count),
                    price: Set(param.price),
                    is_available: Set(param.is_available),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_write_err(e, "level"))?
                    .id
            }
            ParamKind::Shape => {
                let model = shape::ActiveModel {
                    title: Set(param.title),
                    price: Set(param.price),
                    is_available: Set(param.is_available),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_write_err(e, "shape"))?
                    .id
            }
            ParamKind::Topping => {
                let model = topping::ActiveModel {
                    title: Set(param.title),
                    price: Set(param.price),
                    is_available: Set(param.is_available),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_write_err(e, "topping"))?
                    .id
            }
            ParamKind::Berries => {
                let model = berries::ActiveModel {
                    title: Set(param.title),
                    price: Set(param.price),
                    is_available: Set(param.is_available),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_write_err(e, "berries"))?
                    .id
            }
            ParamKind::Decor => {
                let model = decor::ActiveModel {
                    title: Set(param.title),
                    price: Set(param.price),
                    is_available: Set(param.is_available),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_write_err(e, "decor"))?
                    .id
            }
        };

        info!("Catalog entry saved: {:?} #{}", kind, id);
        Ok(id)
    }

    async fn set_param_availability(
        &self,
        kind: ParamKind,
        id: i64,
        available: bool,
    ) -> Result<()> {
        let result = match kind {
            ParamKind::Level => {
                level::Entity::update_many()
                    .col_expr(level::Column::IsAvailable, Expr::value(available))
                    .filter(level::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
            ParamKind::Shape => {
                shape::Entity::update_many()
                    .col_expr(shape::Column::IsAvailable, Expr::value(available))
                    .filter(shape::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
            ParamKind::Topping => {
                topping::Entity::update_many()
                    .col_expr(topping::Column::IsAvailable, Expr::value(available))
                    .filter(topping::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
            ParamKind::Berries => {
                berries::Entity::update_many()
                    .col_expr(berries::Column::IsAvailable, Expr::value(available))
                    .filter(berries::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
            ParamKind::Decor => {
                decor::Entity::update_many()
                    .col_expr(decor::Column::IsAvailable, Expr::value(available))
                    .filter(decor::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(BakeCakeError::not_found(format!(
                "catalog entry not found: {:?} #{}",
                kind, id
            )));
        }
        Ok(())
    }

    async fn delete_param(&self, kind: ParamKind, id: i64) -> Result<()> {
        let result = match kind {
            ParamKind::Level => level::Entity::delete_by_id(id).exec(&self.db).await,
            ParamKind::Shape => shape::Entity::delete_by_id(id).exec(&self.db).await,
            ParamKind::Topping => topping::Entity::delete_by_id(id).exec(&self.db).await,
            ParamKind::Berries => berries::Entity::delete_by_id(id).exec(&self.db).await,
            ParamKind::Decor => decor::Entity::delete_by_id(id).exec(&self.db).await,
        };

        let result = result.map_err(|e| match Self::constraint_violation(&e) {
            Some(ConstraintViolation::ForeignKey) => BakeCakeError::conflict(format!(
                "catalog entry {:?} #{} is still used by a cake",
                kind, id
            )),
            _ => BakeCakeError::database_operation(format!("failed to delete entry: {}", e)),
        })?;

        if result.rows_affected == 0 {
            return Err(BakeCakeError::not_found(format!(
                "catalog entry not found: {:?} #{}",
                kind, id
            )));
        }

        info!("Catalog entry deleted: {:?} #{}", kind, id);
        Ok(())
    }

    async fn save_cake(&self, new_cake: NewCake) -> Result<i64> {
        let model = cake::ActiveModel {
            is_original: Set(new_cake.is_original),
            title: Set(new_cake.title),
            image: Set(new_cake.image),
            description: Set(new_cake.description),
            text: Set(new_cake.text),
            level_id: Set(new_cake.level_id),
            shape_id: Set(new_cake.shape_id),
            topping_id: Set(new_cake.topping_id),
            berries_id: Set(new_cake.berries_id),
            decor_id: Set(new_cake.decor_id),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, "cake"))?;

        info!("Cake saved: #{}", inserted.id);
        Ok(inserted.id)
    }

    async fn get_cake(&self, id: i64) -> Result<Option<Cake>> {
        let Some(model) = cake::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(Some(self.resolve_cake(model).await?))
    }

    async fn list_available_cakes(&self) -> Result<Vec<Cake>> {
        let models = cake::Entity::find()
            .filter(cake::Column::IsOriginal.eq(true))
            .all(&self.db)
            .await?;

        let mut cakes = Vec::with_capacity(models.len());
        for model in models {
            let cake = self.resolve_cake(model).await?;
            if cake.verify() {
                cakes.push(cake);
            }
        }
        Ok(cakes)
    }

    async fn delete_cake(&self, id: i64) -> Result<()> {
        let result = cake::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BakeCakeError::database_operation(format!("failed to delete cake: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(BakeCakeError::not_found(format!("cake not found: #{}", id)));
        }

        info!("Cake deleted: #{}", id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrderRepository for SeaOrmRepository {
    async fn find_client_by_telegram(&self, id_telegram: &str) -> Result<Option<Client>> {
        let model = client::Entity::find()
            .filter(client::Column::IdTelegram.eq(id_telegram))
            .one(&self.db)
            .await?;
        Ok(model.map(Self::client_model_to_client))
    }

    async fn save_client(&self, new_client: NewClient) -> Result<i64> {
        let name = match new_client.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Дорогой Гость".to_string(),
        };

        let model = client::ActiveModel {
            id_telegram: Set(new_client.id_telegram),
            name: Set(name),
            address: Set(new_client.address),
            consent_to_pd_proc: Set(new_client.consent_to_pd_proc),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, "client"))?;
        Ok(inserted.id)
    }

    async fn find_promo_code(&self, code: &str) -> Result<Option<PromoCode>> {
        let model = promo_code::Entity::find()
            .filter(promo_code::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(Self::promo_model_to_promo))
    }

    async fn save_promo_code(&self, promo: NewPromoCode) -> Result<i64> {
        promo.validate()?;

        let model = promo_code::ActiveModel {
            code: Set(promo.code.clone()),
            discount: Set(promo.discount),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, &format!("promo code \"{}\"", promo.code)))?;

        info!("Promo code saved: {}", promo.code);
        Ok(inserted.id)
    }

    async fn create_order(&self, new_order: NewOrder) -> Result<i64> {
        let model = order::ActiveModel {
            cake_id: Set(new_order.cake_id),
            client_id: Set(new_order.client_id),
            // Stamped here, immutable afterwards
            order_dt: Set(Utc::now()),
            delivery_dt: Set(new_order.delivery_dt),
            address: Set(new_order.address),
            promo_code_id: Set(new_order.promo_code_id),
            comment: Set(new_order.comment),
            complaint_id: Set(None),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, "order"))?;

        info!("Order created: #{}", inserted.id);
        Ok(inserted.id)
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        let Some(model) = order::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let cake = self
            .get_cake(model.cake_id)
            .await?
            .ok_or_else(|| {
                BakeCakeError::data_integrity(format!(
                    "order #{} references missing cake {}",
                    model.id, model.cake_id
                ))
            })?;

        let client = client::Entity::find_by_id(model.client_id)
            .one(&self.db)
            .await?
            .map(Self::client_model_to_client)
            .ok_or_else(|| {
                BakeCakeError::data_integrity(format!(
                    "order #{} references missing client {}",
                    model.id, model.client_id
                ))
            })?;

        let promo_code = match model.promo_code_id {
            Some(promo_id) => promo_code::Entity::find_by_id(promo_id)
                .one(&self.db)
                .await?
                .map(Self::promo_model_to_promo),
            None => None,
        };

        let complaint = match model.complaint_id {
            Some(complaint_id) => complaint::Entity::find_by_id(complaint_id)
                .one(&self.db)
                .await?
                .map(|m| Complaint {
                    id: m.id,
                    text: m.text,
                }),
            None => None,
        };

        Ok(Some(Order {
            id: model.id,
            cake,
            client,
            order_dt: model.order_dt,
            delivery_dt: model.delivery_dt,
            address: model.address,
            promo_code,
            comment: model.comment,
            complaint,
        }))
    }

    async fn file_complaint(&self, order_id: i64, text: &str) -> Result<i64> {
        let txn = self.db.begin().await?;

        let Some(order_model) = order::Entity::find_by_id(order_id).one(&txn).await? else {
            return Err(BakeCakeError::not_found(format!(
                "order not found: #{}",
                order_id
            )));
        };

        if order_model.complaint_id.is_some() {
            return Err(BakeCakeError::conflict(format!(
                "order #{} already has a complaint attached",
                order_id
            )));
        }

        let complaint_model = complaint::ActiveModel {
            text: Set(text.to_string()),
            ..Default::default()
        };
        let inserted = complaint_model.insert(&txn).await?;

        order::Entity::update_many()
            .col_expr(order::Column::ComplaintId, Expr::value(Some(inserted.id)))
            .filter(order::Column::Id.eq(order_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!("Complaint #{} attached to order #{}", inserted.id, order_id);
        Ok(inserted.id)
    }
}

#[async_trait::async_trait]
impl LinkRepository for SeaOrmRepository {
    async fn max_external_id(&self) -> Result<i64> {
        let model = link::Entity::find()
            .order_by_desc(link::Column::ExternalId)
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.external_id).unwrap_or(0))
    }

    async fn insert_link(
        &self,
        external_id: i64,
        short_url: &str,
        place_of_use: &str,
        created_at: DateTime<Utc>,
    ) -> Result<TrackedLink> {
        let model = link::ActiveModel {
            external_id: Set(external_id),
            short_url: Set(short_url.to_string()),
            place_of_use: Set(place_of_use.to_string()),
            created_at: Set(created_at),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_write_err(e, &format!("link id {}", external_id)))?;

        info!("Short link issued: {} ({})", inserted.short_url, place_of_use);
        Ok(Self::link_model_to_link(inserted))
    }

    async fn find_link_by_place(&self, place_of_use: &str) -> Result<Option<TrackedLink>> {
        let model = link::Entity::find()
            .filter(link::Column::PlaceOfUse.eq(place_of_use))
            .order_by_desc(link::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(model.map(Self::link_model_to_link))
    }
}
