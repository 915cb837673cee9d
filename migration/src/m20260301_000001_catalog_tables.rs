use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Columns shared by every catalog parameter table.
#[derive(DeriveIden)]
enum Param {
    Id,
    Title,
    Price,
    IsAvailable,
}

#[derive(DeriveIden)]
struct Levels;

#[derive(DeriveIden)]
struct Shapes;

#[derive(DeriveIden)]
struct Toppings;

#[derive(DeriveIden)]
struct Berries;

#[derive(DeriveIden)]
struct Decors;

#[derive(DeriveIden)]
enum Cakes {
    Table,
    Id,
    IsOriginal,
    Title,
    Image,
    Description,
    Text,
    LevelId,
    ShapeId,
    ToppingId,
    BerriesId,
    DecorId,
}

/// Catalog table with a free-text title (shapes, toppings, berries, decors).
fn titled_param_table<T: IntoTableRef + 'static>(table: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Param::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Param::Title).string_len(20).not_null())
        .col(
            ColumnDef::new(Param::Price)
                .decimal_len(6, 2)
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Param::IsAvailable)
                .boolean()
                .not_null()
                .default(false),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Levels: integer tier count, one row per value
        manager
            .create_table(
                Table::create()
                    .table(Levels)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Param::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Param::Title)
                            .integer()
                            .not_null()
                            .unique_key()
                            .check(Expr::col(Param::Title).between(1, 3)),
                    )
                    .col(
                        ColumnDef::new(Param::Price)
                            .decimal_len(6, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Param::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager.create_table(titled_param_table(Shapes)).await?;
        manager.create_table(titled_param_table(Toppings)).await?;
        manager.create_table(titled_param_table(Berries)).await?;
        manager.create_table(titled_param_table(Decors)).await?;

        // Cakes: mandatory slots are RESTRICT, optional slots SET NULL
        manager
            .create_table(
                Table::create()
                    .table(Cakes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cakes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Cakes::IsOriginal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cakes::Title).string_len(50).null())
                    .col(ColumnDef::new(Cakes::Image).string().null())
                    .col(ColumnDef::new(Cakes::Description).text().null())
                    .col(ColumnDef::new(Cakes::Text).string_len(100).null())
                    .col(ColumnDef::new(Cakes::LevelId).big_integer().not_null())
                    .col(ColumnDef::new(Cakes::ShapeId).big_integer().not_null())
                    .col(ColumnDef::new(Cakes::ToppingId).big_integer().not_null())
                    .col(ColumnDef::new(Cakes::BerriesId).big_integer().null())
                    .col(ColumnDef::new(Cakes::DecorId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cakes_level")
                            .from(Cakes::Table, Cakes::LevelId)
                            .to(Levels, Param::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cakes_shape")
                            .from(Cakes::Table, Cakes::ShapeId)
                            .to(Shapes, Param::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cakes_topping")
                            .from(Cakes::Table, Cakes::ToppingId)
                            .to(Toppings, Param::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cakes_berries")
                            .from(Cakes::Table, Cakes::BerriesId)
                            .to(Berries, Param::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cakes_decor")
                            .from(Cakes::Table, Cakes::DecorId)
                            .to(Decors, Param::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cakes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Decors).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Berries).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Toppings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shapes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Levels).to_owned())
            .await
    }
}
