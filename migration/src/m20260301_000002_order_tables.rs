use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    IdTelegram,
    Name,
    Address,
    ConsentToPdProc,
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    Text,
}

#[derive(DeriveIden)]
enum PromoCodes {
    Table,
    Id,
    Code,
    Discount,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CakeId,
    ClientId,
    OrderDt,
    DeliveryDt,
    Address,
    PromoCodeId,
    Comment,
    ComplaintId,
}

#[derive(DeriveIden)]
enum Cakes {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::IdTelegram).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Clients::Name)
                            .string_len(30)
                            .not_null()
                            .default("Дорогой Гость"),
                    )
                    .col(ColumnDef::new(Clients::Address).string_len(80).null())
                    .col(
                        ColumnDef::new(Clients::ConsentToPdProc)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_id_telegram")
                    .table(Clients::Table)
                    .col(Clients::IdTelegram)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::Text).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromoCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::Discount)
                            .decimal_len(3, 2)
                            .not_null()
                            .check(Expr::col(PromoCodes::Discount).between(0, 1)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CakeId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::ClientId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Orders::OrderDt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::DeliveryDt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Orders::Address).string_len(80).null())
                    .col(ColumnDef::new(Orders::PromoCodeId).big_integer().null())
                    .col(ColumnDef::new(Orders::Comment).text().null())
                    .col(
                        ColumnDef::new(Orders::ComplaintId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_cake")
                            .from(Orders::Table, Orders::CakeId)
                            .to(Cakes::Table, Cakes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_client")
                            .from(Orders::Table, Orders::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_promo_code")
                            .from(Orders::Table, Orders::PromoCodeId)
                            .to(PromoCodes::Table, PromoCodes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_complaint")
                            .from(Orders::Table, Orders::ComplaintId)
                            .to(Complaints::Table, Complaints::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PromoCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_clients_id_telegram").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}
