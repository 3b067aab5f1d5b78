use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_reference_tables::{Categories, Neighbourhoods};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Businesses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Businesses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Businesses::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Businesses::Description).text().null())
                    .col(ColumnDef::new(Businesses::Address).string().null())
                    .col(ColumnDef::new(Businesses::Phone).string().null())
                    .col(ColumnDef::new(Businesses::Email).string().null())
                    .col(ColumnDef::new(Businesses::Website).string().null())
                    .col(ColumnDef::new(Businesses::Latitude).double().null())
                    .col(ColumnDef::new(Businesses::Longitude).double().null())
                    .col(ColumnDef::new(Businesses::CategoryId).uuid().null())
                    .col(ColumnDef::new(Businesses::NeighbourhoodId).uuid().null())
                    .col(
                        ColumnDef::new(Businesses::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_category_id")
                            .from(Businesses::Table, Businesses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_neighbourhood_id")
                            .from(Businesses::Table, Businesses::NeighbourhoodId)
                            .to(Neighbourhoods::Table, Neighbourhoods::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_businesses_category_id")
                    .table(Businesses::Table)
                    .col(Businesses::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_businesses_neighbourhood_id")
                    .table(Businesses::Table)
                    .col(Businesses::NeighbourhoodId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Address,
    Phone,
    Email,
    Website,
    Latitude,
    Longitude,
    CategoryId,
    NeighbourhoodId,
    Status,
    CreatedAt,
}
