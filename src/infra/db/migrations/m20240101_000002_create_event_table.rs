//! Migration: Create the event table referencing region.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_region_table::Region;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Type).string_len(10).not_null())
                    .col(ColumnDef::new(Event::Year).integer().not_null())
                    .col(ColumnDef::new(Event::Country).string().not_null())
                    .col(ColumnDef::new(Event::Host).string().not_null())
                    .col(ColumnDef::new(Event::Noc).string_len(3).not_null())
                    .col(ColumnDef::new(Event::Start).date().null())
                    .col(ColumnDef::new(Event::End).date().null())
                    .col(ColumnDef::new(Event::Duration).integer().null())
                    .col(ColumnDef::new(Event::DisabilitiesIncluded).text().null())
                    .col(ColumnDef::new(Event::Countries).integer().null())
                    .col(ColumnDef::new(Event::Events).integer().null())
                    .col(ColumnDef::new(Event::Sports).integer().null())
                    .col(ColumnDef::new(Event::ParticipantsM).integer().null())
                    .col(ColumnDef::new(Event::ParticipantsF).integer().null())
                    .col(ColumnDef::new(Event::Participants).integer().null())
                    .col(ColumnDef::new(Event::Highlights).text().null())
                    .col(ColumnDef::new(Event::Url).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_region")
                            .from(Event::Table, Event::Noc)
                            .to(Region::Table, Region::Noc)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Filtering by host region and year is the common list query
        manager
            .create_index(
                Index::create()
                    .name("idx_event_noc")
                    .table(Event::Table)
                    .col(Event::Noc)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_year")
                    .table(Event::Table)
                    .col(Event::Year)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
    Type,
    Year,
    Country,
    Host,
    Noc,
    Start,
    End,
    Duration,
    DisabilitiesIncluded,
    Countries,
    Events,
    Sports,
    ParticipantsM,
    ParticipantsF,
    Participants,
    Highlights,
    Url,
}
