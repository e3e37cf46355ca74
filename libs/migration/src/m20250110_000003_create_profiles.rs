use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_uuid(Profiles::Id))
                    .col(uuid(Profiles::UserId))
                    .col(string_len_null(Profiles::FirstName, 100))
                    .col(string_len_null(Profiles::LastName, 100))
                    .col(text_null(Profiles::Bio))
                    .col(string_len_null(Profiles::Phone, 20))
                    .col(string_len_null(Profiles::AvatarUrl, 500))
                    .col(string_len_null(Profiles::Location, 200))
                    .col(date_null(Profiles::BirthDate))
                    .col(string_len_null(Profiles::Website, 500))
                    .col(boolean(Profiles::IsPublic).default(true))
                    .col(boolean(Profiles::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Profiles::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Profiles::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One profile per user; backstops the service-level existence check.
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_user_id")
                    .table(Profiles::Table)
                    .col(Profiles::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_location")
                    .table(Profiles::Table)
                    .col(Profiles::Location)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Bio,
    Phone,
    AvatarUrl,
    Location,
    BirthDate,
    Website,
    IsPublic,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
