use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create branch_offices table
        manager
            .create_table(
                Table::create()
                    .table(BranchOffices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BranchOffices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BranchOffices::Name).string().not_null())
                    .col(ColumnDef::new(BranchOffices::Address).text().not_null())
                    .col(
                        ColumnDef::new(BranchOffices::TotalCounter)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BranchOffices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BranchOffices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Likes).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Users::Dislikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::Image).string())
                    .col(ColumnDef::new(Users::BranchId).integer())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-branch_id")
                            .from(Users::Table, Users::BranchId)
                            .to(BranchOffices::Table, BranchOffices::Id)
                            // Removing a branch must not remove its staff, or the
                            // officer aggregate would drift behind the cascade.
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create branch_counters table
        manager
            .create_table(
                Table::create()
                    .table(BranchCounters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BranchCounters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BranchCounters::CounterLocation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BranchCounters::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(BranchCounters::BranchId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BranchCounters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BranchCounters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-branch_counters-user_id")
                            .from(BranchCounters::Table, BranchCounters::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-branch_counters-branch_id")
                            .from(BranchCounters::Table, BranchCounters::BranchId)
                            .to(BranchOffices::Table, BranchOffices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create company_profiles table
        manager
            .create_table(
                Table::create()
                    .table(CompanyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyProfiles::Name).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::Logo).text())
                    .col(
                        ColumnDef::new(CompanyProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanyProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_feedback_history table
        manager
            .create_table(
                Table::create()
                    .table(UserFeedbackHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserFeedbackHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::Dislikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::OfficerName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::BranchId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFeedbackHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_feedback_history-user_id")
                            .from(UserFeedbackHistory::Table, UserFeedbackHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_feedback_history-branch_id")
                            .from(UserFeedbackHistory::Table, UserFeedbackHistory::BranchId)
                            .to(BranchOffices::Table, BranchOffices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create total_data table (global aggregate, singleton row)
        manager
            .create_table(
                Table::create()
                    .table(TotalData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TotalData::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TotalData::TotalLikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalData::TotalDislikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalData::TotalOfficer)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalData::TotalVoted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalData::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TotalData::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create total_data_branch table (per-branch aggregate)
        manager
            .create_table(
                Table::create()
                    .table(TotalDataBranch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TotalDataBranch::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::NameOffice)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::TotalLikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::TotalDislikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::BranchId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TotalDataBranch::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-total_data_branch-branch_id")
                            .from(TotalDataBranch::Table, TotalDataBranch::BranchId)
                            .to(BranchOffices::Table, BranchOffices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation
        manager
            .drop_table(Table::drop().table(TotalDataBranch::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TotalData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserFeedbackHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompanyProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BranchCounters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BranchOffices::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FullName,
    Email,
    Password,
    Role,
    Likes,
    Dislikes,
    Image,
    BranchId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BranchOffices {
    Table,
    Id,
    Name,
    Address,
    TotalCounter,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BranchCounters {
    Table,
    Id,
    CounterLocation,
    UserId,
    BranchId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompanyProfiles {
    Table,
    Id,
    Name,
    Logo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserFeedbackHistory {
    Table,
    Id,
    Likes,
    Dislikes,
    OfficerName,
    UserId,
    BranchId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TotalData {
    Table,
    Id,
    TotalLikes,
    TotalDislikes,
    TotalOfficer,
    TotalVoted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TotalDataBranch {
    Table,
    Id,
    NameOffice,
    TotalLikes,
    TotalDislikes,
    BranchId,
    CreatedAt,
    UpdatedAt,
}
