use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20240101_000001_create_accounts_table::Migration,
        )]
    }
}

mod m20240101_000001_create_accounts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_accounts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Mirrors entities::account Model
            manager
                .create_table(
                    Table::create()
                        .table(Accounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Accounts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Accounts::AccountNumber)
                                .string_len(10)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::PinHash)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::Balance)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::AccountHolderName)
                                .string_len(100)
                                .null(),
                        )
                        .col(ColumnDef::new(Accounts::Status).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Accounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Uniqueness of the natural key lives in storage, not only in the service
            manager
                .create_index(
                    Index::create()
                        .name("idx_account_number")
                        .table(Accounts::Table)
                        .col(Accounts::AccountNumber)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Accounts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Accounts {
        Table,
        Id,
        AccountNumber,
        PinHash,
        Balance,
        AccountHolderName,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}
