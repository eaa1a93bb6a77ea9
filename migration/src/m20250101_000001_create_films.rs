use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Films::Table)
                    .if_not_exists()
                    .col(pk_auto(Films::Id))
                    .col(string(Films::Title))
                    .col(integer_null(Films::Year))
                    .col(string(Films::Genre))
                    .col(
                        integer(Films::Rating)
                            .check(Expr::col(Films::Rating).between(1, 10)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Films::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Films {
    Table,
    Id,
    Title,
    Year,
    Genre,
    Rating,
}
