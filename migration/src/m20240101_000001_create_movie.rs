use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // `id` is the catalog's identifier, never generated locally.
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(integer(Movie::Id).primary_key())
                    .col(string_len_uniq(Movie::Title, 250))
                    .col(string_len_uniq(Movie::ImageUrl, 250))
                    .col(integer(Movie::Year))
                    .col(double_null(Movie::Rating))
                    .col(string_len_null(Movie::Review, 250))
                    .col(text(Movie::Description))
                    .col(integer_null(Movie::Ranking))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    ImageUrl,
    Year,
    Rating,
    Review,
    Description,
    Ranking,
}
