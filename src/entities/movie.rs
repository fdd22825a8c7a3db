use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(unique)]
    pub image_url: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub review: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Position in the last listing; only meaningful right after one.
    pub ranking: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
