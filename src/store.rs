use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
    ranking,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, best-rated first, with freshly computed ranks written back.
    pub async fn list_ranked(&self) -> AppResult<Vec<movie::Model>> {
        let mut movies =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;

        let changed = ranking::assign_ranks(&mut movies);
        if !changed.is_empty() {
            let txn = self.db.begin().await?;
            for (id, rank) in &changed {
                movie::Entity::update_many()
                    .col_expr(movie::Column::Ranking, Expr::value(*rank))
                    .filter(movie::Column::Id.eq(*id))
                    .exec(&txn)
                    .await?;
            }
            txn.commit().await?;
        }

        debug!(total = movies.len(), changed = changed.len(), "ranked movies");
        Ok(movies)
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        if self.find(new.id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!("movie {} is already in your list", new.id)));
        }

        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Set(new.id),
            title: Set(new.title),
            image_url: Set(new.image_url),
            year: Set(new.year),
            rating: Set(None),
            review: Set(None),
            description: Set(new.description),
            ranking: Set(None),
        };

        model.insert(&self.db).await.map_err(|err| match unique_violation(&err) {
            Some(detail) => AppError::AlreadyExists(format!(
                "\"{title}\" clashes with a movie already in your list ({detail})"
            )),
            None => err.into(),
        })
    }

    /// `rating: None` keeps whatever rating is stored; the review is always replaced.
    pub async fn save_review(
        &self,
        movie: movie::Model,
        rating: Option<f64>,
        review: String,
    ) -> AppResult<movie::Model> {
        let mut model: movie::ActiveModel = movie.into();
        if let Some(rating) = rating {
            model.rating = Set(Some(rating));
        }
        model.review = Set(Some(review));
        Ok(model.update(&self.db).await?)
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}
