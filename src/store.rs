use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::{entities::film, models::FilmFields};

/// Access to the `films` table. Every method issues exactly one statement.
#[derive(Clone)]
pub struct FilmStore {
    db: DatabaseConnection,
}

impl FilmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<film::Model>, DbErr> {
        film::Entity::find().all(&self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<film::Model>, DbErr> {
        film::Entity::find_by_id(id).one(&self.db).await
    }

    pub async fn insert(&self, fields: FilmFields) -> Result<i32, DbErr> {
        let model = film::ActiveModel {
            id: NotSet,
            title: Set(fields.title),
            year: Set(fields.year),
            genre: Set(fields.genre),
            rating: Set(fields.rating),
        };

        let res = film::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Overwrites every mutable column. Returns the number of rows touched, 0 when `id` is unknown.
    pub async fn update(&self, id: i32, fields: FilmFields) -> Result<u64, DbErr> {
        let model = film::ActiveModel {
            id: NotSet,
            title: Set(fields.title),
            year: Set(fields.year),
            genre: Set(fields.genre),
            rating: Set(fields.rating),
        };

        let res = film::Entity::update_many()
            .set(model)
            .filter(film::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let res = film::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}
