//! Generic repository base for UUID-keyed SeaORM entities.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// Shared CRUD plumbing for the PostgreSQL repository implementations.
///
/// Domain repositories wrap this for the generic operations and add their
/// own queries (filters, joins, pagination) on top of [`Self::db`].
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// The underlying connection, for entity-specific queries
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn exists_by_id(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(E::find_by_id(id).one(&self.db).await?.is_some())
    }

    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().all(&self.db).await
    }

    /// Delete by primary key, returning the number of affected rows
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
    }
}
