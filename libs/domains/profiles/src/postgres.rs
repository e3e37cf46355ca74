use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProfileError, ProfileResult},
    models::Profile,
    repository::ProfileRepository,
};

pub struct PgProfileRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// `is_public && is_active`, the predicate every public read shares
    fn visible() -> Condition {
        Condition::all()
            .add(entity::Column::IsPublic.eq(true))
            .add(entity::Column::IsActive.eq(true))
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn insert(&self, profile: Profile) -> ProfileResult<Profile> {
        let user_id = profile.user_id;
        let model = self.base.insert(profile.into()).await.map_err(|e| {
            // the unique user_id index is the atomic backstop for the
            // one-profile-per-user check
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => ProfileError::AlreadyExists(user_id),
                _ => e.into(),
            }
        })?;

        tracing::info!(profile_id = %model.id, user_id = %user_id, "created profile");
        Ok(model.into())
    }

    async fn update(&self, profile: Profile) -> ProfileResult<Profile> {
        let model = self.base.update(profile.into()).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => ProfileError::NotFound,
            other => other.into(),
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> ProfileResult<Option<Profile>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> ProfileResult<Option<Profile>> {
        let model = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_public(&self) -> ProfileResult<Vec<Profile>> {
        let models = entity::Entity::find()
            .filter(Self::visible())
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search(&self, term: &str) -> ProfileResult<Vec<Profile>> {
        // LIKE '%term%' is case-sensitive in PostgreSQL, matching the
        // contract of this search
        let models = entity::Entity::find()
            .filter(
                Self::visible().add(
                    Condition::any()
                        .add(entity::Column::FirstName.contains(term))
                        .add(entity::Column::LastName.contains(term)),
                ),
            )
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_location(&self, location: &str) -> ProfileResult<Vec<Profile>> {
        let models = entity::Entity::find()
            .filter(Self::visible().add(entity::Column::Location.eq(location)))
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_active(&self) -> ProfileResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::IsActive.eq(true))
            .count(self.base.db())
            .await?;
        Ok(count)
    }
}
