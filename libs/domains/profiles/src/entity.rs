//! SeaORM entity for the profiles table and the pure conversions between
//! rows and the domain model.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<Date>,
    pub website: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Profile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            phone: model.phone,
            avatar_url: model.avatar_url,
            location: model.location,
            birth_date: model.birth_date,
            website: model.website,
            is_public: model.is_public,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Profile> for ActiveModel {
    fn from(profile: crate::models::Profile) -> Self {
        ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user_id),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            bio: Set(profile.bio),
            phone: Set(profile.phone),
            avatar_url: Set(profile.avatar_url),
            location: Set(profile.location),
            birth_date: Set(profile.birth_date),
            website: Set(profile.website),
            is_public: Set(profile.is_public),
            is_active: Set(profile.is_active),
            created_at: Set(profile.created_at.into()),
            updated_at: Set(profile.updated_at.into()),
        }
    }
}
