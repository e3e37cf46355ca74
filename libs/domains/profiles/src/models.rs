use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// User profile.
///
/// `user_id` names the identity service's user record and nothing more.
/// `is_active` is the soft-delete flag: deleted profiles keep their row
/// and can be reactivated.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub website: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a profile for `user_id`. The id, timestamps, and the active
    /// flag are system-assigned; a fresh profile is always active.
    pub fn new(user_id: Uuid, request: CreateProfileRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            first_name: request.first_name,
            last_name: request.last_name,
            bio: request.bio,
            phone: request.phone,
            avatar_url: request.avatar_url,
            location: request.location,
            birth_date: request.birth_date,
            website: request.website,
            is_public: request.is_public.unwrap_or(true),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Partial patch: only supplied fields overwrite, absent fields stay
    /// untouched (products replace; profiles patch)
    pub fn apply_update(&mut self, request: UpdateProfileRequest) {
        if let Some(first_name) = request.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = request.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(bio) = request.bio {
            self.bio = Some(bio);
        }
        if let Some(phone) = request.phone {
            self.phone = Some(phone);
        }
        if let Some(avatar_url) = request.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(location) = request.location {
            self.location = Some(location);
        }
        if let Some(birth_date) = request.birth_date {
            self.birth_date = Some(birth_date);
        }
        if let Some(website) = request.website {
            self.website = Some(website);
        }
        if let Some(is_public) = request.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// The shared visibility predicate for public reads
    pub fn is_visible(&self) -> bool {
        self.is_public && self.is_active
    }

    /// first+last when both present, else whichever is present
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

/// Request body for creating a profile
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    pub is_public: Option<bool>,
}

/// Request body for the partial profile update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    pub is_public: Option<bool>,
}

/// Owner view: the full representation, including private fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Derived, never persisted
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub website: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let full_name = profile.full_name();
        Self {
            id: profile.id,
            user_id: profile.user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name,
            bio: profile.bio,
            phone: profile.phone,
            avatar_url: profile.avatar_url,
            location: profile.location,
            birth_date: profile.birth_date,
            website: profile.website,
            is_public: profile.is_public,
            is_active: profile.is_active,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Public view: the subset other users may see
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicProfileResponse {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for PublicProfileResponse {
    fn from(profile: Profile) -> Self {
        let full_name = profile.full_name();
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            location: profile.location,
            website: profile.website,
            created_at: profile.created_at,
        }
    }
}

/// Computed-on-read aggregate, not persisted
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileStats {
    pub total_active_profiles: u64,
    pub public_profiles: u64,
    pub private_profiles: u64,
}

/// Query parameters for the public profile search
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProfileSearchParams {
    /// Case-sensitive substring matched against first or last name
    #[validate(length(min = 1))]
    pub q: String,
}
