use std::sync::Arc;

use axum_helpers::Envelope;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProfileError, ProfileResult};
use crate::models::{
    CreateProfileRequest, Profile, ProfileResponse, ProfileStats, PublicProfileResponse,
    UpdateProfileRequest,
};
use crate::repository::ProfileRepository;

/// Profile business logic
pub struct ProfileService<R> {
    repository: Arc<R>,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create the caller's profile; a user has at most one
    #[instrument(skip(self, request))]
    pub async fn create_profile(
        &self,
        user_id: Uuid,
        request: CreateProfileRequest,
    ) -> Envelope<ProfileResponse> {
        self.try_create_profile(user_id, request)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_create_profile(
        &self,
        user_id: Uuid,
        request: CreateProfileRequest,
    ) -> ProfileResult<Envelope<ProfileResponse>> {
        if self.repository.find_by_user_id(user_id).await?.is_some() {
            return Err(ProfileError::AlreadyExists(user_id));
        }

        let profile = self.repository.insert(Profile::new(user_id, request)).await?;
        Ok(Envelope::created(
            profile.into(),
            "profile created successfully",
        ))
    }

    /// Partial patch of the caller's profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Envelope<ProfileResponse> {
        self.try_update_profile(user_id, request)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> ProfileResult<Envelope<ProfileResponse>> {
        let mut profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        profile.apply_update(request);
        let updated = self.repository.update(profile).await?;

        Ok(Envelope::ok(updated.into(), "profile updated successfully"))
    }

    /// Owner view: the full representation regardless of visibility
    #[instrument(skip(self))]
    pub async fn get_my_profile(&self, user_id: Uuid) -> Envelope<ProfileResponse> {
        self.try_get_my_profile(user_id)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_get_my_profile(&self, user_id: Uuid) -> ProfileResult<Envelope<ProfileResponse>> {
        let profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        Ok(Envelope::ok(
            profile.into(),
            "profile retrieved successfully",
        ))
    }

    /// Public view of one profile. An absent profile and a private one are
    /// distinct outcomes; the visibility check is independent of the
    /// active flag.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: Uuid) -> Envelope<PublicProfileResponse> {
        self.try_get_profile(profile_id)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_get_profile(
        &self,
        profile_id: Uuid,
    ) -> ProfileResult<Envelope<PublicProfileResponse>> {
        let profile = self
            .repository
            .find_by_id(profile_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        if !profile.is_public {
            return Err(ProfileError::Private(profile_id));
        }

        Ok(Envelope::ok(
            profile.into(),
            "profile retrieved successfully",
        ))
    }

    /// All visible profiles
    #[instrument(skip(self))]
    pub async fn get_public_profiles(&self) -> Envelope<Vec<PublicProfileResponse>> {
        self.try_get_public_profiles()
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_get_public_profiles(
        &self,
    ) -> ProfileResult<Envelope<Vec<PublicProfileResponse>>> {
        let profiles = self.repository.find_public().await?;
        Ok(Envelope::ok(
            profiles.into_iter().map(Into::into).collect(),
            "public profiles retrieved successfully",
        ))
    }

    /// Search visible profiles by name substring. The term is assumed
    /// non-empty; the boundary validates that.
    #[instrument(skip(self))]
    pub async fn search_profiles(&self, term: &str) -> Envelope<Vec<PublicProfileResponse>> {
        self.try_search_profiles(term)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_search_profiles(
        &self,
        term: &str,
    ) -> ProfileResult<Envelope<Vec<PublicProfileResponse>>> {
        let profiles = self.repository.search(term).await?;
        Ok(Envelope::ok(
            profiles.into_iter().map(Into::into).collect(),
            "search completed successfully",
        ))
    }

    /// Visible profiles at an exact location
    #[instrument(skip(self))]
    pub async fn get_profiles_by_location(
        &self,
        location: &str,
    ) -> Envelope<Vec<PublicProfileResponse>> {
        self.try_get_profiles_by_location(location)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_get_profiles_by_location(
        &self,
        location: &str,
    ) -> ProfileResult<Envelope<Vec<PublicProfileResponse>>> {
        let profiles = self.repository.find_by_location(location).await?;
        Ok(Envelope::ok(
            profiles.into_iter().map(Into::into).collect(),
            "profiles by location retrieved successfully",
        ))
    }

    /// Soft delete: the row stays, the profile just goes inactive
    #[instrument(skip(self))]
    pub async fn delete_profile(&self, user_id: Uuid) -> Envelope<ProfileResponse> {
        self.try_delete_profile(user_id)
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_delete_profile(&self, user_id: Uuid) -> ProfileResult<Envelope<ProfileResponse>> {
        let mut profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        profile.deactivate();
        self.repository.update(profile).await?;

        Ok(Envelope::ok_empty("profile deleted successfully"))
    }

    /// Derived aggregate: private = active − public
    #[instrument(skip(self))]
    pub async fn get_profile_stats(&self) -> Envelope<ProfileStats> {
        self.try_get_profile_stats()
            .await
            .unwrap_or_else(ProfileError::envelope)
    }

    async fn try_get_profile_stats(&self) -> ProfileResult<Envelope<ProfileStats>> {
        let active = self.repository.count_active().await?;
        let public = self.repository.find_public().await?.len() as u64;

        Ok(Envelope::ok(
            ProfileStats {
                total_active_profiles: active,
                public_profiles: public,
                private_profiles: active.saturating_sub(public),
            },
            "profile statistics retrieved successfully",
        ))
    }
}

impl<R> Clone for ProfileService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProfileRepository;
    use axum_helpers::Status;

    fn create_request(first: &str) -> CreateProfileRequest {
        CreateProfileRequest {
            first_name: Some(first.to_string()),
            last_name: None,
            bio: None,
            phone: None,
            avatar_url: None,
            location: None,
            birth_date: None,
            website: None,
            is_public: None,
        }
    }

    fn stored(user_id: Uuid, public: bool) -> Profile {
        let mut profile = Profile::new(user_id, create_request("Ada"));
        profile.is_public = public;
        profile
    }

    #[tokio::test]
    async fn second_profile_for_a_user_is_a_conflict() {
        let user_id = Uuid::now_v7();
        let mut repo = MockProfileRepository::new();
        let existing = stored(user_id, true);
        repo.expect_find_by_user_id()
            .returning(move |_| Ok(Some(existing.clone())));
        // no insert expectation: the write must not happen

        let service = ProfileService::new(repo);
        let envelope = service.create_profile(user_id, create_request("Grace")).await;

        assert_eq!(envelope.status(), Status::Conflict);
        assert_eq!(envelope.message, "user already has a profile");
    }

    #[tokio::test]
    async fn create_profile_forces_the_user_id_and_active_flag() {
        let user_id = Uuid::now_v7();
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(move |p| p.user_id == user_id && p.is_active)
            .returning(|p| Ok(p));

        let service = ProfileService::new(repo);
        let envelope = service.create_profile(user_id, create_request("Ada")).await;

        assert_eq!(envelope.status(), Status::Created);
        let response = envelope.data.unwrap();
        assert_eq!(response.user_id, user_id);
        assert!(response.is_active);
    }

    #[tokio::test]
    async fn private_profile_read_is_forbidden_not_not_found() {
        let profile = stored(Uuid::now_v7(), false);
        let id = profile.id;

        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(profile.clone())));

        let service = ProfileService::new(repo);
        let envelope = service.get_profile(id).await;

        assert_eq!(envelope.status(), Status::Forbidden);
        assert_eq!(envelope.message, "profile is private");
    }

    #[tokio::test]
    async fn missing_profile_read_is_not_found() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProfileService::new(repo);
        let envelope = service.get_profile(Uuid::now_v7()).await;

        assert_eq!(envelope.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn owner_view_ignores_the_visibility_flag() {
        let user_id = Uuid::now_v7();
        let profile = stored(user_id, false);

        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));

        let service = ProfileService::new(repo);
        let envelope = service.get_my_profile(user_id).await;

        assert_eq!(envelope.status(), Status::Ok);
        assert!(!envelope.data.unwrap().is_public);
    }

    #[tokio::test]
    async fn update_is_a_partial_patch() {
        let user_id = Uuid::now_v7();
        let profile = stored(user_id, true);

        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));
        repo.expect_update()
            .withf(|p| {
                p.bio.as_deref() == Some("mathematician")
                    && p.first_name.as_deref() == Some("Ada")
            })
            .returning(|p| Ok(p));

        let service = ProfileService::new(repo);
        let envelope = service
            .update_profile(
                user_id,
                UpdateProfileRequest {
                    bio: Some("mathematician".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(envelope.status(), Status::Ok);
        let response = envelope.data.unwrap();
        assert_eq!(response.bio.as_deref(), Some("mathematician"));
        assert_eq!(response.first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn delete_soft_deletes_instead_of_removing() {
        let user_id = Uuid::now_v7();
        let profile = stored(user_id, true);

        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));
        repo.expect_update()
            .withf(|p| !p.is_active)
            .returning(|p| Ok(p));

        let service = ProfileService::new(repo);
        let envelope = service.delete_profile(user_id).await;

        assert_eq!(envelope.status(), Status::Ok);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn delete_missing_profile_is_not_found() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id().returning(|_| Ok(None));

        let service = ProfileService::new(repo);
        let envelope = service.delete_profile(Uuid::now_v7()).await;

        assert_eq!(envelope.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn stats_derive_private_from_the_difference() {
        let mut repo = MockProfileRepository::new();
        repo.expect_count_active().returning(|| Ok(5));
        repo.expect_find_public().returning(|| {
            Ok(vec![
                stored(Uuid::now_v7(), true),
                stored(Uuid::now_v7(), true),
            ])
        });

        let service = ProfileService::new(repo);
        let envelope = service.get_profile_stats().await;

        let stats = envelope.data.unwrap();
        assert_eq!(stats.total_active_profiles, 5);
        assert_eq!(stats.public_profiles, 2);
        assert_eq!(stats.private_profiles, 3);
    }
}
