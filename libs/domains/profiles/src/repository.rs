use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProfileError, ProfileResult};
use crate::models::Profile;

/// Repository trait for profile persistence.
///
/// `find_public`, `search`, and `find_by_location` all apply the shared
/// visibility predicate (`is_public && is_active`); soft-deleted rows never
/// appear in them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, profile: Profile) -> ProfileResult<Profile>;

    async fn update(&self, profile: Profile) -> ProfileResult<Profile>;

    async fn find_by_id(&self, id: Uuid) -> ProfileResult<Option<Profile>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> ProfileResult<Option<Profile>>;

    async fn find_public(&self) -> ProfileResult<Vec<Profile>>;

    /// Case-sensitive substring match on first or last name, visible
    /// profiles only
    async fn search(&self, term: &str) -> ProfileResult<Vec<Profile>>;

    /// Exact location match, visible profiles only
    async fn find_by_location(&self, location: &str) -> ProfileResult<Vec<Profile>>;

    /// Number of active profiles (public and private alike)
    async fn count_active(&self) -> ProfileResult<u64>;
}

/// In-memory profile store (for tests and local development)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut profiles: Vec<Profile>) -> Vec<Profile> {
        // newest first for deterministic listings
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        profiles
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: Profile) -> ProfileResult<Profile> {
        let mut profiles = self.profiles.write().await;

        // unique user_id backstop, as the store's index would reject it
        if profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(ProfileError::AlreadyExists(profile.user_id));
        }

        profiles.insert(profile.id, profile.clone());
        tracing::info!(profile_id = %profile.id, user_id = %profile.user_id, "created profile");
        Ok(profile)
    }

    async fn update(&self, profile: Profile) -> ProfileResult<Profile> {
        let mut profiles = self.profiles.write().await;

        if !profiles.contains_key(&profile.id) {
            return Err(ProfileError::NotFound);
        }

        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn find_by_id(&self, id: Uuid) -> ProfileResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> ProfileResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_public(&self) -> ProfileResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(Self::sorted(
            profiles.values().filter(|p| p.is_visible()).cloned().collect(),
        ))
    }

    async fn search(&self, term: &str) -> ProfileResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(Self::sorted(
            profiles
                .values()
                .filter(|p| {
                    p.is_visible()
                        && (p.first_name.as_deref().is_some_and(|n| n.contains(term))
                            || p.last_name.as_deref().is_some_and(|n| n.contains(term)))
                })
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_location(&self, location: &str) -> ProfileResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(Self::sorted(
            profiles
                .values()
                .filter(|p| p.is_visible() && p.location.as_deref() == Some(location))
                .cloned()
                .collect(),
        ))
    }

    async fn count_active(&self) -> ProfileResult<u64> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().filter(|p| p.is_active).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProfileRequest;

    fn profile(first: &str, public: bool) -> Profile {
        let mut profile = Profile::new(
            Uuid::now_v7(),
            CreateProfileRequest {
                first_name: Some(first.to_string()),
                last_name: Some("Tester".to_string()),
                bio: None,
                phone: None,
                avatar_url: None,
                location: Some("Lima".to_string()),
                birth_date: None,
                website: None,
                is_public: Some(public),
            },
        );
        profile.is_public = public;
        profile
    }

    #[tokio::test]
    async fn one_profile_per_user() {
        let repo = InMemoryProfileRepository::new();
        let first = profile("Ada", true);
        let mut second = profile("Grace", true);
        second.user_id = first.user_id;

        repo.insert(first).await.unwrap();
        let result = repo.insert(second).await;
        assert!(matches!(result, Err(ProfileError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn public_listing_excludes_private_and_inactive() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(profile("Ada", true)).await.unwrap();
        repo.insert(profile("Grace", false)).await.unwrap();

        let mut deleted = profile("Joan", true);
        deleted.deactivate();
        repo.insert(deleted).await.unwrap();

        let visible = repo.find_public().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn search_matches_first_or_last_name_case_sensitively() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(profile("Ada", true)).await.unwrap();
        repo.insert(profile("Grace", true)).await.unwrap();

        let hits = repo.search("Ada").await.unwrap();
        assert_eq!(hits.len(), 1);

        // last name matches too
        let hits = repo.search("Tester").await.unwrap();
        assert_eq!(hits.len(), 2);

        // case-sensitive
        let hits = repo.search("ada").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn location_match_is_exact() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(profile("Ada", true)).await.unwrap();

        assert_eq!(repo.find_by_location("Lima").await.unwrap().len(), 1);
        assert!(repo.find_by_location("Li").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn count_active_includes_private_profiles() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(profile("Ada", true)).await.unwrap();
        repo.insert(profile("Grace", false)).await.unwrap();

        let mut deleted = profile("Joan", true);
        deleted.deactivate();
        repo.insert(deleted).await.unwrap();

        assert_eq!(repo.count_active().await.unwrap(), 2);
    }
}
