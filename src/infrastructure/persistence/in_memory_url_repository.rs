//! Process-local URL repository for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};

/// In-memory store backed by two sharded maps: records by token, plus a
/// long-URL index for the get-or-create lookup.
///
/// Writers always lock the long-URL index before the token map; the token
/// map entry is filled first so any long URL visible through the index
/// already resolves to a record.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    by_token: DashMap<String, UrlRecord>,
    token_by_long_url: DashMap<String, String>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let Some(token) = self.token_by_long_url.get(long_url).map(|t| t.clone()) else {
            return Ok(None);
        };

        Ok(self.by_token.get(&token).map(|r| r.clone()))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.by_token.get(token).map(|r| r.clone()))
    }

    async fn insert(&self, record: UrlRecord) -> Result<(), StoreError> {
        match self.token_by_long_url.entry(record.long_url.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateLongUrl),
            Entry::Vacant(url_slot) => match self.by_token.entry(record.short_token.clone()) {
                Entry::Occupied(_) => Err(StoreError::DuplicateToken),
                Entry::Vacant(token_slot) => {
                    let token = record.short_token.clone();
                    token_slot.insert(record);
                    url_slot.insert(token);
                    Ok(())
                }
            },
        }
    }

    async fn increment_clicks(&self, token: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.by_token.get_mut(token).map(|mut record| {
            record.click_count += 1;
            record.click_count
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(long_url: &str, token: &str) -> UrlRecord {
        UrlRecord::new(long_url, token)
    }

    #[tokio::test]
    async fn test_insert_and_find_by_both_keys() {
        let repo = InMemoryUrlRepository::new();

        repo.insert(record("https://example.com", "a1b2c3d4e5f6"))
            .await
            .unwrap();

        let by_url = repo
            .find_by_long_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_url.short_token, "a1b2c3d4e5f6");
        assert_eq!(by_url.click_count, 0);

        let by_token = repo.find_by_token("a1b2c3d4e5f6").await.unwrap().unwrap();
        assert_eq!(by_token.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_find_misses_return_none() {
        let repo = InMemoryUrlRepository::new();

        assert!(
            repo.find_by_long_url("https://example.com")
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.find_by_token("a1b2c3d4e5f6").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let repo = InMemoryUrlRepository::new();

        repo.insert(record("https://one.example.com", "a1b2c3d4e5f6"))
            .await
            .unwrap();

        let result = repo
            .insert(record("https://two.example.com", "a1b2c3d4e5f6"))
            .await;
        assert!(matches!(result, Err(StoreError::DuplicateToken)));

        // The losing insert must leave no trace of its long URL.
        assert!(
            repo.find_by_long_url("https://two.example.com")
                .await
                .unwrap()
                .is_none()
        );

        repo.insert(record("https://two.example.com", "0123456789ab"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_long_url_rejected() {
        let repo = InMemoryUrlRepository::new();

        repo.insert(record("https://example.com", "a1b2c3d4e5f6"))
            .await
            .unwrap();

        let result = repo.insert(record("https://example.com", "0123456789ab")).await;
        assert!(matches!(result, Err(StoreError::DuplicateLongUrl)));

        // The original mapping is untouched.
        let existing = repo.find_by_token("a1b2c3d4e5f6").await.unwrap();
        assert!(existing.is_some());
        assert!(repo.find_by_token("0123456789ab").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_increment_clicks_counts_up() {
        let repo = InMemoryUrlRepository::new();
        repo.insert(record("https://example.com", "a1b2c3d4e5f6"))
            .await
            .unwrap();

        assert_eq!(
            repo.increment_clicks("a1b2c3d4e5f6").await.unwrap(),
            Some(1)
        );
        assert_eq!(
            repo.increment_clicks("a1b2c3d4e5f6").await.unwrap(),
            Some(2)
        );

        let stored = repo.find_by_token("a1b2c3d4e5f6").await.unwrap().unwrap();
        assert_eq!(stored.click_count, 2);
    }

    #[tokio::test]
    async fn test_increment_clicks_unknown_token() {
        let repo = InMemoryUrlRepository::new();

        assert_eq!(repo.increment_clicks("a1b2c3d4e5f6").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_increments_lose_no_updates() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        repo.insert(record("https://example.com", "a1b2c3d4e5f6"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..100 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.increment_clicks("a1b2c3d4e5f6").await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.find_by_token("a1b2c3d4e5f6").await.unwrap().unwrap();
        assert_eq!(stored.click_count, 100);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_same_url_have_one_winner() {
        let repo = Arc::new(InMemoryUrlRepository::new());

        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let token = format!("{i:012x}");
                repo.insert(record("https://example.com", &token)).await
            }));
        }

        let mut wins = 0;
        let mut losses = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => wins += 1,
                Err(StoreError::DuplicateLongUrl) => losses += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(losses, 19);
        assert!(
            repo.find_by_long_url("https://example.com")
                .await
                .unwrap()
                .is_some()
        );
    }
}
