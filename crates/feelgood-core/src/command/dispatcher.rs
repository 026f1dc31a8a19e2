//! Command dispatcher.
//!
//! Stateless across messages: each inbound message is parsed and routed on
//! its own. The dispatcher returns the reply chunks instead of sending them,
//! so the chat transport stays outside the core crate.

use feelgood_types::config::PLATFORM_MESSAGE_LIMIT;
use feelgood_types::profile::{UserId, UserProfile};

use crate::command::parser::Command;
use crate::format;
use crate::mood::{self, UNKNOWN_MOOD_REPLY};
use crate::recommend::RecommendationService;
use crate::repository::profile::ProfileStore;

/// Reply sent when a profile could not be stored.
pub const PROFILE_SAVE_FAILED_REPLY: &str =
    "Sorry, I couldn't save your profile right now. Please try again later.";

/// A chat message as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub author_id: UserId,
    /// Whether the author is a bot account (this includes ourselves).
    pub author_is_bot: bool,
    pub content: String,
}

impl InboundMessage {
    pub fn new(author_id: UserId, author_is_bot: bool, content: impl Into<String>) -> Self {
        Self {
            author_id,
            author_is_bot,
            content: content.into(),
        }
    }
}

/// Routes parsed commands to the mood and profile flows.
///
/// Generic over the profile store so tests can use an in-memory one.
pub struct Dispatcher<P: ProfileStore> {
    profiles: P,
    recommender: RecommendationService,
    max_message_chars: usize,
}

impl<P: ProfileStore> Dispatcher<P> {
    pub fn new(profiles: P, recommender: RecommendationService) -> Self {
        Self {
            profiles,
            recommender,
            max_message_chars: PLATFORM_MESSAGE_LIMIT,
        }
    }

    /// Override the chunk size (clamped to the platform limit).
    pub fn with_max_message_chars(mut self, max_chars: usize) -> Self {
        self.max_message_chars = max_chars.clamp(1, PLATFORM_MESSAGE_LIMIT);
        self
    }

    /// Handle one inbound message and return the replies to send, in order.
    ///
    /// An empty vector means "no action". Never fails: store and provider
    /// faults are turned into normal replies.
    pub async fn handle(&self, message: &InboundMessage) -> Vec<String> {
        if message.author_is_bot {
            return Vec::new();
        }

        let Some(command) = Command::parse(&message.content) else {
            return Vec::new();
        };

        tracing::debug!(user = %message.author_id, ?command, "Dispatching command");

        match command {
            Command::Mood { mood } => self.handle_mood(&message.author_id, &mood).await,
            Command::SetProfile {
                genre,
                artist,
                movie_genre,
            } => {
                let profile = UserProfile::new(message.author_id.clone(), genre, artist, movie_genre);
                vec![self.handle_set_profile(&profile).await]
            }
            Command::Usage { usage } => vec![usage.to_string()],
        }
    }

    async fn handle_mood(&self, user_id: &UserId, phrase: &str) -> Vec<String> {
        // Unknown moods are answered before touching the store or providers.
        if mood::lookup(phrase).is_none() {
            tracing::debug!(user = %user_id, mood = %phrase, "No mapping for mood");
            return vec![UNKNOWN_MOOD_REPLY.to_string()];
        }

        let profile = match self.profiles.get(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(
                    user = %user_id,
                    error = %e,
                    "Profile lookup failed, continuing without personalization"
                );
                None
            }
        };

        let Some(query) = mood::resolve(phrase, profile.as_ref()) else {
            return vec![UNKNOWN_MOOD_REPLY.to_string()];
        };

        let results = self.recommender.recommend(&query).await;
        format::format_recommendations_with_limit(&query.mood, &results, self.max_message_chars)
    }

    async fn handle_set_profile(&self, profile: &UserProfile) -> String {
        match self.profiles.upsert(profile).await {
            Ok(()) => {
                tracing::info!(user = %profile.user_id, "Profile updated");
                format!(
                    "Profile saved! Genre: **{}**, artist: **{}**, movie genre: **{}**.",
                    profile.genre, profile.artist, profile.movie_genre
                )
            }
            Err(e) => {
                tracing::error!(user = %profile.user_id, error = %e, "Failed to save profile");
                PROFILE_SAVE_FAILED_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parser::{MOOD_USAGE, SET_PROFILE_USAGE};
    use crate::provider::{BoxRecommendationProvider, RecommendationProvider};
    use feelgood_types::error::{ProviderError, RepositoryError};
    use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Test doubles ---

    #[derive(Default)]
    struct MemoryProfileStore {
        profiles: Mutex<HashMap<UserId, UserProfile>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl ProfileStore for MemoryProfileStore {
        async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
            if self.fail_reads {
                return Err(RepositoryError::Connection);
            }
            Ok(self.profiles.lock().unwrap().get(user_id).cloned())
        }

        async fn upsert(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Query("disk full".to_string()));
            }
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.user_id.clone(), profile.clone());
            Ok(())
        }
    }

    type CallLog = Arc<Mutex<Vec<(Category, SearchRequest)>>>;

    struct RecordingProvider {
        category: Category,
        calls: CallLog,
        fail: bool,
    }

    impl RecommendationProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        fn category(&self) -> Category {
            self.category
        }

        async fn search(
            &self,
            request: &SearchRequest,
        ) -> Result<Vec<RecommendationItem>, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((self.category, request.clone()));
            if self.fail {
                return Err(ProviderError::Http {
                    message: "connection reset".to_string(),
                });
            }
            Ok(vec![RecommendationItem::new(
                format!("{} pick", self.category),
                format!("https://example.com/{}", self.category),
            )])
        }
    }

    fn recommender(calls: &CallLog, failing: &[Category]) -> RecommendationService {
        let make = |category: Category| {
            BoxRecommendationProvider::new(RecordingProvider {
                category,
                calls: calls.clone(),
                fail: failing.contains(&category),
            })
        };
        RecommendationService::new(make(Category::Music), make(Category::Movie), make(Category::Video))
    }

    fn dispatcher_with(store: MemoryProfileStore, failing: &[Category]) -> (Dispatcher<MemoryProfileStore>, CallLog) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = Dispatcher::new(store, recommender(&calls, failing));
        (dispatcher, calls)
    }

    fn user_message(content: &str) -> InboundMessage {
        InboundMessage::new(UserId::new("1001"), false, content)
    }

    // --- Tests ---

    #[tokio::test]
    async fn bot_authors_are_ignored() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);
        let message = InboundMessage::new(UserId::new("999"), true, "!mood happy");

        let replies = dispatcher.handle(&message).await;

        assert!(replies.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_commands_are_ignored() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        for text in ["hello", "!help", "", "!moods happy"] {
            assert!(dispatcher.handle(&user_message(text)).await.is_empty());
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_mood_gets_fallback_and_no_provider_calls() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        let replies = dispatcher.handle(&user_message("!mood xyz-unknown")).await;

        assert_eq!(replies, vec![UNKNOWN_MOOD_REPLY.to_string()]);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn known_mood_calls_every_provider_once() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        let replies = dispatcher.handle(&user_message("!mood happy")).await;

        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("**happy**"));
        assert!(replies[0].contains("1. [music pick](https://example.com/music)"));
        assert!(replies[0].contains("1. [movie pick](https://example.com/movie)"));
        assert!(replies[0].contains("1. [video pick](https://example.com/video)"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        let movie = calls.iter().find(|(c, _)| *c == Category::Movie).unwrap();
        assert_eq!(movie.1.genre.as_deref(), Some("Comedy"));
    }

    #[tokio::test]
    async fn set_profile_then_mood_personalizes_queries() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        let replies = dispatcher
            .handle(&user_message("!setprofile rock Beatles comedy"))
            .await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("Profile saved!"));

        dispatcher.handle(&user_message("!mood happy")).await;

        let calls = calls.lock().unwrap();
        let (_, music) = calls.iter().find(|(c, _)| *c == Category::Music).unwrap();
        assert!(music.term.contains("rock"));
        assert!(music.term.contains("Beatles"));
        assert_eq!(music.genre.as_deref(), Some("rock"));
        let (_, movie) = calls.iter().find(|(c, _)| *c == Category::Movie).unwrap();
        assert_eq!(movie.genre.as_deref(), Some("comedy"));
    }

    #[tokio::test]
    async fn profiles_are_per_user() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        dispatcher
            .handle(&user_message("!setprofile rock Beatles comedy"))
            .await;
        let other = InboundMessage::new(UserId::new("2002"), false, "!mood happy");
        dispatcher.handle(&other).await;

        let calls = calls.lock().unwrap();
        let (_, music) = calls.iter().find(|(c, _)| *c == Category::Music).unwrap();
        assert_eq!(music.term, "happy");
    }

    #[tokio::test]
    async fn set_profile_overwrites_all_fields() {
        let (dispatcher, _) = dispatcher_with(MemoryProfileStore::default(), &[]);

        dispatcher
            .handle(&user_message("!setprofile rock Beatles comedy"))
            .await;
        dispatcher
            .handle(&user_message("!setprofile jazz Coltrane drama"))
            .await;

        let stored = dispatcher
            .profiles
            .get(&UserId::new("1001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, UserProfile::new(UserId::new("1001"), "jazz", "Coltrane", "drama"));
    }

    #[tokio::test]
    async fn store_write_failure_gets_retry_later_reply() {
        let store = MemoryProfileStore {
            fail_writes: true,
            ..Default::default()
        };
        let (dispatcher, _) = dispatcher_with(store, &[]);

        let replies = dispatcher
            .handle(&user_message("!setprofile rock Beatles comedy"))
            .await;

        assert_eq!(replies, vec![PROFILE_SAVE_FAILED_REPLY.to_string()]);
    }

    #[tokio::test]
    async fn store_read_failure_still_recommends() {
        let store = MemoryProfileStore {
            fail_reads: true,
            ..Default::default()
        };
        let (dispatcher, calls) = dispatcher_with(store, &[]);

        let replies = dispatcher.handle(&user_message("!mood sad")).await;

        assert_eq!(replies.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn provider_failure_renders_no_result_line() {
        let (dispatcher, _) =
            dispatcher_with(MemoryProfileStore::default(), &[Category::Video]);

        let replies = dispatcher.handle(&user_message("!mood stressed")).await;

        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("**Videos**\nNo video found."));
        assert!(replies[0].contains("1. [music pick]"));
    }

    #[tokio::test]
    async fn wrong_argument_counts_get_usage() {
        let (dispatcher, calls) = dispatcher_with(MemoryProfileStore::default(), &[]);

        assert_eq!(
            dispatcher.handle(&user_message("!mood")).await,
            vec![MOOD_USAGE.to_string()]
        );
        assert_eq!(
            dispatcher.handle(&user_message("!setprofile rock")).await,
            vec![SET_PROFILE_USAGE.to_string()]
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn small_chunk_limit_splits_reply() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = Dispatcher::new(MemoryProfileStore::default(), recommender(&calls, &[]))
            .with_max_message_chars(40);

        let replies = dispatcher.handle(&user_message("!mood happy")).await;

        assert!(replies.len() > 1);
        assert!(replies.iter().all(|r| r.chars().count() <= 40));
        assert!(replies.concat().contains("[music pick]"));
    }
}
