//! Application context.
//!
//! Built once at startup and passed down to every screen. Owns the stores
//! and the network services; screens own their own flow state.

use std::sync::Arc;
use std::time::Instant;

use agridoc_api_client::{ApiClient, ApiError, Geocoder};
use agridoc_config::{FileStore, KeyValueStore, LanguageStore, ProfileStore, Settings, StorageError};
use agridoc_core::chat::{ChatError, ChatSession};
use agridoc_core::location::{LocationError, LocationSetup};
use agridoc_core::media::MediaSource;
use agridoc_core::scan::ScanError;
use agridoc_core::schemes::SchemeBrowser;
use agridoc_core::UserProfile;

use crate::backend::{Backend, PlaceLookup};
use crate::landing::LandingHero;
use crate::worker::Job;

/// Error type for app-level operations.
#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Storage(StorageError),
    Location(LocationError),
    Scan(ScanError),
    Chat(ChatError),
    /// Background thread could not be started
    Worker(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Location(e) => write!(f, "{}", e),
            AppError::Scan(e) => write!(f, "{}", e),
            AppError::Chat(e) => write!(f, "{}", e),
            AppError::Worker(msg) => write!(f, "Worker error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        AppError::Location(e)
    }
}

impl From<ScanError> for AppError {
    fn from(e: ScanError) -> Self {
        AppError::Scan(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

pub struct AppContext {
    settings: Settings,
    pub profile: Arc<ProfileStore>,
    pub lang: Arc<LanguageStore>,
    backend: Arc<dyn Backend>,
    places: Arc<dyn PlaceLookup>,
}

impl AppContext {
    /// Settings from the user's config dir, file-backed storage, live
    /// backend and geocoder.
    pub fn load() -> Result<Self, AppError> {
        let settings = Settings::load();
        let storage = FileStore::default();
        log::info!("storage at {}", storage.dir().display());
        Self::from_settings(settings, Arc::new(storage))
    }

    pub fn from_settings(settings: Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let api = ApiClient::new(&settings.api_base_url, settings.api_timeout())?;
        let geocoder = Geocoder::new(&settings.geocoding_base_url, settings.api_timeout())?;
        log::info!("backend {}, geocoding {}", api.api_base(), settings.geocoding_base_url);
        Ok(Self::with_services(settings, storage, Arc::new(api), Arc::new(geocoder)))
    }

    /// Wire explicit services. Hosts with their own transport (and tests)
    /// come in here.
    pub fn with_services(
        settings: Settings,
        storage: Arc<dyn KeyValueStore>,
        backend: Arc<dyn Backend>,
        places: Arc<dyn PlaceLookup>,
    ) -> Self {
        Self {
            settings,
            profile: Arc::new(ProfileStore::new(Arc::clone(&storage))),
            lang: Arc::new(LanguageStore::new(storage)),
            backend,
            places,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn places(&self) -> &dyn PlaceLookup {
        self.places.as_ref()
    }

    /// Re-read both stores from storage. Hosts call this when the window
    /// regains focus so writes from another instance show up.
    pub fn reload_stores(&self) {
        self.profile.reload();
        self.lang.reload();
    }

    /// Local sign-in: record the farmer's name, keep everything else.
    pub fn sign_in(&self, name: &str) -> Result<UserProfile, AppError> {
        let name = name.trim().to_string();
        let profile = self.profile.update(|p| p.name = name)?;
        log::info!("signed in as {:?}", profile.name);
        Ok(profile)
    }

    // ── Screen state factories ──────────────────────────────────────

    pub fn landing_hero(&self, media: MediaSource, title: Option<String>) -> LandingHero {
        LandingHero::new(self.settings.hero.clone(), media, title)
    }

    pub fn location_setup(&self) -> LocationSetup {
        LocationSetup::new(&self.profile.get())
    }

    pub fn chat_session(&self) -> ChatSession {
        ChatSession::new(self.lang.get())
    }

    pub fn scheme_browser(&self, now: Instant) -> SchemeBrowser {
        SchemeBrowser::new(self.settings.schemes_debounce(), now)
    }

    /// Run `f` against the backend on a worker thread.
    pub fn spawn<T, F>(&self, name: &str, f: F) -> Result<Job<T>, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Backend) -> T + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        Job::spawn(name, move || f(backend.as_ref())).map_err(|e| AppError::Worker(e.to_string()))
    }
}
