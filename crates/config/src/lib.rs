// Configuration and persisted client state

pub mod settings;
pub mod storage;
pub mod stores;

pub use settings::Settings;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use stores::{LanguageStore, ProfileStore, SubscriptionId, LANG_KEY, PROFILE_KEY};
