//! Observable stores for the profile and the UI language.
//!
//! Each store caches its value, writes through to a [`KeyValueStore`] and
//! notifies subscribers after the write lands. Two stores over the same
//! backing do not see each other's writes until [`ProfileStore::reload`] or
//! [`LanguageStore::reload`] is called (the host calls these on focus).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use agridoc_core::{Lang, UserProfile};
use parking_lot::{Mutex, RwLock};

use crate::storage::{KeyValueStore, StorageError};

pub const PROFILE_KEY: &str = "userProfile";
pub const LANG_KEY: &str = "appLang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self { next_id: AtomicU64::new(1), callbacks: Mutex::new(Vec::new()) }
    }

    fn add(&self, f: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.lock().push((id, f));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(sid, _)| *sid != id);
        callbacks.len() != before
    }

    fn notify(&self, value: &T) {
        // Snapshot first: a callback may subscribe or unsubscribe.
        let snapshot: Vec<Callback<T>> =
            self.callbacks.lock().iter().map(|(_, f)| Arc::clone(f)).collect();
        for f in snapshot {
            f(value);
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

pub struct ProfileStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<UserProfile>,
    subscribers: Subscribers<UserProfile>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let current = read_profile(storage.as_ref());
        Self { storage, current: RwLock::new(current), subscribers: Subscribers::new() }
    }

    pub fn get(&self) -> UserProfile {
        self.current.read().clone()
    }

    /// Overwrite the whole record. Persists before observers run; on a
    /// storage failure nothing changes in memory.
    pub fn set(&self, profile: UserProfile) -> Result<(), StorageError> {
        self.update(|p| *p = profile).map(|_| ())
    }

    /// Read-modify-write of the cached record.
    pub fn update(&self, f: impl FnOnce(&mut UserProfile)) -> Result<UserProfile, StorageError> {
        // The cache lock is held across the storage write so cache and
        // storage always agree on the last writer.
        let profile = {
            let mut current = self.current.write();
            let mut next = current.clone();
            f(&mut next);
            let json = serde_json::to_string(&next)
                .map_err(|e| StorageError::Serialize(e.to_string()))?;
            self.storage.set(PROFILE_KEY, &json)?;
            *current = next.clone();
            next
        };
        self.subscribers.notify(&profile);
        Ok(profile)
    }

    /// Pick up writes made through another handle on the same storage.
    /// Observers fire only when the value actually changed.
    pub fn reload(&self) -> UserProfile {
        let (fresh, changed) = {
            let mut current = self.current.write();
            let fresh = read_profile(self.storage.as_ref());
            if *current == fresh {
                (fresh, false)
            } else {
                *current = fresh.clone();
                (fresh, true)
            }
        };
        if changed {
            self.subscribers.notify(&fresh);
        }
        fresh
    }

    pub fn subscribe(&self, f: impl Fn(&UserProfile) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.add(Arc::new(f))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }
}

fn read_profile(storage: &dyn KeyValueStore) -> UserProfile {
    match storage.get(PROFILE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Stored profile is unreadable, using defaults: {}", e);
            UserProfile::default()
        }),
        Ok(None) => UserProfile::default(),
        Err(e) => {
            log::warn!("Failed to read profile: {}", e);
            UserProfile::default()
        }
    }
}

// ============================================================================
// Language
// ============================================================================

pub struct LanguageStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Lang>,
    subscribers: Subscribers<Lang>,
}

impl LanguageStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let current = read_lang(storage.as_ref());
        Self { storage, current: RwLock::new(current), subscribers: Subscribers::new() }
    }

    pub fn get(&self) -> Lang {
        *self.current.read()
    }

    /// Stored as the bare code (`kn`, `hi`, ...).
    pub fn set(&self, lang: Lang) -> Result<(), StorageError> {
        {
            let mut current = self.current.write();
            self.storage.set(LANG_KEY, lang.code())?;
            *current = lang;
        }
        self.subscribers.notify(&lang);
        Ok(())
    }

    pub fn reload(&self) -> Lang {
        let (fresh, changed) = {
            let mut current = self.current.write();
            let fresh = read_lang(self.storage.as_ref());
            let changed = *current != fresh;
            *current = fresh;
            (fresh, changed)
        };
        if changed {
            self.subscribers.notify(&fresh);
        }
        fresh
    }

    pub fn subscribe(&self, f: impl Fn(&Lang) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.add(Arc::new(f))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }
}

fn read_lang(storage: &dyn KeyValueStore) -> Lang {
    match storage.get(LANG_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("{}, falling back to English", e);
            Lang::default()
        }),
        Ok(None) => Lang::default(),
        Err(e) => {
            log::warn!("Failed to read language: {}", e);
            Lang::default()
        }
    }
}
