use std::collections::HashMap;

use tokio::sync::watch;

use crate::address::Address;

/// A resolved on-chain profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Outcome of a profile lookup.
///
/// Resolution happens asynchronously in an external service and may never
/// complete. Callers treat `Pending` and an empty profile identically and
/// fall back to the derived label and identicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Pending,
    Resolved(Profile),
}

impl ProfileLookup {
    pub fn name(&self) -> Option<&str> {
        match self {
            ProfileLookup::Resolved(profile) => profile.name.as_deref(),
            ProfileLookup::Pending => None,
        }
    }

    pub fn profile_picture(&self) -> Option<&str> {
        match self {
            ProfileLookup::Resolved(profile) => profile.profile_picture.as_deref(),
            ProfileLookup::Pending => None,
        }
    }
}

/// Trait for profile providers (name service, indexer, cache).
pub trait ProfileSource {
    fn resolve(&self, address: &Address) -> ProfileLookup;
}

/// A no-op source where every lookup is pending.
pub struct EmptyProfileSource;

impl ProfileSource for EmptyProfileSource {
    fn resolve(&self, _address: &Address) -> ProfileLookup {
        ProfileLookup::Pending
    }
}

/// In-memory profile source keyed by lowercase address.
pub struct StaticProfileSource {
    profiles: HashMap<String, Profile>,
}

impl StaticProfileSource {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    pub fn insert(&mut self, address: &Address, profile: Profile) {
        self.profiles.insert(address.lowercase(), profile);
    }
}

impl Default for StaticProfileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileSource for StaticProfileSource {
    fn resolve(&self, address: &Address) -> ProfileLookup {
        match self.profiles.get(&address.lowercase()) {
            Some(profile) => ProfileLookup::Resolved(profile.clone()),
            None => ProfileLookup::Pending,
        }
    }
}

/// Create a watch pair delivering one externally resolved profile.
///
/// The sender side lives with whatever task performs the actual resolution;
/// the watch side reads the current resolved-or-pending value without
/// blocking and doubles as a [`ProfileSource`] for the address it serves.
pub fn watch() -> (ProfileSender, ProfileWatch) {
    let (tx, rx) = watch::channel(ProfileLookup::Pending);
    (ProfileSender { tx }, ProfileWatch { rx })
}

pub struct ProfileSender {
    tx: watch::Sender<ProfileLookup>,
}

impl ProfileSender {
    pub fn publish(&self, profile: Profile) {
        let _ = self.tx.send(ProfileLookup::Resolved(profile));
    }
}

/// Read side of [`watch`], bound to a single known address.
#[derive(Clone)]
pub struct ProfileWatch {
    rx: watch::Receiver<ProfileLookup>,
}

impl ProfileWatch {
    pub fn current(&self) -> ProfileLookup {
        self.rx.borrow().clone()
    }

    /// Wait for resolution. Returns `None` if the resolver side went away
    /// while the lookup was still pending.
    pub async fn resolved(&mut self) -> Option<Profile> {
        loop {
            if let ProfileLookup::Resolved(profile) = self.current() {
                return Some(profile);
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }
}

impl ProfileSource for ProfileWatch {
    fn resolve(&self, _address: &Address) -> ProfileLookup {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x2fd23d9182193775423497fc0c472e156c57c69e4089a1967fb288a2d84e914";

    fn sample_address() -> Address {
        Address::parse(SAMPLE).unwrap()
    }

    #[test]
    fn test_empty_source_is_pending() {
        let lookup = EmptyProfileSource.resolve(&sample_address());
        assert_eq!(lookup, ProfileLookup::Pending);
        assert_eq!(lookup.name(), None);
        assert_eq!(lookup.profile_picture(), None);
    }

    #[test]
    fn test_static_source_case_insensitive() {
        let address = sample_address();
        let mut source = StaticProfileSource::new();
        source.insert(
            &address,
            Profile {
                name: Some("alice.stark".to_string()),
                profile_picture: None,
            },
        );

        // The checksum form and the lowercase form hit the same entry.
        let relooked = Address::parse(&address.lowercase()).unwrap();
        assert_eq!(source.resolve(&relooked).name(), Some("alice.stark"));
    }

    #[test]
    fn test_absent_entry_is_pending() {
        let source = StaticProfileSource::new();
        assert_eq!(source.resolve(&sample_address()), ProfileLookup::Pending);
    }

    #[tokio::test]
    async fn test_watch_delivers_resolution() {
        let (sender, mut watcher) = watch();
        assert_eq!(watcher.current(), ProfileLookup::Pending);

        sender.publish(Profile {
            name: Some("alice.stark".to_string()),
            profile_picture: Some("https://profile.example/alice.png".to_string()),
        });

        let profile = watcher.resolved().await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("alice.stark"));
        assert_eq!(
            watcher.resolve(&sample_address()).profile_picture(),
            Some("https://profile.example/alice.png")
        );
    }

    #[tokio::test]
    async fn test_watch_reports_abandoned_resolution() {
        let (sender, mut watcher) = watch();
        drop(sender);
        assert_eq!(watcher.resolved().await, None);
        assert_eq!(watcher.current(), ProfileLookup::Pending);
    }
}
