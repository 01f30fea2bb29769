pub mod address;
pub mod avatar;
pub mod clipboard;
pub mod connector;
pub mod error;
pub mod menu;
pub mod network;
pub mod profile;
pub mod resolver;
pub mod storage;
pub mod view;

// Re-exports for convenience
pub use address::Address;
pub use avatar::{AvatarSize, Identicon};
pub use clipboard::{ClipboardSink, MemoryClipboard, NullClipboard};
pub use connector::{
    Connector, ConnectorRegistry, ConnectorSelection, TestAccountConnector, LAST_CONNECTOR_KEY,
};
pub use error::{AddressError, ClipboardError, ConnectError, Error, StoreError};
pub use menu::{AccountMenu, BoundarySubscription, ClickBoundary, MenuAction, MenuPane};
pub use network::{NetworkDescriptor, NetworkRegistry};
pub use profile::{EmptyProfileSource, Profile, ProfileLookup, ProfileSource, StaticProfileSource};
pub use resolver::{AddressFormat, DisplayLabel, ResolveOptions, ResolvedAddress};
pub use storage::{JsonFileStore, KeyValueStore, KeyValueStoreExt, MemoryStore};
pub use view::{AddressView, Avatar, CopyFeedback, ReadyAddress, ViewOptions, COPY_FEEDBACK_TTL};

/// Build the display state for an address against the current network.
///
/// This is the main entry point for address display. It checksum-validates
/// the raw address, consults the profile source, and derives the label,
/// avatar, and explorer link for the ready state — or the loading/error
/// state when the address is absent or fails validation.
pub fn render_address(
    raw: Option<&str>,
    options: &view::ViewOptions,
    profiles: &dyn profile::ProfileSource,
    networks: &network::NetworkRegistry,
) -> view::AddressView {
    view::AddressView::resolve(raw, options, profiles, networks.current())
}
