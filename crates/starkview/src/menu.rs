use crate::connector::ConnectorRegistry;
use crate::error::{ConnectError, Error};
use crate::network::{NetworkDescriptor, NetworkRegistry};
use crate::storage::KeyValueStore;

/// Source of outside-click notifications for an open menu.
///
/// Subscriptions are edge-triggered and scoped: one exists only while the
/// menu is open, and it detaches when dropped.
pub trait ClickBoundary {
    fn subscribe(&self) -> BoundarySubscription;
}

/// RAII handle for an attached outside-click listener.
pub struct BoundarySubscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl BoundarySubscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with no teardown, for boundaries that need none.
    pub fn noop() -> Self {
        Self { detach: None }
    }
}

impl Drop for BoundarySubscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Actions offered on the default pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CopyAddress,
    SwitchNetwork,
    ViewExplorer,
    Disconnect,
}

static ACCOUNT_ACTIONS: [MenuAction; 4] = [
    MenuAction::CopyAddress,
    MenuAction::SwitchNetwork,
    MenuAction::ViewExplorer,
    MenuAction::Disconnect,
];

/// Contents of the currently visible pane. The two panes are mutually
/// exclusive, selected by the network-selection flag.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuPane<'a> {
    Account(&'a [MenuAction]),
    Networks(&'a [NetworkDescriptor]),
}

/// The connected-account dropdown.
///
/// Closed by default. While open it holds an outside-click subscription;
/// closing (or dropping the menu) releases it, so no listener outlives the
/// open state.
pub struct AccountMenu {
    open: bool,
    selecting_network: bool,
    subscription: Option<BoundarySubscription>,
}

impl AccountMenu {
    pub fn new() -> Self {
        Self {
            open: false,
            selecting_network: false,
            subscription: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selecting_network(&self) -> bool {
        self.selecting_network
    }

    /// Toggle the disclosure. Opening attaches the outside-click listener,
    /// closing detaches it.
    pub fn toggle(&mut self, boundary: &dyn ClickBoundary) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.subscription = Some(boundary.subscribe());
        }
    }

    /// An outside click closes an open menu and resets the pane; with the
    /// menu closed there is no listener, so this is a no-op.
    pub fn outside_click(&mut self) {
        if self.open {
            self.close();
        }
    }

    /// Show the network pane.
    pub fn start_network_selection(&mut self) {
        if self.open {
            self.selecting_network = true;
        }
    }

    pub fn pane<'a>(&self, networks: &'a NetworkRegistry) -> MenuPane<'a> {
        if self.selecting_network {
            MenuPane::Networks(networks.allowed())
        } else {
            MenuPane::Account(&ACCOUNT_ACTIONS)
        }
    }

    /// Switch the registry to `network` and close the menu.
    pub fn switch_network(
        &mut self,
        networks: &mut NetworkRegistry,
        network: &str,
    ) -> Result<(), Error> {
        networks.set_current(network)?;
        self.close();
        Ok(())
    }

    /// Connect a specific connector account and persist the selection.
    ///
    /// An unknown connector id is a no-op — the menu stays usable and
    /// nothing is persisted.
    pub fn connect_account(
        &mut self,
        registry: &ConnectorRegistry,
        id: &str,
        ix: Option<usize>,
        store: &dyn KeyValueStore,
    ) -> Result<(), ConnectError> {
        match registry.connect_and_remember(id, ix, store) {
            Ok(()) => Ok(()),
            Err(ConnectError::ConnectorNotFound { id }) => {
                log::debug!("ignoring connect for unknown connector: {id}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Run the host's disconnect action and close the menu.
    pub fn disconnect(&mut self, on_disconnect: impl FnOnce()) {
        on_disconnect();
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.selecting_network = false;
        // Dropping the subscription detaches the listener.
        if let Some(subscription) = self.subscription.take() {
            drop(subscription);
        }
    }
}

impl Default for AccountMenu {
    fn default() -> Self {
        Self::new()
    }
}
