use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::ConnectError;
use crate::storage::{KeyValueStore, KeyValueStoreExt};

/// Storage key for the last-used connector selection.
pub const LAST_CONNECTOR_KEY: &str = "lastUsedConnector";

/// Connector id of the in-crate test-account connector.
pub const TEST_CONNECTOR_ID: &str = "burner-wallet";

/// The persisted `(connector, account index)` pair.
///
/// Written on every successful connect so a future session can default to
/// the same connector without re-prompting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSelection {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub ix: Option<usize>,
}

/// A wallet connection mechanism — a browser extension, a remote signer,
/// or a local test account provider.
pub trait Connector {
    fn id(&self) -> &str;

    /// Establish a session, optionally selecting a specific account index.
    /// Failure handling beyond [`ConnectError::ConnectorNotFound`] belongs
    /// to the caller.
    fn connect(&self, account_index: Option<usize>) -> Result<(), ConnectError>;
}

/// Available connectors, looked up by id.
#[derive(Default)]
pub struct ConnectorRegistry {
    connectors: Vec<Box<dyn Connector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connector: Box<dyn Connector>) {
        self.connectors.push(connector);
    }

    pub fn get(&self, id: &str) -> Option<&dyn Connector> {
        self.connectors
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Connect by id and persist the selection on success.
    pub fn connect_and_remember(
        &self,
        id: &str,
        ix: Option<usize>,
        store: &dyn KeyValueStore,
    ) -> Result<(), ConnectError> {
        let connector = self.get(id).ok_or_else(|| ConnectError::ConnectorNotFound {
            id: id.to_string(),
        })?;
        connector.connect(ix)?;
        store.set(
            LAST_CONNECTOR_KEY,
            &ConnectorSelection {
                id: id.to_string(),
                ix,
            },
        );
        Ok(())
    }

    /// The selection persisted by the most recent successful connect.
    pub fn last_selection(store: &dyn KeyValueStore) -> Option<ConnectorSelection> {
        store.get(LAST_CONNECTOR_KEY)
    }
}

/// Burner-style connector over a fixed list of pre-funded dev accounts.
pub struct TestAccountConnector {
    accounts: Vec<Address>,
    connected: Mutex<Option<usize>>,
}

impl TestAccountConnector {
    pub fn new(accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            connected: Mutex::new(None),
        }
    }

    /// The account connected by the last successful [`Connector::connect`].
    pub fn connected_account(&self) -> Option<Address> {
        let ix = (*self.connected.lock().expect("connector lock poisoned"))?;
        self.accounts.get(ix).cloned()
    }
}

impl Connector for TestAccountConnector {
    fn id(&self) -> &str {
        TEST_CONNECTOR_ID
    }

    fn connect(&self, account_index: Option<usize>) -> Result<(), ConnectError> {
        let ix = account_index.unwrap_or(0);
        if ix >= self.accounts.len() {
            return Err(ConnectError::Failed(format!(
                "no test account at index {ix}"
            )));
        }
        *self.connected.lock().expect("connector lock poisoned") = Some(ix);
        Ok(())
    }
}
