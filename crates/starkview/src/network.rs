use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::Error;

/// Network slug for the local devnet.
pub const DEVNET: &str = "devnet";

/// A single network entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Stable slug, e.g. `"mainnet"`, `"sepolia"`, `"devnet"`.
    pub network: String,

    /// Human-readable name.
    pub name: String,

    /// Chain id as a short-string felt, e.g. `"0x534e5f4d41494e"`.
    #[serde(rename = "chainId")]
    pub chain_id: String,

    /// Block-explorer base URL. Absent for networks without a public
    /// explorer (the devnet routes to the local explorer page instead).
    #[serde(rename = "blockExplorerUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub block_explorer_url: Option<String>,
}

impl NetworkDescriptor {
    pub fn is_devnet(&self) -> bool {
        self.network == DEVNET
    }

    /// Decode the chain id felt as its short string, e.g.
    /// `"0x534e5f4d41494e"` -> `"SN_MAIN"`. `None` when the felt does not
    /// hold printable ASCII.
    pub fn chain_short_name(&self) -> Option<String> {
        let hex_part = self.chain_id.strip_prefix("0x")?;
        let padded = if hex_part.len() % 2 == 0 {
            hex_part.to_string()
        } else {
            format!("0{hex_part}")
        };
        let bytes = hex::decode(padded).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        (!text.is_empty() && text.bytes().all(|b| b.is_ascii_graphic())).then_some(text)
    }

    pub fn mainnet() -> Self {
        Self {
            network: "mainnet".to_string(),
            name: "Starknet".to_string(),
            chain_id: "0x534e5f4d41494e".to_string(),
            block_explorer_url: Some("https://starkscan.co".to_string()),
        }
    }

    pub fn sepolia() -> Self {
        Self {
            network: "sepolia".to_string(),
            name: "Starknet Sepolia".to_string(),
            chain_id: "0x534e5f5345504f4c4941".to_string(),
            block_explorer_url: Some("https://sepolia.starkscan.co".to_string()),
        }
    }

    pub fn devnet() -> Self {
        Self {
            network: DEVNET.to_string(),
            name: "Starknet Devnet".to_string(),
            chain_id: "0x534e5f5345504f4c4941".to_string(),
            block_explorer_url: None,
        }
    }
}

/// Ordered registry of allowed networks plus the currently selected one.
///
/// The allowed list is externally supplied and pre-filtered; this type only
/// preserves its order and tracks the selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,

    #[serde(default)]
    current: usize,
}

impl NetworkRegistry {
    /// Build a registry. The list must be non-empty — there is always a
    /// current network.
    pub fn new(networks: Vec<NetworkDescriptor>) -> Result<Self, Error> {
        if networks.is_empty() {
            return Err(Error::Registry("no networks configured".to_string()));
        }
        Ok(Self {
            networks,
            current: 0,
        })
    }

    /// Parse a registry from JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let registry: Self =
            serde_json::from_str(json).map_err(|e| Error::Registry(e.to_string()))?;
        if registry.networks.is_empty() {
            return Err(Error::Registry("no networks configured".to_string()));
        }
        if registry.current >= registry.networks.len() {
            return Err(Error::Registry(format!(
                "current index {} out of range",
                registry.current
            )));
        }
        Ok(registry)
    }

    /// The allowed networks, in configuration order.
    pub fn allowed(&self) -> &[NetworkDescriptor] {
        &self.networks
    }

    pub fn current(&self) -> &NetworkDescriptor {
        &self.networks[self.current]
    }

    /// Select a network by slug.
    pub fn set_current(&mut self, network: &str) -> Result<(), Error> {
        match self.networks.iter().position(|n| n.network == network) {
            Some(index) => {
                self.current = index;
                Ok(())
            }
            None => Err(Error::Registry(format!("unknown network: {network}"))),
        }
    }
}

/// Block-explorer address page for a network.
///
/// The devnet links to the local block-explorer route; other networks link
/// to their configured explorer, defaulting to Starkscan.
pub fn address_link(network: &NetworkDescriptor, address: &Address) -> String {
    if network.is_devnet() {
        return format!("/blockexplorer/contract/{address}");
    }
    match &network.block_explorer_url {
        Some(base) => format!("{}/contract/{address}", base.trim_end_matches('/')),
        None => format!("https://starkscan.co/contract/{address}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x2fd23d9182193775423497fc0c472e156c57c69e4089a1967fb288a2d84e914";

    fn registry() -> NetworkRegistry {
        NetworkRegistry::new(vec![
            NetworkDescriptor::devnet(),
            NetworkDescriptor::sepolia(),
            NetworkDescriptor::mainnet(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(NetworkRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_current_defaults_to_first() {
        let registry = registry();
        assert_eq!(registry.current().network, "devnet");
        assert_eq!(registry.allowed().len(), 3);
    }

    #[test]
    fn test_set_current_by_slug() {
        let mut registry = registry();
        registry.set_current("mainnet").unwrap();
        assert_eq!(registry.current().name, "Starknet");
        assert!(registry.set_current("goerli").is_err());
        // Failed switch leaves the selection untouched.
        assert_eq!(registry.current().network, "mainnet");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "networks": [
                {
                    "network": "sepolia",
                    "name": "Starknet Sepolia",
                    "chainId": "0x534e5f5345504f4c4941",
                    "blockExplorerUrl": "https://sepolia.starkscan.co"
                }
            ]
        }"#;
        let registry = NetworkRegistry::from_json(json).unwrap();
        assert_eq!(registry.current().network, "sepolia");
    }

    #[test]
    fn test_from_json_rejects_bad_index() {
        let json = r#"{
            "networks": [
                {
                    "network": "sepolia",
                    "name": "Starknet Sepolia",
                    "chainId": "0x534e5f5345504f4c4941"
                }
            ],
            "current": 3
        }"#;
        assert!(NetworkRegistry::from_json(json).is_err());
    }

    #[test]
    fn test_chain_short_name() {
        assert_eq!(
            NetworkDescriptor::mainnet().chain_short_name().as_deref(),
            Some("SN_MAIN")
        );
        assert_eq!(
            NetworkDescriptor::sepolia().chain_short_name().as_deref(),
            Some("SN_SEPOLIA")
        );

        let mut odd = NetworkDescriptor::mainnet();
        odd.chain_id = "0xff".to_string();
        assert_eq!(odd.chain_short_name(), None);
    }

    #[test]
    fn test_explorer_link() {
        let address = Address::parse(SAMPLE).unwrap();
        let link = address_link(&NetworkDescriptor::mainnet(), &address);
        assert_eq!(
            link,
            format!("https://starkscan.co/contract/{}", address.as_str())
        );
    }

    #[test]
    fn test_devnet_links_to_local_explorer() {
        let address = Address::parse(SAMPLE).unwrap();
        let link = address_link(&NetworkDescriptor::devnet(), &address);
        assert!(link.starts_with("/blockexplorer/contract/0x"));
    }
}
