use crate::address::Address;
use crate::error::AddressError;

/// Requested label width when no resolved name is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressFormat {
    #[default]
    Short,
    Long,
}

/// A derived display label. Never stored — recomputed from the checksum
/// address and the resolution options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLabel {
    /// `first6 + "..." + last4` of the checksum string.
    ShortForm(String),
    /// The full checksum string.
    LongForm(String),
    /// A resolved human name, which wins over any format request.
    ResolvedName(String),
}

impl DisplayLabel {
    pub fn text(&self) -> &str {
        match self {
            DisplayLabel::ShortForm(s) | DisplayLabel::LongForm(s) | DisplayLabel::ResolvedName(s) => s,
        }
    }
}

/// Options for address resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub format: AddressFormat,
    /// A human name already resolved for this address, if any.
    pub resolved_name: Option<String>,
}

/// A checksum-normalized address plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub address: Address,
    pub label: DisplayLabel,
}

/// Turn a raw address into its presentable form.
///
/// `None` input is a loading state, not a fault — callers render a skeleton.
/// A failed checksum is terminal and suppresses links and copy actions.
/// Pure and deterministic; no I/O.
pub fn resolve(
    raw: Option<&str>,
    options: &ResolveOptions,
) -> Result<ResolvedAddress, AddressError> {
    let raw = raw.ok_or(AddressError::Missing)?;
    let address = Address::parse(raw)?;

    let label = match (&options.resolved_name, options.format) {
        (Some(name), _) => DisplayLabel::ResolvedName(name.clone()),
        (None, AddressFormat::Long) => DisplayLabel::LongForm(address.as_str().to_string()),
        (None, AddressFormat::Short) => DisplayLabel::ShortForm(short_form(address.as_str())),
    };

    Ok(ResolvedAddress { address, label })
}

fn short_form(checksum: &str) -> String {
    format!(
        "{}...{}",
        &checksum[..6],
        &checksum[checksum.len() - 4..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x2fd23d9182193775423497fc0c472e156c57c69e4089a1967fb288a2d84e914";

    #[test]
    fn test_missing_address() {
        let result = resolve(None, &ResolveOptions::default());
        assert_eq!(result.unwrap_err(), AddressError::Missing);
    }

    #[test]
    fn test_invalid_address() {
        let result = resolve(Some("0xnothex"), &ResolveOptions::default());
        assert!(matches!(
            result.unwrap_err(),
            AddressError::InvalidChecksum { .. }
        ));
    }

    #[test]
    fn test_short_form_label() {
        let resolved = resolve(Some(SAMPLE), &ResolveOptions::default()).unwrap();
        let checksum = resolved.address.as_str();
        assert_eq!(
            resolved.label,
            DisplayLabel::ShortForm(format!(
                "{}...{}",
                &checksum[..6],
                &checksum[checksum.len() - 4..]
            ))
        );
        assert_eq!(resolved.label.text().len(), 6 + 3 + 4);
    }

    #[test]
    fn test_long_form_label() {
        let options = ResolveOptions {
            format: AddressFormat::Long,
            resolved_name: None,
        };
        let resolved = resolve(Some(SAMPLE), &options).unwrap();
        assert_eq!(
            resolved.label,
            DisplayLabel::LongForm(resolved.address.as_str().to_string())
        );
    }

    #[test]
    fn test_resolved_name_wins_over_format() {
        for format in [AddressFormat::Short, AddressFormat::Long] {
            let options = ResolveOptions {
                format,
                resolved_name: Some("alice.stark".to_string()),
            };
            let resolved = resolve(Some(SAMPLE), &options).unwrap();
            assert_eq!(
                resolved.label,
                DisplayLabel::ResolvedName("alice.stark".to_string())
            );
        }
    }

    #[test]
    fn test_resolving_normalized_form_is_stable() {
        let options = ResolveOptions::default();
        let first = resolve(Some(SAMPLE), &options).unwrap();
        let second = resolve(Some(first.address.as_str()), &options).unwrap();
        assert_eq!(first.label, second.label);
        assert_eq!(first.address, second.address);
    }
}
