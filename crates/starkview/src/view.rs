use std::time::{Duration, Instant};

use crate::address::Address;
use crate::avatar::Identicon;
use crate::clipboard::ClipboardSink;
use crate::error::AddressError;
use crate::network::{self, NetworkDescriptor};
use crate::profile::ProfileSource;
use crate::resolver::{self, AddressFormat, ResolveOptions};

/// How long the copied confirmation shows before reverting.
pub const COPY_FEEDBACK_TTL: Duration = Duration::from_millis(800);

/// Copy-to-clipboard feedback.
///
/// `Copied` holds a single deadline. A repeat copy inside the window
/// replaces the deadline — last write wins, no timer queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Copied { until: Instant },
}

impl CopyFeedback {
    /// Record a copy at `now`, restarting the window if one is running.
    pub fn trigger(&mut self, now: Instant) {
        *self = CopyFeedback::Copied {
            until: now + COPY_FEEDBACK_TTL,
        };
    }

    /// Whether the confirmation is still showing at `now`.
    pub fn is_copied(&self, now: Instant) -> bool {
        matches!(self, CopyFeedback::Copied { until } if now < *until)
    }

    /// Collapse an expired deadline back to `Idle`.
    pub fn tick(&mut self, now: Instant) {
        if let CopyFeedback::Copied { until } = self {
            if now >= *until {
                *self = CopyFeedback::Idle;
            }
        }
    }
}

/// Options for building an address view.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub format: AddressFormat,
    /// Render the label as plain text instead of an explorer link.
    pub disable_link: bool,
}

/// The avatar to render: the resolved profile picture when one exists,
/// else the deterministic identicon.
#[derive(Debug, Clone, PartialEq)]
pub enum Avatar {
    Picture(String),
    Identicon(Identicon),
}

/// Display state for one address, derived entirely from the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressView {
    /// No address yet — render a skeleton placeholder.
    Loading,
    /// Checksum validation failed — render a blocking error. No link, no
    /// copy, by construction.
    Error,
    Ready(ReadyAddress),
}

impl AddressView {
    /// Build the view state for `raw` against the current network and
    /// profile source.
    pub fn resolve(
        raw: Option<&str>,
        options: &ViewOptions,
        profiles: &dyn ProfileSource,
        network: &NetworkDescriptor,
    ) -> AddressView {
        let resolve_options = ResolveOptions {
            format: options.format,
            resolved_name: None,
        };
        let resolved = match resolver::resolve(raw, &resolve_options) {
            Ok(resolved) => resolved,
            Err(AddressError::Missing) => return AddressView::Loading,
            Err(AddressError::InvalidChecksum { .. }) => return AddressView::Error,
        };

        let lookup = profiles.resolve(&resolved.address);

        // A resolved profile name wins over the derived label.
        let label = match lookup.name() {
            Some(name) => name.to_string(),
            None => resolved.label.text().to_string(),
        };

        let avatar = match lookup.profile_picture() {
            Some(url) => Avatar::Picture(url.to_string()),
            None => Avatar::Identicon(Identicon::from_address(&resolved.address)),
        };

        let explorer_link =
            (!options.disable_link).then(|| network::address_link(network, &resolved.address));

        AddressView::Ready(ReadyAddress {
            address: resolved.address,
            label,
            avatar,
            explorer_link,
        })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AddressView::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AddressView::Error)
    }

    pub fn ready(&self) -> Option<&ReadyAddress> {
        match self {
            AddressView::Ready(ready) => Some(ready),
            _ => None,
        }
    }
}

/// The interactive state. Link and copy affordances exist only here, so a
/// missing or invalid address can never expose them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyAddress {
    address: Address,
    label: String,
    avatar: Avatar,
    explorer_link: Option<String>,
}

impl ReadyAddress {
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn explorer_link(&self) -> Option<&str> {
        self.explorer_link.as_deref()
    }

    /// Copy the checksum address to the clipboard and flip the feedback.
    ///
    /// The write is fire-and-forget: a failure is logged and swallowed, and
    /// the feedback still shows `Copied`.
    pub fn copy(&self, sink: &dyn ClipboardSink, feedback: &mut CopyFeedback, now: Instant) {
        if let Err(err) = sink.write_text(self.address.as_str()) {
            log::warn!("clipboard write failed: {err}");
        }
        feedback.trigger(now);
    }
}
