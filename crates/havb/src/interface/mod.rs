// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Protocol Interface Abstraction
//!
//! The protocol interface owns the raw layer-2 transport, the ADP state
//! machines and the pending-command table (sequence IDs, timeouts,
//! retries). The controller capability core consumes it through the
//! [`ProtocolInterface`] trait and receives traffic through the
//! [`ProtocolInterfaceObserver`] contract.
//!
//! ## Completion contract
//!
//! Command sends are fire-and-forget: `send_aecp_command` /
//! `send_acmp_command` take a result handler that the interface MUST
//! invoke exactly once per submission: with the matched response on
//! success, or with an [`InterfaceError`] (rejected send, timeout,
//! transport failure, shutdown) otherwise. Synchronous rejection also
//! reports through the handler, so callers have a single completion
//! path. Handlers may be invoked from the interface's receive thread.
//!
//! ## Thread Safety
//!
//! Observer callbacks and result handlers are invoked from background
//! threads; implementations must be `Send + Sync` and must not block.

mod virtual_pi;

pub use virtual_pi::{VirtualInterface, VirtualInterfaceConfig};

use crate::model::{DiscoveredEntity, EntityId, MacAddress};
use crate::protocol::pdu::{Acmpdu, Aecpdu};
use std::fmt;
use std::sync::Arc;

/// Errors surfaced by a protocol interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    /// Transport could not send the frame
    TransportError,
    /// The pending command timed out without a matched response
    Timeout,
    /// Unknown remote entity (interface-level targeting failure)
    UnknownRemoteEntity,
    /// The interface is shutting down; pending commands are flushed
    Shutdown,
    /// Invalid parameters for the requested send
    InvalidParameters,
    /// Feature not supported by this interface implementation
    NotSupported,
    /// Internal interface error
    InternalError,
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportError => write!(f, "transport error"),
            Self::Timeout => write!(f, "command timed out"),
            Self::UnknownRemoteEntity => write!(f, "unknown remote entity"),
            Self::Shutdown => write!(f, "protocol interface is shutting down"),
            Self::InvalidParameters => write!(f, "invalid parameters"),
            Self::NotSupported => write!(f, "not supported"),
            Self::InternalError => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for InterfaceError {}

/// Result handler for an AECP command: exactly one invocation per
/// accepted submission
pub type AecpCommandResultHandler = Box<dyn FnOnce(Result<Aecpdu, InterfaceError>) + Send>;

/// Result handler for an ACMP command: exactly one invocation per
/// accepted submission
pub type AcmpCommandResultHandler = Box<dyn FnOnce(Result<Acmpdu, InterfaceError>) + Send>;

/// Raw-frame protocol interface consumed by the capability cores.
///
/// Implementations: pcap capture, native L2 sockets, or the in-process
/// [`VirtualInterface`] used by tests and demos.
pub trait ProtocolInterface: Send + Sync {
    /// MAC address the interface sends from
    fn mac_address(&self) -> MacAddress;

    /// Broadcast an ENTITY_DISCOVER message for all entities
    fn discover_remote_entities(&self) -> Result<(), InterfaceError>;

    /// Broadcast an ENTITY_DISCOVER message for one entity
    fn discover_remote_entity(&self, entity_id: EntityId) -> Result<(), InterfaceError>;

    /// Send an AECP command and register `on_result` in the
    /// pending-command table. Failures (including rejected sends) report
    /// through `on_result`.
    fn send_aecp_command(&self, pdu: Aecpdu, on_result: AecpCommandResultHandler);

    /// Send an AECP response (no completion; responses are not correlated)
    fn send_aecp_response(&self, pdu: Aecpdu) -> Result<(), InterfaceError>;

    /// Multicast an ACMP command and register `on_result` in the
    /// pending-command table. Failures (including rejected sends) report
    /// through `on_result`.
    fn send_acmp_command(&self, pdu: Acmpdu, on_result: AcmpCommandResultHandler);

    /// Register the observer receiving discovery and unsolicited traffic.
    /// A later call replaces the previous observer. Implementations hold
    /// the observer weakly: the caller keeps it alive, and the interface
    /// stops delivering once it is dropped.
    fn set_observer(&self, observer: Arc<dyn ProtocolInterfaceObserver>);

    /// Flush pending commands (each completes with
    /// [`InterfaceError::Shutdown`]) and stop receive processing. Returns
    /// once all outstanding result handlers have been invoked.
    fn shutdown(&self);
}

/// Observer contract: discovery events plus traffic that no pending
/// command accounts for.
///
/// All methods have default no-op implementations so observers override
/// only what they consume.
pub trait ProtocolInterfaceObserver: Send + Sync {
    /// The transport failed in a way that may have lost traffic
    fn on_transport_error(&self) {}

    /// A remote entity came online (first ADP advertisement)
    fn on_remote_entity_online(&self, entity: &DiscoveredEntity) {
        let _ = entity;
    }

    /// A remote entity left (ENTITY_DEPARTING or valid-time expiry)
    fn on_remote_entity_offline(&self, entity_id: EntityId) {
        let _ = entity_id;
    }

    /// A remote entity's advertisement changed (available_index bump,
    /// gPTP change, capability change)
    fn on_remote_entity_updated(&self, entity: &DiscoveredEntity) {
        let _ = entity;
    }

    /// An AECP response with no pending command (AEM unsolicited bit set)
    fn on_aecp_unsolicited_response(&self, pdu: &Aecpdu) {
        let _ = pdu;
    }

    /// An ACMP response observed on the wire that this interface did not
    /// originate
    fn on_acmp_sniffed_response(&self, pdu: &Acmpdu) {
        let _ = pdu;
    }

    /// An AECP command addressed to a local entity that no state machine
    /// consumed. Return true iff the observer handled it (and sent any
    /// required response).
    fn on_unhandled_aecp_command(&self, pdu: &Aecpdu) -> bool {
        let _ = pdu;
        false
    }
}
