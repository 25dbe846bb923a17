// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Controller Capability Core
//!
//! The command/response engine of an AVDECC controller:
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     Host application                         |
//! |    command methods (acquire, read, set, connect, ...)        |
//! +--------------------------------------------------------------+
//! |                  ControllerCapability                        |
//! |  discovery cache | command issuer | response router          |
//! |  discovery watchdog | delegate fan-out | local commands      |
//! +--------------------------------------------------------------+
//! |                  ProtocolInterface (pcap / virtual)          |
//! |  pending-command table | ADP state machines | raw L2 frames  |
//! +--------------------------------------------------------------+
//! ```
//!
//! A command call serializes its payload, resolves the target MAC from
//! the discovery cache, and submits the PDU with a completion. The
//! protocol interface matches the response (or reports a failure) and
//! the router deserializes and delivers the typed answer. Unsolicited
//! AEM responses and sniffed ACMP responses reach the registered
//! [`ControllerDelegate`] through the interface's observer contract.
//!
//! ## Completion guarantee
//!
//! Every command invokes its handler exactly once: with the typed answer,
//! a wire error status, `UnknownEntity` (target not discovered, nothing
//! sent), `ProtocolError` / `InternalError` (router), or `TimedOut` /
//! `NetworkError` / `Canceled` (protocol interface).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use havb::controller::ControllerCapability;
//! use havb::interface::{VirtualInterface, VirtualInterfaceConfig};
//! use havb::model::EntityId;
//!
//! let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
//! let controller = ControllerCapability::new(pi.clone(), EntityId::new(0x0102_0304_0506_0708));
//! controller.read_entity_descriptor(
//!     EntityId::new(0x001B_92FF_FE01_2345),
//!     Box::new(|entity_id, status, descriptor| {
//!         println!("{}: {} ({})", entity_id, status, descriptor.entity_name);
//!     }),
//! );
//! ```

mod commands;
mod delegate;
mod discovery;
mod router;
mod status;

pub use commands::{
    AbortOperationHandler, AcquireEntityHandler, AcmpConnectionHandler, AddressAccessHandler,
    AudioMapHandler, AudioMappingsHandler, AvbInfoHandler, AsPathHandler,
    AvbInterfaceCountersHandler, ClockDomainCountersHandler, ClockSourceHandler,
    ConfigurationHandler, DescriptorHandler, EntityDescriptorHandler, GetNameHandler,
    LockEntityHandler, MemoryObjectLengthHandler, MilanInfoHandler, QueryAvailableHandler,
    SamplingRateHandler, SetNameHandler, StartOperationHandler, StreamFormatHandler,
    StreamInfoHandler, StreamingHandler, StreamInputCountersHandler, StreamOutputCountersHandler,
};
pub use delegate::ControllerDelegate;
pub use discovery::{DiscoveredEntities, DiscoveryWatchdog};
pub use router::{AemResponseData, DescriptorData, MvuResponseData};
pub use status::{AaCommandStatus, AemCommandStatus, ControlStatus, MvuCommandStatus};

use crate::interface::{ProtocolInterface, ProtocolInterfaceObserver};
use crate::model::{DiscoveredEntity, EntityId, MacAddress, StreamIndex};
use crate::protocol::aa::Tlv;
use crate::protocol::constants::PROTOCOL_MULTICAST_MAC;
use crate::protocol::pdu::{
    AcmpMessageType, AcmpStatus, Acmpdu, AecpStatus, Aecpdu, AemAecpdu, AemCommandType, MvuAecpdu,
    MvuCommandType,
};
use parking_lot::{Mutex, RwLock};
use router::{AcmpCompletion, AemCompletion, MvuCompletion};
use std::sync::{Arc, Weak};

/// Typed completion for a pending Address Access command
pub(crate) type AaCompletion = Box<dyn FnOnce(AaCommandStatus, Option<&[Tlv]>) + Send>;

/// Run a user callback, swallowing panics so they cannot poison the
/// invoking receive thread.
pub(crate) fn invoke_protected<F: FnOnce()>(context: &'static str, f: F) {
    if std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).is_err() {
        log::error!("[CONTROLLER] Panic in user callback ({})", context);
    }
}

/// The controller capability: discovery cache, command issuer, response
/// router and delegate fan-out over a [`ProtocolInterface`].
///
/// Construction registers the capability as the interface's observer and
/// starts the discovery watchdog; dropping the capability stops and
/// joins the watchdog. The capability does not own the interface.
pub struct ControllerCapability {
    controller_id: EntityId,
    interface: Arc<dyn ProtocolInterface>,
    entities: DiscoveredEntities,
    delegate: RwLock<Option<Arc<dyn ControllerDelegate>>>,
    watchdog: Mutex<Option<DiscoveryWatchdog>>,
    weak_self: Weak<ControllerCapability>,
}

impl ControllerCapability {
    /// Create the capability over a protocol interface.
    ///
    /// `controller_id` is this controller's own EntityID; it is never
    /// inserted into the discovery cache and is stamped into every
    /// outgoing command as the controller entity.
    pub fn new(interface: Arc<dyn ProtocolInterface>, controller_id: EntityId) -> Arc<Self> {
        let capability = Arc::new_cyclic(|weak| Self {
            controller_id,
            interface: Arc::clone(&interface),
            entities: DiscoveredEntities::new(controller_id),
            delegate: RwLock::new(None),
            watchdog: Mutex::new(None),
            weak_self: weak.clone(),
        });
        interface.set_observer(Arc::clone(&capability) as Arc<dyn ProtocolInterfaceObserver>);
        *capability.watchdog.lock() = Some(DiscoveryWatchdog::spawn(interface));
        capability
    }

    /// This controller's own EntityID
    pub fn controller_id(&self) -> EntityId {
        self.controller_id
    }

    /// Register (or replace) the delegate receiving notifications.
    ///
    /// The swap serializes against in-flight deliveries: each delivery
    /// clones the delegate under a short read guard, so a replaced
    /// delegate stays alive until deliveries using it return.
    pub fn set_delegate(&self, delegate: Option<Arc<dyn ControllerDelegate>>) {
        *self.delegate.write() = delegate;
    }

    pub(crate) fn delegate(&self) -> Option<Arc<dyn ControllerDelegate>> {
        self.delegate.read().clone()
    }

    /// Owned snapshot of a discovered entity, if present
    pub fn discovered_entity(&self, entity_id: EntityId) -> Option<DiscoveredEntity> {
        self.entities.lookup(entity_id)
    }

    /// Stop the discovery watchdog and wait for it. Also runs on drop.
    pub fn shutdown(&self) {
        if let Some(watchdog) = self.watchdog.lock().take() {
            watchdog.shutdown();
        }
    }

    // ========================================================================
    // Command issue internals
    // ========================================================================

    /// Unicast MAC for a target entity, if it is currently discovered.
    /// The cache lock is released before this returns.
    fn lookup_target_mac(&self, target_entity_id: EntityId) -> Option<MacAddress> {
        let entity = self.entities.lookup(target_entity_id)?;
        let mac = entity.any_mac_address();
        mac.is_valid().then_some(mac)
    }

    pub(crate) fn send_aem_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        payload: Vec<u8>,
        completion: AemCompletion,
    ) {
        let Some(target_mac) = self.lookup_target_mac(target_entity_id) else {
            // Not discovered: nothing is sent
            invoke_protected("aem answer", move || {
                completion(AemCommandStatus::UnknownEntity, None);
            });
            return;
        };

        let pdu = AemAecpdu {
            is_response: false,
            status: AecpStatus::SUCCESS,
            target_entity_id,
            controller_entity_id: self.controller_id,
            sequence_id: 0, // assigned by the interface
            unsolicited: false,
            command_type,
            payload,
            src_mac: self.interface.mac_address(),
            dest_mac: target_mac,
        };

        let weak = self.weak_self.clone();
        self.interface.send_aecp_command(
            Aecpdu::Aem(pdu),
            Box::new(move |result| match result {
                Ok(Aecpdu::Aem(response)) => match weak.upgrade() {
                    Some(controller) => controller.process_aem_response(&response, Some(completion)),
                    None => invoke_protected("aem answer", move || {
                        completion(AemCommandStatus::Canceled, None);
                    }),
                },
                Ok(other) => {
                    log::debug!(
                        "[CONTROLLER] AEM command answered by wrong sub-protocol ({:?})",
                        other.target_entity_id()
                    );
                    invoke_protected("aem answer", move || {
                        completion(AemCommandStatus::InternalError, None);
                    });
                }
                Err(error) => invoke_protected("aem answer", move || {
                    completion(AemCommandStatus::from_interface_error(error), None);
                }),
            }),
        );
    }

    pub(crate) fn send_aa_command(
        &self,
        target_entity_id: EntityId,
        tlvs: Vec<Tlv>,
        completion: AaCompletion,
    ) {
        let Some(target_mac) = self.lookup_target_mac(target_entity_id) else {
            invoke_protected("aa answer", move || {
                completion(AaCommandStatus::UnknownEntity, None);
            });
            return;
        };

        let pdu = crate::protocol::pdu::AaAecpdu {
            is_response: false,
            status: AecpStatus::SUCCESS,
            target_entity_id,
            controller_entity_id: self.controller_id,
            sequence_id: 0,
            tlvs,
            src_mac: self.interface.mac_address(),
            dest_mac: target_mac,
        };

        self.interface.send_aecp_command(
            Aecpdu::Aa(pdu),
            Box::new(move |result| match result {
                Ok(Aecpdu::Aa(response)) => {
                    // Single-shape: the TLV sequence is handed over verbatim
                    let status = AaCommandStatus::from_wire(response.status);
                    invoke_protected("aa answer", move || {
                        completion(status, Some(&response.tlvs));
                    });
                }
                Ok(_) => invoke_protected("aa answer", move || {
                    completion(AaCommandStatus::InternalError, None);
                }),
                Err(error) => invoke_protected("aa answer", move || {
                    completion(AaCommandStatus::from_interface_error(error), None);
                }),
            }),
        );
    }

    pub(crate) fn send_mvu_command(
        &self,
        target_entity_id: EntityId,
        command_type: MvuCommandType,
        payload: Vec<u8>,
        completion: MvuCompletion,
    ) {
        let Some(target_mac) = self.lookup_target_mac(target_entity_id) else {
            invoke_protected("mvu answer", move || {
                completion(MvuCommandStatus::UnknownEntity, None);
            });
            return;
        };

        let pdu = MvuAecpdu {
            is_response: false,
            status: AecpStatus::SUCCESS,
            target_entity_id,
            controller_entity_id: self.controller_id,
            sequence_id: 0,
            protocol_id: crate::protocol::constants::MILAN_VENDOR_UNIQUE_PROTOCOL_ID,
            command_type,
            payload,
            src_mac: self.interface.mac_address(),
            dest_mac: target_mac,
        };

        let weak = self.weak_self.clone();
        self.interface.send_aecp_command(
            Aecpdu::Mvu(pdu),
            Box::new(move |result| match result {
                Ok(Aecpdu::Mvu(response)) => match weak.upgrade() {
                    Some(controller) => controller.process_mvu_response(&response, Some(completion)),
                    None => invoke_protected("mvu answer", move || {
                        completion(MvuCommandStatus::Canceled, None);
                    }),
                },
                Ok(_) => invoke_protected("mvu answer", move || {
                    completion(MvuCommandStatus::InternalError, None);
                }),
                Err(error) => invoke_protected("mvu answer", move || {
                    completion(MvuCommandStatus::from_interface_error(error), None);
                }),
            }),
        );
    }

    /// ACMP PDUs are multicast: no per-entity MAC resolution happens.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn send_acmp(
        &self,
        message_type: AcmpMessageType,
        talker_entity_id: EntityId,
        talker_unique_id: StreamIndex,
        listener_entity_id: EntityId,
        listener_unique_id: StreamIndex,
        connection_count: u16,
        completion: AcmpCompletion,
    ) {
        let pdu = Acmpdu {
            message_type,
            status: AcmpStatus::SUCCESS,
            stream_id: 0,
            controller_entity_id: self.controller_id,
            talker_entity_id,
            talker_unique_id,
            listener_entity_id,
            listener_unique_id,
            stream_dest_mac: PROTOCOL_MULTICAST_MAC,
            connection_count,
            sequence_id: 0,
            flags: Default::default(),
            stream_vlan_id: 0,
        };

        let weak = self.weak_self.clone();
        self.interface.send_acmp_command(
            pdu,
            Box::new(move |result| match result {
                Ok(response) => match weak.upgrade() {
                    Some(controller) => {
                        controller.process_acmp_response(&response, Some(completion), false);
                    }
                    None => invoke_protected("acmp answer", move || {
                        completion(ControlStatus::Canceled, None);
                    }),
                },
                Err(error) => invoke_protected("acmp answer", move || {
                    completion(ControlStatus::from_interface_error(error), None);
                }),
            }),
        );
    }

    /// Incoming AEM command handler. Only CONTROLLER_AVAILABLE is
    /// consumed: the reply is an immediate Success with no payload.
    fn handle_aecp_command(&self, pdu: &Aecpdu) -> bool {
        let Aecpdu::Aem(aem) = pdu else {
            return false;
        };
        // Commands from self are filtered by the interface
        debug_assert!(
            aem.controller_entity_id != self.controller_id,
            "message from self should not reach the unhandled-command path"
        );
        if aem.is_response || aem.command_type != AemCommandType::CONTROLLER_AVAILABLE {
            return false;
        }

        let response = AemAecpdu::success_response_to(aem);
        if let Err(error) = self.interface.send_aecp_response(Aecpdu::Aem(response)) {
            log::debug!("[CONTROLLER] Failed to answer CONTROLLER_AVAILABLE: {}", error);
        }
        true
    }
}

impl ProtocolInterfaceObserver for ControllerCapability {
    fn on_transport_error(&self) {
        if let Some(delegate) = self.delegate() {
            invoke_protected("on_transport_error", || delegate.on_transport_error());
        }
    }

    fn on_remote_entity_online(&self, entity: &DiscoveredEntity) {
        let entity_id = entity.entity_id();
        if entity_id == self.controller_id {
            return;
        }
        // Cache first, notify after: the lock is never held across the
        // delegate call
        self.entities.insert_or_replace(entity.clone());
        if let Some(delegate) = self.delegate() {
            invoke_protected("on_entity_online", || delegate.on_entity_online(entity_id, entity));
        }
    }

    fn on_remote_entity_offline(&self, entity_id: EntityId) {
        if entity_id == self.controller_id {
            return;
        }
        self.entities.remove(entity_id);
        if let Some(delegate) = self.delegate() {
            invoke_protected("on_entity_offline", || delegate.on_entity_offline(entity_id));
        }
    }

    fn on_remote_entity_updated(&self, entity: &DiscoveredEntity) {
        let entity_id = entity.entity_id();
        if entity_id == self.controller_id {
            return;
        }
        self.entities.insert_or_replace(entity.clone());
        if let Some(delegate) = self.delegate() {
            invoke_protected("on_entity_update", || delegate.on_entity_update(entity_id, entity));
        }
    }

    fn on_aecp_unsolicited_response(&self, pdu: &Aecpdu) {
        // Ignore messages for other controllers
        if pdu.controller_entity_id() != self.controller_id {
            return;
        }
        match pdu {
            Aecpdu::Aem(aem) => {
                debug_assert!(aem.unsolicited, "only unsolicited responses reach this path");
                // No completion: unsolicited responses are not correlated
                self.process_aem_response(aem, None);
            }
            other => {
                log::debug!(
                    "[CONTROLLER] Ignoring non-AEM unsolicited response (target={})",
                    other.target_entity_id()
                );
            }
        }
    }

    fn on_acmp_sniffed_response(&self, pdu: &Acmpdu) {
        self.process_acmp_response(pdu, None, true);
    }

    fn on_unhandled_aecp_command(&self, pdu: &Aecpdu) -> bool {
        self.handle_aecp_command(pdu)
    }
}

impl Drop for ControllerCapability {
    fn drop(&mut self) {
        if let Some(watchdog) = self.watchdog.lock().take() {
            watchdog.shutdown();
        }
    }
}
