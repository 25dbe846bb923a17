// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process protocol interface.
//!
//! Replaces the raw-L2 transport with an event queue drained by a
//! background receive thread, so controller behavior can be exercised
//! end-to-end without a network. Injected PDUs flow through the same
//! pending-command matching and observer paths a real interface provides.
//!
//! Pending commands do not time out here; tests inject the response (or
//! call [`VirtualInterface::shutdown`], which flushes every pending
//! handler with [`InterfaceError::Shutdown`]).

use crate::interface::{
    AcmpCommandResultHandler, AecpCommandResultHandler, InterfaceError, ProtocolInterface,
    ProtocolInterfaceObserver,
};
use crate::model::{DiscoveredEntity, EntityId, MacAddress};
use crate::protocol::pdu::{Acmpdu, Aecpdu};
use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::thread::JoinHandle;

/// Tuning knobs for the virtual interface
#[derive(Debug, Clone)]
pub struct VirtualInterfaceConfig {
    /// MAC address the interface claims to send from
    pub mac_address: MacAddress,
    /// When true, every send returns `TransportError` without queuing
    pub fail_sends: bool,
}

impl Default for VirtualInterfaceConfig {
    fn default() -> Self {
        Self {
            mac_address: MacAddress::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]),
            fail_sends: false,
        }
    }
}

enum Event {
    Aecp(Aecpdu),
    Acmp(Acmpdu),
    EntityOnline(DiscoveredEntity),
    EntityOffline(EntityId),
    EntityUpdated(DiscoveredEntity),
    TransportError,
    /// Rendezvous marker: reply once every earlier event is processed
    Barrier(Sender<()>),
    Stop,
}

struct Shared {
    /// Held weakly so the observer's owner controls its lifetime
    observer: RwLock<Option<Weak<dyn ProtocolInterfaceObserver>>>,
    pending_aecp: Mutex<HashMap<u16, AecpCommandResultHandler>>,
    pending_acmp: Mutex<HashMap<u16, AcmpCommandResultHandler>>,
}

impl Shared {
    fn observer(&self) -> Option<Arc<dyn ProtocolInterfaceObserver>> {
        self.observer.read().as_ref().and_then(Weak::upgrade)
    }
}

/// In-process [`ProtocolInterface`] implementation
pub struct VirtualInterface {
    config: VirtualInterfaceConfig,
    shared: Arc<Shared>,
    tx: Sender<Event>,
    worker: Mutex<Option<JoinHandle<()>>>,
    next_sequence_id: Mutex<u16>,
    /// Frames handed to the transport, for test inspection
    sent_aecp_commands: Mutex<Vec<Aecpdu>>,
    sent_aecp_responses: Mutex<Vec<Aecpdu>>,
    sent_acmp_commands: Mutex<Vec<Acmpdu>>,
    discover_requests: Mutex<u32>,
}

impl VirtualInterface {
    pub fn new(config: VirtualInterfaceConfig) -> Arc<Self> {
        let (tx, rx) = unbounded();
        let shared = Arc::new(Shared {
            observer: RwLock::new(None),
            pending_aecp: Mutex::new(HashMap::new()),
            pending_acmp: Mutex::new(HashMap::new()),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("havb-virtual-pi".into())
            .spawn(move || receive_loop(&worker_shared, &rx))
            .ok();
        Arc::new(Self {
            config,
            shared,
            tx,
            worker: Mutex::new(worker),
            next_sequence_id: Mutex::new(0),
            sent_aecp_commands: Mutex::new(Vec::new()),
            sent_aecp_responses: Mutex::new(Vec::new()),
            sent_acmp_commands: Mutex::new(Vec::new()),
            discover_requests: Mutex::new(0),
        })
    }

    fn next_sequence_id(&self) -> u16 {
        let mut guard = self.next_sequence_id.lock();
        let id = *guard;
        *guard = guard.wrapping_add(1);
        id
    }

    // ---- Injection API (the "wire" side) ----

    /// Inject an incoming AECP PDU as if received from the segment
    pub fn inject_aecp(&self, pdu: Aecpdu) {
        let _ = self.tx.send(Event::Aecp(pdu));
    }

    /// Inject an incoming ACMP PDU as if received from the segment
    pub fn inject_acmp(&self, pdu: Acmpdu) {
        let _ = self.tx.send(Event::Acmp(pdu));
    }

    /// Simulate ADP reporting a new remote entity
    pub fn inject_entity_online(&self, entity: DiscoveredEntity) {
        let _ = self.tx.send(Event::EntityOnline(entity));
    }

    /// Simulate ADP reporting an entity departure
    pub fn inject_entity_offline(&self, entity_id: EntityId) {
        let _ = self.tx.send(Event::EntityOffline(entity_id));
    }

    /// Simulate ADP reporting an advertisement change
    pub fn inject_entity_updated(&self, entity: DiscoveredEntity) {
        let _ = self.tx.send(Event::EntityUpdated(entity));
    }

    /// Simulate a transport failure notification
    pub fn inject_transport_error(&self) {
        let _ = self.tx.send(Event::TransportError);
    }

    /// Block until every event injected so far has been processed
    pub fn flush(&self) {
        let (tx, rx) = unbounded();
        if self.tx.send(Event::Barrier(tx)).is_ok() {
            let _ = rx.recv();
        }
    }

    // ---- Test inspection ----

    /// Drain the log of AECP commands handed to the transport
    pub fn take_sent_aecp_commands(&self) -> Vec<Aecpdu> {
        std::mem::take(&mut self.sent_aecp_commands.lock())
    }

    /// Drain the log of AECP responses handed to the transport
    pub fn take_sent_aecp_responses(&self) -> Vec<Aecpdu> {
        std::mem::take(&mut self.sent_aecp_responses.lock())
    }

    /// Drain the log of ACMP commands handed to the transport
    pub fn take_sent_acmp_commands(&self) -> Vec<Acmpdu> {
        std::mem::take(&mut self.sent_acmp_commands.lock())
    }

    /// Number of discover_remote_entities calls observed
    pub fn discover_request_count(&self) -> u32 {
        *self.discover_requests.lock()
    }
}

fn receive_loop(shared: &Shared, rx: &Receiver<Event>) {
    while let Ok(event) = rx.recv() {
        match event {
            Event::Aecp(pdu) => route_aecp(shared, pdu),
            Event::Acmp(pdu) => route_acmp(shared, pdu),
            Event::EntityOnline(entity) => {
                if let Some(observer) = shared.observer() {
                    observer.on_remote_entity_online(&entity);
                }
            }
            Event::EntityOffline(entity_id) => {
                if let Some(observer) = shared.observer() {
                    observer.on_remote_entity_offline(entity_id);
                }
            }
            Event::EntityUpdated(entity) => {
                if let Some(observer) = shared.observer() {
                    observer.on_remote_entity_updated(&entity);
                }
            }
            Event::TransportError => {
                if let Some(observer) = shared.observer() {
                    observer.on_transport_error();
                }
            }
            Event::Barrier(reply) => {
                let _ = reply.send(());
            }
            Event::Stop => break,
        }
    }
}

fn route_aecp(shared: &Shared, pdu: Aecpdu) {
    let (is_response, sequence_id, unsolicited) = match &pdu {
        Aecpdu::Aem(aem) => (aem.is_response, aem.sequence_id, aem.unsolicited),
        Aecpdu::Aa(aa) => (aa.is_response, aa.sequence_id, false),
        Aecpdu::Mvu(mvu) => (mvu.is_response, mvu.sequence_id, false),
    };

    if is_response {
        // Unsolicited responses are not correlated with pending commands
        if !unsolicited {
            let handler = shared.pending_aecp.lock().remove(&sequence_id);
            if let Some(handler) = handler {
                handler(Ok(pdu));
                return;
            }
        }
        if unsolicited {
            if let Some(observer) = shared.observer() {
                observer.on_aecp_unsolicited_response(&pdu);
            }
        } else {
            log::debug!("[VIRTUAL-PI] Dropping uncorrelated AECP response (seq={})", sequence_id);
        }
    } else {
        let consumed = shared
            .observer()
            .map(|observer| observer.on_unhandled_aecp_command(&pdu))
            .unwrap_or(false);
        if !consumed {
            log::debug!("[VIRTUAL-PI] Unconsumed AECP command (seq={})", sequence_id);
        }
    }
}

fn route_acmp(shared: &Shared, pdu: Acmpdu) {
    if pdu.message_type.is_response() {
        let handler = shared.pending_acmp.lock().remove(&pdu.sequence_id);
        if let Some(handler) = handler {
            handler(Ok(pdu));
            return;
        }
        // No local pending command: this is sniffed traffic
        if let Some(observer) = shared.observer() {
            observer.on_acmp_sniffed_response(&pdu);
        }
    } else {
        log::debug!(
            "[VIRTUAL-PI] Ignoring ACMP command (message_type={:?})",
            pdu.message_type
        );
    }
}

impl ProtocolInterface for VirtualInterface {
    fn mac_address(&self) -> MacAddress {
        self.config.mac_address
    }

    fn discover_remote_entities(&self) -> Result<(), InterfaceError> {
        if self.config.fail_sends {
            return Err(InterfaceError::TransportError);
        }
        *self.discover_requests.lock() += 1;
        Ok(())
    }

    fn discover_remote_entity(&self, _entity_id: EntityId) -> Result<(), InterfaceError> {
        if self.config.fail_sends {
            return Err(InterfaceError::TransportError);
        }
        *self.discover_requests.lock() += 1;
        Ok(())
    }

    fn send_aecp_command(&self, mut pdu: Aecpdu, on_result: AecpCommandResultHandler) {
        if self.config.fail_sends {
            on_result(Err(InterfaceError::TransportError));
            return;
        }
        let sequence_id = self.next_sequence_id();
        match &mut pdu {
            Aecpdu::Aem(aem) => aem.sequence_id = sequence_id,
            Aecpdu::Aa(aa) => aa.sequence_id = sequence_id,
            Aecpdu::Mvu(mvu) => mvu.sequence_id = sequence_id,
        }
        self.shared.pending_aecp.lock().insert(sequence_id, on_result);
        self.sent_aecp_commands.lock().push(pdu);
    }

    fn send_aecp_response(&self, pdu: Aecpdu) -> Result<(), InterfaceError> {
        if self.config.fail_sends {
            return Err(InterfaceError::TransportError);
        }
        self.sent_aecp_responses.lock().push(pdu);
        Ok(())
    }

    fn send_acmp_command(&self, mut pdu: Acmpdu, on_result: AcmpCommandResultHandler) {
        if self.config.fail_sends {
            on_result(Err(InterfaceError::TransportError));
            return;
        }
        let sequence_id = self.next_sequence_id();
        pdu.sequence_id = sequence_id;
        self.shared.pending_acmp.lock().insert(sequence_id, on_result);
        self.sent_acmp_commands.lock().push(pdu);
    }

    fn set_observer(&self, observer: Arc<dyn ProtocolInterfaceObserver>) {
        *self.shared.observer.write() = Some(Arc::downgrade(&observer));
    }

    fn shutdown(&self) {
        // Flush pending completions with a terminal status before the
        // receive thread stops
        let aecp: Vec<_> = self.shared.pending_aecp.lock().drain().collect();
        for (_, handler) in aecp {
            handler(Err(InterfaceError::Shutdown));
        }
        let acmp: Vec<_> = self.shared.pending_acmp.lock().drain().collect();
        for (_, handler) in acmp {
            handler(Err(InterfaceError::Shutdown));
        }
        let _ = self.tx.send(Event::Stop);
        if let Some(worker) = self.worker.lock().take() {
            let _ = worker.join();
        }
    }
}

impl Drop for VirtualInterface {
    fn drop(&mut self) {
        let _ = self.tx.send(Event::Stop);
        if let Some(worker) = self.worker.lock().take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::pdu::{AecpStatus, AemAecpdu, AemCommandType};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn aem_command(target: EntityId) -> Aecpdu {
        Aecpdu::Aem(AemAecpdu {
            is_response: false,
            status: AecpStatus::SUCCESS,
            target_entity_id: target,
            controller_entity_id: EntityId::new(1),
            sequence_id: 0,
            unsolicited: false,
            command_type: AemCommandType::ENTITY_AVAILABLE,
            payload: Vec::new(),
            src_mac: MacAddress::new([2, 0, 0, 0, 0, 1]),
            dest_mac: MacAddress::new([2, 0, 0, 0, 0, 2]),
        })
    }

    #[test]
    fn test_pending_command_matches_injected_response() {
        let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = Arc::clone(&hits);
        pi.send_aecp_command(
            aem_command(EntityId::new(2)),
            Box::new(move |result| {
                assert!(result.is_ok());
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let sent = pi.take_sent_aecp_commands();
        assert_eq!(sent.len(), 1);
        let mut response = match &sent[0] {
            Aecpdu::Aem(aem) => aem.clone(),
            other => panic!("unexpected pdu {:?}", other),
        };
        response.is_response = true;
        pi.inject_aecp(Aecpdu::Aem(response));
        pi.flush();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        pi.shutdown();
    }

    #[test]
    fn test_shutdown_flushes_pending_with_terminal_status() {
        let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = Arc::clone(&hits);
        pi.send_aecp_command(
            aem_command(EntityId::new(2)),
            Box::new(move |result| {
                assert_eq!(result.unwrap_err(), InterfaceError::Shutdown);
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );
        pi.shutdown();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fail_sends_report_through_handler() {
        let pi = VirtualInterface::new(VirtualInterfaceConfig {
            fail_sends: true,
            ..Default::default()
        });
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = Arc::clone(&hits);
        pi.send_aecp_command(
            aem_command(EntityId::new(2)),
            Box::new(move |result| {
                assert_eq!(result.unwrap_err(), InterfaceError::TransportError);
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(pi.discover_remote_entities().is_err());
    }
}
