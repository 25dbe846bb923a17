// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery cache and periodic discovery watchdog.
//!
//! The cache maps discovered entity IDs to their latest ADP snapshot;
//! command issue resolves unicast MACs from it. The watchdog periodically
//! asks the protocol interface to broadcast ENTITY_DISCOVER so late
//! joiners and silent entities are re-solicited.

use crate::interface::ProtocolInterface;
use crate::model::{DiscoveredEntity, EntityId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Thread-safe map of the currently discovered remote entities.
///
/// The local controller's own entity is never inserted; lookups return
/// owned snapshots so callers never hold the lock while using one.
pub struct DiscoveredEntities {
    /// EntityID of the local controller, fixed at construction
    self_id: EntityId,
    entities: Mutex<HashMap<EntityId, DiscoveredEntity>>,
}

impl DiscoveredEntities {
    pub fn new(self_id: EntityId) -> Self {
        Self { self_id, entities: Mutex::new(HashMap::new()) }
    }

    /// Store or replace an entity snapshot. Self-advertisements are
    /// ignored.
    pub fn insert_or_replace(&self, entity: DiscoveredEntity) {
        let entity_id = entity.entity_id();
        if entity_id == self.self_id {
            return;
        }
        self.entities.lock().insert(entity_id, entity);
    }

    pub fn remove(&self, entity_id: EntityId) {
        self.entities.lock().remove(&entity_id);
    }

    /// Owned snapshot of one entity, if currently discovered
    pub fn lookup(&self, entity_id: EntityId) -> Option<DiscoveredEntity> {
        self.entities.lock().get(&entity_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entities.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.lock().is_empty()
    }
}

/// Discovery interval (Clause 6.2.4 recommends periodic re-discovery)
const DISCOVERY_INTERVAL_MS: u64 = 10_000;

/// Termination-flag polling quantum
const DISCOVERY_SLEEP_QUANTUM_MS: u64 = 10;

/// Periodic discovery worker.
///
/// One dedicated thread; cooperative termination via an atomic flag
/// checked every sleep quantum, joined on drop.
pub struct DiscoveryWatchdog {
    handle: Option<JoinHandle<()>>,
    terminate: Arc<AtomicBool>,
}

impl DiscoveryWatchdog {
    /// Spawn the watchdog against a protocol interface.
    #[must_use]
    pub fn spawn(interface: Arc<dyn ProtocolInterface>) -> Self {
        let terminate = Arc::new(AtomicBool::new(false));
        let terminate_clone = Arc::clone(&terminate);
        let handle = thread::Builder::new()
            .name("havb-discovery".into())
            .spawn(move || discovery_loop(&*interface, &terminate_clone))
            .ok();
        Self { handle, terminate }
    }

    /// Signal the worker to stop and wait for it. Also called on drop.
    pub fn shutdown(mut self) {
        self.terminate.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DiscoveryWatchdog {
    fn drop(&mut self) {
        self.terminate.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn discovery_loop(interface: &dyn ProtocolInterface, terminate: &AtomicBool) {
    let quantum = Duration::from_millis(DISCOVERY_SLEEP_QUANTUM_MS);
    loop {
        if terminate.load(Ordering::Relaxed) {
            break;
        }

        // Best effort: transport failures surface through the interface's
        // on_transport_error observer path, not from here
        if let Err(err) = interface.discover_remote_entities() {
            log::debug!("[DISCOVERY] discover_remote_entities failed: {}", err);
        }

        // Sleep up to the full interval, waking every quantum to re-check
        // the termination flag
        let mut slept = 0;
        while slept < DISCOVERY_INTERVAL_MS {
            if terminate.load(Ordering::Relaxed) {
                return;
            }
            thread::sleep(quantum);
            slept += DISCOVERY_SLEEP_QUANTUM_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{VirtualInterface, VirtualInterfaceConfig};
    use crate::model::{CommonInformation, InterfaceInformation, MacAddress};
    use std::time::Instant;

    fn entity(id: u64, mac: [u8; 6]) -> DiscoveredEntity {
        DiscoveredEntity::new_single_interface(
            CommonInformation { entity_id: EntityId::new(id), ..Default::default() },
            InterfaceInformation {
                mac_address: MacAddress::new(mac),
                valid_time: 31,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_cache_insert_replace_remove() {
        let cache = DiscoveredEntities::new(EntityId::new(0xC0));
        assert!(cache.is_empty());

        cache.insert_or_replace(entity(1, [1, 1, 1, 1, 1, 1]));
        assert_eq!(cache.len(), 1);
        let snapshot = cache.lookup(EntityId::new(1)).expect("Entity should be cached");
        assert_eq!(snapshot.any_mac_address(), MacAddress::new([1, 1, 1, 1, 1, 1]));

        // Replacement swaps the snapshot wholesale
        cache.insert_or_replace(entity(1, [2, 2, 2, 2, 2, 2]));
        let snapshot = cache.lookup(EntityId::new(1)).expect("Entity should be cached");
        assert_eq!(snapshot.any_mac_address(), MacAddress::new([2, 2, 2, 2, 2, 2]));

        cache.remove(EntityId::new(1));
        assert!(cache.lookup(EntityId::new(1)).is_none());
    }

    #[test]
    fn test_cache_never_stores_self() {
        let cache = DiscoveredEntities::new(EntityId::new(0xC0));
        cache.insert_or_replace(entity(0xC0, [1, 1, 1, 1, 1, 1]));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_watchdog_requests_discovery_and_stops_quickly() {
        let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
        let watchdog = DiscoveryWatchdog::spawn(pi.clone() as Arc<dyn ProtocolInterface>);

        // First discovery request happens immediately on loop entry
        let deadline = Instant::now() + Duration::from_secs(2);
        while pi.discover_request_count() == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(pi.discover_request_count() >= 1);

        // Termination completes within a few sleep quanta
        let started = Instant::now();
        watchdog.shutdown();
        assert!(started.elapsed() < Duration::from_millis(500));
        pi.shutdown();
    }
}
