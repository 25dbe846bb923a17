// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovered-entity snapshots built from ADP advertisements.

use crate::model::eui::{EntityId, MacAddress};
use crate::model::types::{
    AvbInterfaceIndex, ControllerCapabilities, EntityCapabilities, ListenerCapabilities,
    TalkerCapabilities,
};
use std::collections::BTreeMap;

/// Per-AVB-interface information advertised in ADP (Clause 6.2.1)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct InterfaceInformation {
    /// Source MAC address of the advertisement on this interface
    pub mac_address: MacAddress,
    /// Liveness horizon in units of 2 seconds (1..=31, protocol default 31)
    pub valid_time: u8,
    /// Incremented by the entity on every state change
    pub available_index: u32,
    /// 802.1AS grandmaster the interface is locked to, when advertised
    pub gptp_grandmaster_id: Option<EntityId>,
    /// 802.1AS domain number, when advertised
    pub gptp_domain_number: Option<u8>,
}

/// Common (interface-independent) information advertised in ADP
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct CommonInformation {
    pub entity_id: EntityId,
    pub entity_model_id: u64,
    pub entity_capabilities: EntityCapabilities,
    pub talker_stream_sources: u16,
    pub talker_capabilities: TalkerCapabilities,
    pub listener_stream_sinks: u16,
    pub listener_capabilities: ListenerCapabilities,
    pub controller_capabilities: ControllerCapabilities,
    /// CONTROL descriptor index for identification, when the
    /// AEM_IDENTIFY_CONTROL_INDEX_VALID capability is advertised
    pub identify_control_index: Option<u16>,
    /// Association the entity belongs to, when ASSOCIATION_ID_VALID is set
    pub association_id: Option<EntityId>,
}

/// Snapshot of a remote entity as seen through discovery.
///
/// One entity may advertise on several AVB interfaces; the snapshot keeps
/// the per-interface records keyed by `AvbInterfaceIndex`. Any advertised
/// MAC is a valid unicast target for AECP; [`DiscoveredEntity::any_mac_address`]
/// picks one deterministically within the snapshot.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct DiscoveredEntity {
    pub common: CommonInformation,
    pub interfaces: BTreeMap<AvbInterfaceIndex, InterfaceInformation>,
}

impl DiscoveredEntity {
    /// Build a single-interface snapshot (the common case on non-redundant
    /// networks; the interface is recorded under index 0)
    pub fn new_single_interface(common: CommonInformation, interface: InterfaceInformation) -> Self {
        let mut interfaces = BTreeMap::new();
        interfaces.insert(0, interface);
        Self { common, interfaces }
    }

    pub fn entity_id(&self) -> EntityId {
        self.common.entity_id
    }

    /// Any MAC address the entity advertises, stable within this snapshot
    /// (lowest interface index wins)
    pub fn any_mac_address(&self) -> MacAddress {
        self.interfaces
            .values()
            .map(|interface| interface.mac_address)
            .next()
            .unwrap_or(MacAddress::NULL)
    }

    /// Per-interface information for a given AVB interface index
    pub fn interface_information(&self, index: AvbInterfaceIndex) -> Option<&InterfaceInformation> {
        self.interfaces.get(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_macs(macs: &[(AvbInterfaceIndex, [u8; 6])]) -> DiscoveredEntity {
        let mut entity = DiscoveredEntity {
            common: CommonInformation {
                entity_id: EntityId::new(0x0102_0304_0506_0708),
                ..Default::default()
            },
            ..Default::default()
        };
        for (index, mac) in macs {
            entity.interfaces.insert(
                *index,
                InterfaceInformation {
                    mac_address: MacAddress::new(*mac),
                    valid_time: 31,
                    ..Default::default()
                },
            );
        }
        entity
    }

    #[test]
    fn test_any_mac_is_stable_lowest_index() {
        let entity = snapshot_with_macs(&[
            (2, [2, 2, 2, 2, 2, 2]),
            (0, [0xAA, 0, 0, 0, 0, 1]),
            (1, [1, 1, 1, 1, 1, 1]),
        ]);
        assert_eq!(entity.any_mac_address(), MacAddress::new([0xAA, 0, 0, 0, 0, 1]));
        // Same snapshot, same answer
        assert_eq!(entity.any_mac_address(), entity.any_mac_address());
    }

    #[test]
    fn test_any_mac_without_interfaces_is_null() {
        let entity = DiscoveredEntity::default();
        assert!(!entity.any_mac_address().is_valid());
    }

    #[test]
    fn test_interface_lookup() {
        let entity = snapshot_with_macs(&[(3, [3, 3, 3, 3, 3, 3])]);
        assert!(entity.interface_information(3).is_some());
        assert!(entity.interface_information(0).is_none());
    }
}
