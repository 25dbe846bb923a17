// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # AVDECC Entity Model
//!
//! Host-facing types of the IEEE 1722.1 entity model: identifiers,
//! descriptors, dynamic-information structs and discovered-entity
//! snapshots.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EntityId`] | 64-bit EUI-64 entity identifier |
//! | [`MacAddress`] | EUI-48 layer-2 address |
//! | [`DiscoveredEntity`] | ADP snapshot of a remote entity |
//! | [`DescriptorType`] | AEM descriptor type codes |
//! | [`AvdeccFixedString`] | 64-byte NUL-padded string |
//! | [`StreamInfo`] | GET/SET_STREAM_INFO dynamic information |
//!
//! ## See Also
//!
//! - IEEE 1722.1-2013 Clause 7 (entity model), Clause 6 (discovery)

mod descriptors;
mod entity;
mod eui;
mod types;

pub use descriptors::{
    AudioClusterDescriptor, AudioMapDescriptor, AudioUnitDescriptor, AvbInterfaceDescriptor,
    ClockDomainDescriptor, ClockSourceDescriptor, ConfigurationDescriptor, DescriptorType,
    EntityDescriptor, ExternalPortDescriptor, InternalPortDescriptor, JackDescriptor,
    LocaleDescriptor, MemoryObjectDescriptor, StreamDescriptor, StreamPortDescriptor,
    StringsDescriptor,
};
pub use entity::{CommonInformation, DiscoveredEntity, InterfaceInformation};
pub use eui::{EntityId, MacAddress};
pub use types::{
    make_entity_model_id, split_entity_model_id, AcquireEntityFlags, AsPath, AudioMapping,
    AudioMappings, AvbInfo, AvbInfoFlags, AvbInterfaceCounterValidFlags, AvbInterfaceIndex,
    AvdeccFixedString, ClockDomainCounterValidFlags, ClockDomainIndex, ClockSourceIndex,
    ConfigurationIndex, ConnectionFlags, ControllerCapabilities, DescriptorCounters,
    DescriptorIndex, EntityCapabilities, ListenerCapabilities, LocaleIndex,
    LocalizedStringReference, LockEntityFlags, MapIndex, MemoryObjectIndex,
    MemoryObjectOperationType, MilanInfo, MilanInfoFeaturesFlags, MsrpMapping, OperationId,
    SamplingRate, StreamFormat, StreamIdentification, StreamIndex, StreamInfo, StreamInfoFlags,
    StreamInputCounterValidFlags, StreamOutputCounterValidFlags, StringsIndex, TalkerCapabilities,
};
