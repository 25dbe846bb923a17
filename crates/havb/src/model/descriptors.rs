// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! AEM descriptor definitions (IEEE 1722.1-2013 Clause 7.2).
//!
//! These are the host-facing deserialized forms of READ_DESCRIPTOR
//! responses. Offsets/counts used by the wire layout (formats_offset,
//! sampling_rates_count, ...) are consumed during parsing and replaced by
//! the materialized vectors.

use crate::model::eui::{EntityId, MacAddress};
use crate::model::types::{
    AudioMappings, AvdeccFixedString, ClockDomainIndex, ClockSourceIndex, ControllerCapabilities,
    DescriptorIndex, EntityCapabilities, ListenerCapabilities, LocalizedStringReference,
    SamplingRate, StreamFormat, StringsIndex, TalkerCapabilities,
};
use std::collections::BTreeMap;
use std::fmt;

/// AEM descriptor_type codes (Clause 7.2, Table 7.1)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DescriptorType {
    Entity,
    Configuration,
    AudioUnit,
    VideoUnit,
    SensorUnit,
    StreamInput,
    StreamOutput,
    JackInput,
    JackOutput,
    AvbInterface,
    ClockSource,
    MemoryObject,
    Locale,
    Strings,
    StreamPortInput,
    StreamPortOutput,
    ExternalPortInput,
    ExternalPortOutput,
    InternalPortInput,
    InternalPortOutput,
    AudioCluster,
    VideoCluster,
    SensorCluster,
    AudioMap,
    VideoMap,
    SensorMap,
    Control,
    SignalSelector,
    Mixer,
    Matrix,
    MatrixSignal,
    SignalSplitter,
    SignalCombiner,
    SignalDemultiplexer,
    SignalMultiplexer,
    SignalTranscoder,
    ClockDomain,
    ControlBlock,
    /// Descriptor type code not defined by IEEE 1722.1-2013
    Unknown(u16),
}

impl DescriptorType {
    pub const fn to_wire(self) -> u16 {
        match self {
            Self::Entity => 0x0000,
            Self::Configuration => 0x0001,
            Self::AudioUnit => 0x0002,
            Self::VideoUnit => 0x0003,
            Self::SensorUnit => 0x0004,
            Self::StreamInput => 0x0005,
            Self::StreamOutput => 0x0006,
            Self::JackInput => 0x0007,
            Self::JackOutput => 0x0008,
            Self::AvbInterface => 0x0009,
            Self::ClockSource => 0x000A,
            Self::MemoryObject => 0x000B,
            Self::Locale => 0x000C,
            Self::Strings => 0x000D,
            Self::StreamPortInput => 0x000E,
            Self::StreamPortOutput => 0x000F,
            Self::ExternalPortInput => 0x0010,
            Self::ExternalPortOutput => 0x0011,
            Self::InternalPortInput => 0x0012,
            Self::InternalPortOutput => 0x0013,
            Self::AudioCluster => 0x0014,
            Self::VideoCluster => 0x0015,
            Self::SensorCluster => 0x0016,
            Self::AudioMap => 0x0017,
            Self::VideoMap => 0x0018,
            Self::SensorMap => 0x0019,
            Self::Control => 0x001A,
            Self::SignalSelector => 0x001B,
            Self::Mixer => 0x001C,
            Self::Matrix => 0x001D,
            Self::MatrixSignal => 0x001E,
            Self::SignalSplitter => 0x001F,
            Self::SignalCombiner => 0x0020,
            Self::SignalDemultiplexer => 0x0021,
            Self::SignalMultiplexer => 0x0022,
            Self::SignalTranscoder => 0x0023,
            Self::ClockDomain => 0x0024,
            Self::ControlBlock => 0x0025,
            Self::Unknown(value) => value,
        }
    }

    pub const fn from_wire(value: u16) -> Self {
        match value {
            0x0000 => Self::Entity,
            0x0001 => Self::Configuration,
            0x0002 => Self::AudioUnit,
            0x0003 => Self::VideoUnit,
            0x0004 => Self::SensorUnit,
            0x0005 => Self::StreamInput,
            0x0006 => Self::StreamOutput,
            0x0007 => Self::JackInput,
            0x0008 => Self::JackOutput,
            0x0009 => Self::AvbInterface,
            0x000A => Self::ClockSource,
            0x000B => Self::MemoryObject,
            0x000C => Self::Locale,
            0x000D => Self::Strings,
            0x000E => Self::StreamPortInput,
            0x000F => Self::StreamPortOutput,
            0x0010 => Self::ExternalPortInput,
            0x0011 => Self::ExternalPortOutput,
            0x0012 => Self::InternalPortInput,
            0x0013 => Self::InternalPortOutput,
            0x0014 => Self::AudioCluster,
            0x0015 => Self::VideoCluster,
            0x0016 => Self::SensorCluster,
            0x0017 => Self::AudioMap,
            0x0018 => Self::VideoMap,
            0x0019 => Self::SensorMap,
            0x001A => Self::Control,
            0x001B => Self::SignalSelector,
            0x001C => Self::Mixer,
            0x001D => Self::Matrix,
            0x001E => Self::MatrixSignal,
            0x001F => Self::SignalSplitter,
            0x0020 => Self::SignalCombiner,
            0x0021 => Self::SignalDemultiplexer,
            0x0022 => Self::SignalMultiplexer,
            0x0023 => Self::SignalTranscoder,
            0x0024 => Self::ClockDomain,
            0x0025 => Self::ControlBlock,
            other => Self::Unknown(other),
        }
    }
}

impl Default for DescriptorType {
    fn default() -> Self {
        Self::Unknown(0xFFFF)
    }
}

impl fmt::Display for DescriptorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "UNKNOWN({:#06x})", value),
            other => write!(f, "{:?}", other),
        }
    }
}

/// ENTITY descriptor (Clause 7.2.1)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct EntityDescriptor {
    pub entity_id: EntityId,
    pub entity_model_id: u64,
    pub entity_capabilities: EntityCapabilities,
    pub talker_stream_sources: u16,
    pub talker_capabilities: TalkerCapabilities,
    pub listener_stream_sinks: u16,
    pub listener_capabilities: ListenerCapabilities,
    pub controller_capabilities: ControllerCapabilities,
    pub available_index: u32,
    pub association_id: EntityId,
    pub entity_name: AvdeccFixedString,
    pub vendor_name_string: LocalizedStringReference,
    pub model_name_string: LocalizedStringReference,
    pub firmware_version: AvdeccFixedString,
    pub group_name: AvdeccFixedString,
    pub serial_number: AvdeccFixedString,
    pub configurations_count: u16,
    pub current_configuration: u16,
}

/// CONFIGURATION descriptor (Clause 7.2.2)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ConfigurationDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    /// Number of top-level descriptors per type in this configuration
    pub descriptor_counts: BTreeMap<DescriptorType, u16>,
}

/// AUDIO_UNIT descriptor (Clause 7.2.3)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AudioUnitDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub clock_domain_index: ClockDomainIndex,
    pub number_of_stream_input_ports: u16,
    pub base_stream_input_port: u16,
    pub number_of_stream_output_ports: u16,
    pub base_stream_output_port: u16,
    pub number_of_external_input_ports: u16,
    pub base_external_input_port: u16,
    pub number_of_external_output_ports: u16,
    pub base_external_output_port: u16,
    pub number_of_internal_input_ports: u16,
    pub base_internal_input_port: u16,
    pub number_of_internal_output_ports: u16,
    pub base_internal_output_port: u16,
    pub number_of_controls: u16,
    pub base_control: u16,
    pub number_of_signal_selectors: u16,
    pub base_signal_selector: u16,
    pub number_of_mixers: u16,
    pub base_mixer: u16,
    pub number_of_matrices: u16,
    pub base_matrix: u16,
    pub number_of_splitters: u16,
    pub base_splitter: u16,
    pub number_of_combiners: u16,
    pub base_combiner: u16,
    pub number_of_demultiplexers: u16,
    pub base_demultiplexer: u16,
    pub number_of_multiplexers: u16,
    pub base_multiplexer: u16,
    pub number_of_transcoders: u16,
    pub base_transcoder: u16,
    pub number_of_control_blocks: u16,
    pub base_control_block: u16,
    pub current_sampling_rate: SamplingRate,
    pub sampling_rates: Vec<SamplingRate>,
}

/// STREAM_INPUT / STREAM_OUTPUT descriptor (Clause 7.2.6)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct StreamDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub clock_domain_index: ClockDomainIndex,
    pub stream_flags: u16,
    pub current_format: StreamFormat,
    pub backup_talker_entity_id_0: EntityId,
    pub backup_talker_unique_id_0: u16,
    pub backup_talker_entity_id_1: EntityId,
    pub backup_talker_unique_id_1: u16,
    pub backup_talker_entity_id_2: EntityId,
    pub backup_talker_unique_id_2: u16,
    pub backedup_talker_entity_id: EntityId,
    pub backedup_talker_unique: u16,
    pub avb_interface_index: u16,
    pub buffer_length: u32,
    pub formats: Vec<StreamFormat>,
}

/// JACK_INPUT / JACK_OUTPUT descriptor (Clause 7.2.7)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct JackDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub jack_flags: u16,
    pub jack_type: u16,
    pub number_of_controls: u16,
    pub base_control: u16,
}

/// AVB_INTERFACE descriptor (Clause 7.2.8)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AvbInterfaceDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub mac_address: MacAddress,
    pub interface_flags: u16,
    pub clock_identity: EntityId,
    pub priority1: u8,
    pub clock_class: u8,
    pub offset_scaled_log_variance: u16,
    pub clock_accuracy: u8,
    pub priority2: u8,
    pub domain_number: u8,
    pub log_sync_interval: u8,
    pub log_announce_interval: u8,
    pub log_pdelay_interval: u8,
    pub port_number: u16,
}

/// CLOCK_SOURCE descriptor (Clause 7.2.9)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ClockSourceDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub clock_source_flags: u16,
    pub clock_source_type: u16,
    pub clock_source_identifier: EntityId,
    pub clock_source_location_type: DescriptorType,
    pub clock_source_location_index: DescriptorIndex,
}

/// MEMORY_OBJECT descriptor (Clause 7.2.10)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct MemoryObjectDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub memory_object_type: u16,
    pub target_descriptor_type: DescriptorType,
    pub target_descriptor_index: DescriptorIndex,
    pub start_address: u64,
    pub maximum_length: u64,
    pub length: u64,
}

/// LOCALE descriptor (Clause 7.2.11)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct LocaleDescriptor {
    pub locale_id: AvdeccFixedString,
    pub number_of_string_descriptors: u16,
    pub base_string_descriptor_index: StringsIndex,
}

/// STRINGS descriptor (Clause 7.2.12)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct StringsDescriptor {
    pub strings: [AvdeccFixedString; 7],
}

/// STREAM_PORT_INPUT / STREAM_PORT_OUTPUT descriptor (Clause 7.2.13)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct StreamPortDescriptor {
    pub clock_domain_index: ClockDomainIndex,
    pub port_flags: u16,
    pub number_of_controls: u16,
    pub base_control: u16,
    pub number_of_clusters: u16,
    pub base_cluster: u16,
    pub number_of_maps: u16,
    pub base_map: u16,
}

/// EXTERNAL_PORT_INPUT / EXTERNAL_PORT_OUTPUT descriptor (Clause 7.2.14)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ExternalPortDescriptor {
    pub clock_domain_index: ClockDomainIndex,
    pub port_flags: u16,
    pub number_of_controls: u16,
    pub base_control: u16,
    pub signal_type: DescriptorType,
    pub signal_index: DescriptorIndex,
    pub signal_output: u16,
    pub block_latency: u32,
    pub jack_index: u16,
}

/// INTERNAL_PORT_INPUT / INTERNAL_PORT_OUTPUT descriptor (Clause 7.2.15)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct InternalPortDescriptor {
    pub clock_domain_index: ClockDomainIndex,
    pub port_flags: u16,
    pub number_of_controls: u16,
    pub base_control: u16,
    pub signal_type: DescriptorType,
    pub signal_index: DescriptorIndex,
    pub signal_output: u16,
    pub block_latency: u32,
    pub internal_index: u16,
}

/// AUDIO_CLUSTER descriptor (Clause 7.2.16)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AudioClusterDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub signal_type: DescriptorType,
    pub signal_index: DescriptorIndex,
    pub signal_output: u16,
    pub path_latency: u32,
    pub block_latency: u32,
    pub channel_count: u16,
    pub format: u8,
}

/// AUDIO_MAP descriptor (Clause 7.2.19)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AudioMapDescriptor {
    pub mappings: AudioMappings,
}

/// CLOCK_DOMAIN descriptor (Clause 7.2.32)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ClockDomainDescriptor {
    pub object_name: AvdeccFixedString,
    pub localized_description: LocalizedStringReference,
    pub clock_source_index: ClockSourceIndex,
    pub clock_sources: Vec<ClockSourceIndex>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_type_wire_roundtrip() {
        for value in 0x0000..=0x0025u16 {
            let ty = DescriptorType::from_wire(value);
            assert!(!matches!(ty, DescriptorType::Unknown(_)), "code {:#06x} should be known", value);
            assert_eq!(ty.to_wire(), value);
        }
        assert_eq!(DescriptorType::from_wire(0xFFFF), DescriptorType::Unknown(0xFFFF));
    }

    #[test]
    fn test_descriptor_type_display() {
        assert_eq!(format!("{}", DescriptorType::StreamInput), "StreamInput");
        assert_eq!(format!("{}", DescriptorType::Unknown(0x1234)), "UNKNOWN(0x1234)");
    }

    #[test]
    fn test_default_descriptors_are_empty() {
        let entity = EntityDescriptor::default();
        assert!(entity.entity_id.is_null());
        assert_eq!(entity.configurations_count, 0);

        let config = ConfigurationDescriptor::default();
        assert!(config.descriptor_counts.is_empty());

        let strings = StringsDescriptor::default();
        assert!(strings.strings.iter().all(|s| s.is_empty()));
    }
}
