// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! AEM payload codec (IEEE 1722.1-2013 Clause 7.4).
//!
//! Stateless serialize/deserialize functions, one pair per command.
//! Serializers produce exactly the clause byte layout; deserializers fail
//! with [`PayloadError::IncorrectPayloadSize`] on truncation and never
//! panic. Responses with a descriptor-dependent body expose a common
//! header parse ([`deserialize_read_descriptor_common`]) so the router can
//! dispatch on `DescriptorType` before the body is interpreted.

use crate::model::{
    AcquireEntityFlags, AsPath, AudioClusterDescriptor, AudioMapDescriptor, AudioMapping,
    AudioMappings, AudioUnitDescriptor, AvbInfo, AvbInfoFlags, AvbInterfaceDescriptor,
    AvbInterfaceIndex, AvdeccFixedString, ClockDomainDescriptor, ClockSourceDescriptor,
    ConfigurationDescriptor, ConfigurationIndex, ControllerCapabilities, DescriptorCounters,
    DescriptorIndex, DescriptorType, EntityCapabilities, EntityDescriptor, EntityId,
    ExternalPortDescriptor, InternalPortDescriptor, JackDescriptor, ListenerCapabilities,
    LocaleDescriptor, LockEntityFlags, MacAddress, MemoryObjectDescriptor, MemoryObjectIndex,
    MemoryObjectOperationType, MsrpMapping, OperationId, SamplingRate, StreamDescriptor,
    StreamFormat, StreamInfo, StreamInfoFlags, StreamPortDescriptor, StringsDescriptor,
    TalkerCapabilities,
};
use crate::protocol::cursor::{
    check_payload_size, Deserializer, PayloadError, PayloadResult, Serializer,
};

// ============================================================================
// Fixed payload sizes (Clause 7.4)
// ============================================================================

pub const ACQUIRE_ENTITY_PAYLOAD_SIZE: usize = 16;
pub const LOCK_ENTITY_PAYLOAD_SIZE: usize = 16;
pub const READ_DESCRIPTOR_COMMAND_SIZE: usize = 8;
/// Size of the READ_DESCRIPTOR response prefix: configuration_index,
/// reserved, descriptor_type, descriptor_index. The descriptor body
/// follows; offset fields inside the body are relative to
/// `READ_DESCRIPTOR_COMMON_SIZE - 4` (the descriptor_type position).
pub const READ_DESCRIPTOR_COMMON_SIZE: usize = 8;
pub const SET_CONFIGURATION_PAYLOAD_SIZE: usize = 4;
pub const GET_CONFIGURATION_RESPONSE_SIZE: usize = 4;
pub const SET_STREAM_FORMAT_PAYLOAD_SIZE: usize = 12;
pub const GET_STREAM_FORMAT_COMMAND_SIZE: usize = 4;
pub const STREAM_INFO_PAYLOAD_SIZE: usize = 48;
pub const GET_STREAM_INFO_COMMAND_SIZE: usize = 4;
pub const SET_NAME_PAYLOAD_SIZE: usize = 72;
pub const GET_NAME_COMMAND_SIZE: usize = 8;
pub const SET_SAMPLING_RATE_PAYLOAD_SIZE: usize = 8;
pub const GET_SAMPLING_RATE_COMMAND_SIZE: usize = 4;
pub const SET_CLOCK_SOURCE_PAYLOAD_SIZE: usize = 8;
pub const GET_CLOCK_SOURCE_COMMAND_SIZE: usize = 4;
pub const START_STREAMING_PAYLOAD_SIZE: usize = 4;
pub const GET_AVB_INFO_COMMAND_SIZE: usize = 4;
pub const GET_AVB_INFO_RESPONSE_MIN_SIZE: usize = 20;
pub const GET_AS_PATH_COMMAND_SIZE: usize = 4;
pub const GET_AS_PATH_RESPONSE_MIN_SIZE: usize = 8;
pub const GET_COUNTERS_COMMAND_SIZE: usize = 4;
pub const GET_COUNTERS_RESPONSE_SIZE: usize = 136;
pub const GET_AUDIO_MAP_COMMAND_SIZE: usize = 8;
pub const GET_AUDIO_MAP_RESPONSE_MIN_SIZE: usize = 12;
pub const AUDIO_MAPPINGS_PAYLOAD_MIN_SIZE: usize = 8;
pub const START_OPERATION_PAYLOAD_MIN_SIZE: usize = 8;
pub const ABORT_OPERATION_PAYLOAD_SIZE: usize = 8;
pub const OPERATION_STATUS_RESPONSE_SIZE: usize = 8;
pub const MEMORY_OBJECT_LENGTH_PAYLOAD_SIZE: usize = 12;
pub const GET_MEMORY_OBJECT_LENGTH_COMMAND_SIZE: usize = 4;

const AUDIO_MAPPING_WIRE_SIZE: usize = 8;
const MSRP_MAPPING_WIRE_SIZE: usize = 4;

// ============================================================================
// Helpers
// ============================================================================

fn write_fixed_string(ser: &mut Serializer, value: &AvdeccFixedString) {
    ser.write_bytes(value.as_bytes());
}

fn read_fixed_string(des: &mut Deserializer<'_>) -> PayloadResult<AvdeccFixedString> {
    Ok(AvdeccFixedString::from_bytes(des.read_array::<64>()?))
}

fn read_descriptor_type(des: &mut Deserializer<'_>) -> PayloadResult<DescriptorType> {
    Ok(DescriptorType::from_wire(des.read_u16()?))
}

fn write_audio_mappings(ser: &mut Serializer, mappings: &[AudioMapping]) {
    for mapping in mappings {
        ser.write_u16(mapping.stream_index);
        ser.write_u16(mapping.stream_channel);
        ser.write_u16(mapping.cluster_offset);
        ser.write_u16(mapping.cluster_channel);
    }
}

fn read_audio_mappings(des: &mut Deserializer<'_>, count: usize) -> PayloadResult<AudioMappings> {
    let mut mappings = Vec::with_capacity(count);
    for _ in 0..count {
        mappings.push(AudioMapping {
            stream_index: des.read_u16()?,
            stream_channel: des.read_u16()?,
            cluster_offset: des.read_u16()?,
            cluster_channel: des.read_u16()?,
        });
    }
    Ok(mappings)
}

// ============================================================================
// ACQUIRE_ENTITY / LOCK_ENTITY (Clauses 7.4.1, 7.4.2)
// ============================================================================

fn serialize_acquire_entity(
    flags: AcquireEntityFlags,
    owner_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(ACQUIRE_ENTITY_PAYLOAD_SIZE);
    ser.write_u32(flags.bits());
    ser.write_u64(owner_id.value());
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// ACQUIRE_ENTITY Command - Clause 7.4.1.1
pub fn serialize_acquire_entity_command(
    flags: AcquireEntityFlags,
    owner_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_acquire_entity(flags, owner_id, descriptor_type, descriptor_index)
}

/// ACQUIRE_ENTITY Response - Clause 7.4.1.1
pub fn serialize_acquire_entity_response(
    flags: AcquireEntityFlags,
    owner_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_acquire_entity(flags, owner_id, descriptor_type, descriptor_index)
}

/// ACQUIRE_ENTITY Response - Clause 7.4.1.1
pub fn deserialize_acquire_entity_response(
    payload: &[u8],
) -> PayloadResult<(AcquireEntityFlags, EntityId, DescriptorType, DescriptorIndex)> {
    check_payload_size(payload, ACQUIRE_ENTITY_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let flags = AcquireEntityFlags(des.read_u32()?);
    let owner_id = EntityId::new(des.read_u64()?);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    Ok((flags, owner_id, descriptor_type, descriptor_index))
}

fn serialize_lock_entity(
    flags: LockEntityFlags,
    locked_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(LOCK_ENTITY_PAYLOAD_SIZE);
    ser.write_u32(flags.bits());
    ser.write_u64(locked_id.value());
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// LOCK_ENTITY Command - Clause 7.4.2.1
pub fn serialize_lock_entity_command(
    flags: LockEntityFlags,
    locked_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_lock_entity(flags, locked_id, descriptor_type, descriptor_index)
}

/// LOCK_ENTITY Response - Clause 7.4.2.1
pub fn serialize_lock_entity_response(
    flags: LockEntityFlags,
    locked_id: EntityId,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_lock_entity(flags, locked_id, descriptor_type, descriptor_index)
}

/// LOCK_ENTITY Response - Clause 7.4.2.1
pub fn deserialize_lock_entity_response(
    payload: &[u8],
) -> PayloadResult<(LockEntityFlags, EntityId, DescriptorType, DescriptorIndex)> {
    check_payload_size(payload, LOCK_ENTITY_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let flags = LockEntityFlags(des.read_u32()?);
    let locked_id = EntityId::new(des.read_u64()?);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    Ok((flags, locked_id, descriptor_type, descriptor_index))
}

// ============================================================================
// READ_DESCRIPTOR (Clause 7.4.5)
// ============================================================================

/// READ_DESCRIPTOR Command - Clause 7.4.5.1
///
/// Reading a CONFIGURATION descriptor passes the target configuration in
/// the descriptor_index slot (the configuration_index field is ignored by
/// the entity for that read).
pub fn serialize_read_descriptor_command(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(READ_DESCRIPTOR_COMMAND_SIZE);
    ser.write_u16(configuration_index);
    ser.write_u16(0); // reserved
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response common prefix - Clause 7.4.5.2
///
/// Returns (common size, configuration index, descriptor type, descriptor
/// index); the body deserializers resume from the common size.
pub fn deserialize_read_descriptor_common(
    payload: &[u8],
) -> PayloadResult<(usize, ConfigurationIndex, DescriptorType, DescriptorIndex)> {
    check_payload_size(payload, READ_DESCRIPTOR_COMMON_SIZE)?;
    let mut des = Deserializer::new(payload);
    let configuration_index = des.read_u16()?;
    let _reserved = des.read_u16()?;
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    Ok((READ_DESCRIPTOR_COMMON_SIZE, configuration_index, descriptor_type, descriptor_index))
}

fn response_header(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Serializer {
    let mut ser = Serializer::new();
    ser.write_u16(configuration_index);
    ser.write_u16(0); // reserved
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser
}

/// READ_DESCRIPTOR Response for ENTITY - Clauses 7.4.5.2, 7.2.1
pub fn serialize_read_entity_descriptor_response(descriptor: &EntityDescriptor) -> Vec<u8> {
    let mut ser = response_header(0, DescriptorType::Entity, 0);
    ser.write_u64(descriptor.entity_id.value());
    ser.write_u64(descriptor.entity_model_id);
    ser.write_u32(descriptor.entity_capabilities.bits());
    ser.write_u16(descriptor.talker_stream_sources);
    ser.write_u16(descriptor.talker_capabilities.bits());
    ser.write_u16(descriptor.listener_stream_sinks);
    ser.write_u16(descriptor.listener_capabilities.bits());
    ser.write_u32(descriptor.controller_capabilities.bits());
    ser.write_u32(descriptor.available_index);
    ser.write_u64(descriptor.association_id.value());
    write_fixed_string(&mut ser, &descriptor.entity_name);
    ser.write_u16(descriptor.vendor_name_string);
    ser.write_u16(descriptor.model_name_string);
    write_fixed_string(&mut ser, &descriptor.firmware_version);
    write_fixed_string(&mut ser, &descriptor.group_name);
    write_fixed_string(&mut ser, &descriptor.serial_number);
    ser.write_u16(descriptor.configurations_count);
    ser.write_u16(descriptor.current_configuration);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for ENTITY - Clause 7.2.1
pub fn deserialize_entity_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<EntityDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(EntityDescriptor {
        entity_id: EntityId::new(des.read_u64()?),
        entity_model_id: des.read_u64()?,
        entity_capabilities: EntityCapabilities(des.read_u32()?),
        talker_stream_sources: des.read_u16()?,
        talker_capabilities: TalkerCapabilities(des.read_u16()?),
        listener_stream_sinks: des.read_u16()?,
        listener_capabilities: ListenerCapabilities(des.read_u16()?),
        controller_capabilities: ControllerCapabilities(des.read_u32()?),
        available_index: des.read_u32()?,
        association_id: EntityId::new(des.read_u64()?),
        entity_name: read_fixed_string(&mut des)?,
        vendor_name_string: des.read_u16()?,
        model_name_string: des.read_u16()?,
        firmware_version: read_fixed_string(&mut des)?,
        group_name: read_fixed_string(&mut des)?,
        serial_number: read_fixed_string(&mut des)?,
        configurations_count: des.read_u16()?,
        current_configuration: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for CONFIGURATION - Clauses 7.4.5.2, 7.2.2
pub fn serialize_read_configuration_descriptor_response(
    descriptor_index: DescriptorIndex,
    descriptor: &ConfigurationDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(0, DescriptorType::Configuration, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.descriptor_counts.len() as u16);
    // counts_offset is relative to the descriptor_type field: 4 (type+index)
    // + 64 + 2 + 2 + 2 = 74
    ser.write_u16(74);
    for (descriptor_type, count) in &descriptor.descriptor_counts {
        ser.write_u16(descriptor_type.to_wire());
        ser.write_u16(*count);
    }
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for CONFIGURATION - Clause 7.2.2
pub fn deserialize_configuration_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<ConfigurationDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let object_name = read_fixed_string(&mut des)?;
    let localized_description = des.read_u16()?;
    let counts_count = des.read_u16()?;
    let counts_offset = des.read_u16()?;

    // Offsets are relative to the descriptor_type field position
    des.seek(common_size - 4 + counts_offset as usize)?;
    let mut descriptor_counts = std::collections::BTreeMap::new();
    for _ in 0..counts_count {
        let descriptor_type = read_descriptor_type(&mut des)?;
        let count = des.read_u16()?;
        descriptor_counts.insert(descriptor_type, count);
    }
    Ok(ConfigurationDescriptor { object_name, localized_description, descriptor_counts })
}

/// READ_DESCRIPTOR Response for AUDIO_UNIT - Clauses 7.4.5.2, 7.2.3
pub fn serialize_read_audio_unit_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &AudioUnitDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::AudioUnit, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.clock_domain_index);
    ser.write_u16(descriptor.number_of_stream_input_ports);
    ser.write_u16(descriptor.base_stream_input_port);
    ser.write_u16(descriptor.number_of_stream_output_ports);
    ser.write_u16(descriptor.base_stream_output_port);
    ser.write_u16(descriptor.number_of_external_input_ports);
    ser.write_u16(descriptor.base_external_input_port);
    ser.write_u16(descriptor.number_of_external_output_ports);
    ser.write_u16(descriptor.base_external_output_port);
    ser.write_u16(descriptor.number_of_internal_input_ports);
    ser.write_u16(descriptor.base_internal_input_port);
    ser.write_u16(descriptor.number_of_internal_output_ports);
    ser.write_u16(descriptor.base_internal_output_port);
    ser.write_u16(descriptor.number_of_controls);
    ser.write_u16(descriptor.base_control);
    ser.write_u16(descriptor.number_of_signal_selectors);
    ser.write_u16(descriptor.base_signal_selector);
    ser.write_u16(descriptor.number_of_mixers);
    ser.write_u16(descriptor.base_mixer);
    ser.write_u16(descriptor.number_of_matrices);
    ser.write_u16(descriptor.base_matrix);
    ser.write_u16(descriptor.number_of_splitters);
    ser.write_u16(descriptor.base_splitter);
    ser.write_u16(descriptor.number_of_combiners);
    ser.write_u16(descriptor.base_combiner);
    ser.write_u16(descriptor.number_of_demultiplexers);
    ser.write_u16(descriptor.base_demultiplexer);
    ser.write_u16(descriptor.number_of_multiplexers);
    ser.write_u16(descriptor.base_multiplexer);
    ser.write_u16(descriptor.number_of_transcoders);
    ser.write_u16(descriptor.base_transcoder);
    ser.write_u16(descriptor.number_of_control_blocks);
    ser.write_u16(descriptor.base_control_block);
    ser.write_u32(descriptor.current_sampling_rate.value());
    // rates_offset relative to descriptor_type: 4 + 64 + 2 + 68 u16 fields + 4 = 144
    ser.write_u16(144);
    ser.write_u16(descriptor.sampling_rates.len() as u16);
    for rate in &descriptor.sampling_rates {
        ser.write_u32(rate.value());
    }
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for AUDIO_UNIT - Clause 7.2.3
pub fn deserialize_audio_unit_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<AudioUnitDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let mut descriptor = AudioUnitDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        clock_domain_index: des.read_u16()?,
        number_of_stream_input_ports: des.read_u16()?,
        base_stream_input_port: des.read_u16()?,
        number_of_stream_output_ports: des.read_u16()?,
        base_stream_output_port: des.read_u16()?,
        number_of_external_input_ports: des.read_u16()?,
        base_external_input_port: des.read_u16()?,
        number_of_external_output_ports: des.read_u16()?,
        base_external_output_port: des.read_u16()?,
        number_of_internal_input_ports: des.read_u16()?,
        base_internal_input_port: des.read_u16()?,
        number_of_internal_output_ports: des.read_u16()?,
        base_internal_output_port: des.read_u16()?,
        number_of_controls: des.read_u16()?,
        base_control: des.read_u16()?,
        number_of_signal_selectors: des.read_u16()?,
        base_signal_selector: des.read_u16()?,
        number_of_mixers: des.read_u16()?,
        base_mixer: des.read_u16()?,
        number_of_matrices: des.read_u16()?,
        base_matrix: des.read_u16()?,
        number_of_splitters: des.read_u16()?,
        base_splitter: des.read_u16()?,
        number_of_combiners: des.read_u16()?,
        base_combiner: des.read_u16()?,
        number_of_demultiplexers: des.read_u16()?,
        base_demultiplexer: des.read_u16()?,
        number_of_multiplexers: des.read_u16()?,
        base_multiplexer: des.read_u16()?,
        number_of_transcoders: des.read_u16()?,
        base_transcoder: des.read_u16()?,
        number_of_control_blocks: des.read_u16()?,
        base_control_block: des.read_u16()?,
        current_sampling_rate: SamplingRate::new(des.read_u32()?),
        sampling_rates: Vec::new(),
    };
    let rates_offset = des.read_u16()?;
    let rates_count = des.read_u16()?;
    des.seek(common_size - 4 + rates_offset as usize)?;
    descriptor.sampling_rates.reserve(rates_count as usize);
    for _ in 0..rates_count {
        descriptor.sampling_rates.push(SamplingRate::new(des.read_u32()?));
    }
    Ok(descriptor)
}

/// READ_DESCRIPTOR Response for STREAM_INPUT / STREAM_OUTPUT - Clauses 7.4.5.2, 7.2.6
pub fn serialize_read_stream_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    descriptor: &StreamDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, descriptor_type, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.clock_domain_index);
    ser.write_u16(descriptor.stream_flags);
    ser.write_u64(descriptor.current_format.value());
    // formats_offset relative to descriptor_type: 4 + 64 + 2 + 2 + 2 + 8
    // + 2 + 2 + 3*(8+2) + 8 + 2 + 2 + 4 = 132
    ser.write_u16(132);
    ser.write_u16(descriptor.formats.len() as u16);
    ser.write_u64(descriptor.backup_talker_entity_id_0.value());
    ser.write_u16(descriptor.backup_talker_unique_id_0);
    ser.write_u64(descriptor.backup_talker_entity_id_1.value());
    ser.write_u16(descriptor.backup_talker_unique_id_1);
    ser.write_u64(descriptor.backup_talker_entity_id_2.value());
    ser.write_u16(descriptor.backup_talker_unique_id_2);
    ser.write_u64(descriptor.backedup_talker_entity_id.value());
    ser.write_u16(descriptor.backedup_talker_unique);
    ser.write_u16(descriptor.avb_interface_index);
    ser.write_u32(descriptor.buffer_length);
    for format in &descriptor.formats {
        ser.write_u64(format.value());
    }
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for STREAM_INPUT / STREAM_OUTPUT - Clause 7.2.6
pub fn deserialize_stream_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<StreamDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let object_name = read_fixed_string(&mut des)?;
    let localized_description = des.read_u16()?;
    let clock_domain_index = des.read_u16()?;
    let stream_flags = des.read_u16()?;
    let current_format = StreamFormat::new(des.read_u64()?);
    let formats_offset = des.read_u16()?;
    let number_of_formats = des.read_u16()?;
    let mut descriptor = StreamDescriptor {
        object_name,
        localized_description,
        clock_domain_index,
        stream_flags,
        current_format,
        backup_talker_entity_id_0: EntityId::new(des.read_u64()?),
        backup_talker_unique_id_0: des.read_u16()?,
        backup_talker_entity_id_1: EntityId::new(des.read_u64()?),
        backup_talker_unique_id_1: des.read_u16()?,
        backup_talker_entity_id_2: EntityId::new(des.read_u64()?),
        backup_talker_unique_id_2: des.read_u16()?,
        backedup_talker_entity_id: EntityId::new(des.read_u64()?),
        backedup_talker_unique: des.read_u16()?,
        avb_interface_index: des.read_u16()?,
        buffer_length: des.read_u32()?,
        formats: Vec::new(),
    };
    des.seek(common_size - 4 + formats_offset as usize)?;
    descriptor.formats.reserve(number_of_formats as usize);
    for _ in 0..number_of_formats {
        descriptor.formats.push(StreamFormat::new(des.read_u64()?));
    }
    Ok(descriptor)
}

/// READ_DESCRIPTOR Response for JACK_INPUT / JACK_OUTPUT - Clauses 7.4.5.2, 7.2.7
pub fn serialize_read_jack_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    descriptor: &JackDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, descriptor_type, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.jack_flags);
    ser.write_u16(descriptor.jack_type);
    ser.write_u16(descriptor.number_of_controls);
    ser.write_u16(descriptor.base_control);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for JACK_INPUT / JACK_OUTPUT - Clause 7.2.7
pub fn deserialize_jack_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<JackDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(JackDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        jack_flags: des.read_u16()?,
        jack_type: des.read_u16()?,
        number_of_controls: des.read_u16()?,
        base_control: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for AVB_INTERFACE - Clauses 7.4.5.2, 7.2.8
pub fn serialize_read_avb_interface_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &AvbInterfaceDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::AvbInterface, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_bytes(descriptor.mac_address.as_bytes());
    ser.write_u16(descriptor.interface_flags);
    ser.write_u64(descriptor.clock_identity.value());
    ser.write_u8(descriptor.priority1);
    ser.write_u8(descriptor.clock_class);
    ser.write_u16(descriptor.offset_scaled_log_variance);
    ser.write_u8(descriptor.clock_accuracy);
    ser.write_u8(descriptor.priority2);
    ser.write_u8(descriptor.domain_number);
    ser.write_u8(descriptor.log_sync_interval);
    ser.write_u8(descriptor.log_announce_interval);
    ser.write_u8(descriptor.log_pdelay_interval);
    ser.write_u16(descriptor.port_number);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for AVB_INTERFACE - Clause 7.2.8
pub fn deserialize_avb_interface_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<AvbInterfaceDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(AvbInterfaceDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        mac_address: MacAddress::new(des.read_array::<6>()?),
        interface_flags: des.read_u16()?,
        clock_identity: EntityId::new(des.read_u64()?),
        priority1: des.read_u8()?,
        clock_class: des.read_u8()?,
        offset_scaled_log_variance: des.read_u16()?,
        clock_accuracy: des.read_u8()?,
        priority2: des.read_u8()?,
        domain_number: des.read_u8()?,
        log_sync_interval: des.read_u8()?,
        log_announce_interval: des.read_u8()?,
        log_pdelay_interval: des.read_u8()?,
        port_number: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for CLOCK_SOURCE - Clauses 7.4.5.2, 7.2.9
pub fn serialize_read_clock_source_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &ClockSourceDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::ClockSource, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.clock_source_flags);
    ser.write_u16(descriptor.clock_source_type);
    ser.write_u64(descriptor.clock_source_identifier.value());
    ser.write_u16(descriptor.clock_source_location_type.to_wire());
    ser.write_u16(descriptor.clock_source_location_index);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for CLOCK_SOURCE - Clause 7.2.9
pub fn deserialize_clock_source_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<ClockSourceDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(ClockSourceDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        clock_source_flags: des.read_u16()?,
        clock_source_type: des.read_u16()?,
        clock_source_identifier: EntityId::new(des.read_u64()?),
        clock_source_location_type: read_descriptor_type(&mut des)?,
        clock_source_location_index: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for MEMORY_OBJECT - Clauses 7.4.5.2, 7.2.10
pub fn serialize_read_memory_object_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &MemoryObjectDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::MemoryObject, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.memory_object_type);
    ser.write_u16(descriptor.target_descriptor_type.to_wire());
    ser.write_u16(descriptor.target_descriptor_index);
    ser.write_u64(descriptor.start_address);
    ser.write_u64(descriptor.maximum_length);
    ser.write_u64(descriptor.length);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for MEMORY_OBJECT - Clause 7.2.10
pub fn deserialize_memory_object_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<MemoryObjectDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(MemoryObjectDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        memory_object_type: des.read_u16()?,
        target_descriptor_type: read_descriptor_type(&mut des)?,
        target_descriptor_index: des.read_u16()?,
        start_address: des.read_u64()?,
        maximum_length: des.read_u64()?,
        length: des.read_u64()?,
    })
}

/// READ_DESCRIPTOR Response for LOCALE - Clauses 7.4.5.2, 7.2.11
pub fn serialize_read_locale_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &LocaleDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::Locale, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.locale_id);
    ser.write_u16(descriptor.number_of_string_descriptors);
    ser.write_u16(descriptor.base_string_descriptor_index);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for LOCALE - Clause 7.2.11
pub fn deserialize_locale_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<LocaleDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(LocaleDescriptor {
        locale_id: read_fixed_string(&mut des)?,
        number_of_string_descriptors: des.read_u16()?,
        base_string_descriptor_index: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for STRINGS - Clauses 7.4.5.2, 7.2.12
pub fn serialize_read_strings_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &StringsDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::Strings, descriptor_index);
    for string in &descriptor.strings {
        write_fixed_string(&mut ser, string);
    }
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for STRINGS - Clause 7.2.12
pub fn deserialize_strings_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<StringsDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let mut descriptor = StringsDescriptor::default();
    for string in descriptor.strings.iter_mut() {
        *string = read_fixed_string(&mut des)?;
    }
    Ok(descriptor)
}

/// READ_DESCRIPTOR Response for STREAM_PORT_INPUT / _OUTPUT - Clauses 7.4.5.2, 7.2.13
pub fn serialize_read_stream_port_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    descriptor: &StreamPortDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, descriptor_type, descriptor_index);
    ser.write_u16(descriptor.clock_domain_index);
    ser.write_u16(descriptor.port_flags);
    ser.write_u16(descriptor.number_of_controls);
    ser.write_u16(descriptor.base_control);
    ser.write_u16(descriptor.number_of_clusters);
    ser.write_u16(descriptor.base_cluster);
    ser.write_u16(descriptor.number_of_maps);
    ser.write_u16(descriptor.base_map);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for STREAM_PORT_INPUT / _OUTPUT - Clause 7.2.13
pub fn deserialize_stream_port_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<StreamPortDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(StreamPortDescriptor {
        clock_domain_index: des.read_u16()?,
        port_flags: des.read_u16()?,
        number_of_controls: des.read_u16()?,
        base_control: des.read_u16()?,
        number_of_clusters: des.read_u16()?,
        base_cluster: des.read_u16()?,
        number_of_maps: des.read_u16()?,
        base_map: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for EXTERNAL_PORT_INPUT / _OUTPUT - Clauses 7.4.5.2, 7.2.14
pub fn serialize_read_external_port_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    descriptor: &ExternalPortDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, descriptor_type, descriptor_index);
    ser.write_u16(descriptor.clock_domain_index);
    ser.write_u16(descriptor.port_flags);
    ser.write_u16(descriptor.number_of_controls);
    ser.write_u16(descriptor.base_control);
    ser.write_u16(descriptor.signal_type.to_wire());
    ser.write_u16(descriptor.signal_index);
    ser.write_u16(descriptor.signal_output);
    ser.write_u32(descriptor.block_latency);
    ser.write_u16(descriptor.jack_index);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for EXTERNAL_PORT_INPUT / _OUTPUT - Clause 7.2.14
pub fn deserialize_external_port_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<ExternalPortDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(ExternalPortDescriptor {
        clock_domain_index: des.read_u16()?,
        port_flags: des.read_u16()?,
        number_of_controls: des.read_u16()?,
        base_control: des.read_u16()?,
        signal_type: read_descriptor_type(&mut des)?,
        signal_index: des.read_u16()?,
        signal_output: des.read_u16()?,
        block_latency: des.read_u32()?,
        jack_index: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for INTERNAL_PORT_INPUT / _OUTPUT - Clauses 7.4.5.2, 7.2.15
pub fn serialize_read_internal_port_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    descriptor: &InternalPortDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, descriptor_type, descriptor_index);
    ser.write_u16(descriptor.clock_domain_index);
    ser.write_u16(descriptor.port_flags);
    ser.write_u16(descriptor.number_of_controls);
    ser.write_u16(descriptor.base_control);
    ser.write_u16(descriptor.signal_type.to_wire());
    ser.write_u16(descriptor.signal_index);
    ser.write_u16(descriptor.signal_output);
    ser.write_u32(descriptor.block_latency);
    ser.write_u16(descriptor.internal_index);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for INTERNAL_PORT_INPUT / _OUTPUT - Clause 7.2.15
pub fn deserialize_internal_port_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<InternalPortDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(InternalPortDescriptor {
        clock_domain_index: des.read_u16()?,
        port_flags: des.read_u16()?,
        number_of_controls: des.read_u16()?,
        base_control: des.read_u16()?,
        signal_type: read_descriptor_type(&mut des)?,
        signal_index: des.read_u16()?,
        signal_output: des.read_u16()?,
        block_latency: des.read_u32()?,
        internal_index: des.read_u16()?,
    })
}

/// READ_DESCRIPTOR Response for AUDIO_CLUSTER - Clauses 7.4.5.2, 7.2.16
pub fn serialize_read_audio_cluster_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &AudioClusterDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::AudioCluster, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.signal_type.to_wire());
    ser.write_u16(descriptor.signal_index);
    ser.write_u16(descriptor.signal_output);
    ser.write_u32(descriptor.path_latency);
    ser.write_u32(descriptor.block_latency);
    ser.write_u16(descriptor.channel_count);
    ser.write_u8(descriptor.format);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for AUDIO_CLUSTER - Clause 7.2.16
pub fn deserialize_audio_cluster_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<AudioClusterDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    Ok(AudioClusterDescriptor {
        object_name: read_fixed_string(&mut des)?,
        localized_description: des.read_u16()?,
        signal_type: read_descriptor_type(&mut des)?,
        signal_index: des.read_u16()?,
        signal_output: des.read_u16()?,
        path_latency: des.read_u32()?,
        block_latency: des.read_u32()?,
        channel_count: des.read_u16()?,
        format: des.read_u8()?,
    })
}

/// READ_DESCRIPTOR Response for AUDIO_MAP - Clauses 7.4.5.2, 7.2.19
pub fn serialize_read_audio_map_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &AudioMapDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::AudioMap, descriptor_index);
    // mappings_offset relative to descriptor_type: 4 + 2 + 2 = 8
    ser.write_u16(8);
    ser.write_u16(descriptor.mappings.len() as u16);
    write_audio_mappings(&mut ser, &descriptor.mappings);
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for AUDIO_MAP - Clause 7.2.19
pub fn deserialize_audio_map_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<AudioMapDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let mappings_offset = des.read_u16()?;
    let number_of_mappings = des.read_u16()?;
    des.seek(common_size - 4 + mappings_offset as usize)?;
    Ok(AudioMapDescriptor { mappings: read_audio_mappings(&mut des, number_of_mappings as usize)? })
}

/// READ_DESCRIPTOR Response for CLOCK_DOMAIN - Clauses 7.4.5.2, 7.2.32
pub fn serialize_read_clock_domain_descriptor_response(
    configuration_index: ConfigurationIndex,
    descriptor_index: DescriptorIndex,
    descriptor: &ClockDomainDescriptor,
) -> Vec<u8> {
    let mut ser = response_header(configuration_index, DescriptorType::ClockDomain, descriptor_index);
    write_fixed_string(&mut ser, &descriptor.object_name);
    ser.write_u16(descriptor.localized_description);
    ser.write_u16(descriptor.clock_source_index);
    // sources_offset relative to descriptor_type: 4 + 64 + 2 + 2 + 2 + 2 = 76
    ser.write_u16(76);
    ser.write_u16(descriptor.clock_sources.len() as u16);
    for source in &descriptor.clock_sources {
        ser.write_u16(*source);
    }
    ser.into_vec()
}

/// READ_DESCRIPTOR Response body for CLOCK_DOMAIN - Clause 7.2.32
pub fn deserialize_clock_domain_descriptor(
    payload: &[u8],
    common_size: usize,
) -> PayloadResult<ClockDomainDescriptor> {
    let mut des = Deserializer::new(payload);
    des.seek(common_size)?;
    let object_name = read_fixed_string(&mut des)?;
    let localized_description = des.read_u16()?;
    let clock_source_index = des.read_u16()?;
    let sources_offset = des.read_u16()?;
    let sources_count = des.read_u16()?;
    des.seek(common_size - 4 + sources_offset as usize)?;
    let mut clock_sources = Vec::with_capacity(sources_count as usize);
    for _ in 0..sources_count {
        clock_sources.push(des.read_u16()?);
    }
    Ok(ClockDomainDescriptor {
        object_name,
        localized_description,
        clock_source_index,
        clock_sources,
    })
}

// ============================================================================
// SET_CONFIGURATION / GET_CONFIGURATION (Clauses 7.4.7, 7.4.8)
// ============================================================================

fn serialize_configuration(configuration_index: ConfigurationIndex) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(SET_CONFIGURATION_PAYLOAD_SIZE);
    ser.write_u16(0); // reserved
    ser.write_u16(configuration_index);
    ser.into_vec()
}

/// SET_CONFIGURATION Command - Clause 7.4.7.1
pub fn serialize_set_configuration_command(configuration_index: ConfigurationIndex) -> Vec<u8> {
    serialize_configuration(configuration_index)
}

/// SET_CONFIGURATION Response - Clause 7.4.7.1
pub fn serialize_set_configuration_response(configuration_index: ConfigurationIndex) -> Vec<u8> {
    serialize_configuration(configuration_index)
}

/// SET_CONFIGURATION Response - Clause 7.4.7.1
pub fn deserialize_set_configuration_response(
    payload: &[u8],
) -> PayloadResult<ConfigurationIndex> {
    check_payload_size(payload, SET_CONFIGURATION_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let _reserved = des.read_u16()?;
    des.read_u16()
}

/// GET_CONFIGURATION Response - Clause 7.4.8.2
pub fn serialize_get_configuration_response(configuration_index: ConfigurationIndex) -> Vec<u8> {
    serialize_configuration(configuration_index)
}

/// GET_CONFIGURATION Response - Clause 7.4.8.2
pub fn deserialize_get_configuration_response(
    payload: &[u8],
) -> PayloadResult<ConfigurationIndex> {
    check_payload_size(payload, GET_CONFIGURATION_RESPONSE_SIZE)?;
    let mut des = Deserializer::new(payload);
    let _reserved = des.read_u16()?;
    des.read_u16()
}

// ============================================================================
// SET_STREAM_FORMAT / GET_STREAM_FORMAT (Clauses 7.4.9, 7.4.10)
// ============================================================================

fn serialize_stream_format(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    stream_format: StreamFormat,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(SET_STREAM_FORMAT_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u64(stream_format.value());
    ser.into_vec()
}

/// SET_STREAM_FORMAT Command - Clause 7.4.9.1
pub fn serialize_set_stream_format_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    stream_format: StreamFormat,
) -> Vec<u8> {
    serialize_stream_format(descriptor_type, descriptor_index, stream_format)
}

/// SET_STREAM_FORMAT Response - Clause 7.4.9.1
pub fn serialize_set_stream_format_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    stream_format: StreamFormat,
) -> Vec<u8> {
    serialize_stream_format(descriptor_type, descriptor_index, stream_format)
}

/// SET_STREAM_FORMAT Response - Clause 7.4.9.1
pub fn deserialize_set_stream_format_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, StreamFormat)> {
    check_payload_size(payload, SET_STREAM_FORMAT_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let stream_format = StreamFormat::new(des.read_u64()?);
    Ok((descriptor_type, descriptor_index, stream_format))
}

/// GET_STREAM_FORMAT Command - Clause 7.4.10.1
pub fn serialize_get_stream_format_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_STREAM_FORMAT_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_STREAM_FORMAT Response - Clause 7.4.10.2
pub fn serialize_get_stream_format_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    stream_format: StreamFormat,
) -> Vec<u8> {
    serialize_stream_format(descriptor_type, descriptor_index, stream_format)
}

/// GET_STREAM_FORMAT Response - Clause 7.4.10.2
pub fn deserialize_get_stream_format_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, StreamFormat)> {
    deserialize_set_stream_format_response(payload)
}

// ============================================================================
// SET_STREAM_INFO / GET_STREAM_INFO (Clauses 7.4.15, 7.4.16)
// ============================================================================

fn serialize_stream_info(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    info: &StreamInfo,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(STREAM_INFO_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u32(info.stream_info_flags.bits());
    ser.write_u64(info.stream_format.value());
    ser.write_u64(info.stream_id);
    ser.write_u32(info.msrp_accumulated_latency);
    ser.write_bytes(info.stream_dest_mac.as_bytes());
    ser.write_u8(info.msrp_failure_code);
    ser.write_u8(0); // reserved
    ser.write_u64(info.msrp_failure_bridge_id);
    ser.write_u16(info.stream_vlan_id);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

fn deserialize_stream_info(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, StreamInfo)> {
    check_payload_size(payload, STREAM_INFO_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let stream_info_flags = StreamInfoFlags(des.read_u32()?);
    let stream_format = StreamFormat::new(des.read_u64()?);
    let stream_id = des.read_u64()?;
    let msrp_accumulated_latency = des.read_u32()?;
    let stream_dest_mac = MacAddress::new(des.read_array::<6>()?);
    let msrp_failure_code = des.read_u8()?;
    let _reserved = des.read_u8()?;
    let msrp_failure_bridge_id = des.read_u64()?;
    let stream_vlan_id = des.read_u16()?;
    Ok((
        descriptor_type,
        descriptor_index,
        StreamInfo {
            stream_info_flags,
            stream_format,
            stream_id,
            msrp_accumulated_latency,
            stream_dest_mac,
            msrp_failure_code,
            msrp_failure_bridge_id,
            stream_vlan_id,
        },
    ))
}

/// SET_STREAM_INFO Command - Clause 7.4.15.1
pub fn serialize_set_stream_info_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    info: &StreamInfo,
) -> Vec<u8> {
    serialize_stream_info(descriptor_type, descriptor_index, info)
}

/// SET_STREAM_INFO Response - Clause 7.4.15.1
pub fn serialize_set_stream_info_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    info: &StreamInfo,
) -> Vec<u8> {
    serialize_stream_info(descriptor_type, descriptor_index, info)
}

/// SET_STREAM_INFO Response - Clause 7.4.15.1
pub fn deserialize_set_stream_info_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, StreamInfo)> {
    deserialize_stream_info(payload)
}

/// GET_STREAM_INFO Command - Clause 7.4.16.1
pub fn serialize_get_stream_info_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_STREAM_INFO_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_STREAM_INFO Response - Clause 7.4.16.2
pub fn serialize_get_stream_info_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    info: &StreamInfo,
) -> Vec<u8> {
    serialize_stream_info(descriptor_type, descriptor_index, info)
}

/// GET_STREAM_INFO Response - Clause 7.4.16.2
pub fn deserialize_get_stream_info_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, StreamInfo)> {
    deserialize_stream_info(payload)
}

// ============================================================================
// SET_NAME / GET_NAME (Clauses 7.4.17, 7.4.18)
// ============================================================================

fn log_entity_name_addressing(
    command: &str,
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    configuration_index: ConfigurationIndex,
) {
    // Entity descriptor names live outside any configuration (Clause 7.4.17.1)
    if descriptor_type == DescriptorType::Entity && (descriptor_index != 0 || configuration_index != 0)
    {
        log::debug!(
            "[AEM] {} on ENTITY with nonzero index (descriptor_index={}, configuration_index={})",
            command,
            descriptor_index,
            configuration_index
        );
    }
}

/// SET_NAME Command - Clause 7.4.17.1
pub fn serialize_set_name_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    name_index: u16,
    configuration_index: ConfigurationIndex,
    name: &AvdeccFixedString,
) -> Vec<u8> {
    log_entity_name_addressing("SET_NAME", descriptor_type, descriptor_index, configuration_index);
    let mut ser = Serializer::with_capacity(SET_NAME_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(name_index);
    ser.write_u16(configuration_index);
    write_fixed_string(&mut ser, name);
    ser.into_vec()
}

/// SET_NAME Response - Clause 7.4.17.1
pub fn serialize_set_name_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    name_index: u16,
    configuration_index: ConfigurationIndex,
    name: &AvdeccFixedString,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(SET_NAME_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(name_index);
    ser.write_u16(configuration_index);
    write_fixed_string(&mut ser, name);
    ser.into_vec()
}

/// SET_NAME Response - Clause 7.4.17.1
pub fn deserialize_set_name_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u16, ConfigurationIndex, AvdeccFixedString)> {
    check_payload_size(payload, SET_NAME_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let name_index = des.read_u16()?;
    let configuration_index = des.read_u16()?;
    let name = read_fixed_string(&mut des)?;
    Ok((descriptor_type, descriptor_index, name_index, configuration_index, name))
}

/// GET_NAME Command - Clause 7.4.18.1
pub fn serialize_get_name_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    name_index: u16,
    configuration_index: ConfigurationIndex,
) -> Vec<u8> {
    log_entity_name_addressing("GET_NAME", descriptor_type, descriptor_index, configuration_index);
    let mut ser = Serializer::with_capacity(GET_NAME_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(name_index);
    ser.write_u16(configuration_index);
    ser.into_vec()
}

/// GET_NAME Response - Clause 7.4.18.2
pub fn serialize_get_name_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    name_index: u16,
    configuration_index: ConfigurationIndex,
    name: &AvdeccFixedString,
) -> Vec<u8> {
    serialize_set_name_response(descriptor_type, descriptor_index, name_index, configuration_index, name)
}

/// GET_NAME Response - Clause 7.4.18.2
pub fn deserialize_get_name_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u16, ConfigurationIndex, AvdeccFixedString)> {
    deserialize_set_name_response(payload)
}

// ============================================================================
// SET_SAMPLING_RATE / GET_SAMPLING_RATE (Clauses 7.4.21, 7.4.22)
// ============================================================================

fn serialize_sampling_rate(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    sampling_rate: SamplingRate,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(SET_SAMPLING_RATE_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u32(sampling_rate.value());
    ser.into_vec()
}

/// SET_SAMPLING_RATE Command - Clause 7.4.21.1
pub fn serialize_set_sampling_rate_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    sampling_rate: SamplingRate,
) -> Vec<u8> {
    serialize_sampling_rate(descriptor_type, descriptor_index, sampling_rate)
}

/// SET_SAMPLING_RATE Response - Clause 7.4.21.1
pub fn serialize_set_sampling_rate_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    sampling_rate: SamplingRate,
) -> Vec<u8> {
    serialize_sampling_rate(descriptor_type, descriptor_index, sampling_rate)
}

/// SET_SAMPLING_RATE Response - Clause 7.4.21.1
pub fn deserialize_set_sampling_rate_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, SamplingRate)> {
    check_payload_size(payload, SET_SAMPLING_RATE_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let sampling_rate = SamplingRate::new(des.read_u32()?);
    Ok((descriptor_type, descriptor_index, sampling_rate))
}

/// GET_SAMPLING_RATE Command - Clause 7.4.22.1
pub fn serialize_get_sampling_rate_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_SAMPLING_RATE_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_SAMPLING_RATE Response - Clause 7.4.22.2
pub fn serialize_get_sampling_rate_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    sampling_rate: SamplingRate,
) -> Vec<u8> {
    serialize_sampling_rate(descriptor_type, descriptor_index, sampling_rate)
}

/// GET_SAMPLING_RATE Response - Clause 7.4.22.2
pub fn deserialize_get_sampling_rate_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, SamplingRate)> {
    deserialize_set_sampling_rate_response(payload)
}

// ============================================================================
// SET_CLOCK_SOURCE / GET_CLOCK_SOURCE (Clauses 7.4.23, 7.4.24)
// ============================================================================

fn serialize_clock_source(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    clock_source_index: u16,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(SET_CLOCK_SOURCE_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(clock_source_index);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

/// SET_CLOCK_SOURCE Command - Clause 7.4.23.1
pub fn serialize_set_clock_source_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    clock_source_index: u16,
) -> Vec<u8> {
    serialize_clock_source(descriptor_type, descriptor_index, clock_source_index)
}

/// SET_CLOCK_SOURCE Response - Clause 7.4.23.1
pub fn serialize_set_clock_source_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    clock_source_index: u16,
) -> Vec<u8> {
    serialize_clock_source(descriptor_type, descriptor_index, clock_source_index)
}

/// SET_CLOCK_SOURCE Response - Clause 7.4.23.1
pub fn deserialize_set_clock_source_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u16)> {
    check_payload_size(payload, SET_CLOCK_SOURCE_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let clock_source_index = des.read_u16()?;
    Ok((descriptor_type, descriptor_index, clock_source_index))
}

/// GET_CLOCK_SOURCE Command - Clause 7.4.24.1
pub fn serialize_get_clock_source_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_CLOCK_SOURCE_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_CLOCK_SOURCE Response - Clause 7.4.24.2
pub fn serialize_get_clock_source_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    clock_source_index: u16,
) -> Vec<u8> {
    serialize_clock_source(descriptor_type, descriptor_index, clock_source_index)
}

/// GET_CLOCK_SOURCE Response - Clause 7.4.24.2
pub fn deserialize_get_clock_source_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u16)> {
    deserialize_set_clock_source_response(payload)
}

// ============================================================================
// START_STREAMING / STOP_STREAMING (Clauses 7.4.35, 7.4.36)
// ============================================================================

fn serialize_streaming(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(START_STREAMING_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// START_STREAMING Command - Clause 7.4.35.1
pub fn serialize_start_streaming_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_streaming(descriptor_type, descriptor_index)
}

/// START_STREAMING Response - Clause 7.4.35.1
pub fn serialize_start_streaming_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_streaming(descriptor_type, descriptor_index)
}

/// START_STREAMING Response - Clause 7.4.35.1
pub fn deserialize_start_streaming_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex)> {
    check_payload_size(payload, START_STREAMING_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    Ok((descriptor_type, descriptor_index))
}

/// STOP_STREAMING Command - Clause 7.4.36.1
pub fn serialize_stop_streaming_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_streaming(descriptor_type, descriptor_index)
}

/// STOP_STREAMING Response - Clause 7.4.36.1
pub fn serialize_stop_streaming_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    serialize_streaming(descriptor_type, descriptor_index)
}

/// STOP_STREAMING Response - Clause 7.4.36.1
pub fn deserialize_stop_streaming_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex)> {
    deserialize_start_streaming_response(payload)
}

// ============================================================================
// GET_AVB_INFO (Clause 7.4.40)
// ============================================================================

/// GET_AVB_INFO Command - Clause 7.4.40.1
pub fn serialize_get_avb_info_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_AVB_INFO_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_AVB_INFO Response - Clause 7.4.40.2
pub fn serialize_get_avb_info_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    info: &AvbInfo,
) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u64(info.gptp_grandmaster_id.value());
    ser.write_u32(info.propagation_delay);
    ser.write_u8(info.gptp_domain_number);
    ser.write_u8(info.flags.bits());
    ser.write_u16(info.mappings.len() as u16);
    for mapping in &info.mappings {
        ser.write_u8(mapping.traffic_class);
        ser.write_u8(mapping.priority);
        ser.write_u16(mapping.vlan_id);
    }
    ser.into_vec()
}

/// GET_AVB_INFO Response - Clause 7.4.40.2
pub fn deserialize_get_avb_info_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, AvbInfo)> {
    check_payload_size(payload, GET_AVB_INFO_RESPONSE_MIN_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let gptp_grandmaster_id = EntityId::new(des.read_u64()?);
    let propagation_delay = des.read_u32()?;
    let gptp_domain_number = des.read_u8()?;
    let flags = AvbInfoFlags(des.read_u8()?);
    let mappings_count = des.read_u16()?;
    check_payload_size(
        payload,
        GET_AVB_INFO_RESPONSE_MIN_SIZE + mappings_count as usize * MSRP_MAPPING_WIRE_SIZE,
    )?;
    let mut mappings = Vec::with_capacity(mappings_count as usize);
    for _ in 0..mappings_count {
        mappings.push(MsrpMapping {
            traffic_class: des.read_u8()?,
            priority: des.read_u8()?,
            vlan_id: des.read_u16()?,
        });
    }
    Ok((
        descriptor_type,
        descriptor_index,
        AvbInfo { gptp_grandmaster_id, propagation_delay, gptp_domain_number, flags, mappings },
    ))
}

// ============================================================================
// GET_AS_PATH (Clause 7.4.41)
// ============================================================================

/// GET_AS_PATH Command - Clause 7.4.41.1
pub fn serialize_get_as_path_command(avb_interface_index: AvbInterfaceIndex) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_AS_PATH_COMMAND_SIZE);
    ser.write_u16(avb_interface_index);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

/// GET_AS_PATH Response - Clause 7.4.41.2
pub fn serialize_get_as_path_response(
    avb_interface_index: AvbInterfaceIndex,
    as_path: &AsPath,
) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.write_u16(avb_interface_index);
    ser.write_u16(0); // reserved
    ser.write_u16(as_path.sequence.len() as u16);
    ser.write_u16(0); // reserved
    for hop in &as_path.sequence {
        ser.write_u64(hop.value());
    }
    ser.into_vec()
}

/// GET_AS_PATH Response - Clause 7.4.41.2
pub fn deserialize_get_as_path_response(
    payload: &[u8],
) -> PayloadResult<(AvbInterfaceIndex, AsPath)> {
    check_payload_size(payload, GET_AS_PATH_RESPONSE_MIN_SIZE)?;
    let mut des = Deserializer::new(payload);
    let avb_interface_index = des.read_u16()?;
    let _reserved = des.read_u16()?;
    let count = des.read_u16()?;
    let _reserved = des.read_u16()?;
    check_payload_size(payload, GET_AS_PATH_RESPONSE_MIN_SIZE + count as usize * 8)?;
    let mut sequence = Vec::with_capacity(count as usize);
    for _ in 0..count {
        sequence.push(EntityId::new(des.read_u64()?));
    }
    Ok((avb_interface_index, AsPath { sequence }))
}

// ============================================================================
// GET_COUNTERS (Clause 7.4.42)
// ============================================================================

/// GET_COUNTERS Command - Clause 7.4.42.1
pub fn serialize_get_counters_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_COUNTERS_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.into_vec()
}

/// GET_COUNTERS Response - Clause 7.4.42.2
///
/// The valid-flags word is untyped here; the router reinterprets it under
/// the flag type matching the descriptor type.
pub fn serialize_get_counters_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    valid_flags: u32,
    counters: &DescriptorCounters,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_COUNTERS_RESPONSE_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u32(valid_flags);
    for counter in counters {
        ser.write_u32(*counter);
    }
    ser.into_vec()
}

/// GET_COUNTERS Response - Clause 7.4.42.2
pub fn deserialize_get_counters_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u32, DescriptorCounters)> {
    check_payload_size(payload, GET_COUNTERS_RESPONSE_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let valid_flags = des.read_u32()?;
    let mut counters = [0u32; 32];
    for counter in counters.iter_mut() {
        *counter = des.read_u32()?;
    }
    Ok((descriptor_type, descriptor_index, valid_flags, counters))
}

// ============================================================================
// GET_AUDIO_MAP / ADD_AUDIO_MAPPINGS / REMOVE_AUDIO_MAPPINGS (Clauses 7.4.44-7.4.46)
// ============================================================================

/// GET_AUDIO_MAP Command - Clause 7.4.44.1
pub fn serialize_get_audio_map_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    map_index: u16,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_AUDIO_MAP_COMMAND_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(map_index);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

/// GET_AUDIO_MAP Response - Clause 7.4.44.2
pub fn serialize_get_audio_map_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    map_index: u16,
    number_of_maps: u16,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(map_index);
    ser.write_u16(number_of_maps);
    ser.write_u16(mappings.len() as u16);
    ser.write_u16(0); // reserved
    write_audio_mappings(&mut ser, mappings);
    ser.into_vec()
}

/// GET_AUDIO_MAP Response - Clause 7.4.44.2
pub fn deserialize_get_audio_map_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, u16, u16, AudioMappings)> {
    check_payload_size(payload, GET_AUDIO_MAP_RESPONSE_MIN_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let map_index = des.read_u16()?;
    let number_of_maps = des.read_u16()?;
    let number_of_mappings = des.read_u16()?;
    let _reserved = des.read_u16()?;
    check_payload_size(
        payload,
        GET_AUDIO_MAP_RESPONSE_MIN_SIZE + number_of_mappings as usize * AUDIO_MAPPING_WIRE_SIZE,
    )?;
    let mappings = read_audio_mappings(&mut des, number_of_mappings as usize)?;
    Ok((descriptor_type, descriptor_index, map_index, number_of_maps, mappings))
}

fn serialize_audio_mappings_payload(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(mappings.len() as u16);
    ser.write_u16(0); // reserved
    write_audio_mappings(&mut ser, mappings);
    ser.into_vec()
}

fn deserialize_audio_mappings_payload(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, AudioMappings)> {
    check_payload_size(payload, AUDIO_MAPPINGS_PAYLOAD_MIN_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let number_of_mappings = des.read_u16()?;
    let _reserved = des.read_u16()?;
    check_payload_size(
        payload,
        AUDIO_MAPPINGS_PAYLOAD_MIN_SIZE + number_of_mappings as usize * AUDIO_MAPPING_WIRE_SIZE,
    )?;
    let mappings = read_audio_mappings(&mut des, number_of_mappings as usize)?;
    Ok((descriptor_type, descriptor_index, mappings))
}

/// ADD_AUDIO_MAPPINGS Command - Clause 7.4.45.1
pub fn serialize_add_audio_mappings_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    serialize_audio_mappings_payload(descriptor_type, descriptor_index, mappings)
}

/// ADD_AUDIO_MAPPINGS Response - Clause 7.4.45.1
pub fn serialize_add_audio_mappings_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    serialize_audio_mappings_payload(descriptor_type, descriptor_index, mappings)
}

/// ADD_AUDIO_MAPPINGS Response - Clause 7.4.45.1
pub fn deserialize_add_audio_mappings_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, AudioMappings)> {
    deserialize_audio_mappings_payload(payload)
}

/// REMOVE_AUDIO_MAPPINGS Command - Clause 7.4.46.1
pub fn serialize_remove_audio_mappings_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    serialize_audio_mappings_payload(descriptor_type, descriptor_index, mappings)
}

/// REMOVE_AUDIO_MAPPINGS Response - Clause 7.4.46.1
pub fn serialize_remove_audio_mappings_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    mappings: &[AudioMapping],
) -> Vec<u8> {
    serialize_audio_mappings_payload(descriptor_type, descriptor_index, mappings)
}

/// REMOVE_AUDIO_MAPPINGS Response - Clause 7.4.46.1
pub fn deserialize_remove_audio_mappings_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, AudioMappings)> {
    deserialize_audio_mappings_payload(payload)
}

// ============================================================================
// START_OPERATION / ABORT_OPERATION / OPERATION_STATUS (Clauses 7.4.53-7.4.55)
// ============================================================================

/// START_OPERATION Command - Clause 7.4.53.1
pub fn serialize_start_operation_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    operation_id: OperationId,
    operation_type: MemoryObjectOperationType,
    values: &[u8],
) -> Vec<u8> {
    let mut ser = Serializer::new();
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(operation_id);
    ser.write_u16(operation_type.to_wire());
    ser.write_bytes(values);
    ser.into_vec()
}

/// START_OPERATION Response - Clause 7.4.53.1
pub fn serialize_start_operation_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    operation_id: OperationId,
    operation_type: MemoryObjectOperationType,
    values: &[u8],
) -> Vec<u8> {
    serialize_start_operation_command(descriptor_type, descriptor_index, operation_id, operation_type, values)
}

/// START_OPERATION Response - Clause 7.4.53.1
pub fn deserialize_start_operation_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, OperationId, MemoryObjectOperationType, Vec<u8>)> {
    check_payload_size(payload, START_OPERATION_PAYLOAD_MIN_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let operation_id = des.read_u16()?;
    let operation_type = MemoryObjectOperationType::from_wire(des.read_u16()?);
    let values = des.read_bytes(des.remaining())?.to_vec();
    Ok((descriptor_type, descriptor_index, operation_id, operation_type, values))
}

/// ABORT_OPERATION Command - Clause 7.4.54.1
pub fn serialize_abort_operation_command(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    operation_id: OperationId,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(ABORT_OPERATION_PAYLOAD_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(operation_id);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

/// ABORT_OPERATION Response - Clause 7.4.54.1
pub fn serialize_abort_operation_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    operation_id: OperationId,
) -> Vec<u8> {
    serialize_abort_operation_command(descriptor_type, descriptor_index, operation_id)
}

/// ABORT_OPERATION Response - Clause 7.4.54.1
pub fn deserialize_abort_operation_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, OperationId)> {
    check_payload_size(payload, ABORT_OPERATION_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let operation_id = des.read_u16()?;
    Ok((descriptor_type, descriptor_index, operation_id))
}

/// OPERATION_STATUS unsolicited Response - Clause 7.4.55.1
pub fn serialize_operation_status_response(
    descriptor_type: DescriptorType,
    descriptor_index: DescriptorIndex,
    operation_id: OperationId,
    percent_complete: u16,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(OPERATION_STATUS_RESPONSE_SIZE);
    ser.write_u16(descriptor_type.to_wire());
    ser.write_u16(descriptor_index);
    ser.write_u16(operation_id);
    ser.write_u16(percent_complete);
    ser.into_vec()
}

/// OPERATION_STATUS unsolicited Response - Clause 7.4.55.1
pub fn deserialize_operation_status_response(
    payload: &[u8],
) -> PayloadResult<(DescriptorType, DescriptorIndex, OperationId, u16)> {
    check_payload_size(payload, OPERATION_STATUS_RESPONSE_SIZE)?;
    let mut des = Deserializer::new(payload);
    let descriptor_type = read_descriptor_type(&mut des)?;
    let descriptor_index = des.read_u16()?;
    let operation_id = des.read_u16()?;
    let percent_complete = des.read_u16()?;
    Ok((descriptor_type, descriptor_index, operation_id, percent_complete))
}

// ============================================================================
// SET_MEMORY_OBJECT_LENGTH / GET_MEMORY_OBJECT_LENGTH (Clauses 7.4.72, 7.4.73)
// ============================================================================

fn serialize_memory_object_length(
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
    length: u64,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(MEMORY_OBJECT_LENGTH_PAYLOAD_SIZE);
    ser.write_u16(configuration_index);
    ser.write_u16(memory_object_index);
    ser.write_u64(length);
    ser.into_vec()
}

/// SET_MEMORY_OBJECT_LENGTH Command - Clause 7.4.72.1
pub fn serialize_set_memory_object_length_command(
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
    length: u64,
) -> Vec<u8> {
    serialize_memory_object_length(configuration_index, memory_object_index, length)
}

/// SET_MEMORY_OBJECT_LENGTH Response - Clause 7.4.72.1
pub fn serialize_set_memory_object_length_response(
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
    length: u64,
) -> Vec<u8> {
    serialize_memory_object_length(configuration_index, memory_object_index, length)
}

/// SET_MEMORY_OBJECT_LENGTH Response - Clause 7.4.72.1
pub fn deserialize_set_memory_object_length_response(
    payload: &[u8],
) -> PayloadResult<(ConfigurationIndex, MemoryObjectIndex, u64)> {
    check_payload_size(payload, MEMORY_OBJECT_LENGTH_PAYLOAD_SIZE)?;
    let mut des = Deserializer::new(payload);
    let configuration_index = des.read_u16()?;
    let memory_object_index = des.read_u16()?;
    let length = des.read_u64()?;
    Ok((configuration_index, memory_object_index, length))
}

/// GET_MEMORY_OBJECT_LENGTH Command - Clause 7.4.73.1
pub fn serialize_get_memory_object_length_command(
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_MEMORY_OBJECT_LENGTH_COMMAND_SIZE);
    ser.write_u16(configuration_index);
    ser.write_u16(memory_object_index);
    ser.into_vec()
}

/// GET_MEMORY_OBJECT_LENGTH Response - Clause 7.4.73.2
pub fn serialize_get_memory_object_length_response(
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
    length: u64,
) -> Vec<u8> {
    serialize_memory_object_length(configuration_index, memory_object_index, length)
}

/// GET_MEMORY_OBJECT_LENGTH Response - Clause 7.4.73.2
pub fn deserialize_get_memory_object_length_response(
    payload: &[u8],
) -> PayloadResult<(ConfigurationIndex, MemoryObjectIndex, u64)> {
    deserialize_set_memory_object_length_response(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_entity_roundtrip() {
        let bytes = serialize_acquire_entity_response(
            AcquireEntityFlags::RELEASE,
            EntityId::new(0x1122_3344_5566_7788),
            DescriptorType::Entity,
            0,
        );
        assert_eq!(bytes.len(), ACQUIRE_ENTITY_PAYLOAD_SIZE);
        let (flags, owner, descriptor_type, descriptor_index) =
            deserialize_acquire_entity_response(&bytes).expect("Deserialize should succeed");
        assert!(flags.contains(AcquireEntityFlags::RELEASE));
        assert_eq!(owner, EntityId::new(0x1122_3344_5566_7788));
        assert_eq!(descriptor_type, DescriptorType::Entity);
        assert_eq!(descriptor_index, 0);
    }

    #[test]
    fn test_lock_entity_roundtrip() {
        let bytes = serialize_lock_entity_response(
            LockEntityFlags::UNLOCK,
            EntityId::new(42),
            DescriptorType::Entity,
            0,
        );
        let (flags, locked, ..) =
            deserialize_lock_entity_response(&bytes).expect("Deserialize should succeed");
        assert!(flags.contains(LockEntityFlags::UNLOCK));
        assert_eq!(locked, EntityId::new(42));
    }

    #[test]
    fn test_read_descriptor_command_layout() {
        let bytes = serialize_read_descriptor_command(3, DescriptorType::StreamInput, 7);
        assert_eq!(bytes, [0x00, 0x03, 0x00, 0x00, 0x00, 0x05, 0x00, 0x07]);
    }

    #[test]
    fn test_entity_descriptor_roundtrip() {
        let descriptor = EntityDescriptor {
            entity_id: EntityId::new(0x0011_2233_4455_6677),
            entity_model_id: 0x8899_AABB_CCDD_EEFF,
            entity_capabilities: EntityCapabilities::AEM_SUPPORTED,
            talker_stream_sources: 4,
            talker_capabilities: TalkerCapabilities::IMPLEMENTED | TalkerCapabilities::AUDIO_SOURCE,
            listener_stream_sinks: 8,
            listener_capabilities: ListenerCapabilities::IMPLEMENTED,
            controller_capabilities: ControllerCapabilities::NONE,
            available_index: 12,
            association_id: EntityId::NULL,
            entity_name: AvdeccFixedString::from("Console"),
            vendor_name_string: 1,
            model_name_string: 2,
            firmware_version: AvdeccFixedString::from("1.0.0"),
            group_name: AvdeccFixedString::from("FOH"),
            serial_number: AvdeccFixedString::from("SN-001"),
            configurations_count: 1,
            current_configuration: 0,
        };
        let bytes = serialize_read_entity_descriptor_response(&descriptor);
        let (common_size, configuration_index, descriptor_type, descriptor_index) =
            deserialize_read_descriptor_common(&bytes).expect("Common parse should succeed");
        assert_eq!(configuration_index, 0);
        assert_eq!(descriptor_type, DescriptorType::Entity);
        assert_eq!(descriptor_index, 0);
        let parsed = deserialize_entity_descriptor(&bytes, common_size)
            .expect("Descriptor parse should succeed");
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn test_configuration_descriptor_roundtrip() {
        let mut descriptor = ConfigurationDescriptor {
            object_name: AvdeccFixedString::from("Default"),
            localized_description: 0,
            descriptor_counts: Default::default(),
        };
        descriptor.descriptor_counts.insert(DescriptorType::AudioUnit, 1);
        descriptor.descriptor_counts.insert(DescriptorType::StreamInput, 8);
        descriptor.descriptor_counts.insert(DescriptorType::StreamOutput, 8);

        let bytes = serialize_read_configuration_descriptor_response(2, &descriptor);
        let (common_size, _, descriptor_type, descriptor_index) =
            deserialize_read_descriptor_common(&bytes).expect("Common parse should succeed");
        // Configuration reads return the configuration in the index slot
        assert_eq!(descriptor_type, DescriptorType::Configuration);
        assert_eq!(descriptor_index, 2);
        let parsed = deserialize_configuration_descriptor(&bytes, common_size)
            .expect("Descriptor parse should succeed");
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn test_stream_descriptor_roundtrip() {
        let descriptor = StreamDescriptor {
            object_name: AvdeccFixedString::from("Out L/R"),
            localized_description: 5,
            clock_domain_index: 0,
            stream_flags: 0x0003,
            current_format: StreamFormat::new(0x00A0_0202_0040_6000),
            avb_interface_index: 0,
            buffer_length: 8,
            formats: vec![
                StreamFormat::new(0x00A0_0202_0040_6000),
                StreamFormat::new(0x00A0_0402_0040_6000),
            ],
            ..Default::default()
        };
        let bytes = serialize_read_stream_descriptor_response(0, DescriptorType::StreamOutput, 1, &descriptor);
        let (common_size, _, descriptor_type, descriptor_index) =
            deserialize_read_descriptor_common(&bytes).expect("Common parse should succeed");
        assert_eq!(descriptor_type, DescriptorType::StreamOutput);
        assert_eq!(descriptor_index, 1);
        let parsed =
            deserialize_stream_descriptor(&bytes, common_size).expect("Descriptor parse should succeed");
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn test_audio_unit_descriptor_roundtrip() {
        let descriptor = AudioUnitDescriptor {
            object_name: AvdeccFixedString::from("Main Unit"),
            clock_domain_index: 0,
            number_of_stream_input_ports: 1,
            number_of_stream_output_ports: 1,
            current_sampling_rate: SamplingRate::from_pull_base(0, 48_000),
            sampling_rates: vec![
                SamplingRate::from_pull_base(0, 44_100),
                SamplingRate::from_pull_base(0, 48_000),
                SamplingRate::from_pull_base(0, 96_000),
            ],
            ..Default::default()
        };
        let bytes = serialize_read_audio_unit_descriptor_response(0, 0, &descriptor);
        let (common_size, ..) =
            deserialize_read_descriptor_common(&bytes).expect("Common parse should succeed");
        let parsed = deserialize_audio_unit_descriptor(&bytes, common_size)
            .expect("Descriptor parse should succeed");
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn test_remaining_descriptor_roundtrips() {
        let (common, _, _, _) = {
            let jack = JackDescriptor { jack_type: 2, number_of_controls: 1, ..Default::default() };
            let bytes = serialize_read_jack_descriptor_response(0, DescriptorType::JackInput, 0, &jack);
            let header = deserialize_read_descriptor_common(&bytes).expect("Common parse should succeed");
            assert_eq!(
                deserialize_jack_descriptor(&bytes, header.0).expect("Jack parse should succeed"),
                jack
            );
            header
        };
        assert_eq!(common, READ_DESCRIPTOR_COMMON_SIZE);

        let avb = AvbInterfaceDescriptor {
            mac_address: MacAddress::new([1, 2, 3, 4, 5, 6]),
            clock_identity: EntityId::new(77),
            priority1: 248,
            domain_number: 0,
            port_number: 1,
            ..Default::default()
        };
        let bytes = serialize_read_avb_interface_descriptor_response(0, 0, &avb);
        assert_eq!(
            deserialize_avb_interface_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("AvbInterface parse should succeed"),
            avb
        );

        let clock_source = ClockSourceDescriptor {
            clock_source_type: 0x0002,
            clock_source_identifier: EntityId::new(99),
            clock_source_location_type: DescriptorType::AvbInterface,
            ..Default::default()
        };
        let bytes = serialize_read_clock_source_descriptor_response(0, 0, &clock_source);
        assert_eq!(
            deserialize_clock_source_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("ClockSource parse should succeed"),
            clock_source
        );

        let memory_object = MemoryObjectDescriptor {
            memory_object_type: 1,
            target_descriptor_type: DescriptorType::Entity,
            start_address: 0x1000,
            maximum_length: 0x8000,
            length: 0x4000,
            ..Default::default()
        };
        let bytes = serialize_read_memory_object_descriptor_response(0, 0, &memory_object);
        assert_eq!(
            deserialize_memory_object_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("MemoryObject parse should succeed"),
            memory_object
        );

        let locale = LocaleDescriptor {
            locale_id: AvdeccFixedString::from("en-US"),
            number_of_string_descriptors: 1,
            base_string_descriptor_index: 0,
        };
        let bytes = serialize_read_locale_descriptor_response(0, 0, &locale);
        assert_eq!(
            deserialize_locale_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("Locale parse should succeed"),
            locale
        );

        let mut strings = StringsDescriptor::default();
        strings.strings[0] = AvdeccFixedString::from("Input");
        strings.strings[6] = AvdeccFixedString::from("Output");
        let bytes = serialize_read_strings_descriptor_response(0, 0, &strings);
        assert_eq!(
            deserialize_strings_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("Strings parse should succeed"),
            strings
        );

        let port = StreamPortDescriptor { number_of_clusters: 2, number_of_maps: 1, ..Default::default() };
        let bytes =
            serialize_read_stream_port_descriptor_response(0, DescriptorType::StreamPortInput, 0, &port);
        assert_eq!(
            deserialize_stream_port_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("StreamPort parse should succeed"),
            port
        );

        let external = ExternalPortDescriptor {
            signal_type: DescriptorType::AudioCluster,
            signal_index: 3,
            jack_index: 1,
            ..Default::default()
        };
        let bytes = serialize_read_external_port_descriptor_response(
            0,
            DescriptorType::ExternalPortOutput,
            0,
            &external,
        );
        assert_eq!(
            deserialize_external_port_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("ExternalPort parse should succeed"),
            external
        );

        let internal = InternalPortDescriptor { internal_index: 4, ..Default::default() };
        let bytes = serialize_read_internal_port_descriptor_response(
            0,
            DescriptorType::InternalPortInput,
            0,
            &internal,
        );
        assert_eq!(
            deserialize_internal_port_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("InternalPort parse should succeed"),
            internal
        );

        let cluster = AudioClusterDescriptor {
            object_name: AvdeccFixedString::from("Ch 1-2"),
            signal_type: DescriptorType::StreamPortInput,
            channel_count: 2,
            format: 0x40,
            ..Default::default()
        };
        let bytes = serialize_read_audio_cluster_descriptor_response(0, 0, &cluster);
        assert_eq!(
            deserialize_audio_cluster_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("AudioCluster parse should succeed"),
            cluster
        );

        let map = AudioMapDescriptor {
            mappings: vec![
                AudioMapping { stream_index: 0, stream_channel: 0, cluster_offset: 0, cluster_channel: 0 },
                AudioMapping { stream_index: 0, stream_channel: 1, cluster_offset: 0, cluster_channel: 1 },
            ],
        };
        let bytes = serialize_read_audio_map_descriptor_response(0, 0, &map);
        assert_eq!(
            deserialize_audio_map_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("AudioMap parse should succeed"),
            map
        );

        let domain = ClockDomainDescriptor {
            object_name: AvdeccFixedString::from("Domain 0"),
            clock_source_index: 1,
            clock_sources: vec![0, 1, 2],
            ..Default::default()
        };
        let bytes = serialize_read_clock_domain_descriptor_response(0, 0, &domain);
        assert_eq!(
            deserialize_clock_domain_descriptor(&bytes, READ_DESCRIPTOR_COMMON_SIZE)
                .expect("ClockDomain parse should succeed"),
            domain
        );
    }

    #[test]
    fn test_configuration_roundtrip() {
        let bytes = serialize_set_configuration_response(5);
        assert_eq!(deserialize_set_configuration_response(&bytes).expect("Deserialize should succeed"), 5);
        let bytes = serialize_get_configuration_response(3);
        assert_eq!(deserialize_get_configuration_response(&bytes).expect("Deserialize should succeed"), 3);
    }

    #[test]
    fn test_stream_format_roundtrip() {
        let bytes = serialize_set_stream_format_response(
            DescriptorType::StreamInput,
            2,
            StreamFormat::new(0x00A0_0202_0040_6000),
        );
        let (descriptor_type, descriptor_index, format) =
            deserialize_set_stream_format_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::StreamInput);
        assert_eq!(descriptor_index, 2);
        assert_eq!(format.value(), 0x00A0_0202_0040_6000);
    }

    #[test]
    fn test_stream_info_roundtrip() {
        let info = StreamInfo {
            stream_info_flags: StreamInfoFlags::CONNECTED | StreamInfoFlags::STREAM_ID_VALID,
            stream_format: StreamFormat::new(0x00A0_0202_0040_6000),
            stream_id: 0x0011_2233_4455_6677,
            msrp_accumulated_latency: 2_000_000,
            stream_dest_mac: MacAddress::new([0x91, 0xE0, 0xF0, 0x00, 0x11, 0x22]),
            msrp_failure_code: 0,
            msrp_failure_bridge_id: 0,
            stream_vlan_id: 2,
        };
        let bytes = serialize_get_stream_info_response(DescriptorType::StreamOutput, 1, &info);
        assert_eq!(bytes.len(), STREAM_INFO_PAYLOAD_SIZE);
        let (descriptor_type, descriptor_index, parsed) =
            deserialize_get_stream_info_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::StreamOutput);
        assert_eq!(descriptor_index, 1);
        assert_eq!(parsed, info);
    }

    #[test]
    fn test_name_roundtrip() {
        let name = AvdeccFixedString::from("Main");
        let bytes = serialize_set_name_response(DescriptorType::Configuration, 2, 0, 0, &name);
        assert_eq!(bytes.len(), SET_NAME_PAYLOAD_SIZE);
        let (descriptor_type, descriptor_index, name_index, configuration_index, parsed) =
            deserialize_set_name_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::Configuration);
        assert_eq!(descriptor_index, 2);
        assert_eq!(name_index, 0);
        assert_eq!(configuration_index, 0);
        assert_eq!(parsed, name);
    }

    #[test]
    fn test_sampling_rate_roundtrip() {
        let bytes = serialize_set_sampling_rate_response(
            DescriptorType::AudioUnit,
            0,
            SamplingRate::from_pull_base(0, 96_000),
        );
        let (.., rate) = deserialize_set_sampling_rate_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(rate.base_frequency(), 96_000);
    }

    #[test]
    fn test_clock_source_roundtrip() {
        let bytes = serialize_set_clock_source_response(DescriptorType::ClockDomain, 0, 2);
        let (descriptor_type, _, index) =
            deserialize_set_clock_source_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::ClockDomain);
        assert_eq!(index, 2);
    }

    #[test]
    fn test_streaming_roundtrip() {
        let bytes = serialize_start_streaming_response(DescriptorType::StreamOutput, 3);
        assert_eq!(
            deserialize_start_streaming_response(&bytes).expect("Deserialize should succeed"),
            (DescriptorType::StreamOutput, 3)
        );
    }

    #[test]
    fn test_avb_info_roundtrip() {
        let info = AvbInfo {
            gptp_grandmaster_id: EntityId::new(0xAA),
            propagation_delay: 350,
            gptp_domain_number: 0,
            flags: AvbInfoFlags::AS_CAPABLE | AvbInfoFlags::SRP_ENABLED,
            mappings: vec![MsrpMapping { traffic_class: 0, priority: 3, vlan_id: 2 }],
        };
        let bytes = serialize_get_avb_info_response(DescriptorType::AvbInterface, 0, &info);
        let (descriptor_type, _, parsed) =
            deserialize_get_avb_info_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::AvbInterface);
        assert_eq!(parsed, info);
    }

    #[test]
    fn test_as_path_roundtrip() {
        let as_path = AsPath { sequence: vec![EntityId::new(1), EntityId::new(2)] };
        let bytes = serialize_get_as_path_response(0, &as_path);
        let (index, parsed) = deserialize_get_as_path_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(index, 0);
        assert_eq!(parsed, as_path);
    }

    #[test]
    fn test_counters_roundtrip() {
        let mut counters = [0u32; 32];
        counters[0] = 10;
        counters[5] = 2;
        let bytes = serialize_get_counters_response(DescriptorType::AvbInterface, 0, 0b10_0001, &counters);
        assert_eq!(bytes.len(), GET_COUNTERS_RESPONSE_SIZE);
        let (descriptor_type, _, valid, parsed) =
            deserialize_get_counters_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::AvbInterface);
        assert_eq!(valid, 0b10_0001);
        assert_eq!(parsed, counters);
    }

    #[test]
    fn test_audio_map_roundtrip() {
        let mappings = vec![
            AudioMapping { stream_index: 0, stream_channel: 0, cluster_offset: 0, cluster_channel: 0 },
            AudioMapping { stream_index: 0, stream_channel: 1, cluster_offset: 1, cluster_channel: 0 },
        ];
        let bytes = serialize_get_audio_map_response(DescriptorType::StreamPortInput, 0, 0, 1, &mappings);
        let (descriptor_type, _, map_index, number_of_maps, parsed) =
            deserialize_get_audio_map_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::StreamPortInput);
        assert_eq!(map_index, 0);
        assert_eq!(number_of_maps, 1);
        assert_eq!(parsed, mappings);

        let bytes = serialize_add_audio_mappings_response(DescriptorType::StreamPortOutput, 1, &mappings);
        let (descriptor_type, descriptor_index, parsed) =
            deserialize_add_audio_mappings_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::StreamPortOutput);
        assert_eq!(descriptor_index, 1);
        assert_eq!(parsed, mappings);
    }

    #[test]
    fn test_operations_roundtrip() {
        let bytes = serialize_start_operation_response(
            DescriptorType::MemoryObject,
            0,
            7,
            MemoryObjectOperationType::Upload,
            &[0xDE, 0xAD],
        );
        let (descriptor_type, _, operation_id, operation_type, values) =
            deserialize_start_operation_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(descriptor_type, DescriptorType::MemoryObject);
        assert_eq!(operation_id, 7);
        assert_eq!(operation_type, MemoryObjectOperationType::Upload);
        assert_eq!(values, vec![0xDE, 0xAD]);

        let bytes = serialize_abort_operation_response(DescriptorType::MemoryObject, 0, 7);
        assert_eq!(
            deserialize_abort_operation_response(&bytes).expect("Deserialize should succeed"),
            (DescriptorType::MemoryObject, 0, 7)
        );

        let bytes = serialize_operation_status_response(DescriptorType::MemoryObject, 0, 7, 50);
        assert_eq!(
            deserialize_operation_status_response(&bytes).expect("Deserialize should succeed"),
            (DescriptorType::MemoryObject, 0, 7, 50)
        );
    }

    #[test]
    fn test_memory_object_length_roundtrip() {
        let bytes = serialize_set_memory_object_length_response(0, 1, 0x1_0000);
        assert_eq!(
            deserialize_set_memory_object_length_response(&bytes).expect("Deserialize should succeed"),
            (0, 1, 0x1_0000)
        );
    }

    #[test]
    fn test_truncation_is_incorrect_payload_size() {
        let bytes = serialize_get_stream_format_response(
            DescriptorType::StreamInput,
            0,
            StreamFormat::new(1),
        );
        let err = deserialize_get_stream_format_response(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, PayloadError::IncorrectPayloadSize { .. }));

        let err = deserialize_get_counters_response(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, PayloadError::IncorrectPayloadSize { .. }));
    }
}
