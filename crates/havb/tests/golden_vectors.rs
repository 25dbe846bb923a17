// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// AEM/MVU/AA golden vectors: byte-exact payload layouts per IEEE
// 1722.1-2013 Clause 7.4 and Milan v1.0, hand-assembled from the clause
// figures. Each test serializes known values and compares against the
// expected wire bytes, then round-trips through the deserializer.

use havb::model::{
    AcquireEntityFlags, AudioMapping, AvdeccFixedString, DescriptorType, EntityId,
    MilanInfo, MilanInfoFeaturesFlags, SamplingRate, StreamFormat,
};
use havb::protocol::aa::{serialize_tlvs, Tlv};
use havb::protocol::aem_payload as aem;
use havb::protocol::mvu_payload;

#[test]
fn golden_acquire_entity_command() {
    // Clause 7.4.1.1: flags(4) owner_id(8) descriptor_type(2) descriptor_index(2)
    let bytes = aem::serialize_acquire_entity_command(
        AcquireEntityFlags::RELEASE,
        EntityId::new(0x0011_2233_4455_6677),
        DescriptorType::Entity,
        0,
    );
    assert_eq!(
        bytes,
        [
            0x80, 0x00, 0x00, 0x00, // flags: RELEASE
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, // owner_id
            0x00, 0x00, // ENTITY
            0x00, 0x00, // index 0
        ]
    );

    let (flags, owner, descriptor_type, descriptor_index) =
        aem::deserialize_acquire_entity_response(&bytes).expect("Round trip should succeed");
    assert_eq!(
        aem::serialize_acquire_entity_response(flags, owner, descriptor_type, descriptor_index),
        bytes
    );
}

#[test]
fn golden_read_descriptor_command() {
    // Clause 7.4.5.1: configuration_index(2) reserved(2) descriptor_type(2) descriptor_index(2)
    let bytes = aem::serialize_read_descriptor_command(0, DescriptorType::StreamInput, 1);
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x01]);

    // Configuration reads put the configuration into the index slot
    let bytes = aem::serialize_read_descriptor_command(0, DescriptorType::Configuration, 2);
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02]);
}

#[test]
fn golden_set_configuration_command() {
    // Clause 7.4.7.1: reserved(2) configuration_index(2)
    let bytes = aem::serialize_set_configuration_command(5);
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x05]);
}

#[test]
fn golden_set_stream_format_command() {
    // Clause 7.4.9.1: descriptor_type(2) descriptor_index(2) stream_format(8)
    let bytes = aem::serialize_set_stream_format_command(
        DescriptorType::StreamOutput,
        3,
        StreamFormat::new(0x00A0_0202_0040_6000),
    );
    assert_eq!(
        bytes,
        [0x00, 0x06, 0x00, 0x03, 0x00, 0xA0, 0x02, 0x02, 0x00, 0x40, 0x60, 0x00]
    );
}

#[test]
fn golden_set_name_command() {
    // Clause 7.4.17.1: descriptor_type(2) descriptor_index(2) name_index(2)
    // configuration_index(2) name(64, NUL padded)
    let bytes = aem::serialize_set_name_command(
        DescriptorType::Configuration,
        2,
        0,
        0,
        &AvdeccFixedString::from("Main"),
    );
    assert_eq!(bytes.len(), 72);
    assert_eq!(&bytes[..8], [0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[8..12], b"Main");
    assert!(bytes[12..].iter().all(|&b| b == 0));
}

#[test]
fn golden_set_sampling_rate_command() {
    // Clause 7.4.21.1: descriptor_type(2) descriptor_index(2) sampling_rate(4)
    // 48 kHz, pull 0 -> 0x0000BB80
    let bytes = aem::serialize_set_sampling_rate_command(
        DescriptorType::AudioUnit,
        0,
        SamplingRate::from_pull_base(0, 48_000),
    );
    assert_eq!(bytes, [0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0xBB, 0x80]);
}

#[test]
fn golden_set_clock_source_command() {
    // Clause 7.4.23.1: descriptor_type(2) descriptor_index(2)
    // clock_source_index(2) reserved(2)
    let bytes = aem::serialize_set_clock_source_command(DescriptorType::ClockDomain, 0, 2);
    assert_eq!(bytes, [0x00, 0x24, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00]);
}

#[test]
fn golden_start_streaming_command() {
    // Clause 7.4.35.1: descriptor_type(2) descriptor_index(2)
    let bytes = aem::serialize_start_streaming_command(DescriptorType::StreamOutput, 3);
    assert_eq!(bytes, [0x00, 0x06, 0x00, 0x03]);
}

#[test]
fn golden_get_counters_command() {
    // Clause 7.4.42.1: descriptor_type(2) descriptor_index(2)
    let bytes = aem::serialize_get_counters_command(DescriptorType::AvbInterface, 0);
    assert_eq!(bytes, [0x00, 0x09, 0x00, 0x00]);
}

#[test]
fn golden_get_audio_map_command() {
    // Clause 7.4.44.1: descriptor_type(2) descriptor_index(2) map_index(2) reserved(2)
    let bytes = aem::serialize_get_audio_map_command(DescriptorType::StreamPortInput, 0, 1);
    assert_eq!(bytes, [0x00, 0x0E, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00]);
}

#[test]
fn golden_add_audio_mappings_command() {
    // Clause 7.4.45.1: descriptor_type(2) descriptor_index(2)
    // number_of_mappings(2) reserved(2) mappings(8 each)
    let mappings = [AudioMapping {
        stream_index: 1,
        stream_channel: 0,
        cluster_offset: 4,
        cluster_channel: 1,
    }];
    let bytes =
        aem::serialize_add_audio_mappings_command(DescriptorType::StreamPortOutput, 0, &mappings);
    assert_eq!(
        bytes,
        [
            0x00, 0x0F, 0x00, 0x00, // STREAM_PORT_OUTPUT, index 0
            0x00, 0x01, 0x00, 0x00, // 1 mapping, reserved
            0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x00, 0x01, // the mapping
        ]
    );
}

#[test]
fn golden_set_memory_object_length_command() {
    // Clause 7.4.72.1: configuration_index(2) memory_object_index(2) length(8)
    let bytes = aem::serialize_set_memory_object_length_command(0, 1, 0x0001_0000);
    assert_eq!(
        bytes,
        [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00]
    );
}

#[test]
fn golden_get_milan_info() {
    // Milan v1.0: command is a reserved word; response carries
    // protocol_version(4) features_flags(4) certification_version(4)
    assert_eq!(mvu_payload::serialize_get_milan_info_command(), [0x00, 0x00]);

    let info = MilanInfo {
        protocol_version: 1,
        features_flags: MilanInfoFeaturesFlags::REDUNDANCY,
        certification_version: 0x0100_0000,
    };
    let bytes = mvu_payload::serialize_get_milan_info_response(&info);
    assert_eq!(
        bytes,
        [
            0x00, 0x00, // reserved
            0x00, 0x00, 0x00, 0x01, // protocol_version
            0x00, 0x00, 0x00, 0x01, // features: REDUNDANCY
            0x01, 0x00, 0x00, 0x00, // certification_version
        ]
    );
}

#[test]
fn golden_address_access_tlvs() {
    // Clause 9.2.1.3: tlv_count(2) then per TLV mode|length(2) address(8) data
    let bytes = serialize_tlvs(&[Tlv::write(0x0000_0000_0010_0000, vec![0xCA, 0xFE])])
        .expect("Serialize should succeed");
    assert_eq!(
        bytes,
        [
            0x00, 0x01, // one TLV
            0x10, 0x02, // mode Write (1) << 12 | length 2
            0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, // address
            0xCA, 0xFE, // data
        ]
    );
}

#[test]
fn golden_get_counters_response_layout() {
    // Clause 7.4.42.2: descriptor_type(2) descriptor_index(2)
    // counters_valid(4) counters(32 x 4)
    let mut counters = [0u32; 32];
    counters[0] = 2; // LINK_UP count
    let bytes = aem::serialize_get_counters_response(DescriptorType::AvbInterface, 0, 0x1, &counters);
    assert_eq!(bytes.len(), 136);
    assert_eq!(&bytes[..8], [0x00, 0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]);
    assert_eq!(&bytes[8..12], [0x00, 0x00, 0x00, 0x02]);
    assert!(bytes[12..].iter().all(|&b| b == 0));
}
