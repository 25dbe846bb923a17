// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! AVDECC protocol constants (IEEE 1722.1-2013 Clauses 6, 7, 8 and Milan v1.0)
//!
//! Centralizes AVTP subtypes, well-known multicast addresses, message type
//! codes and payload size bounds to avoid duplication across the codecs
//! and the router.
//!

use crate::model::MacAddress;

/// AVTP ethertype carried in the Ethernet header (IEEE 1722)
pub const AVTP_ETHERTYPE: u16 = 0x22F0;

// ============================================================================
// AVTP subtypes (IEEE 1722.1 Clause 5)
// ============================================================================

/// ADP AVTPDU subtype (discovery)
pub const AVTP_SUBTYPE_ADP: u8 = 0x7A;

/// AECP AVTPDU subtype (enumeration and control)
pub const AVTP_SUBTYPE_AECP: u8 = 0x7B;

/// ACMP AVTPDU subtype (connection management)
pub const AVTP_SUBTYPE_ACMP: u8 = 0x7C;

// ============================================================================
// Well-known addresses
// ============================================================================

/// Multicast destination for ADP and ACMP messages (Clause 6.2.2 / 8.2.3)
pub const PROTOCOL_MULTICAST_MAC: MacAddress = MacAddress::new([0x91, 0xE0, 0xF0, 0x01, 0x00, 0x00]);

/// Multicast destination for IDENTIFY notifications (Clause 7.5.1)
pub const IDENTIFY_MULTICAST_MAC: MacAddress = MacAddress::new([0x91, 0xE0, 0xF0, 0x01, 0x00, 0x01]);

/// Milan vendor-unique protocol identifier: OUI-24 90:E0:F0, scheme 0
pub const MILAN_VENDOR_UNIQUE_PROTOCOL_ID: [u8; 6] = [0x90, 0xE0, 0xF0, 0x00, 0x00, 0x00];

// ============================================================================
// ADP message types (Clause 6.2.1.5)
// ============================================================================

pub const ADP_MSG_ENTITY_AVAILABLE: u8 = 0x00;
pub const ADP_MSG_ENTITY_DEPARTING: u8 = 0x01;
pub const ADP_MSG_ENTITY_DISCOVER: u8 = 0x02;

// ============================================================================
// AECP message types (Clause 9.2.1.1.5)
// ============================================================================

pub const AECP_MSG_AEM_COMMAND: u8 = 0x00;
pub const AECP_MSG_AEM_RESPONSE: u8 = 0x01;
pub const AECP_MSG_ADDRESS_ACCESS_COMMAND: u8 = 0x02;
pub const AECP_MSG_ADDRESS_ACCESS_RESPONSE: u8 = 0x03;
pub const AECP_MSG_VENDOR_UNIQUE_COMMAND: u8 = 0x06;
pub const AECP_MSG_VENDOR_UNIQUE_RESPONSE: u8 = 0x07;

/// The unsolicited bit of the AEM command_type u16 (bit 15)
pub const AEM_UNSOLICITED_BIT: u16 = 0x8000;

/// Mask extracting the AEM command type (bits 14..0)
pub const AEM_COMMAND_TYPE_MASK: u16 = 0x7FFF;

// ============================================================================
// Payload bounds
// ============================================================================

/// Maximum AECP payload an AEM AECPDU can carry without fragmentation
/// (Ethernet MTU minus AVTP/AECP headers)
pub const AEM_MAX_PAYLOAD_LENGTH: usize = 1456;

/// Maximum number of audio mappings per ADD/REMOVE_AUDIO_MAPPINGS message
/// (Clause 7.4.44.1)
pub const MAX_AUDIO_MAPPINGS_PER_MESSAGE: usize = 62;

/// Fixed ACMPDU payload length after the AVTP control header (Clause 8.2.1)
pub const ACMPDU_PAYLOAD_LENGTH: usize = 44;
