// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoded PDU views exchanged with the protocol interface.
//!
//! Byte-level framing (Ethernet + AVTP control headers) lives in the
//! protocol interface; the core operates on these already-decoded views.
//! Source/destination MAC addresses are carried alongside so responses can
//! be addressed without re-parsing the frame.

use crate::model::{ConnectionFlags, EntityId, MacAddress};
use crate::protocol::constants::{AEM_COMMAND_TYPE_MASK, AEM_UNSOLICITED_BIT};
use std::fmt;

/// Generate a transparent wire code newtype with named constants
macro_rules! impl_wire_code {
    ($(#[$meta:meta])* $name:ident, $repr:ty, { $($(#[$cmeta:meta])* $cname:ident = $cvalue:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(pub $repr);

        impl $name {
            $( $(#[$cmeta])* pub const $cname: $name = $name($cvalue); )+

            /// Raw wire value
            pub const fn value(self) -> $repr {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $( Self::$cname => write!(f, concat!(stringify!($name), "::", stringify!($cname))), )+
                    other => write!(f, concat!(stringify!($name), "({:#x})"), other.0),
                }
            }
        }
    };
}

impl_wire_code!(
    /// AEM command_type codes (Clause 7.4, Table 7.126)
    AemCommandType,
    u16,
    {
        ACQUIRE_ENTITY = 0x0000,
        LOCK_ENTITY = 0x0001,
        ENTITY_AVAILABLE = 0x0002,
        CONTROLLER_AVAILABLE = 0x0003,
        READ_DESCRIPTOR = 0x0004,
        WRITE_DESCRIPTOR = 0x0005,
        SET_CONFIGURATION = 0x0006,
        GET_CONFIGURATION = 0x0007,
        SET_STREAM_FORMAT = 0x0008,
        GET_STREAM_FORMAT = 0x0009,
        SET_STREAM_INFO = 0x000E,
        GET_STREAM_INFO = 0x000F,
        SET_NAME = 0x0010,
        GET_NAME = 0x0011,
        SET_ASSOCIATION_ID = 0x0012,
        GET_ASSOCIATION_ID = 0x0013,
        SET_SAMPLING_RATE = 0x0014,
        GET_SAMPLING_RATE = 0x0015,
        SET_CLOCK_SOURCE = 0x0016,
        GET_CLOCK_SOURCE = 0x0017,
        START_STREAMING = 0x0022,
        STOP_STREAMING = 0x0023,
        REGISTER_UNSOLICITED_NOTIFICATION = 0x0024,
        DEREGISTER_UNSOLICITED_NOTIFICATION = 0x0025,
        IDENTIFY_NOTIFICATION = 0x0026,
        GET_AVB_INFO = 0x0027,
        GET_AS_PATH = 0x0028,
        GET_COUNTERS = 0x0029,
        REBOOT = 0x002A,
        GET_AUDIO_MAP = 0x002B,
        ADD_AUDIO_MAPPINGS = 0x002C,
        REMOVE_AUDIO_MAPPINGS = 0x002D,
        START_OPERATION = 0x0034,
        ABORT_OPERATION = 0x0035,
        OPERATION_STATUS = 0x0036,
        SET_MEMORY_OBJECT_LENGTH = 0x004A,
        GET_MEMORY_OBJECT_LENGTH = 0x004B,
        EXPANSION = 0x7FFF,
    }
);

impl_wire_code!(
    /// Milan vendor-unique command_type codes (Milan v1.0)
    MvuCommandType,
    u16,
    {
        GET_MILAN_INFO = 0x0000,
    }
);

impl_wire_code!(
    /// AECP status codes common to all sub-protocols (Clause 9.2.1.1.6)
    /// plus the AEM-specific codes (Clause 7.4, Table 7.125)
    AecpStatus,
    u8,
    {
        SUCCESS = 0x00,
        NOT_IMPLEMENTED = 0x01,
        NO_SUCH_DESCRIPTOR = 0x02,
        ENTITY_LOCKED = 0x03,
        ENTITY_ACQUIRED = 0x04,
        NOT_AUTHENTICATED = 0x05,
        AUTHENTICATION_DISABLED = 0x06,
        BAD_ARGUMENTS = 0x07,
        NO_RESOURCES = 0x08,
        IN_PROGRESS = 0x09,
        ENTITY_MISBEHAVING = 0x0A,
        NOT_SUPPORTED = 0x0B,
        STREAM_IS_RUNNING = 0x0C,
    }
);

impl_wire_code!(
    /// ACMP message_type codes (Clause 8.2.1.5, Table 8.1)
    AcmpMessageType,
    u8,
    {
        CONNECT_TX_COMMAND = 0x00,
        CONNECT_TX_RESPONSE = 0x01,
        DISCONNECT_TX_COMMAND = 0x02,
        DISCONNECT_TX_RESPONSE = 0x03,
        GET_TX_STATE_COMMAND = 0x04,
        GET_TX_STATE_RESPONSE = 0x05,
        CONNECT_RX_COMMAND = 0x06,
        CONNECT_RX_RESPONSE = 0x07,
        DISCONNECT_RX_COMMAND = 0x08,
        DISCONNECT_RX_RESPONSE = 0x09,
        GET_RX_STATE_COMMAND = 0x0A,
        GET_RX_STATE_RESPONSE = 0x0B,
        GET_TX_CONNECTION_COMMAND = 0x0C,
        GET_TX_CONNECTION_RESPONSE = 0x0D,
    }
);

impl AcmpMessageType {
    /// Whether this message type is a response
    pub const fn is_response(self) -> bool {
        self.0 & 0x01 == 0x01
    }
}

impl_wire_code!(
    /// ACMP status codes (Clause 8.2.1.6, Table 8.2)
    AcmpStatus,
    u8,
    {
        SUCCESS = 0x00,
        LISTENER_UNKNOWN_ID = 0x01,
        TALKER_UNKNOWN_ID = 0x02,
        TALKER_DEST_MAC_FAIL = 0x03,
        TALKER_NO_STREAM_INDEX = 0x04,
        TALKER_NO_BANDWIDTH = 0x05,
        TALKER_EXCLUSIVE = 0x06,
        LISTENER_TALKER_TIMEOUT = 0x07,
        LISTENER_EXCLUSIVE = 0x08,
        STATE_UNAVAILABLE = 0x09,
        NOT_CONNECTED = 0x0A,
        NO_SUCH_CONNECTION = 0x0B,
        COULD_NOT_SEND_MESSAGE = 0x0C,
        TALKER_MISBEHAVING = 0x0D,
        LISTENER_MISBEHAVING = 0x0E,
        CONTROLLER_NOT_AUTHORIZED = 0x10,
        INCOMPATIBLE_REQUEST = 0x11,
        NOT_SUPPORTED = 0x1F,
    }
);

/// AEM AECPDU view (Clause 9.2.1.2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AemAecpdu {
    /// AEM_COMMAND or AEM_RESPONSE
    pub is_response: bool,
    pub status: AecpStatus,
    pub target_entity_id: EntityId,
    pub controller_entity_id: EntityId,
    pub sequence_id: u16,
    pub unsolicited: bool,
    pub command_type: AemCommandType,
    pub payload: Vec<u8>,
    pub src_mac: MacAddress,
    pub dest_mac: MacAddress,
}

impl AemAecpdu {
    /// The command_type u16 as carried on the wire (unsolicited bit packed in)
    pub fn wire_command_type(&self) -> u16 {
        let mut value = self.command_type.value() & AEM_COMMAND_TYPE_MASK;
        if self.unsolicited {
            value |= AEM_UNSOLICITED_BIT;
        }
        value
    }

    /// Split a wire command_type u16 into (unsolicited, command type)
    pub fn split_wire_command_type(value: u16) -> (bool, AemCommandType) {
        (
            value & AEM_UNSOLICITED_BIT != 0,
            AemCommandType(value & AEM_COMMAND_TYPE_MASK),
        )
    }

    /// Build the success response to an incoming command, with no payload.
    /// Addressing is mirrored; sequence ID is preserved for correlation.
    pub fn success_response_to(command: &AemAecpdu) -> AemAecpdu {
        AemAecpdu {
            is_response: true,
            status: AecpStatus::SUCCESS,
            target_entity_id: command.target_entity_id,
            controller_entity_id: command.controller_entity_id,
            sequence_id: command.sequence_id,
            unsolicited: false,
            command_type: command.command_type,
            payload: Vec::new(),
            src_mac: command.dest_mac,
            dest_mac: command.src_mac,
        }
    }
}

/// Address Access AECPDU view: a sequence of TLVs (Clause 9.2.1.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaAecpdu {
    pub is_response: bool,
    pub status: AecpStatus,
    pub target_entity_id: EntityId,
    pub controller_entity_id: EntityId,
    pub sequence_id: u16,
    pub tlvs: Vec<crate::protocol::aa::Tlv>,
    pub src_mac: MacAddress,
    pub dest_mac: MacAddress,
}

/// Milan Vendor-Unique AECPDU view (Milan v1.0 Clause 7.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvuAecpdu {
    pub is_response: bool,
    pub status: AecpStatus,
    pub target_entity_id: EntityId,
    pub controller_entity_id: EntityId,
    pub sequence_id: u16,
    /// Vendor-unique protocol identifier (Milan OUI + scheme)
    pub protocol_id: [u8; 6],
    pub command_type: MvuCommandType,
    pub payload: Vec<u8>,
    pub src_mac: MacAddress,
    pub dest_mac: MacAddress,
}

/// AECPDU sub-protocol dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aecpdu {
    Aem(AemAecpdu),
    Aa(AaAecpdu),
    Mvu(MvuAecpdu),
}

impl Aecpdu {
    pub fn controller_entity_id(&self) -> EntityId {
        match self {
            Self::Aem(pdu) => pdu.controller_entity_id,
            Self::Aa(pdu) => pdu.controller_entity_id,
            Self::Mvu(pdu) => pdu.controller_entity_id,
        }
    }

    pub fn target_entity_id(&self) -> EntityId {
        match self {
            Self::Aem(pdu) => pdu.target_entity_id,
            Self::Aa(pdu) => pdu.target_entity_id,
            Self::Mvu(pdu) => pdu.target_entity_id,
        }
    }
}

/// ACMPDU view (Clause 8.2.1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Acmpdu {
    pub message_type: AcmpMessageType,
    pub status: AcmpStatus,
    pub stream_id: u64,
    pub controller_entity_id: EntityId,
    pub talker_entity_id: EntityId,
    pub listener_entity_id: EntityId,
    pub talker_unique_id: u16,
    pub listener_unique_id: u16,
    pub stream_dest_mac: MacAddress,
    pub connection_count: u16,
    pub sequence_id: u16,
    pub flags: ConnectionFlags,
    pub stream_vlan_id: u16,
}

impl Default for AcmpMessageType {
    fn default() -> Self {
        Self::CONNECT_TX_COMMAND
    }
}

impl Default for AcmpStatus {
    fn default() -> Self {
        Self::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_command_type_packing() {
        let (unsolicited, command_type) = AemAecpdu::split_wire_command_type(0x8010);
        assert!(unsolicited);
        assert_eq!(command_type, AemCommandType::SET_NAME);

        let (unsolicited, command_type) = AemAecpdu::split_wire_command_type(0x0004);
        assert!(!unsolicited);
        assert_eq!(command_type, AemCommandType::READ_DESCRIPTOR);
    }

    #[test]
    fn test_acmp_response_bit() {
        assert!(AcmpMessageType::CONNECT_TX_RESPONSE.is_response());
        assert!(!AcmpMessageType::CONNECT_TX_COMMAND.is_response());
        assert!(AcmpMessageType::GET_TX_CONNECTION_RESPONSE.is_response());
    }

    #[test]
    fn test_success_response_mirrors_addressing() {
        let command = AemAecpdu {
            is_response: false,
            status: AecpStatus::SUCCESS,
            target_entity_id: EntityId::new(1),
            controller_entity_id: EntityId::new(2),
            sequence_id: 42,
            unsolicited: false,
            command_type: AemCommandType::CONTROLLER_AVAILABLE,
            payload: Vec::new(),
            src_mac: MacAddress::new([1, 1, 1, 1, 1, 1]),
            dest_mac: MacAddress::new([2, 2, 2, 2, 2, 2]),
        };
        let response = AemAecpdu::success_response_to(&command);
        assert!(response.is_response);
        assert_eq!(response.sequence_id, 42);
        assert_eq!(response.dest_mac, command.src_mac);
        assert_eq!(response.src_mac, command.dest_mac);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_wire_code_debug_names() {
        assert_eq!(format!("{:?}", AemCommandType::ACQUIRE_ENTITY), "AemCommandType::ACQUIRE_ENTITY");
        assert_eq!(format!("{:?}", AemCommandType(0x7ABC)), "AemCommandType(0x7abc)");
    }
}
