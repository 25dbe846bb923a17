// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! AVDECC entity model value types (IEEE 1722.1-2013 Clause 7).
//!
//! Index newtypes, the 64-byte fixed string, capability/flag wrappers and
//! the dynamic-information structs carried by AEM command payloads.

use crate::model::eui::{EntityId, MacAddress};
use std::fmt;

/// Index of a CONFIGURATION descriptor
pub type ConfigurationIndex = u16;
/// Index of a descriptor within its type and configuration
pub type DescriptorIndex = u16;
/// Index of a STREAM_INPUT or STREAM_OUTPUT descriptor
pub type StreamIndex = u16;
/// Index of an AVB_INTERFACE descriptor
pub type AvbInterfaceIndex = u16;
/// Index of a CLOCK_SOURCE descriptor
pub type ClockSourceIndex = u16;
/// Index of a CLOCK_DOMAIN descriptor
pub type ClockDomainIndex = u16;
/// Index of a MEMORY_OBJECT descriptor
pub type MemoryObjectIndex = u16;
/// Index of a LOCALE descriptor
pub type LocaleIndex = u16;
/// Index of a STRINGS descriptor
pub type StringsIndex = u16;
/// Index of an AUDIO_MAP within a stream port (GET_AUDIO_MAP paging)
pub type MapIndex = u16;
/// Identifier of an in-progress entity operation (START_OPERATION)
pub type OperationId = u16;
/// Localized string reference (STRINGS descriptor offset packing)
pub type LocalizedStringReference = u16;

/// Generate a transparent flag wrapper over an unsigned integer.
///
/// Each generated type carries raw bits, bitwise-or composition and a
/// `contains` test. Wire values pass through untouched so unknown bits
/// advertised by remote entities are preserved.
macro_rules! impl_flags {
    ($(#[$meta:meta])* $name:ident, $repr:ty) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Default, Hash)]
        pub struct $name(pub $repr);

        impl $name {
            /// No flags set
            pub const NONE: $name = $name(0);

            /// Raw bit representation
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// Check whether all bits of `other` are set
            pub const fn contains(self, other: $name) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Check whether no bit is set
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = $name;
            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:#x})"), self.0)
            }
        }
    };
}

impl_flags!(
    /// ADP entity_capabilities field (Clause 6.2.1.10)
    EntityCapabilities,
    u32
);

impl EntityCapabilities {
    pub const EFU_MODE: EntityCapabilities = EntityCapabilities(1 << 0);
    pub const ADDRESS_ACCESS_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 1);
    pub const GATEWAY_ENTITY: EntityCapabilities = EntityCapabilities(1 << 2);
    pub const AEM_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 3);
    pub const ASSOCIATION_ID_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 5);
    pub const ASSOCIATION_ID_VALID: EntityCapabilities = EntityCapabilities(1 << 6);
    pub const VENDOR_UNIQUE_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 7);
    pub const CLASS_A_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 8);
    pub const CLASS_B_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 9);
    pub const GPTP_SUPPORTED: EntityCapabilities = EntityCapabilities(1 << 10);
    pub const AEM_IDENTIFY_CONTROL_INDEX_VALID: EntityCapabilities = EntityCapabilities(1 << 15);
    pub const AEM_INTERFACE_INDEX_VALID: EntityCapabilities = EntityCapabilities(1 << 16);
    pub const GENERAL_CONTROLLER_IGNORE: EntityCapabilities = EntityCapabilities(1 << 17);
    pub const ENTITY_NOT_READY: EntityCapabilities = EntityCapabilities(1 << 18);
}

impl_flags!(
    /// ADP talker_capabilities field (Clause 6.2.1.12)
    TalkerCapabilities,
    u16
);

impl TalkerCapabilities {
    pub const IMPLEMENTED: TalkerCapabilities = TalkerCapabilities(1 << 0);
    pub const OTHER_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 9);
    pub const CONTROL_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 10);
    pub const MEDIA_CLOCK_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 11);
    pub const SMPTE_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 12);
    pub const MIDI_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 13);
    pub const AUDIO_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 14);
    pub const VIDEO_SOURCE: TalkerCapabilities = TalkerCapabilities(1 << 15);
}

impl_flags!(
    /// ADP listener_capabilities field (Clause 6.2.1.14)
    ListenerCapabilities,
    u16
);

impl ListenerCapabilities {
    pub const IMPLEMENTED: ListenerCapabilities = ListenerCapabilities(1 << 0);
    pub const OTHER_SINK: ListenerCapabilities = ListenerCapabilities(1 << 9);
    pub const CONTROL_SINK: ListenerCapabilities = ListenerCapabilities(1 << 10);
    pub const MEDIA_CLOCK_SINK: ListenerCapabilities = ListenerCapabilities(1 << 11);
    pub const SMPTE_SINK: ListenerCapabilities = ListenerCapabilities(1 << 12);
    pub const MIDI_SINK: ListenerCapabilities = ListenerCapabilities(1 << 13);
    pub const AUDIO_SINK: ListenerCapabilities = ListenerCapabilities(1 << 14);
    pub const VIDEO_SINK: ListenerCapabilities = ListenerCapabilities(1 << 15);
}

impl_flags!(
    /// ADP controller_capabilities field (Clause 6.2.1.15)
    ControllerCapabilities,
    u32
);

impl ControllerCapabilities {
    pub const IMPLEMENTED: ControllerCapabilities = ControllerCapabilities(1 << 0);
}

impl_flags!(
    /// ACQUIRE_ENTITY flags (Clause 7.4.1.1)
    AcquireEntityFlags,
    u32
);

impl AcquireEntityFlags {
    pub const PERSISTENT: AcquireEntityFlags = AcquireEntityFlags(0x0000_0001);
    pub const RELEASE: AcquireEntityFlags = AcquireEntityFlags(0x8000_0000);
}

impl_flags!(
    /// LOCK_ENTITY flags (Clause 7.4.2.1)
    LockEntityFlags,
    u32
);

impl LockEntityFlags {
    pub const UNLOCK: LockEntityFlags = LockEntityFlags(0x0000_0001);
}

impl_flags!(
    /// ACMP connection flags (Clause 8.2.1.17)
    ConnectionFlags,
    u16
);

impl ConnectionFlags {
    pub const CLASS_B: ConnectionFlags = ConnectionFlags(1 << 0);
    pub const FAST_CONNECT: ConnectionFlags = ConnectionFlags(1 << 1);
    pub const SAVED_STATE: ConnectionFlags = ConnectionFlags(1 << 2);
    pub const STREAMING_WAIT: ConnectionFlags = ConnectionFlags(1 << 3);
    pub const SUPPORTS_ENCRYPTED: ConnectionFlags = ConnectionFlags(1 << 4);
    pub const ENCRYPTED_PDU: ConnectionFlags = ConnectionFlags(1 << 5);
    pub const TALKER_FAILED: ConnectionFlags = ConnectionFlags(1 << 6);
}

impl_flags!(
    /// GET_STREAM_INFO / SET_STREAM_INFO flags (Clause 7.4.16.2)
    StreamInfoFlags,
    u32
);

impl StreamInfoFlags {
    pub const CLASS_B: StreamInfoFlags = StreamInfoFlags(1 << 0);
    pub const FAST_CONNECT: StreamInfoFlags = StreamInfoFlags(1 << 1);
    pub const SAVED_STATE: StreamInfoFlags = StreamInfoFlags(1 << 2);
    pub const STREAMING_WAIT: StreamInfoFlags = StreamInfoFlags(1 << 3);
    pub const SUPPORTS_ENCRYPTED: StreamInfoFlags = StreamInfoFlags(1 << 4);
    pub const ENCRYPTED_PDU: StreamInfoFlags = StreamInfoFlags(1 << 5);
    pub const TALKER_FAILED: StreamInfoFlags = StreamInfoFlags(1 << 6);
    pub const STREAM_VLAN_ID_VALID: StreamInfoFlags = StreamInfoFlags(1 << 25);
    pub const CONNECTED: StreamInfoFlags = StreamInfoFlags(1 << 26);
    pub const MSRP_FAILURE_VALID: StreamInfoFlags = StreamInfoFlags(1 << 27);
    pub const STREAM_DEST_MAC_VALID: StreamInfoFlags = StreamInfoFlags(1 << 28);
    pub const MSRP_ACC_LAT_VALID: StreamInfoFlags = StreamInfoFlags(1 << 29);
    pub const STREAM_ID_VALID: StreamInfoFlags = StreamInfoFlags(1 << 30);
    pub const STREAM_FORMAT_VALID: StreamInfoFlags = StreamInfoFlags(1 << 31);
}

impl_flags!(
    /// GET_AVB_INFO flags (Clause 7.4.40.2)
    AvbInfoFlags,
    u8
);

impl AvbInfoFlags {
    pub const AS_CAPABLE: AvbInfoFlags = AvbInfoFlags(1 << 0);
    pub const GPTP_ENABLED: AvbInfoFlags = AvbInfoFlags(1 << 1);
    pub const SRP_ENABLED: AvbInfoFlags = AvbInfoFlags(1 << 2);
}

impl_flags!(
    /// Milan GET_MILAN_INFO features flags
    MilanInfoFeaturesFlags,
    u32
);

impl MilanInfoFeaturesFlags {
    pub const REDUNDANCY: MilanInfoFeaturesFlags = MilanInfoFeaturesFlags(1 << 0);
}

impl_flags!(
    /// GET_COUNTERS valid flags for AVB_INTERFACE descriptors (Clause 7.4.42)
    AvbInterfaceCounterValidFlags,
    u32
);

impl AvbInterfaceCounterValidFlags {
    pub const LINK_UP: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 0);
    pub const LINK_DOWN: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 1);
    pub const FRAMES_TX: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 2);
    pub const FRAMES_RX: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 3);
    pub const RX_CRC_ERROR: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 4);
    pub const GPTP_GM_CHANGED: AvbInterfaceCounterValidFlags = AvbInterfaceCounterValidFlags(1 << 5);
}

impl_flags!(
    /// GET_COUNTERS valid flags for CLOCK_DOMAIN descriptors (Clause 7.4.42)
    ClockDomainCounterValidFlags,
    u32
);

impl ClockDomainCounterValidFlags {
    pub const LOCKED: ClockDomainCounterValidFlags = ClockDomainCounterValidFlags(1 << 0);
    pub const UNLOCKED: ClockDomainCounterValidFlags = ClockDomainCounterValidFlags(1 << 1);
}

impl_flags!(
    /// GET_COUNTERS valid flags for STREAM_INPUT descriptors (Clause 7.4.42)
    StreamInputCounterValidFlags,
    u32
);

impl StreamInputCounterValidFlags {
    pub const MEDIA_LOCKED: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 0);
    pub const MEDIA_UNLOCKED: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 1);
    pub const STREAM_INTERRUPTED: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 2);
    pub const SEQ_NUM_MISMATCH: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 3);
    pub const MEDIA_RESET: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 4);
    pub const TIMESTAMP_UNCERTAIN: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 5);
    pub const TIMESTAMP_VALID: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 6);
    pub const TIMESTAMP_NOT_VALID: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 7);
    pub const UNSUPPORTED_FORMAT: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 8);
    pub const LATE_TIMESTAMP: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 9);
    pub const EARLY_TIMESTAMP: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 10);
    pub const FRAMES_RX: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 11);
    pub const FRAMES_TX: StreamInputCounterValidFlags = StreamInputCounterValidFlags(1 << 12);
}

impl_flags!(
    /// GET_COUNTERS valid flags for STREAM_OUTPUT descriptors (Milan v1.0)
    StreamOutputCounterValidFlags,
    u32
);

impl StreamOutputCounterValidFlags {
    pub const STREAM_START: StreamOutputCounterValidFlags = StreamOutputCounterValidFlags(1 << 0);
    pub const STREAM_STOP: StreamOutputCounterValidFlags = StreamOutputCounterValidFlags(1 << 1);
    pub const MEDIA_RESET: StreamOutputCounterValidFlags = StreamOutputCounterValidFlags(1 << 2);
    pub const TIMESTAMP_UNCERTAIN: StreamOutputCounterValidFlags = StreamOutputCounterValidFlags(1 << 3);
    pub const FRAMES_TX: StreamOutputCounterValidFlags = StreamOutputCounterValidFlags(1 << 4);
}

/// The 32 counter words of a GET_COUNTERS response (Clause 7.4.42.2)
pub type DescriptorCounters = [u32; 32];

/// Fixed 64-byte UTF-8 string used throughout the entity model (Clause 7.3.2)
///
/// Content is NUL-padded on the wire. Comparison and hashing include the
/// padding so round-tripped values compare equal byte for byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct AvdeccFixedString([u8; 64]);

impl AvdeccFixedString {
    pub const LEN: usize = 64;

    /// Build from raw wire bytes
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Raw wire bytes
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// UTF-8 view up to the first NUL byte (lossy on invalid sequences)
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(64);
        String::from_utf8_lossy(&self.0[..end])
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl Default for AvdeccFixedString {
    fn default() -> Self {
        Self([0; 64])
    }
}

impl From<&str> for AvdeccFixedString {
    /// Truncates to 64 bytes on a character boundary
    fn from(s: &str) -> Self {
        let mut bytes = [0u8; 64];
        let mut len = s.len().min(64);
        while !s.is_char_boundary(len) {
            len -= 1;
        }
        bytes[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self(bytes)
    }
}

impl fmt::Display for AvdeccFixedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for AvdeccFixedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AvdeccFixedString(\"{}\")", self.as_str())
    }
}

/// AVTP stream format (64-bit packed value, IEEE 1722 Clause I.2)
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct StreamFormat(pub u64);

impl StreamFormat {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamFormat({:#018x})", self.0)
    }
}

/// Sampling rate as carried by SET/GET_SAMPLING_RATE (Clause 7.3.1)
///
/// 3-bit pull field in the top bits, 29-bit base frequency below.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SamplingRate(pub u32);

impl SamplingRate {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Build from pull multiplier code and base frequency in Hz
    pub const fn from_pull_base(pull: u8, base_frequency: u32) -> Self {
        Self(((pull as u32) << 29) | (base_frequency & 0x1FFF_FFFF))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Pull multiplier code (0 = 1.0, 1 = 1/1.001, 2 = 1.001, ...)
    pub const fn pull(self) -> u8 {
        (self.0 >> 29) as u8
    }

    /// Base frequency in Hz
    pub const fn base_frequency(self) -> u32 {
        self.0 & 0x1FFF_FFFF
    }
}

impl fmt::Debug for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SamplingRate(pull={}, base={}Hz)", self.pull(), self.base_frequency())
    }
}

/// One audio channel mapping of a stream port (Clause 7.4.44.2)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct AudioMapping {
    pub stream_index: StreamIndex,
    pub stream_channel: u16,
    pub cluster_offset: u16,
    pub cluster_channel: u16,
}

/// List of audio channel mappings
pub type AudioMappings = Vec<AudioMapping>;

/// A stream endpoint: entity + stream descriptor index (ACMP addressing)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct StreamIdentification {
    pub entity_id: EntityId,
    pub stream_index: StreamIndex,
}

impl StreamIdentification {
    pub const fn new(entity_id: EntityId, stream_index: StreamIndex) -> Self {
        Self { entity_id, stream_index }
    }
}

/// GET_STREAM_INFO / SET_STREAM_INFO dynamic information (Clause 7.4.16.2)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct StreamInfo {
    pub stream_info_flags: StreamInfoFlags,
    pub stream_format: StreamFormat,
    pub stream_id: u64,
    pub msrp_accumulated_latency: u32,
    pub stream_dest_mac: MacAddress,
    pub msrp_failure_code: u8,
    pub msrp_failure_bridge_id: u64,
    pub stream_vlan_id: u16,
}

/// One SRP traffic class mapping of GET_AVB_INFO (Clause 7.4.40.2)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct MsrpMapping {
    pub traffic_class: u8,
    pub priority: u8,
    pub vlan_id: u16,
}

/// GET_AVB_INFO dynamic information (Clause 7.4.40.2)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AvbInfo {
    pub gptp_grandmaster_id: EntityId,
    pub propagation_delay: u32,
    pub gptp_domain_number: u8,
    pub flags: AvbInfoFlags,
    pub mappings: Vec<MsrpMapping>,
}

/// GET_AS_PATH response data (Clause 7.4.41.2)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct AsPath {
    pub sequence: Vec<EntityId>,
}

/// Milan GET_MILAN_INFO response data (Milan v1.0 Clause 7.4.1)
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct MilanInfo {
    pub protocol_version: u32,
    pub features_flags: MilanInfoFeaturesFlags,
    pub certification_version: u32,
}

/// START_OPERATION / ABORT_OPERATION operation kinds (Clause 7.4.53, Table 7.83)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MemoryObjectOperationType {
    Store,
    StoreAndReboot,
    Read,
    Erase,
    Upload,
    /// Operation type code not defined by the standard
    Unknown(u16),
}

impl MemoryObjectOperationType {
    pub const fn to_wire(self) -> u16 {
        match self {
            Self::Store => 0x0000,
            Self::StoreAndReboot => 0x0001,
            Self::Read => 0x0002,
            Self::Erase => 0x0003,
            Self::Upload => 0x0004,
            Self::Unknown(value) => value,
        }
    }

    pub const fn from_wire(value: u16) -> Self {
        match value {
            0x0000 => Self::Store,
            0x0001 => Self::StoreAndReboot,
            0x0002 => Self::Read,
            0x0003 => Self::Erase,
            0x0004 => Self::Upload,
            other => Self::Unknown(other),
        }
    }
}

impl Default for MemoryObjectOperationType {
    fn default() -> Self {
        Self::Store
    }
}

/// Pack an entity model ID from vendor OUI-24, device ID and model ID
pub const fn make_entity_model_id(vendor_id: u32, device_id: u8, model_id: u32) -> u64 {
    ((vendor_id as u64) << 40) | ((device_id as u64) << 32) | (model_id as u64)
}

/// Split an entity model ID into (vendor OUI-24, device ID, model ID)
pub const fn split_entity_model_id(entity_model_id: u64) -> (u32, u8, u32) {
    (
        ((entity_model_id >> 40) & 0x00FF_FFFF) as u32,
        ((entity_model_id >> 32) & 0xFF) as u8,
        (entity_model_id & 0xFFFF_FFFF) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_string_from_str() {
        let s = AvdeccFixedString::from("Main");
        assert_eq!(s.as_str(), "Main");
        assert_eq!(s.as_bytes()[4], 0);
        assert!(!s.is_empty());
        assert!(AvdeccFixedString::default().is_empty());
    }

    #[test]
    fn test_fixed_string_truncates_on_char_boundary() {
        // 65 bytes of ASCII truncates to 64
        let long = "a".repeat(65);
        let s = AvdeccFixedString::from(long.as_str());
        assert_eq!(s.as_str().len(), 64);

        // Multi-byte char straddling the 64-byte limit is dropped whole
        let tricky = format!("{}\u{00e9}", "a".repeat(63)); // 63 + 2 bytes
        let s = AvdeccFixedString::from(tricky.as_str());
        assert_eq!(s.as_str(), "a".repeat(63));
    }

    #[test]
    fn test_sampling_rate_pull_base() {
        let rate = SamplingRate::from_pull_base(1, 48_000);
        assert_eq!(rate.pull(), 1);
        assert_eq!(rate.base_frequency(), 48_000);
        assert_eq!(rate.value(), (1 << 29) | 48_000);
    }

    #[test]
    fn test_flags_contains() {
        let flags = AcquireEntityFlags::PERSISTENT | AcquireEntityFlags::RELEASE;
        assert!(flags.contains(AcquireEntityFlags::RELEASE));
        assert!(!AcquireEntityFlags::PERSISTENT.contains(AcquireEntityFlags::RELEASE));
        assert!(AcquireEntityFlags::NONE.is_empty());
    }

    #[test]
    fn test_entity_model_id_split() {
        let id = make_entity_model_id(0x001B92, 0x42, 0xDEAD_BEEF);
        assert_eq!(split_entity_model_id(id), (0x001B92, 0x42, 0xDEAD_BEEF));
    }

    #[test]
    fn test_operation_type_wire_roundtrip() {
        for op in [
            MemoryObjectOperationType::Store,
            MemoryObjectOperationType::StoreAndReboot,
            MemoryObjectOperationType::Read,
            MemoryObjectOperationType::Erase,
            MemoryObjectOperationType::Upload,
            MemoryObjectOperationType::Unknown(0x1234),
        ] {
            assert_eq!(MemoryObjectOperationType::from_wire(op.to_wire()), op);
        }
    }
}
