// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command status taxonomies, one per AECP/ACMP sub-protocol.
//!
//! Each enum is a superset of the wire status codes: the wire codes pass
//! through verbatim (unknown codes are preserved in `Reserved`), and the
//! library-specific kinds report failures that never reached the wire
//! (unknown entity, codec failure, timeout, shutdown).

use crate::interface::InterfaceError;
use crate::protocol::pdu::{AcmpStatus, AecpStatus};
use std::fmt;

/// Shared Display body: named variants via Debug, reserved codes in hex
macro_rules! fmt_display_reserved {
    () => {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Reserved(code) => write!(f, "Reserved({:#04x})", code),
                other => write!(f, "{:?}", other),
            }
        }
    };
}

/// Status of an AEM command (Clause 7.4 wire codes + library kinds)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AemCommandStatus {
    // Wire codes (Table 7.125)
    Success,
    NotImplemented,
    NoSuchDescriptor,
    EntityLocked,
    EntityAcquired,
    NotAuthenticated,
    AuthenticationDisabled,
    BadArguments,
    NoResources,
    InProgress,
    EntityMisbehaving,
    NotSupported,
    StreamIsRunning,
    /// Wire status code outside Table 7.125, passed through verbatim
    Reserved(u8),
    // Library kinds
    /// Target entity not present in the discovery cache at issue time
    UnknownEntity,
    /// Response payload could not be deserialized
    ProtocolError,
    /// The protocol interface timed the pending command out
    TimedOut,
    /// The protocol interface transport failed
    NetworkError,
    /// The pending command was canceled (interface shutdown)
    Canceled,
    /// Unhandled command type in the response router
    InternalError,
}

impl AemCommandStatus {
    pub fn from_wire(status: AecpStatus) -> Self {
        match status {
            AecpStatus::SUCCESS => Self::Success,
            AecpStatus::NOT_IMPLEMENTED => Self::NotImplemented,
            AecpStatus::NO_SUCH_DESCRIPTOR => Self::NoSuchDescriptor,
            AecpStatus::ENTITY_LOCKED => Self::EntityLocked,
            AecpStatus::ENTITY_ACQUIRED => Self::EntityAcquired,
            AecpStatus::NOT_AUTHENTICATED => Self::NotAuthenticated,
            AecpStatus::AUTHENTICATION_DISABLED => Self::AuthenticationDisabled,
            AecpStatus::BAD_ARGUMENTS => Self::BadArguments,
            AecpStatus::NO_RESOURCES => Self::NoResources,
            AecpStatus::IN_PROGRESS => Self::InProgress,
            AecpStatus::ENTITY_MISBEHAVING => Self::EntityMisbehaving,
            AecpStatus::NOT_SUPPORTED => Self::NotSupported,
            AecpStatus::STREAM_IS_RUNNING => Self::StreamIsRunning,
            other => Self::Reserved(other.value()),
        }
    }

    pub fn from_interface_error(error: InterfaceError) -> Self {
        match error {
            InterfaceError::Timeout => Self::TimedOut,
            InterfaceError::UnknownRemoteEntity => Self::UnknownEntity,
            InterfaceError::Shutdown => Self::Canceled,
            InterfaceError::TransportError
            | InterfaceError::InvalidParameters
            | InterfaceError::NotSupported => Self::NetworkError,
            InterfaceError::InternalError => Self::InternalError,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for AemCommandStatus {
    fmt_display_reserved!();
}

/// Status of an Address Access command (Clause 9.2.1.3 wire codes +
/// library kinds)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AaCommandStatus {
    // Wire codes (Table 9.3)
    Success,
    NotImplemented,
    AddressTooLow,
    AddressTooHigh,
    AddressInvalid,
    TlvInvalid,
    DataInvalid,
    Unsupported,
    /// Wire status code outside Table 9.3, passed through verbatim
    Reserved(u8),
    // Library kinds
    UnknownEntity,
    ProtocolError,
    TimedOut,
    NetworkError,
    Canceled,
    InternalError,
}

impl AaCommandStatus {
    pub fn from_wire(status: AecpStatus) -> Self {
        match status.value() {
            0x00 => Self::Success,
            0x01 => Self::NotImplemented,
            0x02 => Self::AddressTooLow,
            0x03 => Self::AddressTooHigh,
            0x04 => Self::AddressInvalid,
            0x05 => Self::TlvInvalid,
            0x06 => Self::DataInvalid,
            0x07 => Self::Unsupported,
            other => Self::Reserved(other),
        }
    }

    pub fn from_interface_error(error: InterfaceError) -> Self {
        match error {
            InterfaceError::Timeout => Self::TimedOut,
            InterfaceError::UnknownRemoteEntity => Self::UnknownEntity,
            InterfaceError::Shutdown => Self::Canceled,
            InterfaceError::TransportError
            | InterfaceError::InvalidParameters
            | InterfaceError::NotSupported => Self::NetworkError,
            InterfaceError::InternalError => Self::InternalError,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for AaCommandStatus {
    fmt_display_reserved!();
}

/// Status of a Milan vendor-unique command (wire codes + library kinds)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MvuCommandStatus {
    // Wire codes
    Success,
    NotImplemented,
    /// Wire status code passed through verbatim
    Reserved(u8),
    // Library kinds
    UnknownEntity,
    ProtocolError,
    TimedOut,
    NetworkError,
    Canceled,
    InternalError,
}

impl MvuCommandStatus {
    pub fn from_wire(status: AecpStatus) -> Self {
        match status.value() {
            0x00 => Self::Success,
            0x01 => Self::NotImplemented,
            other => Self::Reserved(other),
        }
    }

    pub fn from_interface_error(error: InterfaceError) -> Self {
        match error {
            InterfaceError::Timeout => Self::TimedOut,
            InterfaceError::UnknownRemoteEntity => Self::UnknownEntity,
            InterfaceError::Shutdown => Self::Canceled,
            InterfaceError::TransportError
            | InterfaceError::InvalidParameters
            | InterfaceError::NotSupported => Self::NetworkError,
            InterfaceError::InternalError => Self::InternalError,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for MvuCommandStatus {
    fmt_display_reserved!();
}

/// Status of an ACMP operation (Clause 8.2.1.6 wire codes + library kinds)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ControlStatus {
    // Wire codes (Table 8.2)
    Success,
    ListenerUnknownId,
    TalkerUnknownId,
    TalkerDestMacFail,
    TalkerNoStreamIndex,
    TalkerNoBandwidth,
    TalkerExclusive,
    ListenerTalkerTimeout,
    ListenerExclusive,
    StateUnavailable,
    NotConnected,
    NoSuchConnection,
    CouldNotSendMessage,
    TalkerMisbehaving,
    ListenerMisbehaving,
    ControllerNotAuthorized,
    IncompatibleRequest,
    NotSupported,
    /// Wire status code outside Table 8.2, passed through verbatim
    Reserved(u8),
    // Library kinds
    UnknownEntity,
    ProtocolError,
    TimedOut,
    NetworkError,
    Canceled,
    InternalError,
}

impl ControlStatus {
    pub fn from_wire(status: AcmpStatus) -> Self {
        match status {
            AcmpStatus::SUCCESS => Self::Success,
            AcmpStatus::LISTENER_UNKNOWN_ID => Self::ListenerUnknownId,
            AcmpStatus::TALKER_UNKNOWN_ID => Self::TalkerUnknownId,
            AcmpStatus::TALKER_DEST_MAC_FAIL => Self::TalkerDestMacFail,
            AcmpStatus::TALKER_NO_STREAM_INDEX => Self::TalkerNoStreamIndex,
            AcmpStatus::TALKER_NO_BANDWIDTH => Self::TalkerNoBandwidth,
            AcmpStatus::TALKER_EXCLUSIVE => Self::TalkerExclusive,
            AcmpStatus::LISTENER_TALKER_TIMEOUT => Self::ListenerTalkerTimeout,
            AcmpStatus::LISTENER_EXCLUSIVE => Self::ListenerExclusive,
            AcmpStatus::STATE_UNAVAILABLE => Self::StateUnavailable,
            AcmpStatus::NOT_CONNECTED => Self::NotConnected,
            AcmpStatus::NO_SUCH_CONNECTION => Self::NoSuchConnection,
            AcmpStatus::COULD_NOT_SEND_MESSAGE => Self::CouldNotSendMessage,
            AcmpStatus::TALKER_MISBEHAVING => Self::TalkerMisbehaving,
            AcmpStatus::LISTENER_MISBEHAVING => Self::ListenerMisbehaving,
            AcmpStatus::CONTROLLER_NOT_AUTHORIZED => Self::ControllerNotAuthorized,
            AcmpStatus::INCOMPATIBLE_REQUEST => Self::IncompatibleRequest,
            AcmpStatus::NOT_SUPPORTED => Self::NotSupported,
            other => Self::Reserved(other.value()),
        }
    }

    pub fn from_interface_error(error: InterfaceError) -> Self {
        match error {
            InterfaceError::Timeout => Self::TimedOut,
            InterfaceError::UnknownRemoteEntity => Self::UnknownEntity,
            InterfaceError::Shutdown => Self::Canceled,
            InterfaceError::TransportError
            | InterfaceError::InvalidParameters
            | InterfaceError::NotSupported => Self::NetworkError,
            InterfaceError::InternalError => Self::InternalError,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ControlStatus {
    fmt_display_reserved!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aem_wire_status_passthrough() {
        assert_eq!(AemCommandStatus::from_wire(AecpStatus::SUCCESS), AemCommandStatus::Success);
        assert_eq!(
            AemCommandStatus::from_wire(AecpStatus::NOT_IMPLEMENTED),
            AemCommandStatus::NotImplemented
        );
        assert_eq!(
            AemCommandStatus::from_wire(AecpStatus(0x1E)),
            AemCommandStatus::Reserved(0x1E)
        );
    }

    #[test]
    fn test_interface_error_mapping() {
        assert_eq!(
            AemCommandStatus::from_interface_error(InterfaceError::Timeout),
            AemCommandStatus::TimedOut
        );
        assert_eq!(
            AemCommandStatus::from_interface_error(InterfaceError::Shutdown),
            AemCommandStatus::Canceled
        );
        assert_eq!(
            ControlStatus::from_interface_error(InterfaceError::TransportError),
            ControlStatus::NetworkError
        );
    }

    #[test]
    fn test_acmp_wire_status_passthrough() {
        assert_eq!(ControlStatus::from_wire(AcmpStatus::SUCCESS), ControlStatus::Success);
        assert_eq!(
            ControlStatus::from_wire(AcmpStatus::LISTENER_EXCLUSIVE),
            ControlStatus::ListenerExclusive
        );
        assert_eq!(ControlStatus::from_wire(AcmpStatus(0x15)), ControlStatus::Reserved(0x15));
    }

    #[test]
    fn test_success_checks() {
        assert!(AemCommandStatus::Success.is_success());
        assert!(!AemCommandStatus::UnknownEntity.is_success());
        assert!(MvuCommandStatus::Success.is_success());
        assert!(AaCommandStatus::Success.is_success());
        assert!(!ControlStatus::TimedOut.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AemCommandStatus::UnknownEntity), "UnknownEntity");
        assert_eq!(format!("{}", AemCommandStatus::Reserved(0x1E)), "Reserved(0x1e)");
    }
}
