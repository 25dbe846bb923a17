// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # AVDECC Wire Protocol Support
//!
//! Constants, cursors, decoded PDU views and payload codecs for the three
//! co-existing AVDECC protocols:
//!
//! | Protocol | Subtype | Transport | Purpose |
//! |----------|---------|-----------|---------|
//! | ADP | 0x7A | L2 multicast | Entity discovery |
//! | AECP | 0x7B | L2 unicast | Enumeration and control (AEM / AA / MVU) |
//! | ACMP | 0x7C | L2 multicast | Stream connection management |
//!
//! The codecs are stateless and pure: serializers produce exactly the
//! IEEE 1722.1 byte layout, deserializers return `Result` and never panic.

/// Address Access TLV model and codec.
pub mod aa;
/// AEM payload codec (commands, responses, descriptor bodies).
pub mod aem_payload;
/// Protocol constants (subtypes, multicast addresses, type codes).
pub mod constants;
/// Big-endian bounds-checked read/write cursors.
pub mod cursor;
/// Milan vendor-unique payload codec.
pub mod mvu_payload;
/// Decoded PDU views exchanged with the protocol interface.
pub mod pdu;

pub use cursor::{Deserializer, PayloadError, PayloadResult, Serializer};
pub use pdu::{
    AaAecpdu, AcmpMessageType, AcmpStatus, Acmpdu, AecpStatus, Aecpdu, AemAecpdu, AemCommandType,
    MvuAecpdu, MvuCommandType,
};
