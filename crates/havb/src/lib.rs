// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # HAVB - High-performance AVDECC Controller Core
//!
//! A pure Rust implementation of the controller capability of IEEE
//! 1722.1 (AVDECC): discovery, enumeration and control, and stream
//! connection management for audio/video entities on an AVB Ethernet
//! segment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use havb::controller::ControllerCapability;
//! use havb::interface::{VirtualInterface, VirtualInterfaceConfig};
//! use havb::model::EntityId;
//!
//! // A protocol interface carries the raw frames; the virtual one is
//! // an in-process stand-in for pcap/native L2 implementations
//! let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
//! let controller = ControllerCapability::new(pi.clone(), EntityId::new(0x001B_92FF_FE00_0001));
//!
//! controller.read_entity_descriptor(
//!     EntityId::new(0x001B_92FF_FE01_2345),
//!     Box::new(|entity_id, status, descriptor| {
//!         println!("{} -> {}: \"{}\"", entity_id, status, descriptor.entity_name);
//!     }),
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                         Host application                            |
//! |     command methods + ControllerDelegate notifications              |
//! +---------------------------------------------------------------------+
//! |                      Controller capability                          |
//! |  Discovery cache | Command issuer | Response router | Watchdog      |
//! +---------------------------------------------------------------------+
//! |                       Protocol interface                            |
//! |  Pending commands | ADP state machines | Observer fan-out           |
//! +---------------------------------------------------------------------+
//! |                    Raw layer-2 Ethernet frames                      |
//! |         ADP (0x7A)  |  AECP (0x7B)  |  ACMP (0x7C)                  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ControllerCapability`] | Command/response engine, start here |
//! | [`ControllerDelegate`] | Callback surface for discovery + notifications |
//! | [`ProtocolInterface`](interface::ProtocolInterface) | Raw-frame transport abstraction |
//! | [`EntityId`](model::EntityId) | EUI-64 entity identifier |
//! | [`DiscoveredEntity`](model::DiscoveredEntity) | ADP snapshot of a remote entity |
//!
//! ## Modules Overview
//!
//! - [`controller`] - Controller capability core (start here)
//! - [`model`] - Entity model types and descriptors
//! - [`protocol`] - Wire constants, PDU views and payload codecs
//! - [`interface`] - Protocol interface traits + virtual implementation
//!
//! ## See Also
//!
//! - IEEE 1722.1-2013 (AVDECC)
//! - Milan v1.0 (AVnu Alliance)

/// Controller capability core (discovery cache, issuer, router, delegate).
pub mod controller;
/// Protocol interface abstraction and the in-process virtual interface.
pub mod interface;
/// AVDECC entity model types.
pub mod model;
/// Wire protocol support (constants, cursors, PDU views, codecs).
pub mod protocol;

pub use controller::{
    AaCommandStatus, AemCommandStatus, ControlStatus, ControllerCapability, ControllerDelegate,
    MvuCommandStatus,
};
pub use model::{DiscoveredEntity, EntityId, MacAddress};

/// HAVB version string.
pub const VERSION: &str = "0.2.0";
