// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Public controller operations.
//!
//! Every operation follows the same shape: serialize the payload, wrap
//! the typed user handler into a completion adapter, and hand both to the
//! issuer. The adapter matches the decoded response variant; a mismatch
//! reports `InternalError`, and the error path substitutes the declared
//! default values so handlers always receive fully-formed arguments.
//!
//! Handlers are `FnOnce` and invoked exactly once, from the protocol
//! interface's receive thread (or inline when the target entity is not
//! discovered).

use crate::controller::router::{AemCompletion, AemResponseData, DescriptorData, MvuResponseData};
use crate::controller::status::{
    AaCommandStatus, AemCommandStatus, ControlStatus, MvuCommandStatus,
};
use crate::controller::ControllerCapability;
use crate::model::{
    AsPath, AudioClusterDescriptor, AudioMapDescriptor, AudioMapping, AudioMappings,
    AudioUnitDescriptor, AvbInfo, AvbInterfaceCounterValidFlags, AvbInterfaceDescriptor,
    AvbInterfaceIndex, AvdeccFixedString, ClockDomainCounterValidFlags, ClockDomainDescriptor,
    ClockDomainIndex, ClockSourceDescriptor, ClockSourceIndex, ConfigurationDescriptor,
    ConfigurationIndex, ConnectionFlags, DescriptorCounters, DescriptorIndex, DescriptorType,
    EntityDescriptor, EntityId, ExternalPortDescriptor, InternalPortDescriptor, JackDescriptor,
    LocaleDescriptor, LocaleIndex, LockEntityFlags, MemoryObjectDescriptor, MemoryObjectIndex,
    MemoryObjectOperationType, MilanInfo, OperationId, SamplingRate, StreamDescriptor,
    StreamFormat, StreamIdentification, StreamIndex, StreamInfo, StreamInputCounterValidFlags,
    StreamOutputCounterValidFlags, StreamPortDescriptor, StringsDescriptor, StringsIndex,
    AcquireEntityFlags,
};
use crate::protocol::aa::{self, Tlv};
use crate::protocol::aem_payload as aem;
use crate::protocol::mvu_payload;
use crate::protocol::pdu::{AcmpMessageType, AemCommandType, MvuCommandType};

// ============================================================================
// Handler aliases (one invocation each, from the receive thread)
// ============================================================================

/// Acquire/release result: (target, status, owning entity, descriptor)
pub type AcquireEntityHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, EntityId, DescriptorType, DescriptorIndex) + Send>;
/// Lock/unlock result: (target, status, locking entity, descriptor)
pub type LockEntityHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, EntityId, DescriptorType, DescriptorIndex) + Send>;
/// Bare status result (availability queries, unsolicited registration)
pub type QueryAvailableHandler = Box<dyn FnOnce(EntityId, AemCommandStatus) + Send>;
/// Entity descriptor read result
pub type EntityDescriptorHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, EntityDescriptor) + Send>;
/// Generic descriptor read result: (target, status, configuration,
/// descriptor index, descriptor)
pub type DescriptorHandler<T> =
    Box<dyn FnOnce(EntityId, AemCommandStatus, ConfigurationIndex, DescriptorIndex, T) + Send>;
/// Configuration set/get result
pub type ConfigurationHandler = Box<dyn FnOnce(EntityId, AemCommandStatus, ConfigurationIndex) + Send>;
/// Stream format set/get result
pub type StreamFormatHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, StreamIndex, StreamFormat) + Send>;
/// Stream info set/get result
pub type StreamInfoHandler = Box<dyn FnOnce(EntityId, AemCommandStatus, StreamIndex, StreamInfo) + Send>;
/// Name write result
pub type SetNameHandler = Box<dyn FnOnce(EntityId, AemCommandStatus) + Send>;
/// Name read result
pub type GetNameHandler = Box<dyn FnOnce(EntityId, AemCommandStatus, AvdeccFixedString) + Send>;
/// Sampling rate set/get result
pub type SamplingRateHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, DescriptorIndex, SamplingRate) + Send>;
/// Clock source set/get result
pub type ClockSourceHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, ClockDomainIndex, ClockSourceIndex) + Send>;
/// Start/stop streaming result
pub type StreamingHandler = Box<dyn FnOnce(EntityId, AemCommandStatus, StreamIndex) + Send>;
/// AVB info read result
pub type AvbInfoHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, AvbInterfaceIndex, AvbInfo) + Send>;
/// AS path read result
pub type AsPathHandler = Box<dyn FnOnce(EntityId, AemCommandStatus, AvbInterfaceIndex, AsPath) + Send>;
/// AVB interface counters result
pub type AvbInterfaceCountersHandler = Box<
    dyn FnOnce(EntityId, AemCommandStatus, AvbInterfaceIndex, AvbInterfaceCounterValidFlags, DescriptorCounters)
        + Send,
>;
/// Clock domain counters result
pub type ClockDomainCountersHandler = Box<
    dyn FnOnce(EntityId, AemCommandStatus, ClockDomainIndex, ClockDomainCounterValidFlags, DescriptorCounters)
        + Send,
>;
/// Stream input counters result
pub type StreamInputCountersHandler = Box<
    dyn FnOnce(EntityId, AemCommandStatus, StreamIndex, StreamInputCounterValidFlags, DescriptorCounters)
        + Send,
>;
/// Stream output counters result
pub type StreamOutputCountersHandler = Box<
    dyn FnOnce(EntityId, AemCommandStatus, StreamIndex, StreamOutputCounterValidFlags, DescriptorCounters)
        + Send,
>;
/// Audio map page read result: (target, status, stream port, map index,
/// number of maps, mappings)
pub type AudioMapHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, DescriptorIndex, u16, u16, AudioMappings) + Send>;
/// Add/remove audio mappings result
pub type AudioMappingsHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, DescriptorIndex, AudioMappings) + Send>;
/// Start operation result
pub type StartOperationHandler = Box<
    dyn FnOnce(
            EntityId,
            AemCommandStatus,
            DescriptorType,
            DescriptorIndex,
            OperationId,
            MemoryObjectOperationType,
            Vec<u8>,
        ) + Send,
>;
/// Abort operation result
pub type AbortOperationHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, DescriptorType, DescriptorIndex, OperationId) + Send>;
/// Memory object length set/get result
pub type MemoryObjectLengthHandler =
    Box<dyn FnOnce(EntityId, AemCommandStatus, ConfigurationIndex, MemoryObjectIndex, u64) + Send>;
/// Address Access result: the response TLV sequence verbatim
pub type AddressAccessHandler = Box<dyn FnOnce(EntityId, AaCommandStatus, Vec<Tlv>) + Send>;
/// Milan info read result
pub type MilanInfoHandler = Box<dyn FnOnce(EntityId, MvuCommandStatus, MilanInfo) + Send>;
/// ACMP result: (talker, listener, connection count, flags, status)
pub type AcmpConnectionHandler = Box<
    dyn FnOnce(StreamIdentification, StreamIdentification, u16, ConnectionFlags, ControlStatus) + Send,
>;

/// Generate a typed READ_DESCRIPTOR operation.
///
/// Each generated method serializes the read, then matches the decoded
/// `ReadDescriptor` variant for its descriptor kind; anything else maps
/// to `InternalError` with default values.
macro_rules! read_descriptor_op {
    ($(#[$meta:meta])* $fn_name:ident, $variant:ident, $descriptor:ty, $index_arg:ident: $index_ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(
            &self,
            target_entity_id: EntityId,
            configuration_index: ConfigurationIndex,
            $index_arg: $index_ty,
            handler: DescriptorHandler<$descriptor>,
        ) {
            let payload = aem::serialize_read_descriptor_command(
                configuration_index,
                DescriptorType::$variant,
                $index_arg,
            );
            let completion: AemCompletion = Box::new(move |status, data| match data {
                Some(AemResponseData::ReadDescriptor {
                    configuration_index: ci,
                    descriptor_index: di,
                    descriptor: DescriptorData::$variant(descriptor),
                }) => handler(target_entity_id, status, *ci, *di, descriptor.clone()),
                Some(_) => handler(
                    target_entity_id,
                    AemCommandStatus::InternalError,
                    configuration_index,
                    $index_arg,
                    Default::default(),
                ),
                None => handler(
                    target_entity_id,
                    status,
                    configuration_index,
                    $index_arg,
                    Default::default(),
                ),
            });
            self.send_aem_command(
                target_entity_id,
                AemCommandType::READ_DESCRIPTOR,
                payload,
                completion,
            );
        }
    };
}

impl ControllerCapability {
    // ========================================================================
    // Entity management
    // ========================================================================

    /// ACQUIRE_ENTITY: take (optionally persistent) ownership of a
    /// descriptor, usually the ENTITY descriptor itself.
    pub fn acquire_entity(
        &self,
        target_entity_id: EntityId,
        is_persistent: bool,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        handler: AcquireEntityHandler,
    ) {
        let flags = if is_persistent {
            AcquireEntityFlags::PERSISTENT
        } else {
            AcquireEntityFlags::NONE
        };
        let payload = aem::serialize_acquire_entity_command(
            flags,
            EntityId::NULL,
            descriptor_type,
            descriptor_index,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::AcquireEntity { owning_entity, descriptor_type, descriptor_index }) => {
                handler(target_entity_id, status, *owning_entity, *descriptor_type, *descriptor_index);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                EntityId::NULL,
                descriptor_type,
                descriptor_index,
            ),
            None => handler(target_entity_id, status, EntityId::NULL, descriptor_type, descriptor_index),
        });
        self.send_aem_command(target_entity_id, AemCommandType::ACQUIRE_ENTITY, payload, completion);
    }

    /// ACQUIRE_ENTITY with the Release flag: relinquish ownership.
    pub fn release_entity(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        handler: AcquireEntityHandler,
    ) {
        let payload = aem::serialize_acquire_entity_command(
            AcquireEntityFlags::RELEASE,
            EntityId::NULL,
            descriptor_type,
            descriptor_index,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::ReleaseEntity { owning_entity, descriptor_type, descriptor_index }) => {
                handler(target_entity_id, status, *owning_entity, *descriptor_type, *descriptor_index);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                EntityId::NULL,
                descriptor_type,
                descriptor_index,
            ),
            None => handler(target_entity_id, status, EntityId::NULL, descriptor_type, descriptor_index),
        });
        self.send_aem_command(target_entity_id, AemCommandType::ACQUIRE_ENTITY, payload, completion);
    }

    /// LOCK_ENTITY: take the short-lived atomic-operation lock.
    pub fn lock_entity(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        handler: LockEntityHandler,
    ) {
        let payload = aem::serialize_lock_entity_command(
            LockEntityFlags::NONE,
            EntityId::NULL,
            descriptor_type,
            descriptor_index,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::LockEntity { locking_entity, descriptor_type, descriptor_index }) => {
                handler(target_entity_id, status, *locking_entity, *descriptor_type, *descriptor_index);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                EntityId::NULL,
                descriptor_type,
                descriptor_index,
            ),
            None => handler(target_entity_id, status, EntityId::NULL, descriptor_type, descriptor_index),
        });
        self.send_aem_command(target_entity_id, AemCommandType::LOCK_ENTITY, payload, completion);
    }

    /// LOCK_ENTITY with the Unlock flag.
    pub fn unlock_entity(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        handler: LockEntityHandler,
    ) {
        let payload = aem::serialize_lock_entity_command(
            LockEntityFlags::UNLOCK,
            EntityId::NULL,
            descriptor_type,
            descriptor_index,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::UnlockEntity { locking_entity, descriptor_type, descriptor_index }) => {
                handler(target_entity_id, status, *locking_entity, *descriptor_type, *descriptor_index);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                EntityId::NULL,
                descriptor_type,
                descriptor_index,
            ),
            None => handler(target_entity_id, status, EntityId::NULL, descriptor_type, descriptor_index),
        });
        self.send_aem_command(target_entity_id, AemCommandType::LOCK_ENTITY, payload, completion);
    }

    /// ENTITY_AVAILABLE liveness probe.
    pub fn query_entity_available(&self, target_entity_id: EntityId, handler: QueryAvailableHandler) {
        let completion = status_only_completion(
            target_entity_id,
            handler,
            |data| matches!(data, AemResponseData::EntityAvailable),
        );
        self.send_aem_command(target_entity_id, AemCommandType::ENTITY_AVAILABLE, Vec::new(), completion);
    }

    /// CONTROLLER_AVAILABLE probe against another controller.
    pub fn query_controller_available(
        &self,
        target_entity_id: EntityId,
        handler: QueryAvailableHandler,
    ) {
        let completion = status_only_completion(
            target_entity_id,
            handler,
            |data| matches!(data, AemResponseData::ControllerAvailable),
        );
        self.send_aem_command(target_entity_id, AemCommandType::CONTROLLER_AVAILABLE, Vec::new(), completion);
    }

    /// REGISTER_UNSOLICITED_NOTIFICATION: subscribe to the entity's
    /// change notifications.
    pub fn register_unsolicited_notifications(
        &self,
        target_entity_id: EntityId,
        handler: QueryAvailableHandler,
    ) {
        let completion = status_only_completion(
            target_entity_id,
            handler,
            |data| matches!(data, AemResponseData::RegisterUnsolicitedNotifications),
        );
        self.send_aem_command(
            target_entity_id,
            AemCommandType::REGISTER_UNSOLICITED_NOTIFICATION,
            Vec::new(),
            completion,
        );
    }

    /// DEREGISTER_UNSOLICITED_NOTIFICATION.
    pub fn unregister_unsolicited_notifications(
        &self,
        target_entity_id: EntityId,
        handler: QueryAvailableHandler,
    ) {
        let completion = status_only_completion(
            target_entity_id,
            handler,
            |data| matches!(data, AemResponseData::DeregisterUnsolicitedNotifications),
        );
        self.send_aem_command(
            target_entity_id,
            AemCommandType::DEREGISTER_UNSOLICITED_NOTIFICATION,
            Vec::new(),
            completion,
        );
    }

    // ========================================================================
    // Descriptor reads (Clause 7.4.5)
    // ========================================================================

    /// Read the ENTITY descriptor (configuration 0, index 0).
    pub fn read_entity_descriptor(&self, target_entity_id: EntityId, handler: EntityDescriptorHandler) {
        let payload = aem::serialize_read_descriptor_command(0, DescriptorType::Entity, 0);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::ReadDescriptor {
                descriptor: DescriptorData::Entity(descriptor),
                ..
            }) => handler(target_entity_id, status, descriptor.clone()),
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, Default::default()),
            None => handler(target_entity_id, status, Default::default()),
        });
        self.send_aem_command(target_entity_id, AemCommandType::READ_DESCRIPTOR, payload, completion);
    }

    /// Read a CONFIGURATION descriptor. Per Clause 7.4.5.1 the target
    /// configuration travels in the descriptor_index slot.
    pub fn read_configuration_descriptor(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        handler: DescriptorHandler<ConfigurationDescriptor>,
    ) {
        let payload =
            aem::serialize_read_descriptor_command(0, DescriptorType::Configuration, configuration_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::ReadDescriptor {
                descriptor_index: di,
                descriptor: DescriptorData::Configuration(descriptor),
                ..
            }) => handler(target_entity_id, status, *di, *di, descriptor.clone()),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                configuration_index,
                configuration_index,
                Default::default(),
            ),
            None => handler(
                target_entity_id,
                status,
                configuration_index,
                configuration_index,
                Default::default(),
            ),
        });
        self.send_aem_command(target_entity_id, AemCommandType::READ_DESCRIPTOR, payload, completion);
    }

    read_descriptor_op!(
        /// Read an AUDIO_UNIT descriptor.
        read_audio_unit_descriptor, AudioUnit, AudioUnitDescriptor, audio_unit_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read a STREAM_INPUT descriptor.
        read_stream_input_descriptor, StreamInput, StreamDescriptor, stream_index: StreamIndex
    );
    read_descriptor_op!(
        /// Read a STREAM_OUTPUT descriptor.
        read_stream_output_descriptor, StreamOutput, StreamDescriptor, stream_index: StreamIndex
    );
    read_descriptor_op!(
        /// Read a JACK_INPUT descriptor.
        read_jack_input_descriptor, JackInput, JackDescriptor, jack_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read a JACK_OUTPUT descriptor.
        read_jack_output_descriptor, JackOutput, JackDescriptor, jack_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an AVB_INTERFACE descriptor.
        read_avb_interface_descriptor, AvbInterface, AvbInterfaceDescriptor, avb_interface_index: AvbInterfaceIndex
    );
    read_descriptor_op!(
        /// Read a CLOCK_SOURCE descriptor.
        read_clock_source_descriptor, ClockSource, ClockSourceDescriptor, clock_source_index: ClockSourceIndex
    );
    read_descriptor_op!(
        /// Read a MEMORY_OBJECT descriptor.
        read_memory_object_descriptor, MemoryObject, MemoryObjectDescriptor, memory_object_index: MemoryObjectIndex
    );
    read_descriptor_op!(
        /// Read a LOCALE descriptor.
        read_locale_descriptor, Locale, LocaleDescriptor, locale_index: LocaleIndex
    );
    read_descriptor_op!(
        /// Read a STRINGS descriptor.
        read_strings_descriptor, Strings, StringsDescriptor, strings_index: StringsIndex
    );
    read_descriptor_op!(
        /// Read a STREAM_PORT_INPUT descriptor.
        read_stream_port_input_descriptor, StreamPortInput, StreamPortDescriptor, stream_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read a STREAM_PORT_OUTPUT descriptor.
        read_stream_port_output_descriptor, StreamPortOutput, StreamPortDescriptor, stream_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an EXTERNAL_PORT_INPUT descriptor.
        read_external_port_input_descriptor, ExternalPortInput, ExternalPortDescriptor, external_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an EXTERNAL_PORT_OUTPUT descriptor.
        read_external_port_output_descriptor, ExternalPortOutput, ExternalPortDescriptor, external_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an INTERNAL_PORT_INPUT descriptor.
        read_internal_port_input_descriptor, InternalPortInput, InternalPortDescriptor, internal_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an INTERNAL_PORT_OUTPUT descriptor.
        read_internal_port_output_descriptor, InternalPortOutput, InternalPortDescriptor, internal_port_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an AUDIO_CLUSTER descriptor.
        read_audio_cluster_descriptor, AudioCluster, AudioClusterDescriptor, cluster_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read an AUDIO_MAP descriptor.
        read_audio_map_descriptor, AudioMap, AudioMapDescriptor, map_index: DescriptorIndex
    );
    read_descriptor_op!(
        /// Read a CLOCK_DOMAIN descriptor.
        read_clock_domain_descriptor, ClockDomain, ClockDomainDescriptor, clock_domain_index: ClockDomainIndex
    );

    // ========================================================================
    // Configuration
    // ========================================================================

    /// SET_CONFIGURATION: select the active configuration.
    pub fn set_configuration(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        handler: ConfigurationHandler,
    ) {
        let payload = aem::serialize_set_configuration_command(configuration_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::SetConfiguration { configuration_index }) => {
                handler(target_entity_id, status, *configuration_index);
            }
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, configuration_index),
            None => handler(target_entity_id, status, configuration_index),
        });
        self.send_aem_command(target_entity_id, AemCommandType::SET_CONFIGURATION, payload, completion);
    }

    /// GET_CONFIGURATION: read the active configuration back.
    pub fn get_configuration(&self, target_entity_id: EntityId, handler: ConfigurationHandler) {
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetConfiguration { configuration_index }) => {
                handler(target_entity_id, status, *configuration_index);
            }
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, 0),
            None => handler(target_entity_id, status, 0),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_CONFIGURATION, Vec::new(), completion);
    }

    // ========================================================================
    // Stream format
    // ========================================================================

    /// SET_STREAM_FORMAT on a STREAM_INPUT.
    pub fn set_stream_input_format(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        stream_format: StreamFormat,
        handler: StreamFormatHandler,
    ) {
        self.stream_format_command(
            target_entity_id,
            AemCommandType::SET_STREAM_FORMAT,
            DescriptorType::StreamInput,
            stream_index,
            Some(stream_format),
            handler,
        );
    }

    /// SET_STREAM_FORMAT on a STREAM_OUTPUT.
    pub fn set_stream_output_format(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        stream_format: StreamFormat,
        handler: StreamFormatHandler,
    ) {
        self.stream_format_command(
            target_entity_id,
            AemCommandType::SET_STREAM_FORMAT,
            DescriptorType::StreamOutput,
            stream_index,
            Some(stream_format),
            handler,
        );
    }

    /// GET_STREAM_FORMAT on a STREAM_INPUT.
    pub fn get_stream_input_format(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamFormatHandler,
    ) {
        self.stream_format_command(
            target_entity_id,
            AemCommandType::GET_STREAM_FORMAT,
            DescriptorType::StreamInput,
            stream_index,
            None,
            handler,
        );
    }

    /// GET_STREAM_FORMAT on a STREAM_OUTPUT.
    pub fn get_stream_output_format(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamFormatHandler,
    ) {
        self.stream_format_command(
            target_entity_id,
            AemCommandType::GET_STREAM_FORMAT,
            DescriptorType::StreamOutput,
            stream_index,
            None,
            handler,
        );
    }

    fn stream_format_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        descriptor_type: DescriptorType,
        stream_index: StreamIndex,
        stream_format: Option<StreamFormat>,
        handler: StreamFormatHandler,
    ) {
        let payload = match stream_format {
            Some(format) => {
                aem::serialize_set_stream_format_command(descriptor_type, stream_index, format)
            }
            None => aem::serialize_get_stream_format_command(descriptor_type, stream_index),
        };
        let expect_set = command_type == AemCommandType::SET_STREAM_FORMAT;
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::SetStreamFormat { descriptor_index, stream_format, .. }) if expect_set => {
                handler(target_entity_id, status, *descriptor_index, *stream_format);
            }
            Some(AemResponseData::GetStreamFormat { descriptor_index, stream_format, .. })
                if !expect_set =>
            {
                handler(target_entity_id, status, *descriptor_index, *stream_format);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_index,
                Default::default(),
            ),
            None => handler(target_entity_id, status, stream_index, Default::default()),
        });
        self.send_aem_command(target_entity_id, command_type, payload, completion);
    }

    // ========================================================================
    // Stream info
    // ========================================================================

    /// SET_STREAM_INFO on a STREAM_INPUT.
    pub fn set_stream_input_info(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        info: &StreamInfo,
        handler: StreamInfoHandler,
    ) {
        self.stream_info_command(
            target_entity_id,
            AemCommandType::SET_STREAM_INFO,
            DescriptorType::StreamInput,
            stream_index,
            Some(info),
            handler,
        );
    }

    /// SET_STREAM_INFO on a STREAM_OUTPUT.
    pub fn set_stream_output_info(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        info: &StreamInfo,
        handler: StreamInfoHandler,
    ) {
        self.stream_info_command(
            target_entity_id,
            AemCommandType::SET_STREAM_INFO,
            DescriptorType::StreamOutput,
            stream_index,
            Some(info),
            handler,
        );
    }

    /// GET_STREAM_INFO on a STREAM_INPUT.
    pub fn get_stream_input_info(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamInfoHandler,
    ) {
        self.stream_info_command(
            target_entity_id,
            AemCommandType::GET_STREAM_INFO,
            DescriptorType::StreamInput,
            stream_index,
            None,
            handler,
        );
    }

    /// GET_STREAM_INFO on a STREAM_OUTPUT.
    pub fn get_stream_output_info(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamInfoHandler,
    ) {
        self.stream_info_command(
            target_entity_id,
            AemCommandType::GET_STREAM_INFO,
            DescriptorType::StreamOutput,
            stream_index,
            None,
            handler,
        );
    }

    fn stream_info_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        descriptor_type: DescriptorType,
        stream_index: StreamIndex,
        info: Option<&StreamInfo>,
        handler: StreamInfoHandler,
    ) {
        let payload = match info {
            Some(info) => aem::serialize_set_stream_info_command(descriptor_type, stream_index, info),
            None => aem::serialize_get_stream_info_command(descriptor_type, stream_index),
        };
        let expect_set = command_type == AemCommandType::SET_STREAM_INFO;
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::SetStreamInfo { descriptor_index, info, .. }) if expect_set => {
                handler(target_entity_id, status, *descriptor_index, info.clone());
            }
            Some(AemResponseData::GetStreamInfo { descriptor_index, info, .. }) if !expect_set => {
                handler(target_entity_id, status, *descriptor_index, info.clone());
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_index,
                Default::default(),
            ),
            None => handler(target_entity_id, status, stream_index, Default::default()),
        });
        self.send_aem_command(target_entity_id, command_type, payload, completion);
    }

    // ========================================================================
    // Names (SET_NAME / GET_NAME, Clauses 7.4.17, 7.4.18)
    // ========================================================================

    /// Write the entity name (ENTITY descriptor, name index 0).
    pub fn set_entity_name(
        &self,
        target_entity_id: EntityId,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(target_entity_id, DescriptorType::Entity, 0, 0, 0, name, handler);
    }

    /// Read the entity name.
    pub fn get_entity_name(&self, target_entity_id: EntityId, handler: GetNameHandler) {
        self.get_name(target_entity_id, DescriptorType::Entity, 0, 0, 0, handler);
    }

    /// Write the entity group name (ENTITY descriptor, name index 1).
    pub fn set_entity_group_name(
        &self,
        target_entity_id: EntityId,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(target_entity_id, DescriptorType::Entity, 0, 1, 0, name, handler);
    }

    /// Read the entity group name.
    pub fn get_entity_group_name(&self, target_entity_id: EntityId, handler: GetNameHandler) {
        self.get_name(target_entity_id, DescriptorType::Entity, 0, 1, 0, handler);
    }

    /// Write a configuration's object name.
    pub fn set_configuration_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::Configuration,
            configuration_index,
            0,
            0,
            name,
            handler,
        );
    }

    /// Read a configuration's object name.
    pub fn get_configuration_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(target_entity_id, DescriptorType::Configuration, configuration_index, 0, 0, handler);
    }

    /// Write an audio unit's object name.
    pub fn set_audio_unit_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_unit_index: DescriptorIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::AudioUnit,
            audio_unit_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read an audio unit's object name.
    pub fn get_audio_unit_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_unit_index: DescriptorIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::AudioUnit,
            audio_unit_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write a stream input's object name.
    pub fn set_stream_input_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::StreamInput,
            stream_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read a stream input's object name.
    pub fn get_stream_input_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::StreamInput,
            stream_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write a stream output's object name.
    pub fn set_stream_output_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::StreamOutput,
            stream_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read a stream output's object name.
    pub fn get_stream_output_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::StreamOutput,
            stream_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write an AVB interface's object name.
    pub fn set_avb_interface_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        avb_interface_index: AvbInterfaceIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::AvbInterface,
            avb_interface_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read an AVB interface's object name.
    pub fn get_avb_interface_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        avb_interface_index: AvbInterfaceIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::AvbInterface,
            avb_interface_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write a clock source's object name.
    pub fn set_clock_source_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_source_index: ClockSourceIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::ClockSource,
            clock_source_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read a clock source's object name.
    pub fn get_clock_source_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_source_index: ClockSourceIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::ClockSource,
            clock_source_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write a memory object's object name.
    pub fn set_memory_object_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::MemoryObject,
            memory_object_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read a memory object's object name.
    pub fn get_memory_object_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::MemoryObject,
            memory_object_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write an audio cluster's object name.
    pub fn set_audio_cluster_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_cluster_index: DescriptorIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::AudioCluster,
            audio_cluster_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read an audio cluster's object name.
    pub fn get_audio_cluster_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_cluster_index: DescriptorIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::AudioCluster,
            audio_cluster_index,
            0,
            configuration_index,
            handler,
        );
    }

    /// Write a clock domain's object name.
    pub fn set_clock_domain_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_domain_index: ClockDomainIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        self.set_name(
            target_entity_id,
            DescriptorType::ClockDomain,
            clock_domain_index,
            0,
            configuration_index,
            name,
            handler,
        );
    }

    /// Read a clock domain's object name.
    pub fn get_clock_domain_name(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_domain_index: ClockDomainIndex,
        handler: GetNameHandler,
    ) {
        self.get_name(
            target_entity_id,
            DescriptorType::ClockDomain,
            clock_domain_index,
            0,
            configuration_index,
            handler,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn set_name(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        name_index: u16,
        configuration_index: ConfigurationIndex,
        name: &AvdeccFixedString,
        handler: SetNameHandler,
    ) {
        let payload = aem::serialize_set_name_command(
            descriptor_type,
            descriptor_index,
            name_index,
            configuration_index,
            name,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::SetName { .. }) => handler(target_entity_id, status),
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError),
            None => handler(target_entity_id, status),
        });
        self.send_aem_command(target_entity_id, AemCommandType::SET_NAME, payload, completion);
    }

    fn get_name(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        name_index: u16,
        configuration_index: ConfigurationIndex,
        handler: GetNameHandler,
    ) {
        let payload = aem::serialize_get_name_command(
            descriptor_type,
            descriptor_index,
            name_index,
            configuration_index,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetName { name, .. }) => {
                handler(target_entity_id, status, *name);
            }
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, Default::default()),
            None => handler(target_entity_id, status, Default::default()),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_NAME, payload, completion);
    }

    // ========================================================================
    // Sampling rate
    // ========================================================================

    /// SET_SAMPLING_RATE on an AUDIO_UNIT.
    pub fn set_audio_unit_sampling_rate(
        &self,
        target_entity_id: EntityId,
        audio_unit_index: DescriptorIndex,
        sampling_rate: SamplingRate,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::SET_SAMPLING_RATE,
            DescriptorType::AudioUnit,
            audio_unit_index,
            Some(sampling_rate),
            handler,
        );
    }

    /// GET_SAMPLING_RATE on an AUDIO_UNIT.
    pub fn get_audio_unit_sampling_rate(
        &self,
        target_entity_id: EntityId,
        audio_unit_index: DescriptorIndex,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::GET_SAMPLING_RATE,
            DescriptorType::AudioUnit,
            audio_unit_index,
            None,
            handler,
        );
    }

    /// SET_SAMPLING_RATE on a VIDEO_CLUSTER.
    pub fn set_video_cluster_sampling_rate(
        &self,
        target_entity_id: EntityId,
        video_cluster_index: DescriptorIndex,
        sampling_rate: SamplingRate,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::SET_SAMPLING_RATE,
            DescriptorType::VideoCluster,
            video_cluster_index,
            Some(sampling_rate),
            handler,
        );
    }

    /// GET_SAMPLING_RATE on a VIDEO_CLUSTER.
    pub fn get_video_cluster_sampling_rate(
        &self,
        target_entity_id: EntityId,
        video_cluster_index: DescriptorIndex,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::GET_SAMPLING_RATE,
            DescriptorType::VideoCluster,
            video_cluster_index,
            None,
            handler,
        );
    }

    /// SET_SAMPLING_RATE on a SENSOR_CLUSTER.
    pub fn set_sensor_cluster_sampling_rate(
        &self,
        target_entity_id: EntityId,
        sensor_cluster_index: DescriptorIndex,
        sampling_rate: SamplingRate,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::SET_SAMPLING_RATE,
            DescriptorType::SensorCluster,
            sensor_cluster_index,
            Some(sampling_rate),
            handler,
        );
    }

    /// GET_SAMPLING_RATE on a SENSOR_CLUSTER.
    pub fn get_sensor_cluster_sampling_rate(
        &self,
        target_entity_id: EntityId,
        sensor_cluster_index: DescriptorIndex,
        handler: SamplingRateHandler,
    ) {
        self.sampling_rate_command(
            target_entity_id,
            AemCommandType::GET_SAMPLING_RATE,
            DescriptorType::SensorCluster,
            sensor_cluster_index,
            None,
            handler,
        );
    }

    fn sampling_rate_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        sampling_rate: Option<SamplingRate>,
        handler: SamplingRateHandler,
    ) {
        let payload = match sampling_rate {
            Some(rate) => {
                aem::serialize_set_sampling_rate_command(descriptor_type, descriptor_index, rate)
            }
            None => aem::serialize_get_sampling_rate_command(descriptor_type, descriptor_index),
        };
        let expect_set = command_type == AemCommandType::SET_SAMPLING_RATE;
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::SetSamplingRate { descriptor_index, sampling_rate, .. })
                if expect_set =>
            {
                handler(target_entity_id, status, *descriptor_index, *sampling_rate);
            }
            Some(AemResponseData::GetSamplingRate { descriptor_index, sampling_rate, .. })
                if !expect_set =>
            {
                handler(target_entity_id, status, *descriptor_index, *sampling_rate);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                descriptor_index,
                Default::default(),
            ),
            None => handler(target_entity_id, status, descriptor_index, Default::default()),
        });
        self.send_aem_command(target_entity_id, command_type, payload, completion);
    }

    // ========================================================================
    // Clock source
    // ========================================================================

    /// SET_CLOCK_SOURCE: select a clock domain's active clock source.
    pub fn set_clock_source(
        &self,
        target_entity_id: EntityId,
        clock_domain_index: ClockDomainIndex,
        clock_source_index: ClockSourceIndex,
        handler: ClockSourceHandler,
    ) {
        let payload = aem::serialize_set_clock_source_command(
            DescriptorType::ClockDomain,
            clock_domain_index,
            clock_source_index,
        );
        let completion =
            clock_source_completion(target_entity_id, clock_domain_index, true, handler);
        self.send_aem_command(target_entity_id, AemCommandType::SET_CLOCK_SOURCE, payload, completion);
    }

    /// GET_CLOCK_SOURCE.
    pub fn get_clock_source(
        &self,
        target_entity_id: EntityId,
        clock_domain_index: ClockDomainIndex,
        handler: ClockSourceHandler,
    ) {
        let payload =
            aem::serialize_get_clock_source_command(DescriptorType::ClockDomain, clock_domain_index);
        let completion =
            clock_source_completion(target_entity_id, clock_domain_index, false, handler);
        self.send_aem_command(target_entity_id, AemCommandType::GET_CLOCK_SOURCE, payload, completion);
    }

    // ========================================================================
    // Streaming
    // ========================================================================

    /// START_STREAMING on a STREAM_INPUT.
    pub fn start_stream_input(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamingHandler,
    ) {
        self.streaming_command(
            target_entity_id,
            AemCommandType::START_STREAMING,
            DescriptorType::StreamInput,
            stream_index,
            handler,
        );
    }

    /// START_STREAMING on a STREAM_OUTPUT.
    pub fn start_stream_output(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamingHandler,
    ) {
        self.streaming_command(
            target_entity_id,
            AemCommandType::START_STREAMING,
            DescriptorType::StreamOutput,
            stream_index,
            handler,
        );
    }

    /// STOP_STREAMING on a STREAM_INPUT.
    pub fn stop_stream_input(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamingHandler,
    ) {
        self.streaming_command(
            target_entity_id,
            AemCommandType::STOP_STREAMING,
            DescriptorType::StreamInput,
            stream_index,
            handler,
        );
    }

    /// STOP_STREAMING on a STREAM_OUTPUT.
    pub fn stop_stream_output(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamingHandler,
    ) {
        self.streaming_command(
            target_entity_id,
            AemCommandType::STOP_STREAMING,
            DescriptorType::StreamOutput,
            stream_index,
            handler,
        );
    }

    fn streaming_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        descriptor_type: DescriptorType,
        stream_index: StreamIndex,
        handler: StreamingHandler,
    ) {
        let payload = if command_type == AemCommandType::START_STREAMING {
            aem::serialize_start_streaming_command(descriptor_type, stream_index)
        } else {
            aem::serialize_stop_streaming_command(descriptor_type, stream_index)
        };
        let expect_start = command_type == AemCommandType::START_STREAMING;
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::StartStreaming { descriptor_index, .. }) if expect_start => {
                handler(target_entity_id, status, *descriptor_index);
            }
            Some(AemResponseData::StopStreaming { descriptor_index, .. }) if !expect_start => {
                handler(target_entity_id, status, *descriptor_index);
            }
            Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, stream_index),
            None => handler(target_entity_id, status, stream_index),
        });
        self.send_aem_command(target_entity_id, command_type, payload, completion);
    }

    // ========================================================================
    // AVB interface state
    // ========================================================================

    /// GET_AVB_INFO for an AVB_INTERFACE.
    pub fn get_avb_info(
        &self,
        target_entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        handler: AvbInfoHandler,
    ) {
        let payload =
            aem::serialize_get_avb_info_command(DescriptorType::AvbInterface, avb_interface_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetAvbInfo { descriptor_index, info, .. }) => {
                handler(target_entity_id, status, *descriptor_index, info.clone());
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                avb_interface_index,
                Default::default(),
            ),
            None => handler(target_entity_id, status, avb_interface_index, Default::default()),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_AVB_INFO, payload, completion);
    }

    /// GET_AS_PATH for an AVB_INTERFACE.
    pub fn get_as_path(
        &self,
        target_entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        handler: AsPathHandler,
    ) {
        let payload = aem::serialize_get_as_path_command(avb_interface_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetAsPath { avb_interface_index, as_path }) => {
                handler(target_entity_id, status, *avb_interface_index, as_path.clone());
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                avb_interface_index,
                Default::default(),
            ),
            None => handler(target_entity_id, status, avb_interface_index, Default::default()),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_AS_PATH, payload, completion);
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// GET_COUNTERS for an AVB_INTERFACE.
    pub fn get_avb_interface_counters(
        &self,
        target_entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        handler: AvbInterfaceCountersHandler,
    ) {
        let payload =
            aem::serialize_get_counters_command(DescriptorType::AvbInterface, avb_interface_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetCounters {
                descriptor_type: DescriptorType::AvbInterface,
                descriptor_index,
                valid_flags,
                counters,
            }) => handler(
                target_entity_id,
                status,
                *descriptor_index,
                AvbInterfaceCounterValidFlags(*valid_flags),
                *counters,
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                avb_interface_index,
                Default::default(),
                [0; 32],
            ),
            None => handler(target_entity_id, status, avb_interface_index, Default::default(), [0; 32]),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_COUNTERS, payload, completion);
    }

    /// GET_COUNTERS for a CLOCK_DOMAIN.
    pub fn get_clock_domain_counters(
        &self,
        target_entity_id: EntityId,
        clock_domain_index: ClockDomainIndex,
        handler: ClockDomainCountersHandler,
    ) {
        let payload =
            aem::serialize_get_counters_command(DescriptorType::ClockDomain, clock_domain_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetCounters {
                descriptor_type: DescriptorType::ClockDomain,
                descriptor_index,
                valid_flags,
                counters,
            }) => handler(
                target_entity_id,
                status,
                *descriptor_index,
                ClockDomainCounterValidFlags(*valid_flags),
                *counters,
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                clock_domain_index,
                Default::default(),
                [0; 32],
            ),
            None => handler(target_entity_id, status, clock_domain_index, Default::default(), [0; 32]),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_COUNTERS, payload, completion);
    }

    /// GET_COUNTERS for a STREAM_INPUT.
    pub fn get_stream_input_counters(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamInputCountersHandler,
    ) {
        let payload = aem::serialize_get_counters_command(DescriptorType::StreamInput, stream_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetCounters {
                descriptor_type: DescriptorType::StreamInput,
                descriptor_index,
                valid_flags,
                counters,
            }) => handler(
                target_entity_id,
                status,
                *descriptor_index,
                StreamInputCounterValidFlags(*valid_flags),
                *counters,
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_index,
                Default::default(),
                [0; 32],
            ),
            None => handler(target_entity_id, status, stream_index, Default::default(), [0; 32]),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_COUNTERS, payload, completion);
    }

    /// GET_COUNTERS for a STREAM_OUTPUT.
    pub fn get_stream_output_counters(
        &self,
        target_entity_id: EntityId,
        stream_index: StreamIndex,
        handler: StreamOutputCountersHandler,
    ) {
        let payload = aem::serialize_get_counters_command(DescriptorType::StreamOutput, stream_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetCounters {
                descriptor_type: DescriptorType::StreamOutput,
                descriptor_index,
                valid_flags,
                counters,
            }) => handler(
                target_entity_id,
                status,
                *descriptor_index,
                StreamOutputCounterValidFlags(*valid_flags),
                *counters,
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_index,
                Default::default(),
                [0; 32],
            ),
            None => handler(target_entity_id, status, stream_index, Default::default(), [0; 32]),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_COUNTERS, payload, completion);
    }

    // ========================================================================
    // Audio maps (STREAM_PORT dynamic mappings)
    // ========================================================================

    /// GET_AUDIO_MAP page for a STREAM_PORT_INPUT.
    pub fn get_stream_port_input_audio_map(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        map_index: u16,
        handler: AudioMapHandler,
    ) {
        self.audio_map_command(
            target_entity_id,
            DescriptorType::StreamPortInput,
            stream_port_index,
            map_index,
            handler,
        );
    }

    /// GET_AUDIO_MAP page for a STREAM_PORT_OUTPUT.
    pub fn get_stream_port_output_audio_map(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        map_index: u16,
        handler: AudioMapHandler,
    ) {
        self.audio_map_command(
            target_entity_id,
            DescriptorType::StreamPortOutput,
            stream_port_index,
            map_index,
            handler,
        );
    }

    fn audio_map_command(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        stream_port_index: DescriptorIndex,
        map_index: u16,
        handler: AudioMapHandler,
    ) {
        let payload =
            aem::serialize_get_audio_map_command(descriptor_type, stream_port_index, map_index);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::GetAudioMap {
                descriptor_index,
                map_index,
                number_of_maps,
                mappings,
                ..
            }) => handler(
                target_entity_id,
                status,
                *descriptor_index,
                *map_index,
                *number_of_maps,
                mappings.clone(),
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_port_index,
                map_index,
                0,
                Vec::new(),
            ),
            None => handler(target_entity_id, status, stream_port_index, map_index, 0, Vec::new()),
        });
        self.send_aem_command(target_entity_id, AemCommandType::GET_AUDIO_MAP, payload, completion);
    }

    /// ADD_AUDIO_MAPPINGS to a STREAM_PORT_INPUT.
    pub fn add_stream_port_input_audio_mappings(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &[AudioMapping],
        handler: AudioMappingsHandler,
    ) {
        self.audio_mappings_command(
            target_entity_id,
            AemCommandType::ADD_AUDIO_MAPPINGS,
            DescriptorType::StreamPortInput,
            stream_port_index,
            mappings,
            handler,
        );
    }

    /// ADD_AUDIO_MAPPINGS to a STREAM_PORT_OUTPUT.
    pub fn add_stream_port_output_audio_mappings(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &[AudioMapping],
        handler: AudioMappingsHandler,
    ) {
        self.audio_mappings_command(
            target_entity_id,
            AemCommandType::ADD_AUDIO_MAPPINGS,
            DescriptorType::StreamPortOutput,
            stream_port_index,
            mappings,
            handler,
        );
    }

    /// REMOVE_AUDIO_MAPPINGS from a STREAM_PORT_INPUT.
    pub fn remove_stream_port_input_audio_mappings(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &[AudioMapping],
        handler: AudioMappingsHandler,
    ) {
        self.audio_mappings_command(
            target_entity_id,
            AemCommandType::REMOVE_AUDIO_MAPPINGS,
            DescriptorType::StreamPortInput,
            stream_port_index,
            mappings,
            handler,
        );
    }

    /// REMOVE_AUDIO_MAPPINGS from a STREAM_PORT_OUTPUT.
    pub fn remove_stream_port_output_audio_mappings(
        &self,
        target_entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &[AudioMapping],
        handler: AudioMappingsHandler,
    ) {
        self.audio_mappings_command(
            target_entity_id,
            AemCommandType::REMOVE_AUDIO_MAPPINGS,
            DescriptorType::StreamPortOutput,
            stream_port_index,
            mappings,
            handler,
        );
    }

    fn audio_mappings_command(
        &self,
        target_entity_id: EntityId,
        command_type: AemCommandType,
        descriptor_type: DescriptorType,
        stream_port_index: DescriptorIndex,
        mappings: &[AudioMapping],
        handler: AudioMappingsHandler,
    ) {
        let payload = if command_type == AemCommandType::ADD_AUDIO_MAPPINGS {
            aem::serialize_add_audio_mappings_command(descriptor_type, stream_port_index, mappings)
        } else {
            aem::serialize_remove_audio_mappings_command(descriptor_type, stream_port_index, mappings)
        };
        let expect_add = command_type == AemCommandType::ADD_AUDIO_MAPPINGS;
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::AddAudioMappings { descriptor_index, mappings, .. }) if expect_add => {
                handler(target_entity_id, status, *descriptor_index, mappings.clone());
            }
            Some(AemResponseData::RemoveAudioMappings { descriptor_index, mappings, .. })
                if !expect_add =>
            {
                handler(target_entity_id, status, *descriptor_index, mappings.clone());
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                stream_port_index,
                Vec::new(),
            ),
            None => handler(target_entity_id, status, stream_port_index, Vec::new()),
        });
        self.send_aem_command(target_entity_id, command_type, payload, completion);
    }

    // ========================================================================
    // Memory objects and operations
    // ========================================================================

    /// START_OPERATION: kick off a long-running entity operation
    /// (firmware store, erase, ...). The entity reports progress through
    /// OPERATION_STATUS unsolicited notifications.
    pub fn start_operation(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_type: MemoryObjectOperationType,
        values: &[u8],
        handler: StartOperationHandler,
    ) {
        let payload = aem::serialize_start_operation_command(
            descriptor_type,
            descriptor_index,
            0, // assigned by the entity in the response
            operation_type,
            values,
        );
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::StartOperation {
                descriptor_type,
                descriptor_index,
                operation_id,
                operation_type,
                values,
            }) => handler(
                target_entity_id,
                status,
                *descriptor_type,
                *descriptor_index,
                *operation_id,
                *operation_type,
                values.clone(),
            ),
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                descriptor_type,
                descriptor_index,
                0,
                operation_type,
                Vec::new(),
            ),
            None => handler(
                target_entity_id,
                status,
                descriptor_type,
                descriptor_index,
                0,
                operation_type,
                Vec::new(),
            ),
        });
        self.send_aem_command(target_entity_id, AemCommandType::START_OPERATION, payload, completion);
    }

    /// ABORT_OPERATION.
    pub fn abort_operation(
        &self,
        target_entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_id: OperationId,
        handler: AbortOperationHandler,
    ) {
        let payload =
            aem::serialize_abort_operation_command(descriptor_type, descriptor_index, operation_id);
        let completion: AemCompletion = Box::new(move |status, data| match data {
            Some(AemResponseData::AbortOperation { descriptor_type, descriptor_index, operation_id }) => {
                handler(target_entity_id, status, *descriptor_type, *descriptor_index, *operation_id);
            }
            Some(_) => handler(
                target_entity_id,
                AemCommandStatus::InternalError,
                descriptor_type,
                descriptor_index,
                operation_id,
            ),
            None => handler(target_entity_id, status, descriptor_type, descriptor_index, operation_id),
        });
        self.send_aem_command(target_entity_id, AemCommandType::ABORT_OPERATION, payload, completion);
    }

    /// SET_MEMORY_OBJECT_LENGTH: set the valid length of a memory object
    /// (firmware upload preparation).
    pub fn set_memory_object_length(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        length: u64,
        handler: MemoryObjectLengthHandler,
    ) {
        let payload = aem::serialize_set_memory_object_length_command(
            configuration_index,
            memory_object_index,
            length,
        );
        let completion = memory_object_length_completion(
            target_entity_id,
            configuration_index,
            memory_object_index,
            true,
            handler,
        );
        self.send_aem_command(
            target_entity_id,
            AemCommandType::SET_MEMORY_OBJECT_LENGTH,
            payload,
            completion,
        );
    }

    /// GET_MEMORY_OBJECT_LENGTH.
    pub fn get_memory_object_length(
        &self,
        target_entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        handler: MemoryObjectLengthHandler,
    ) {
        let payload =
            aem::serialize_get_memory_object_length_command(configuration_index, memory_object_index);
        let completion = memory_object_length_completion(
            target_entity_id,
            configuration_index,
            memory_object_index,
            false,
            handler,
        );
        self.send_aem_command(
            target_entity_id,
            AemCommandType::GET_MEMORY_OBJECT_LENGTH,
            payload,
            completion,
        );
    }

    // ========================================================================
    // Address Access
    // ========================================================================

    /// ADDRESS_ACCESS: raw memory-range reads/writes via TLVs.
    ///
    /// An empty TLV list cannot be encoded; that is a programmer error,
    /// logged at debug level, and the handler is not invoked.
    pub fn address_access(&self, target_entity_id: EntityId, tlvs: Vec<Tlv>, handler: AddressAccessHandler) {
        if let Err(error) = aa::serialize_tlvs(&tlvs) {
            log::debug!("[CONTROLLER] Failed to serialize address_access: {}", error);
            return;
        }
        let completion: super::AaCompletion = Box::new(move |status, tlvs| {
            handler(target_entity_id, status, tlvs.map(<[Tlv]>::to_vec).unwrap_or_default());
        });
        self.send_aa_command(target_entity_id, tlvs, completion);
    }

    // ========================================================================
    // Milan vendor-unique
    // ========================================================================

    /// GET_MILAN_INFO: Milan protocol version and feature flags.
    pub fn get_milan_info(&self, target_entity_id: EntityId, handler: MilanInfoHandler) {
        let payload = mvu_payload::serialize_get_milan_info_command();
        let completion: Box<dyn FnOnce(MvuCommandStatus, Option<&MvuResponseData>) + Send> =
            Box::new(move |status, data| match data {
                Some(MvuResponseData::MilanInfo(info)) => {
                    handler(target_entity_id, status, info.clone());
                }
                None => handler(target_entity_id, status, Default::default()),
            });
        self.send_mvu_command(target_entity_id, MvuCommandType::GET_MILAN_INFO, payload, completion);
    }

    // ========================================================================
    // Connection management (ACMP)
    // ========================================================================

    /// CONNECT_RX_COMMAND: connect a talker stream to a listener stream.
    pub fn connect_stream(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::CONNECT_RX_COMMAND,
            talker_stream.entity_id,
            talker_stream.stream_index,
            listener_stream.entity_id,
            listener_stream.stream_index,
            0,
            acmp_completion(talker_stream, listener_stream, handler),
        );
    }

    /// DISCONNECT_RX_COMMAND: tear a connection down at the listener.
    pub fn disconnect_stream(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::DISCONNECT_RX_COMMAND,
            talker_stream.entity_id,
            talker_stream.stream_index,
            listener_stream.entity_id,
            listener_stream.stream_index,
            0,
            acmp_completion(talker_stream, listener_stream, handler),
        );
    }

    /// DISCONNECT_TX_COMMAND: tear a ghost connection down at the talker
    /// (the listener already believes it is disconnected).
    pub fn disconnect_talker_stream(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::DISCONNECT_TX_COMMAND,
            talker_stream.entity_id,
            talker_stream.stream_index,
            listener_stream.entity_id,
            listener_stream.stream_index,
            0,
            acmp_completion(talker_stream, listener_stream, handler),
        );
    }

    /// GET_TX_STATE_COMMAND: query a talker stream's connection state.
    pub fn get_talker_stream_state(
        &self,
        talker_stream: StreamIdentification,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::GET_TX_STATE_COMMAND,
            talker_stream.entity_id,
            talker_stream.stream_index,
            EntityId::NULL,
            0,
            0,
            acmp_completion(talker_stream, StreamIdentification::default(), handler),
        );
    }

    /// GET_RX_STATE_COMMAND: query a listener stream's connection state.
    pub fn get_listener_stream_state(
        &self,
        listener_stream: StreamIdentification,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::GET_RX_STATE_COMMAND,
            EntityId::NULL,
            0,
            listener_stream.entity_id,
            listener_stream.stream_index,
            0,
            acmp_completion(StreamIdentification::default(), listener_stream, handler),
        );
    }

    /// GET_TX_CONNECTION_COMMAND: query the Nth connection of a talker
    /// stream.
    pub fn get_talker_stream_connection(
        &self,
        talker_stream: StreamIdentification,
        connection_index: u16,
        handler: AcmpConnectionHandler,
    ) {
        self.send_acmp(
            AcmpMessageType::GET_TX_CONNECTION_COMMAND,
            talker_stream.entity_id,
            talker_stream.stream_index,
            EntityId::NULL,
            0,
            connection_index,
            acmp_completion(talker_stream, StreamIdentification::default(), handler),
        );
    }
}

/// Completion for commands whose response carries no payload
fn status_only_completion(
    target_entity_id: EntityId,
    handler: QueryAvailableHandler,
    matches: fn(&AemResponseData) -> bool,
) -> AemCompletion {
    Box::new(move |status, data| match data {
        Some(data) if matches(data) => handler(target_entity_id, status),
        Some(_) => handler(target_entity_id, AemCommandStatus::InternalError),
        None => handler(target_entity_id, status),
    })
}

fn clock_source_completion(
    target_entity_id: EntityId,
    clock_domain_index: ClockDomainIndex,
    expect_set: bool,
    handler: ClockSourceHandler,
) -> AemCompletion {
    Box::new(move |status, data| match data {
        Some(AemResponseData::SetClockSource { descriptor_index, clock_source_index, .. })
            if expect_set =>
        {
            handler(target_entity_id, status, *descriptor_index, *clock_source_index);
        }
        Some(AemResponseData::GetClockSource { descriptor_index, clock_source_index, .. })
            if !expect_set =>
        {
            handler(target_entity_id, status, *descriptor_index, *clock_source_index);
        }
        Some(_) => handler(target_entity_id, AemCommandStatus::InternalError, clock_domain_index, 0),
        None => handler(target_entity_id, status, clock_domain_index, 0),
    })
}

fn memory_object_length_completion(
    target_entity_id: EntityId,
    configuration_index: ConfigurationIndex,
    memory_object_index: MemoryObjectIndex,
    expect_set: bool,
    handler: MemoryObjectLengthHandler,
) -> AemCompletion {
    Box::new(move |status, data| match data {
        Some(AemResponseData::SetMemoryObjectLength {
            configuration_index,
            memory_object_index,
            length,
        }) if expect_set => {
            handler(target_entity_id, status, *configuration_index, *memory_object_index, *length);
        }
        Some(AemResponseData::GetMemoryObjectLength {
            configuration_index,
            memory_object_index,
            length,
        }) if !expect_set => {
            handler(target_entity_id, status, *configuration_index, *memory_object_index, *length);
        }
        Some(_) => handler(
            target_entity_id,
            AemCommandStatus::InternalError,
            configuration_index,
            memory_object_index,
            0,
        ),
        None => handler(target_entity_id, status, configuration_index, memory_object_index, 0),
    })
}

/// ACMP completion: answers carry the response fields; error paths echo
/// the request's stream identification with empty count/flags.
fn acmp_completion(
    talker_stream: StreamIdentification,
    listener_stream: StreamIdentification,
    handler: AcmpConnectionHandler,
) -> crate::controller::router::AcmpCompletion {
    Box::new(move |status, response| match response {
        Some(pdu) => handler(
            StreamIdentification::new(pdu.talker_entity_id, pdu.talker_unique_id),
            StreamIdentification::new(pdu.listener_entity_id, pdu.listener_unique_id),
            pdu.connection_count,
            pdu.flags,
            status,
        ),
        None => handler(talker_stream, listener_stream, 0, ConnectionFlags::NONE, status),
    })
}
