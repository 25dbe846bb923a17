// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Response router.
//!
//! Decodes response PDUs into the [`AemResponseData`] sum type (command
//! type first, then descriptor type for the polymorphic commands) and
//! delivers them: the per-request completion gets the typed data with the
//! wire status propagated verbatim; unsolicited AEM responses and sniffed
//! ACMP responses additionally fan out to the registered delegate.
//!
//! Codec failures never escape: a payload that cannot be deserialized
//! turns into `ProtocolError` (or the forwarded wire status under the
//! `lenient-payloads` feature), and an unknown command type on a
//! solicited completion turns into `InternalError`.

use crate::controller::status::{AemCommandStatus, ControlStatus, MvuCommandStatus};
use crate::controller::{invoke_protected, ControllerCapability};
use crate::model::{
    AsPath, AudioClusterDescriptor, AudioMapDescriptor, AudioMappings, AudioUnitDescriptor,
    AvbInfo, AvbInterfaceCounterValidFlags, AvbInterfaceDescriptor, AvbInterfaceIndex,
    AvdeccFixedString, ClockDomainCounterValidFlags, ClockDomainDescriptor, ClockSourceDescriptor,
    ConfigurationDescriptor, ConfigurationIndex, DescriptorCounters, DescriptorIndex,
    DescriptorType, EntityDescriptor, EntityId, ExternalPortDescriptor, InternalPortDescriptor,
    JackDescriptor, LocaleDescriptor, MemoryObjectDescriptor, MemoryObjectIndex,
    MemoryObjectOperationType, MilanInfo, OperationId, SamplingRate, StreamDescriptor,
    StreamFormat, StreamIdentification, StreamInfo, StreamInputCounterValidFlags,
    StreamOutputCounterValidFlags, StreamPortDescriptor, StringsDescriptor,
};
use crate::protocol::aem_payload as aem;
use crate::protocol::cursor::PayloadError;
use crate::protocol::mvu_payload;
use crate::protocol::pdu::{AcmpMessageType, Acmpdu, AemAecpdu, AemCommandType, MvuAecpdu, MvuCommandType};

/// Deserialized descriptor body of a READ_DESCRIPTOR response
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorData {
    Entity(EntityDescriptor),
    Configuration(ConfigurationDescriptor),
    AudioUnit(AudioUnitDescriptor),
    StreamInput(StreamDescriptor),
    StreamOutput(StreamDescriptor),
    JackInput(JackDescriptor),
    JackOutput(JackDescriptor),
    AvbInterface(AvbInterfaceDescriptor),
    ClockSource(ClockSourceDescriptor),
    MemoryObject(MemoryObjectDescriptor),
    Locale(LocaleDescriptor),
    Strings(StringsDescriptor),
    StreamPortInput(StreamPortDescriptor),
    StreamPortOutput(StreamPortDescriptor),
    ExternalPortInput(ExternalPortDescriptor),
    ExternalPortOutput(ExternalPortDescriptor),
    InternalPortInput(InternalPortDescriptor),
    InternalPortOutput(InternalPortDescriptor),
    AudioCluster(AudioClusterDescriptor),
    AudioMap(AudioMapDescriptor),
    ClockDomain(ClockDomainDescriptor),
}

/// Fully decoded AEM response.
///
/// Acquire-vs-release and lock-vs-unlock are split at decode time by the
/// response flags, so downstream matching is purely structural.
#[derive(Debug, Clone, PartialEq)]
pub enum AemResponseData {
    AcquireEntity {
        owning_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    ReleaseEntity {
        owning_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    LockEntity {
        locking_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    UnlockEntity {
        locking_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    EntityAvailable,
    ControllerAvailable,
    RegisterUnsolicitedNotifications,
    DeregisterUnsolicitedNotifications,
    ReadDescriptor {
        configuration_index: ConfigurationIndex,
        descriptor_index: DescriptorIndex,
        descriptor: DescriptorData,
    },
    SetConfiguration {
        configuration_index: ConfigurationIndex,
    },
    GetConfiguration {
        configuration_index: ConfigurationIndex,
    },
    SetStreamFormat {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        stream_format: StreamFormat,
    },
    GetStreamFormat {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        stream_format: StreamFormat,
    },
    SetStreamInfo {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        info: StreamInfo,
    },
    GetStreamInfo {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        info: StreamInfo,
    },
    SetName {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        name_index: u16,
        configuration_index: ConfigurationIndex,
        name: AvdeccFixedString,
    },
    GetName {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        name_index: u16,
        configuration_index: ConfigurationIndex,
        name: AvdeccFixedString,
    },
    SetSamplingRate {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    },
    GetSamplingRate {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    },
    SetClockSource {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        clock_source_index: u16,
    },
    GetClockSource {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        clock_source_index: u16,
    },
    StartStreaming {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    StopStreaming {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    },
    GetAvbInfo {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        info: AvbInfo,
    },
    GetAsPath {
        avb_interface_index: AvbInterfaceIndex,
        as_path: AsPath,
    },
    GetCounters {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        valid_flags: u32,
        counters: DescriptorCounters,
    },
    GetAudioMap {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        map_index: u16,
        number_of_maps: u16,
        mappings: AudioMappings,
    },
    AddAudioMappings {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        mappings: AudioMappings,
    },
    RemoveAudioMappings {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        mappings: AudioMappings,
    },
    StartOperation {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_id: OperationId,
        operation_type: MemoryObjectOperationType,
        values: Vec<u8>,
    },
    AbortOperation {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_id: OperationId,
    },
    OperationStatus {
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_id: OperationId,
        percent_complete: u16,
    },
    SetMemoryObjectLength {
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        length: u64,
    },
    GetMemoryObjectLength {
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        length: u64,
    },
}

/// Decoded Milan vendor-unique response
#[derive(Debug, Clone, PartialEq)]
pub enum MvuResponseData {
    MilanInfo(MilanInfo),
}

/// AEM decode failure kinds the router translates into statuses
#[derive(Debug)]
pub(crate) enum AemDecodeError {
    /// Command type the router does not understand
    UnknownCommandType(AemCommandType),
    /// Payload could not be deserialized
    Payload(PayloadError),
}

impl From<PayloadError> for AemDecodeError {
    fn from(error: PayloadError) -> Self {
        Self::Payload(error)
    }
}

/// Typed completion for a pending AEM command. `None` data means the
/// payload was unavailable (error path); adapters substitute defaults.
pub(crate) type AemCompletion = Box<dyn FnOnce(AemCommandStatus, Option<&AemResponseData>) + Send>;

/// Typed completion for a pending Milan vendor-unique command
pub(crate) type MvuCompletion = Box<dyn FnOnce(MvuCommandStatus, Option<&MvuResponseData>) + Send>;

/// Typed completion for a pending ACMP command
pub(crate) type AcmpCompletion = Box<dyn FnOnce(ControlStatus, Option<&Acmpdu>) + Send>;

/// Decode an AEM response payload into its typed representation.
///
/// Dispatch is two-step: the command type selects the payload shape, and
/// READ_DESCRIPTOR responses further dispatch on the embedded descriptor
/// type before the body is parsed.
pub(crate) fn decode_aem_response(pdu: &AemAecpdu) -> Result<AemResponseData, AemDecodeError> {
    let payload = pdu.payload.as_slice();
    let data = match pdu.command_type {
        AemCommandType::ACQUIRE_ENTITY => {
            let (flags, owning_entity, descriptor_type, descriptor_index) =
                aem::deserialize_acquire_entity_response(payload)?;
            if flags.contains(crate::model::AcquireEntityFlags::RELEASE) {
                AemResponseData::ReleaseEntity { owning_entity, descriptor_type, descriptor_index }
            } else {
                AemResponseData::AcquireEntity { owning_entity, descriptor_type, descriptor_index }
            }
        }
        AemCommandType::LOCK_ENTITY => {
            let (flags, locking_entity, descriptor_type, descriptor_index) =
                aem::deserialize_lock_entity_response(payload)?;
            if flags.contains(crate::model::LockEntityFlags::UNLOCK) {
                AemResponseData::UnlockEntity { locking_entity, descriptor_type, descriptor_index }
            } else {
                AemResponseData::LockEntity { locking_entity, descriptor_type, descriptor_index }
            }
        }
        AemCommandType::ENTITY_AVAILABLE => AemResponseData::EntityAvailable,
        AemCommandType::CONTROLLER_AVAILABLE => AemResponseData::ControllerAvailable,
        AemCommandType::REGISTER_UNSOLICITED_NOTIFICATION => {
            AemResponseData::RegisterUnsolicitedNotifications
        }
        AemCommandType::DEREGISTER_UNSOLICITED_NOTIFICATION => {
            AemResponseData::DeregisterUnsolicitedNotifications
        }
        AemCommandType::READ_DESCRIPTOR => {
            let (common_size, configuration_index, descriptor_type, descriptor_index) =
                aem::deserialize_read_descriptor_common(payload)?;
            let descriptor = match descriptor_type {
                DescriptorType::Entity => {
                    DescriptorData::Entity(aem::deserialize_entity_descriptor(payload, common_size)?)
                }
                DescriptorType::Configuration => DescriptorData::Configuration(
                    aem::deserialize_configuration_descriptor(payload, common_size)?,
                ),
                DescriptorType::AudioUnit => DescriptorData::AudioUnit(
                    aem::deserialize_audio_unit_descriptor(payload, common_size)?,
                ),
                DescriptorType::StreamInput => DescriptorData::StreamInput(
                    aem::deserialize_stream_descriptor(payload, common_size)?,
                ),
                DescriptorType::StreamOutput => DescriptorData::StreamOutput(
                    aem::deserialize_stream_descriptor(payload, common_size)?,
                ),
                DescriptorType::JackInput => {
                    DescriptorData::JackInput(aem::deserialize_jack_descriptor(payload, common_size)?)
                }
                DescriptorType::JackOutput => {
                    DescriptorData::JackOutput(aem::deserialize_jack_descriptor(payload, common_size)?)
                }
                DescriptorType::AvbInterface => DescriptorData::AvbInterface(
                    aem::deserialize_avb_interface_descriptor(payload, common_size)?,
                ),
                DescriptorType::ClockSource => DescriptorData::ClockSource(
                    aem::deserialize_clock_source_descriptor(payload, common_size)?,
                ),
                DescriptorType::MemoryObject => DescriptorData::MemoryObject(
                    aem::deserialize_memory_object_descriptor(payload, common_size)?,
                ),
                DescriptorType::Locale => {
                    DescriptorData::Locale(aem::deserialize_locale_descriptor(payload, common_size)?)
                }
                DescriptorType::Strings => DescriptorData::Strings(
                    aem::deserialize_strings_descriptor(payload, common_size)?,
                ),
                DescriptorType::StreamPortInput => DescriptorData::StreamPortInput(
                    aem::deserialize_stream_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::StreamPortOutput => DescriptorData::StreamPortOutput(
                    aem::deserialize_stream_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::ExternalPortInput => DescriptorData::ExternalPortInput(
                    aem::deserialize_external_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::ExternalPortOutput => DescriptorData::ExternalPortOutput(
                    aem::deserialize_external_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::InternalPortInput => DescriptorData::InternalPortInput(
                    aem::deserialize_internal_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::InternalPortOutput => DescriptorData::InternalPortOutput(
                    aem::deserialize_internal_port_descriptor(payload, common_size)?,
                ),
                DescriptorType::AudioCluster => DescriptorData::AudioCluster(
                    aem::deserialize_audio_cluster_descriptor(payload, common_size)?,
                ),
                DescriptorType::AudioMap => DescriptorData::AudioMap(
                    aem::deserialize_audio_map_descriptor(payload, common_size)?,
                ),
                DescriptorType::ClockDomain => DescriptorData::ClockDomain(
                    aem::deserialize_clock_domain_descriptor(payload, common_size)?,
                ),
                other => {
                    log::debug!("[ROUTER] READ_DESCRIPTOR response for unhandled {}", other);
                    return Err(AemDecodeError::Payload(PayloadError::InvalidValue {
                        field: "descriptor_type",
                    }));
                }
            };
            AemResponseData::ReadDescriptor { configuration_index, descriptor_index, descriptor }
        }
        AemCommandType::SET_CONFIGURATION => AemResponseData::SetConfiguration {
            configuration_index: aem::deserialize_set_configuration_response(payload)?,
        },
        AemCommandType::GET_CONFIGURATION => AemResponseData::GetConfiguration {
            configuration_index: aem::deserialize_get_configuration_response(payload)?,
        },
        AemCommandType::SET_STREAM_FORMAT => {
            let (descriptor_type, descriptor_index, stream_format) =
                aem::deserialize_set_stream_format_response(payload)?;
            AemResponseData::SetStreamFormat { descriptor_type, descriptor_index, stream_format }
        }
        AemCommandType::GET_STREAM_FORMAT => {
            let (descriptor_type, descriptor_index, stream_format) =
                aem::deserialize_get_stream_format_response(payload)?;
            AemResponseData::GetStreamFormat { descriptor_type, descriptor_index, stream_format }
        }
        AemCommandType::SET_STREAM_INFO => {
            let (descriptor_type, descriptor_index, info) =
                aem::deserialize_set_stream_info_response(payload)?;
            AemResponseData::SetStreamInfo { descriptor_type, descriptor_index, info }
        }
        AemCommandType::GET_STREAM_INFO => {
            let (descriptor_type, descriptor_index, info) =
                aem::deserialize_get_stream_info_response(payload)?;
            AemResponseData::GetStreamInfo { descriptor_type, descriptor_index, info }
        }
        AemCommandType::SET_NAME => {
            let (descriptor_type, descriptor_index, name_index, configuration_index, name) =
                aem::deserialize_set_name_response(payload)?;
            AemResponseData::SetName {
                descriptor_type,
                descriptor_index,
                name_index,
                configuration_index,
                name,
            }
        }
        AemCommandType::GET_NAME => {
            let (descriptor_type, descriptor_index, name_index, configuration_index, name) =
                aem::deserialize_get_name_response(payload)?;
            AemResponseData::GetName {
                descriptor_type,
                descriptor_index,
                name_index,
                configuration_index,
                name,
            }
        }
        AemCommandType::SET_SAMPLING_RATE => {
            let (descriptor_type, descriptor_index, sampling_rate) =
                aem::deserialize_set_sampling_rate_response(payload)?;
            AemResponseData::SetSamplingRate { descriptor_type, descriptor_index, sampling_rate }
        }
        AemCommandType::GET_SAMPLING_RATE => {
            let (descriptor_type, descriptor_index, sampling_rate) =
                aem::deserialize_get_sampling_rate_response(payload)?;
            AemResponseData::GetSamplingRate { descriptor_type, descriptor_index, sampling_rate }
        }
        AemCommandType::SET_CLOCK_SOURCE => {
            let (descriptor_type, descriptor_index, clock_source_index) =
                aem::deserialize_set_clock_source_response(payload)?;
            AemResponseData::SetClockSource { descriptor_type, descriptor_index, clock_source_index }
        }
        AemCommandType::GET_CLOCK_SOURCE => {
            let (descriptor_type, descriptor_index, clock_source_index) =
                aem::deserialize_get_clock_source_response(payload)?;
            AemResponseData::GetClockSource { descriptor_type, descriptor_index, clock_source_index }
        }
        AemCommandType::START_STREAMING => {
            let (descriptor_type, descriptor_index) =
                aem::deserialize_start_streaming_response(payload)?;
            AemResponseData::StartStreaming { descriptor_type, descriptor_index }
        }
        AemCommandType::STOP_STREAMING => {
            let (descriptor_type, descriptor_index) =
                aem::deserialize_stop_streaming_response(payload)?;
            AemResponseData::StopStreaming { descriptor_type, descriptor_index }
        }
        AemCommandType::GET_AVB_INFO => {
            let (descriptor_type, descriptor_index, info) =
                aem::deserialize_get_avb_info_response(payload)?;
            AemResponseData::GetAvbInfo { descriptor_type, descriptor_index, info }
        }
        AemCommandType::GET_AS_PATH => {
            let (avb_interface_index, as_path) = aem::deserialize_get_as_path_response(payload)?;
            AemResponseData::GetAsPath { avb_interface_index, as_path }
        }
        AemCommandType::GET_COUNTERS => {
            let (descriptor_type, descriptor_index, valid_flags, counters) =
                aem::deserialize_get_counters_response(payload)?;
            AemResponseData::GetCounters { descriptor_type, descriptor_index, valid_flags, counters }
        }
        AemCommandType::GET_AUDIO_MAP => {
            let (descriptor_type, descriptor_index, map_index, number_of_maps, mappings) =
                aem::deserialize_get_audio_map_response(payload)?;
            AemResponseData::GetAudioMap {
                descriptor_type,
                descriptor_index,
                map_index,
                number_of_maps,
                mappings,
            }
        }
        AemCommandType::ADD_AUDIO_MAPPINGS => {
            let (descriptor_type, descriptor_index, mappings) =
                aem::deserialize_add_audio_mappings_response(payload)?;
            AemResponseData::AddAudioMappings { descriptor_type, descriptor_index, mappings }
        }
        AemCommandType::REMOVE_AUDIO_MAPPINGS => {
            let (descriptor_type, descriptor_index, mappings) =
                aem::deserialize_remove_audio_mappings_response(payload)?;
            AemResponseData::RemoveAudioMappings { descriptor_type, descriptor_index, mappings }
        }
        AemCommandType::START_OPERATION => {
            let (descriptor_type, descriptor_index, operation_id, operation_type, values) =
                aem::deserialize_start_operation_response(payload)?;
            AemResponseData::StartOperation {
                descriptor_type,
                descriptor_index,
                operation_id,
                operation_type,
                values,
            }
        }
        AemCommandType::ABORT_OPERATION => {
            let (descriptor_type, descriptor_index, operation_id) =
                aem::deserialize_abort_operation_response(payload)?;
            AemResponseData::AbortOperation { descriptor_type, descriptor_index, operation_id }
        }
        AemCommandType::OPERATION_STATUS => {
            let (descriptor_type, descriptor_index, operation_id, percent_complete) =
                aem::deserialize_operation_status_response(payload)?;
            AemResponseData::OperationStatus {
                descriptor_type,
                descriptor_index,
                operation_id,
                percent_complete,
            }
        }
        AemCommandType::SET_MEMORY_OBJECT_LENGTH => {
            let (configuration_index, memory_object_index, length) =
                aem::deserialize_set_memory_object_length_response(payload)?;
            AemResponseData::SetMemoryObjectLength { configuration_index, memory_object_index, length }
        }
        AemCommandType::GET_MEMORY_OBJECT_LENGTH => {
            let (configuration_index, memory_object_index, length) =
                aem::deserialize_get_memory_object_length_response(payload)?;
            AemResponseData::GetMemoryObjectLength { configuration_index, memory_object_index, length }
        }
        other => return Err(AemDecodeError::UnknownCommandType(other)),
    };
    Ok(data)
}

impl ControllerCapability {
    /// Route an AEM response: invoke the pending completion (if any) and
    /// fan unsolicited success notifications out to the delegate.
    pub(crate) fn process_aem_response(&self, pdu: &AemAecpdu, completion: Option<AemCompletion>) {
        let status = AemCommandStatus::from_wire(pdu.status);

        match decode_aem_response(pdu) {
            Ok(data) => {
                if matches!(data, AemResponseData::OperationStatus { .. }) && !pdu.unsolicited {
                    // OPERATION_STATUS is defined to be unsolicited only
                    debug_assert!(pdu.unsolicited, "OPERATION_STATUS must be unsolicited");
                    log::debug!("[ROUTER] Solicited OPERATION_STATUS response, ignoring");
                }
                if let Some(completion) = completion {
                    invoke_protected("aem answer", || completion(status, Some(&data)));
                }
                if pdu.unsolicited && status.is_success() {
                    self.notify_aem_unsolicited(pdu.target_entity_id, &data);
                }
            }
            Err(AemDecodeError::UnknownCommandType(command_type)) => {
                if let Some(completion) = completion {
                    log::debug!(
                        "[ROUTER] Unhandled AEM command type {:?} in solicited response",
                        command_type
                    );
                    invoke_protected("aem answer", move || {
                        completion(AemCommandStatus::InternalError, None);
                    });
                } else {
                    // Unknown unsolicited notifications are dropped
                    log::debug!(
                        "[ROUTER] Dropping unsolicited response with unhandled command type {:?}",
                        command_type
                    );
                }
            }
            Err(AemDecodeError::Payload(error)) => {
                let effective = self.degrade_status(status, &error);
                if let Some(completion) = completion {
                    invoke_protected("aem answer", move || completion(effective, None));
                } else {
                    log::debug!(
                        "[ROUTER] Dropping malformed unsolicited {:?} response: {}",
                        pdu.command_type,
                        error
                    );
                }
            }
        }
    }

    /// Malformed-payload policy: success becomes `ProtocolError`. A
    /// non-success wire status is forwarded under `lenient-payloads`,
    /// otherwise it degrades to `ProtocolError` as well.
    fn degrade_status(&self, status: AemCommandStatus, error: &PayloadError) -> AemCommandStatus {
        if status.is_success() {
            log::debug!("[ROUTER] Malformed payload on success response: {}", error);
            return AemCommandStatus::ProtocolError;
        }
        #[cfg(feature = "lenient-payloads")]
        {
            log::info!(
                "[ROUTER] Malformed payload on {} response, forwarding wire status with default fields ({})",
                status,
                error
            );
            status
        }
        #[cfg(not(feature = "lenient-payloads"))]
        {
            log::debug!("[ROUTER] Malformed payload on {} response: {}", status, error);
            AemCommandStatus::ProtocolError
        }
    }

    /// Dispatch one decoded unsolicited notification to the delegate.
    /// Caller has already checked success status; delegate absence makes
    /// this a no-op.
    fn notify_aem_unsolicited(&self, entity_id: EntityId, data: &AemResponseData) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        let delegate = delegate.as_ref();

        match data {
            AemResponseData::AcquireEntity { owning_entity, descriptor_type, descriptor_index } => {
                invoke_protected("on_entity_acquired", || {
                    delegate.on_entity_acquired(entity_id, *owning_entity, *descriptor_type, *descriptor_index);
                });
            }
            AemResponseData::ReleaseEntity { owning_entity, descriptor_type, descriptor_index } => {
                invoke_protected("on_entity_released", || {
                    delegate.on_entity_released(entity_id, *owning_entity, *descriptor_type, *descriptor_index);
                });
            }
            AemResponseData::LockEntity { locking_entity, descriptor_type, descriptor_index } => {
                invoke_protected("on_entity_locked", || {
                    delegate.on_entity_locked(entity_id, *locking_entity, *descriptor_type, *descriptor_index);
                });
            }
            AemResponseData::UnlockEntity { locking_entity, descriptor_type, descriptor_index } => {
                invoke_protected("on_entity_unlocked", || {
                    delegate.on_entity_unlocked(entity_id, *locking_entity, *descriptor_type, *descriptor_index);
                });
            }
            AemResponseData::SetConfiguration { configuration_index } => {
                invoke_protected("on_configuration_changed", || {
                    delegate.on_configuration_changed(entity_id, *configuration_index);
                });
            }
            AemResponseData::SetStreamFormat { descriptor_type, descriptor_index, stream_format } => {
                match descriptor_type {
                    DescriptorType::StreamInput => invoke_protected("on_stream_input_format_changed", || {
                        delegate.on_stream_input_format_changed(entity_id, *descriptor_index, *stream_format);
                    }),
                    DescriptorType::StreamOutput => invoke_protected("on_stream_output_format_changed", || {
                        delegate.on_stream_output_format_changed(entity_id, *descriptor_index, *stream_format);
                    }),
                    other => log::debug!("[ROUTER] SET_STREAM_FORMAT notification for {}", other),
                }
            }
            AemResponseData::SetStreamInfo { descriptor_type, descriptor_index, info } => {
                self.notify_stream_info(delegate, entity_id, *descriptor_type, *descriptor_index, info, false);
            }
            AemResponseData::GetStreamInfo { descriptor_type, descriptor_index, info } => {
                self.notify_stream_info(delegate, entity_id, *descriptor_type, *descriptor_index, info, true);
            }
            AemResponseData::SetName {
                descriptor_type,
                descriptor_index,
                name_index,
                configuration_index,
                name,
            } => {
                self.notify_name_changed(
                    delegate,
                    entity_id,
                    *descriptor_type,
                    *descriptor_index,
                    *name_index,
                    *configuration_index,
                    name,
                );
            }
            AemResponseData::SetSamplingRate { descriptor_type, descriptor_index, sampling_rate } => {
                match descriptor_type {
                    DescriptorType::AudioUnit => invoke_protected("on_audio_unit_sampling_rate_changed", || {
                        delegate.on_audio_unit_sampling_rate_changed(entity_id, *descriptor_index, *sampling_rate);
                    }),
                    DescriptorType::AudioCluster => {
                        invoke_protected("on_audio_cluster_sampling_rate_changed", || {
                            delegate.on_audio_cluster_sampling_rate_changed(
                                entity_id,
                                *descriptor_index,
                                *sampling_rate,
                            );
                        });
                    }
                    DescriptorType::VideoCluster => {
                        invoke_protected("on_video_cluster_sampling_rate_changed", || {
                            delegate.on_video_cluster_sampling_rate_changed(
                                entity_id,
                                *descriptor_index,
                                *sampling_rate,
                            );
                        });
                    }
                    DescriptorType::SensorCluster => {
                        invoke_protected("on_sensor_cluster_sampling_rate_changed", || {
                            delegate.on_sensor_cluster_sampling_rate_changed(
                                entity_id,
                                *descriptor_index,
                                *sampling_rate,
                            );
                        });
                    }
                    other => log::debug!("[ROUTER] SET_SAMPLING_RATE notification for {}", other),
                }
            }
            AemResponseData::SetClockSource { descriptor_index, clock_source_index, .. } => {
                invoke_protected("on_clock_source_changed", || {
                    delegate.on_clock_source_changed(entity_id, *descriptor_index, *clock_source_index);
                });
            }
            AemResponseData::StartStreaming { descriptor_type, descriptor_index } => {
                match descriptor_type {
                    DescriptorType::StreamInput => invoke_protected("on_stream_input_started", || {
                        delegate.on_stream_input_started(entity_id, *descriptor_index);
                    }),
                    DescriptorType::StreamOutput => invoke_protected("on_stream_output_started", || {
                        delegate.on_stream_output_started(entity_id, *descriptor_index);
                    }),
                    other => log::debug!("[ROUTER] START_STREAMING notification for {}", other),
                }
            }
            AemResponseData::StopStreaming { descriptor_type, descriptor_index } => {
                match descriptor_type {
                    DescriptorType::StreamInput => invoke_protected("on_stream_input_stopped", || {
                        delegate.on_stream_input_stopped(entity_id, *descriptor_index);
                    }),
                    DescriptorType::StreamOutput => invoke_protected("on_stream_output_stopped", || {
                        delegate.on_stream_output_stopped(entity_id, *descriptor_index);
                    }),
                    other => log::debug!("[ROUTER] STOP_STREAMING notification for {}", other),
                }
            }
            AemResponseData::GetAvbInfo { descriptor_index, info, .. } => {
                invoke_protected("on_avb_info_changed", || {
                    delegate.on_avb_info_changed(entity_id, *descriptor_index, info);
                });
            }
            AemResponseData::GetAsPath { avb_interface_index, as_path } => {
                invoke_protected("on_as_path_changed", || {
                    delegate.on_as_path_changed(entity_id, *avb_interface_index, as_path);
                });
            }
            AemResponseData::GetCounters { descriptor_type, descriptor_index, valid_flags, counters } => {
                // Valid-flags reinterpreted under the descriptor-specific type
                match descriptor_type {
                    DescriptorType::AvbInterface => {
                        invoke_protected("on_avb_interface_counters_changed", || {
                            delegate.on_avb_interface_counters_changed(
                                entity_id,
                                *descriptor_index,
                                AvbInterfaceCounterValidFlags(*valid_flags),
                                counters,
                            );
                        });
                    }
                    DescriptorType::ClockDomain => {
                        invoke_protected("on_clock_domain_counters_changed", || {
                            delegate.on_clock_domain_counters_changed(
                                entity_id,
                                *descriptor_index,
                                ClockDomainCounterValidFlags(*valid_flags),
                                counters,
                            );
                        });
                    }
                    DescriptorType::StreamInput => {
                        invoke_protected("on_stream_input_counters_changed", || {
                            delegate.on_stream_input_counters_changed(
                                entity_id,
                                *descriptor_index,
                                StreamInputCounterValidFlags(*valid_flags),
                                counters,
                            );
                        });
                    }
                    DescriptorType::StreamOutput => {
                        invoke_protected("on_stream_output_counters_changed", || {
                            delegate.on_stream_output_counters_changed(
                                entity_id,
                                *descriptor_index,
                                StreamOutputCounterValidFlags(*valid_flags),
                                counters,
                            );
                        });
                    }
                    other => log::debug!("[ROUTER] GET_COUNTERS notification for {}", other),
                }
            }
            AemResponseData::GetAudioMap {
                descriptor_type,
                descriptor_index,
                map_index,
                number_of_maps,
                mappings,
            } => match descriptor_type {
                DescriptorType::StreamPortInput => {
                    invoke_protected("on_stream_port_input_audio_mappings_changed", || {
                        delegate.on_stream_port_input_audio_mappings_changed(
                            entity_id,
                            *descriptor_index,
                            *number_of_maps,
                            *map_index,
                            mappings,
                        );
                    });
                }
                DescriptorType::StreamPortOutput => {
                    invoke_protected("on_stream_port_output_audio_mappings_changed", || {
                        delegate.on_stream_port_output_audio_mappings_changed(
                            entity_id,
                            *descriptor_index,
                            *number_of_maps,
                            *map_index,
                            mappings,
                        );
                    });
                }
                other => log::debug!("[ROUTER] GET_AUDIO_MAP notification for {}", other),
            },
            AemResponseData::AddAudioMappings { descriptor_type, descriptor_index, mappings } => {
                match descriptor_type {
                    DescriptorType::StreamPortInput => {
                        invoke_protected("on_stream_port_input_audio_mappings_added", || {
                            delegate.on_stream_port_input_audio_mappings_added(
                                entity_id,
                                *descriptor_index,
                                mappings,
                            );
                        });
                    }
                    DescriptorType::StreamPortOutput => {
                        invoke_protected("on_stream_port_output_audio_mappings_added", || {
                            delegate.on_stream_port_output_audio_mappings_added(
                                entity_id,
                                *descriptor_index,
                                mappings,
                            );
                        });
                    }
                    other => log::debug!("[ROUTER] ADD_AUDIO_MAPPINGS notification for {}", other),
                }
            }
            AemResponseData::RemoveAudioMappings { descriptor_type, descriptor_index, mappings } => {
                match descriptor_type {
                    DescriptorType::StreamPortInput => {
                        invoke_protected("on_stream_port_input_audio_mappings_removed", || {
                            delegate.on_stream_port_input_audio_mappings_removed(
                                entity_id,
                                *descriptor_index,
                                mappings,
                            );
                        });
                    }
                    DescriptorType::StreamPortOutput => {
                        invoke_protected("on_stream_port_output_audio_mappings_removed", || {
                            delegate.on_stream_port_output_audio_mappings_removed(
                                entity_id,
                                *descriptor_index,
                                mappings,
                            );
                        });
                    }
                    other => log::debug!("[ROUTER] REMOVE_AUDIO_MAPPINGS notification for {}", other),
                }
            }
            AemResponseData::OperationStatus {
                descriptor_type,
                descriptor_index,
                operation_id,
                percent_complete,
            } => {
                invoke_protected("on_operation_status", || {
                    delegate.on_operation_status(
                        entity_id,
                        *descriptor_type,
                        *descriptor_index,
                        *operation_id,
                        *percent_complete,
                    );
                });
            }
            AemResponseData::SetMemoryObjectLength {
                configuration_index,
                memory_object_index,
                length,
            } => {
                invoke_protected("on_memory_object_length_changed", || {
                    delegate.on_memory_object_length_changed(
                        entity_id,
                        *configuration_index,
                        *memory_object_index,
                        *length,
                    );
                });
            }
            AemResponseData::DeregisterUnsolicitedNotifications => {
                invoke_protected("on_deregistered_from_unsolicited_notifications", || {
                    delegate.on_deregistered_from_unsolicited_notifications(entity_id);
                });
            }
            // Read-back responses carry no change notification surface
            AemResponseData::EntityAvailable
            | AemResponseData::ControllerAvailable
            | AemResponseData::RegisterUnsolicitedNotifications
            | AemResponseData::ReadDescriptor { .. }
            | AemResponseData::GetConfiguration { .. }
            | AemResponseData::GetStreamFormat { .. }
            | AemResponseData::GetName { .. }
            | AemResponseData::GetSamplingRate { .. }
            | AemResponseData::GetClockSource { .. }
            | AemResponseData::StartOperation { .. }
            | AemResponseData::AbortOperation { .. }
            | AemResponseData::GetMemoryObjectLength { .. } => {}
        }
    }

    fn notify_stream_info(
        &self,
        delegate: &dyn crate::controller::ControllerDelegate,
        entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        info: &StreamInfo,
        from_get: bool,
    ) {
        match descriptor_type {
            DescriptorType::StreamInput => invoke_protected("on_stream_input_info_changed", || {
                delegate.on_stream_input_info_changed(entity_id, descriptor_index, info, from_get);
            }),
            DescriptorType::StreamOutput => invoke_protected("on_stream_output_info_changed", || {
                delegate.on_stream_output_info_changed(entity_id, descriptor_index, info, from_get);
            }),
            other => log::debug!("[ROUTER] STREAM_INFO notification for {}", other),
        }
    }

    /// SET_NAME notifications: (descriptor type, name index) selects the
    /// named attribute. Unknown pairs are logged and dropped.
    #[allow(clippy::too_many_arguments)]
    fn notify_name_changed(
        &self,
        delegate: &dyn crate::controller::ControllerDelegate,
        entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        name_index: u16,
        configuration_index: ConfigurationIndex,
        name: &AvdeccFixedString,
    ) {
        match (descriptor_type, name_index) {
            (DescriptorType::Entity, 0) => invoke_protected("on_entity_name_changed", || {
                delegate.on_entity_name_changed(entity_id, name);
            }),
            (DescriptorType::Entity, 1) => invoke_protected("on_entity_group_name_changed", || {
                delegate.on_entity_group_name_changed(entity_id, name);
            }),
            // For CONFIGURATION the descriptor index is the configuration
            (DescriptorType::Configuration, 0) => {
                invoke_protected("on_configuration_name_changed", || {
                    delegate.on_configuration_name_changed(entity_id, descriptor_index, name);
                });
            }
            (DescriptorType::AudioUnit, 0) => invoke_protected("on_audio_unit_name_changed", || {
                delegate.on_audio_unit_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::StreamInput, 0) => invoke_protected("on_stream_input_name_changed", || {
                delegate.on_stream_input_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::StreamOutput, 0) => invoke_protected("on_stream_output_name_changed", || {
                delegate.on_stream_output_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::AvbInterface, 0) => invoke_protected("on_avb_interface_name_changed", || {
                delegate.on_avb_interface_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::ClockSource, 0) => invoke_protected("on_clock_source_name_changed", || {
                delegate.on_clock_source_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::MemoryObject, 0) => invoke_protected("on_memory_object_name_changed", || {
                delegate.on_memory_object_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::AudioCluster, 0) => invoke_protected("on_audio_cluster_name_changed", || {
                delegate.on_audio_cluster_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (DescriptorType::ClockDomain, 0) => invoke_protected("on_clock_domain_name_changed", || {
                delegate.on_clock_domain_name_changed(entity_id, configuration_index, descriptor_index, name);
            }),
            (other_type, other_index) => {
                log::debug!(
                    "[ROUTER] SET_NAME notification for unhandled ({}, name_index={})",
                    other_type,
                    other_index
                );
            }
        }
    }

    /// Route a Milan vendor-unique response.
    pub(crate) fn process_mvu_response(&self, pdu: &MvuAecpdu, completion: Option<MvuCompletion>) {
        let status = MvuCommandStatus::from_wire(pdu.status);
        match pdu.command_type {
            MvuCommandType::GET_MILAN_INFO => {
                match mvu_payload::deserialize_get_milan_info_response(&pdu.payload) {
                    Ok(info) => {
                        if let Some(completion) = completion {
                            let data = MvuResponseData::MilanInfo(info);
                            invoke_protected("mvu answer", move || completion(status, Some(&data)));
                        }
                    }
                    Err(error) => {
                        log::debug!("[ROUTER] Malformed GET_MILAN_INFO response: {}", error);
                        if let Some(completion) = completion {
                            let effective = if status.is_success() {
                                MvuCommandStatus::ProtocolError
                            } else {
                                status
                            };
                            invoke_protected("mvu answer", move || completion(effective, None));
                        }
                    }
                }
            }
            other => {
                log::debug!("[ROUTER] Unhandled MVU command type {:?}", other);
                if let Some(completion) = completion {
                    invoke_protected("mvu answer", move || {
                        completion(MvuCommandStatus::InternalError, None);
                    });
                }
            }
        }
    }

    /// Route an ACMP response. `sniffed` selects the observer delivery
    /// path (delegate notifications instead of / in addition to the
    /// pending completion).
    pub(crate) fn process_acmp_response(
        &self,
        pdu: &Acmpdu,
        completion: Option<AcmpCompletion>,
        sniffed: bool,
    ) {
        let status = ControlStatus::from_wire(pdu.status);

        if let Some(completion) = completion {
            invoke_protected("acmp answer", move || completion(status, Some(pdu)));
        }

        if !sniffed {
            return;
        }
        let Some(delegate) = self.delegate() else {
            return;
        };
        let delegate = delegate.as_ref();

        let talker_stream = StreamIdentification::new(pdu.talker_entity_id, pdu.talker_unique_id);
        let listener_stream =
            StreamIdentification::new(pdu.listener_entity_id, pdu.listener_unique_id);
        let connection_count = pdu.connection_count;
        let flags = pdu.flags;

        match pdu.message_type {
            AcmpMessageType::CONNECT_RX_RESPONSE => {
                invoke_protected("on_controller_connect_response_sniffed", || {
                    delegate.on_controller_connect_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            AcmpMessageType::DISCONNECT_RX_RESPONSE => {
                invoke_protected("on_controller_disconnect_response_sniffed", || {
                    delegate.on_controller_disconnect_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            AcmpMessageType::CONNECT_TX_RESPONSE => {
                invoke_protected("on_listener_connect_response_sniffed", || {
                    delegate.on_listener_connect_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            AcmpMessageType::DISCONNECT_TX_RESPONSE => {
                invoke_protected("on_listener_disconnect_response_sniffed", || {
                    delegate.on_listener_disconnect_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            AcmpMessageType::GET_TX_STATE_RESPONSE => {
                invoke_protected("on_get_talker_stream_state_response_sniffed", || {
                    delegate.on_get_talker_stream_state_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            AcmpMessageType::GET_RX_STATE_RESPONSE => {
                invoke_protected("on_get_listener_stream_state_response_sniffed", || {
                    delegate.on_get_listener_stream_state_response_sniffed(
                        talker_stream,
                        listener_stream,
                        connection_count,
                        flags,
                        status,
                    );
                });
            }
            other => {
                // GET_TX_CONNECTION has no sniffed surface; commands are
                // never delivered here
                log::debug!("[ROUTER] No sniffed notification for {:?}", other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AcquireEntityFlags, LockEntityFlags, MacAddress};
    use crate::protocol::pdu::AecpStatus;

    fn aem_response(command_type: AemCommandType, payload: Vec<u8>) -> AemAecpdu {
        AemAecpdu {
            is_response: true,
            status: AecpStatus::SUCCESS,
            target_entity_id: EntityId::new(0xE0),
            controller_entity_id: EntityId::new(0xC0),
            sequence_id: 1,
            unsolicited: false,
            command_type,
            payload,
            src_mac: MacAddress::new([1, 0, 0, 0, 0, 2]),
            dest_mac: MacAddress::new([1, 0, 0, 0, 0, 1]),
        }
    }

    #[test]
    fn test_acquire_release_split_by_flags() {
        let pdu = aem_response(
            AemCommandType::ACQUIRE_ENTITY,
            aem::serialize_acquire_entity_response(
                AcquireEntityFlags::NONE,
                EntityId::new(7),
                DescriptorType::Entity,
                0,
            ),
        );
        assert!(matches!(
            decode_aem_response(&pdu).expect("Decode should succeed"),
            AemResponseData::AcquireEntity { owning_entity, .. } if owning_entity == EntityId::new(7)
        ));

        let pdu = aem_response(
            AemCommandType::ACQUIRE_ENTITY,
            aem::serialize_acquire_entity_response(
                AcquireEntityFlags::RELEASE,
                EntityId::new(0),
                DescriptorType::Entity,
                0,
            ),
        );
        assert!(matches!(
            decode_aem_response(&pdu).expect("Decode should succeed"),
            AemResponseData::ReleaseEntity { .. }
        ));
    }

    #[test]
    fn test_lock_unlock_split_by_flags() {
        let pdu = aem_response(
            AemCommandType::LOCK_ENTITY,
            aem::serialize_lock_entity_response(
                LockEntityFlags::UNLOCK,
                EntityId::new(9),
                DescriptorType::Entity,
                0,
            ),
        );
        assert!(matches!(
            decode_aem_response(&pdu).expect("Decode should succeed"),
            AemResponseData::UnlockEntity { locking_entity, .. } if locking_entity == EntityId::new(9)
        ));
    }

    #[test]
    fn test_read_descriptor_dispatches_on_descriptor_type() {
        let descriptor = crate::model::LocaleDescriptor {
            locale_id: crate::model::AvdeccFixedString::from("en-US"),
            number_of_string_descriptors: 1,
            base_string_descriptor_index: 0,
        };
        let pdu = aem_response(
            AemCommandType::READ_DESCRIPTOR,
            aem::serialize_read_locale_descriptor_response(0, 3, &descriptor),
        );
        match decode_aem_response(&pdu).expect("Decode should succeed") {
            AemResponseData::ReadDescriptor {
                descriptor_index,
                descriptor: DescriptorData::Locale(parsed),
                ..
            } => {
                assert_eq!(descriptor_index, 3);
                assert_eq!(parsed, descriptor);
            }
            other => panic!("unexpected decode {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_type_is_reported() {
        let pdu = aem_response(AemCommandType::WRITE_DESCRIPTOR, Vec::new());
        assert!(matches!(
            decode_aem_response(&pdu),
            Err(AemDecodeError::UnknownCommandType(AemCommandType::WRITE_DESCRIPTOR))
        ));
    }

    #[test]
    fn test_truncated_payload_is_payload_error() {
        let pdu = aem_response(AemCommandType::SET_NAME, vec![0x00, 0x01]);
        assert!(matches!(
            decode_aem_response(&pdu),
            Err(AemDecodeError::Payload(PayloadError::IncorrectPayloadSize { .. }))
        ));
    }

    #[test]
    fn test_unknown_read_descriptor_type_is_invalid() {
        // Common header names a CONTROL descriptor, which the router does
        // not deserialize
        let payload = aem::serialize_read_descriptor_command(0, DescriptorType::Control, 0);
        let pdu = aem_response(AemCommandType::READ_DESCRIPTOR, payload);
        assert!(matches!(
            decode_aem_response(&pdu),
            Err(AemDecodeError::Payload(PayloadError::InvalidValue { .. }))
        ));
    }
}
