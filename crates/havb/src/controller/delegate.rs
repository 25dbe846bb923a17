// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Controller delegate trait.
//!
//! The delegate receives everything the controller learns without asking:
//! discovery transitions, unsolicited AEM change notifications, and ACMP
//! responses sniffed off the wire. This is the callback-based alternative
//! to polling entities for state.
//!
//! # Thread Safety
//!
//! Delegate methods are invoked from the protocol interface's receive
//! threads. Implementations must be `Send + Sync`, should return quickly
//! and must not block on controller commands issued from within a
//! callback.
//!
//! All methods have default no-op implementations, so implementors only
//! override the events they care about.

use crate::controller::status::ControlStatus;
use crate::model::{
    AsPath, AudioMappings, AvbInfo, AvbInterfaceCounterValidFlags, AvbInterfaceIndex,
    AvdeccFixedString, ClockDomainCounterValidFlags, ClockDomainIndex, ClockSourceIndex,
    ConfigurationIndex, ConnectionFlags, DescriptorCounters, DescriptorIndex, DescriptorType,
    DiscoveredEntity, EntityId, MemoryObjectIndex, OperationId, SamplingRate, StreamFormat,
    StreamIdentification, StreamIndex, StreamInfo, StreamInputCounterValidFlags,
    StreamOutputCounterValidFlags,
};

/// Observer of controller-level events.
pub trait ControllerDelegate: Send + Sync {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// The underlying transport failed; some traffic may have been lost.
    fn on_transport_error(&self) {}

    /// A new entity was discovered on the segment.
    fn on_entity_online(&self, entity_id: EntityId, entity: &DiscoveredEntity) {
        let _ = (entity_id, entity);
    }

    /// A discovered entity's advertisement changed (gPTP grandmaster,
    /// capabilities, available index).
    fn on_entity_update(&self, entity_id: EntityId, entity: &DiscoveredEntity) {
        let _ = (entity_id, entity);
    }

    /// An entity departed or its advertisement expired.
    fn on_entity_offline(&self, entity_id: EntityId) {
        let _ = entity_id;
    }

    // ========================================================================
    // Unsolicited AEM notifications (success status only, Clause 7.5)
    // ========================================================================

    /// Another controller acquired the entity.
    fn on_entity_acquired(
        &self,
        entity_id: EntityId,
        owning_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    ) {
        let _ = (entity_id, owning_entity, descriptor_type, descriptor_index);
    }

    /// The entity was released from acquisition.
    fn on_entity_released(
        &self,
        entity_id: EntityId,
        owning_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    ) {
        let _ = (entity_id, owning_entity, descriptor_type, descriptor_index);
    }

    /// Another controller locked the entity.
    fn on_entity_locked(
        &self,
        entity_id: EntityId,
        locking_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    ) {
        let _ = (entity_id, locking_entity, descriptor_type, descriptor_index);
    }

    /// The entity was unlocked.
    fn on_entity_unlocked(
        &self,
        entity_id: EntityId,
        locking_entity: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
    ) {
        let _ = (entity_id, locking_entity, descriptor_type, descriptor_index);
    }

    /// The active configuration changed.
    fn on_configuration_changed(&self, entity_id: EntityId, configuration_index: ConfigurationIndex) {
        let _ = (entity_id, configuration_index);
    }

    fn on_stream_input_format_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        stream_format: StreamFormat,
    ) {
        let _ = (entity_id, stream_index, stream_format);
    }

    fn on_stream_output_format_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        stream_format: StreamFormat,
    ) {
        let _ = (entity_id, stream_index, stream_format);
    }

    /// Stream input dynamic information changed. `from_get` is true when
    /// the notification came from a GET_STREAM_INFO response (e.g. an SRP
    /// domain change) rather than a configuration write.
    fn on_stream_input_info_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        info: &StreamInfo,
        from_get: bool,
    ) {
        let _ = (entity_id, stream_index, info, from_get);
    }

    /// Stream output dynamic information changed; see
    /// [`Self::on_stream_input_info_changed`] for `from_get`.
    fn on_stream_output_info_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        info: &StreamInfo,
        from_get: bool,
    ) {
        let _ = (entity_id, stream_index, info, from_get);
    }

    fn on_stream_input_started(&self, entity_id: EntityId, stream_index: StreamIndex) {
        let _ = (entity_id, stream_index);
    }

    fn on_stream_output_started(&self, entity_id: EntityId, stream_index: StreamIndex) {
        let _ = (entity_id, stream_index);
    }

    fn on_stream_input_stopped(&self, entity_id: EntityId, stream_index: StreamIndex) {
        let _ = (entity_id, stream_index);
    }

    fn on_stream_output_stopped(&self, entity_id: EntityId, stream_index: StreamIndex) {
        let _ = (entity_id, stream_index);
    }

    fn on_stream_input_counters_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        valid_flags: StreamInputCounterValidFlags,
        counters: &DescriptorCounters,
    ) {
        let _ = (entity_id, stream_index, valid_flags, counters);
    }

    fn on_stream_output_counters_changed(
        &self,
        entity_id: EntityId,
        stream_index: StreamIndex,
        valid_flags: StreamOutputCounterValidFlags,
        counters: &DescriptorCounters,
    ) {
        let _ = (entity_id, stream_index, valid_flags, counters);
    }

    fn on_entity_name_changed(&self, entity_id: EntityId, entity_name: &AvdeccFixedString) {
        let _ = (entity_id, entity_name);
    }

    fn on_entity_group_name_changed(&self, entity_id: EntityId, group_name: &AvdeccFixedString) {
        let _ = (entity_id, group_name);
    }

    fn on_configuration_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        configuration_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, configuration_name);
    }

    fn on_audio_unit_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_unit_index: DescriptorIndex,
        audio_unit_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, audio_unit_index, audio_unit_name);
    }

    fn on_stream_input_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        stream_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, stream_index, stream_name);
    }

    fn on_stream_output_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        stream_index: StreamIndex,
        stream_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, stream_index, stream_name);
    }

    fn on_avb_interface_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        avb_interface_index: AvbInterfaceIndex,
        avb_interface_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, avb_interface_index, avb_interface_name);
    }

    fn on_clock_source_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_source_index: ClockSourceIndex,
        clock_source_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, clock_source_index, clock_source_name);
    }

    fn on_memory_object_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        memory_object_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, memory_object_index, memory_object_name);
    }

    fn on_audio_cluster_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        audio_cluster_index: DescriptorIndex,
        audio_cluster_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, audio_cluster_index, audio_cluster_name);
    }

    fn on_clock_domain_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        clock_domain_index: ClockDomainIndex,
        clock_domain_name: &AvdeccFixedString,
    ) {
        let _ = (entity_id, configuration_index, clock_domain_index, clock_domain_name);
    }

    fn on_audio_unit_sampling_rate_changed(
        &self,
        entity_id: EntityId,
        audio_unit_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    ) {
        let _ = (entity_id, audio_unit_index, sampling_rate);
    }

    fn on_audio_cluster_sampling_rate_changed(
        &self,
        entity_id: EntityId,
        audio_cluster_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    ) {
        let _ = (entity_id, audio_cluster_index, sampling_rate);
    }

    fn on_video_cluster_sampling_rate_changed(
        &self,
        entity_id: EntityId,
        video_cluster_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    ) {
        let _ = (entity_id, video_cluster_index, sampling_rate);
    }

    fn on_sensor_cluster_sampling_rate_changed(
        &self,
        entity_id: EntityId,
        sensor_cluster_index: DescriptorIndex,
        sampling_rate: SamplingRate,
    ) {
        let _ = (entity_id, sensor_cluster_index, sampling_rate);
    }

    fn on_clock_source_changed(
        &self,
        entity_id: EntityId,
        clock_domain_index: ClockDomainIndex,
        clock_source_index: ClockSourceIndex,
    ) {
        let _ = (entity_id, clock_domain_index, clock_source_index);
    }

    fn on_avb_info_changed(
        &self,
        entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        info: &AvbInfo,
    ) {
        let _ = (entity_id, avb_interface_index, info);
    }

    fn on_as_path_changed(
        &self,
        entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        as_path: &AsPath,
    ) {
        let _ = (entity_id, avb_interface_index, as_path);
    }

    fn on_avb_interface_counters_changed(
        &self,
        entity_id: EntityId,
        avb_interface_index: AvbInterfaceIndex,
        valid_flags: AvbInterfaceCounterValidFlags,
        counters: &DescriptorCounters,
    ) {
        let _ = (entity_id, avb_interface_index, valid_flags, counters);
    }

    fn on_clock_domain_counters_changed(
        &self,
        entity_id: EntityId,
        clock_domain_index: ClockDomainIndex,
        valid_flags: ClockDomainCounterValidFlags,
        counters: &DescriptorCounters,
    ) {
        let _ = (entity_id, clock_domain_index, valid_flags, counters);
    }

    fn on_memory_object_length_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        memory_object_index: MemoryObjectIndex,
        length: u64,
    ) {
        let _ = (entity_id, configuration_index, memory_object_index, length);
    }

    /// Mappings were added to a stream port input (ADD_AUDIO_MAPPINGS).
    fn on_stream_port_input_audio_mappings_added(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, mappings);
    }

    fn on_stream_port_output_audio_mappings_added(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, mappings);
    }

    fn on_stream_port_input_audio_mappings_removed(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, mappings);
    }

    fn on_stream_port_output_audio_mappings_removed(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, mappings);
    }

    /// A full map page changed (GET_AUDIO_MAP notification).
    fn on_stream_port_input_audio_mappings_changed(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        number_of_maps: u16,
        map_index: u16,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, number_of_maps, map_index, mappings);
    }

    fn on_stream_port_output_audio_mappings_changed(
        &self,
        entity_id: EntityId,
        stream_port_index: DescriptorIndex,
        number_of_maps: u16,
        map_index: u16,
        mappings: &AudioMappings,
    ) {
        let _ = (entity_id, stream_port_index, number_of_maps, map_index, mappings);
    }

    /// Progress report for a long-running entity operation.
    fn on_operation_status(
        &self,
        entity_id: EntityId,
        descriptor_type: DescriptorType,
        descriptor_index: DescriptorIndex,
        operation_id: OperationId,
        percent_complete: u16,
    ) {
        let _ = (entity_id, descriptor_type, descriptor_index, operation_id, percent_complete);
    }

    /// The entity dropped this controller from its unsolicited
    /// notification registration (resource pressure or reboot).
    fn on_deregistered_from_unsolicited_notifications(&self, entity_id: EntityId) {
        let _ = entity_id;
    }

    // ========================================================================
    // Sniffed ACMP notifications (responses this controller did not originate)
    // ========================================================================

    /// CONNECT_RX_RESPONSE observed: a controller-initiated connection.
    fn on_controller_connect_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }

    /// DISCONNECT_RX_RESPONSE observed.
    fn on_controller_disconnect_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }

    /// CONNECT_TX_RESPONSE observed: a listener reached the talker
    /// (fast-connect included).
    fn on_listener_connect_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }

    /// DISCONNECT_TX_RESPONSE observed.
    fn on_listener_disconnect_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }

    /// GET_TX_STATE_RESPONSE observed.
    fn on_get_talker_stream_state_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }

    /// GET_RX_STATE_RESPONSE observed.
    fn on_get_listener_stream_state_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        let _ = (talker_stream, listener_stream, connection_count, flags, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoOpDelegate;
    impl ControllerDelegate for NoOpDelegate {}

    // Default implementations must not panic
    #[test]
    fn test_noop_delegate() {
        let delegate = NoOpDelegate;
        let entity_id = EntityId::new(1);
        delegate.on_transport_error();
        delegate.on_entity_offline(entity_id);
        delegate.on_configuration_changed(entity_id, 0);
        delegate.on_entity_name_changed(entity_id, &AvdeccFixedString::from("x"));
        delegate.on_stream_input_started(entity_id, 0);
        delegate.on_operation_status(entity_id, DescriptorType::MemoryObject, 0, 1, 50);
        delegate.on_listener_connect_response_sniffed(
            StreamIdentification::default(),
            StreamIdentification::default(),
            0,
            ConnectionFlags::NONE,
            ControlStatus::Success,
        );
    }
}
