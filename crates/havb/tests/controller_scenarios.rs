// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end controller scenarios driven through the virtual protocol
// interface: discovery lifecycle, unknown-entity short circuit, release
// flag disambiguation, unsolicited notifications, sniffed ACMP and the
// malformed-payload policy.

use havb::controller::{
    AemCommandStatus, ControlStatus, ControllerCapability, ControllerDelegate,
};
use havb::interface::{ProtocolInterface, VirtualInterface, VirtualInterfaceConfig};
use havb::model::{
    AcquireEntityFlags, AvdeccFixedString, CommonInformation, ConfigurationIndex, ConnectionFlags,
    DescriptorIndex, DescriptorType, DiscoveredEntity, EntityId, InterfaceInformation, MacAddress,
    StreamIdentification,
};
use havb::protocol::aem_payload as aem;
use havb::protocol::pdu::{
    AcmpMessageType, AcmpStatus, Acmpdu, AecpStatus, Aecpdu, AemAecpdu, AemCommandType,
};
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

const CONTROLLER_ID: EntityId = EntityId::new(0x001B_92FF_FE00_0001);

fn entity_snapshot(entity_id: EntityId, mac: [u8; 6]) -> DiscoveredEntity {
    DiscoveredEntity::new_single_interface(
        CommonInformation { entity_id, ..Default::default() },
        InterfaceInformation {
            mac_address: MacAddress::new(mac),
            valid_time: 31,
            ..Default::default()
        },
    )
}

fn setup() -> (Arc<VirtualInterface>, Arc<ControllerCapability>) {
    let pi = VirtualInterface::new(VirtualInterfaceConfig::default());
    let controller = ControllerCapability::new(pi.clone(), CONTROLLER_ID);
    (pi, controller)
}

/// Respond to the last sent AEM command with the given status and payload
fn respond_aem(pi: &VirtualInterface, status: AecpStatus, payload: Vec<u8>) {
    let sent = pi.take_sent_aecp_commands();
    let Some(Aecpdu::Aem(command)) = sent.last() else {
        panic!("expected a sent AEM command, got {:?}", sent);
    };
    let mut response = command.clone();
    response.is_response = true;
    response.status = status;
    response.payload = payload;
    pi.inject_aecp(Aecpdu::Aem(response));
    pi.flush();
}

#[derive(Debug, PartialEq)]
enum Recorded {
    Online(EntityId),
    Update(EntityId),
    Offline(EntityId),
    ConfigurationName(EntityId, ConfigurationIndex, String),
    ListenerConnectSniffed(StreamIdentification, StreamIdentification, u16, ControlStatus),
    StreamInputInfoChanged(EntityId, DescriptorIndex, bool),
}

#[derive(Default)]
struct RecordingDelegate {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingDelegate {
    fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut self.events.lock())
    }
}

impl ControllerDelegate for RecordingDelegate {
    fn on_entity_online(&self, entity_id: EntityId, _entity: &DiscoveredEntity) {
        self.events.lock().push(Recorded::Online(entity_id));
    }

    fn on_entity_update(&self, entity_id: EntityId, _entity: &DiscoveredEntity) {
        self.events.lock().push(Recorded::Update(entity_id));
    }

    fn on_entity_offline(&self, entity_id: EntityId) {
        self.events.lock().push(Recorded::Offline(entity_id));
    }

    fn on_configuration_name_changed(
        &self,
        entity_id: EntityId,
        configuration_index: ConfigurationIndex,
        configuration_name: &AvdeccFixedString,
    ) {
        self.events.lock().push(Recorded::ConfigurationName(
            entity_id,
            configuration_index,
            configuration_name.as_str().into_owned(),
        ));
    }

    fn on_listener_connect_response_sniffed(
        &self,
        talker_stream: StreamIdentification,
        listener_stream: StreamIdentification,
        connection_count: u16,
        _flags: ConnectionFlags,
        status: ControlStatus,
    ) {
        self.events.lock().push(Recorded::ListenerConnectSniffed(
            talker_stream,
            listener_stream,
            connection_count,
            status,
        ));
    }

    fn on_stream_input_info_changed(
        &self,
        entity_id: EntityId,
        stream_index: DescriptorIndex,
        _info: &havb::model::StreamInfo,
        from_get: bool,
    ) {
        self.events.lock().push(Recorded::StreamInputInfoChanged(entity_id, stream_index, from_get));
    }
}

// Scenario 1: discovery lifecycle drives cache transitions and delegate
// notifications in order
#[test]
fn entity_lifecycle_updates_cache_and_delegate() {
    let (pi, controller) = setup();
    let delegate = Arc::new(RecordingDelegate::default());
    controller.set_delegate(Some(delegate.clone()));

    let entity_id = EntityId::new(0xE0);
    let mac_a = [0xAA, 0, 0, 0, 0, 1];
    let mac_b = [0xBB, 0, 0, 0, 0, 2];

    assert!(controller.discovered_entity(entity_id).is_none());

    pi.inject_entity_online(entity_snapshot(entity_id, mac_a));
    pi.flush();
    let snapshot = controller.discovered_entity(entity_id).expect("Entity should be cached");
    assert_eq!(snapshot.any_mac_address(), MacAddress::new(mac_a));

    pi.inject_entity_updated(entity_snapshot(entity_id, mac_b));
    pi.flush();
    let snapshot = controller.discovered_entity(entity_id).expect("Entity should stay cached");
    assert_eq!(snapshot.any_mac_address(), MacAddress::new(mac_b));

    pi.inject_entity_offline(entity_id);
    pi.flush();
    assert!(controller.discovered_entity(entity_id).is_none());

    assert_eq!(
        delegate.take(),
        vec![
            Recorded::Online(entity_id),
            Recorded::Update(entity_id),
            Recorded::Offline(entity_id),
        ]
    );

    controller.shutdown();
    pi.shutdown();
}

// Scenario 2: commands to undiscovered entities short-circuit with
// UnknownEntity and default values; no frame is sent
#[test]
fn unknown_entity_short_circuits() {
    let (pi, controller) = setup();
    let (tx, rx) = mpsc::channel();

    controller.read_entity_descriptor(
        EntityId::new(0xBEEF),
        Box::new(move |entity_id, status, descriptor| {
            tx.send((entity_id, status, descriptor)).expect("Send should succeed");
        }),
    );

    let (entity_id, status, descriptor) =
        rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(entity_id, EntityId::new(0xBEEF));
    assert_eq!(status, AemCommandStatus::UnknownEntity);
    assert_eq!(descriptor, Default::default());
    assert!(pi.take_sent_aecp_commands().is_empty());

    controller.shutdown();
    pi.shutdown();
}

// Scenario 3: the Release flag in an ACQUIRE_ENTITY response selects the
// release route
#[test]
fn release_entity_flag_disambiguation() {
    let (pi, controller) = setup();
    let entity_id = EntityId::new(0xE1);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 3]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.release_entity(
        entity_id,
        DescriptorType::Entity,
        0,
        Box::new(move |target, status, owner, descriptor_type, descriptor_index| {
            tx.send((target, status, owner, descriptor_type, descriptor_index))
                .expect("Send should succeed");
        }),
    );

    respond_aem(
        &pi,
        AecpStatus::SUCCESS,
        aem::serialize_acquire_entity_response(
            AcquireEntityFlags::RELEASE,
            EntityId::new(0),
            DescriptorType::Entity,
            0,
        ),
    );

    let (target, status, owner, descriptor_type, descriptor_index) =
        rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(target, entity_id);
    assert_eq!(status, AemCommandStatus::Success);
    assert_eq!(owner, EntityId::new(0));
    assert_eq!(descriptor_type, DescriptorType::Entity);
    assert_eq!(descriptor_index, 0);

    controller.shutdown();
    pi.shutdown();
}

// Scenario 4: unsolicited SET_NAME fires the configuration-name
// notification and never touches a pending completion
#[test]
fn unsolicited_set_name_notifies_configuration_name() {
    let (pi, controller) = setup();
    let delegate = Arc::new(RecordingDelegate::default());
    controller.set_delegate(Some(delegate.clone()));

    let entity_id = EntityId::new(0xE2);
    pi.inject_aecp(Aecpdu::Aem(AemAecpdu {
        is_response: true,
        status: AecpStatus::SUCCESS,
        target_entity_id: entity_id,
        controller_entity_id: CONTROLLER_ID,
        sequence_id: 7,
        unsolicited: true,
        command_type: AemCommandType::SET_NAME,
        payload: aem::serialize_set_name_response(
            DescriptorType::Configuration,
            2,
            0,
            0,
            &AvdeccFixedString::from("Main"),
        ),
        src_mac: MacAddress::new([2, 0, 0, 0, 0, 9]),
        dest_mac: MacAddress::new([2, 0, 0, 0, 0, 1]),
    }));
    pi.flush();

    assert_eq!(
        delegate.take(),
        vec![Recorded::ConfigurationName(entity_id, 2, "Main".into())]
    );

    controller.shutdown();
    pi.shutdown();
}

// Scenario 5: an ACMP CONNECT_TX_RESPONSE from a foreign controller is
// sniffed into the listener-connect notification
#[test]
fn sniffed_connect_tx_response_notifies_delegate() {
    let (pi, controller) = setup();
    let delegate = Arc::new(RecordingDelegate::default());
    controller.set_delegate(Some(delegate.clone()));

    let talker = StreamIdentification::new(EntityId::new(0x70), 0);
    let listener = StreamIdentification::new(EntityId::new(0x11), 0);
    pi.inject_acmp(Acmpdu {
        message_type: AcmpMessageType::CONNECT_TX_RESPONSE,
        status: AcmpStatus::SUCCESS,
        controller_entity_id: EntityId::new(0xFACE), // another controller
        talker_entity_id: talker.entity_id,
        talker_unique_id: talker.stream_index,
        listener_entity_id: listener.entity_id,
        listener_unique_id: listener.stream_index,
        connection_count: 1,
        flags: ConnectionFlags::NONE,
        ..Default::default()
    });
    pi.flush();

    assert_eq!(
        delegate.take(),
        vec![Recorded::ListenerConnectSniffed(talker, listener, 1, ControlStatus::Success)]
    );

    controller.shutdown();
    pi.shutdown();
}

// Scenario 6 (strict policy): a truncated payload degrades the status to
// ProtocolError regardless of the wire status
#[cfg(not(feature = "lenient-payloads"))]
#[test]
fn malformed_payload_strict_policy() {
    let (pi, controller) = setup();
    let entity_id = EntityId::new(0xE3);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 4]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.get_stream_input_format(
        entity_id,
        0,
        Box::new(move |_, status, stream_index, stream_format| {
            tx.send((status, stream_index, stream_format)).expect("Send should succeed");
        }),
    );
    respond_aem(&pi, AecpStatus::NOT_IMPLEMENTED, vec![0x00, 0x05]);

    let (status, stream_index, stream_format) =
        rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(status, AemCommandStatus::ProtocolError);
    assert_eq!(stream_index, 0);
    assert!(stream_format.is_null());

    controller.shutdown();
    pi.shutdown();
}

// Scenario 6 (lenient policy): the wire status is forwarded with default
// fields
#[cfg(feature = "lenient-payloads")]
#[test]
fn malformed_payload_lenient_policy() {
    let (pi, controller) = setup();
    let entity_id = EntityId::new(0xE3);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 4]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.get_stream_input_format(
        entity_id,
        0,
        Box::new(move |_, status, stream_index, stream_format| {
            tx.send((status, stream_index, stream_format)).expect("Send should succeed");
        }),
    );
    respond_aem(&pi, AecpStatus::NOT_IMPLEMENTED, vec![0x00, 0x05]);

    let (status, _, stream_format) =
        rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(status, AemCommandStatus::NotImplemented);
    assert!(stream_format.is_null());

    controller.shutdown();
    pi.shutdown();
}

// A truncated payload on a success status is always a ProtocolError
#[test]
fn malformed_payload_on_success_is_protocol_error() {
    let (pi, controller) = setup();
    let entity_id = EntityId::new(0xE4);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 5]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.get_stream_input_format(
        entity_id,
        0,
        Box::new(move |_, status, _, _| {
            tx.send(status).expect("Send should succeed");
        }),
    );
    respond_aem(&pi, AecpStatus::SUCCESS, vec![0x00]);

    let status = rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(status, AemCommandStatus::ProtocolError);

    controller.shutdown();
    pi.shutdown();
}

// Unsolicited responses never complete a pending command: the pending
// GET_STREAM_INFO stays outstanding until shutdown cancels it
#[test]
fn unsolicited_response_does_not_complete_pending_command() {
    let (pi, controller) = setup();
    let delegate = Arc::new(RecordingDelegate::default());
    controller.set_delegate(Some(delegate.clone()));

    let entity_id = EntityId::new(0xE5);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 6]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.get_stream_input_info(
        entity_id,
        0,
        Box::new(move |_, status, _, _| {
            tx.send(status).expect("Send should succeed");
        }),
    );

    // Unsolicited GET_STREAM_INFO response (SRP domain change style)
    let sent = pi.take_sent_aecp_commands();
    let Some(Aecpdu::Aem(command)) = sent.last() else {
        panic!("expected a sent AEM command");
    };
    let mut unsolicited = command.clone();
    unsolicited.is_response = true;
    unsolicited.unsolicited = true;
    unsolicited.payload = aem::serialize_get_stream_info_response(
        DescriptorType::StreamInput,
        0,
        &Default::default(),
    );
    pi.inject_aecp(Aecpdu::Aem(unsolicited));
    pi.flush();

    // Delegate sees the change (from_get = true), the handler does not
    assert_eq!(
        delegate.take(),
        vec![Recorded::StreamInputInfoChanged(entity_id, 0, true)]
    );
    assert!(rx.try_recv().is_err());

    // Shutdown flushes the pending completion exactly once
    pi.shutdown();
    let status = rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(status, AemCommandStatus::Canceled);
    controller.shutdown();
}

// Incoming CONTROLLER_AVAILABLE is answered immediately with Success
#[test]
fn controller_available_is_answered() {
    let (pi, controller) = setup();

    pi.inject_aecp(Aecpdu::Aem(AemAecpdu {
        is_response: false,
        status: AecpStatus::SUCCESS,
        target_entity_id: CONTROLLER_ID,
        controller_entity_id: EntityId::new(0xFACE),
        sequence_id: 9,
        unsolicited: false,
        command_type: AemCommandType::CONTROLLER_AVAILABLE,
        payload: Vec::new(),
        src_mac: MacAddress::new([2, 0, 0, 0, 0, 9]),
        dest_mac: MacAddress::new([2, 0, 0, 0, 0, 1]),
    }));
    pi.flush();

    let responses = pi.take_sent_aecp_responses();
    assert_eq!(responses.len(), 1);
    let Aecpdu::Aem(response) = &responses[0] else {
        panic!("expected an AEM response");
    };
    assert!(response.is_response);
    assert_eq!(response.status, AecpStatus::SUCCESS);
    assert_eq!(response.sequence_id, 9);
    assert!(response.payload.is_empty());
    assert_eq!(response.dest_mac, MacAddress::new([2, 0, 0, 0, 0, 9]));

    controller.shutdown();
    pi.shutdown();
}

// Commands other than CONTROLLER_AVAILABLE stay unconsumed
#[test]
fn other_commands_are_not_consumed() {
    let (pi, controller) = setup();

    pi.inject_aecp(Aecpdu::Aem(AemAecpdu {
        is_response: false,
        status: AecpStatus::SUCCESS,
        target_entity_id: CONTROLLER_ID,
        controller_entity_id: EntityId::new(0xFACE),
        sequence_id: 10,
        unsolicited: false,
        command_type: AemCommandType::ENTITY_AVAILABLE,
        payload: Vec::new(),
        src_mac: MacAddress::new([2, 0, 0, 0, 0, 9]),
        dest_mac: MacAddress::new([2, 0, 0, 0, 0, 1]),
    }));
    pi.flush();

    assert!(pi.take_sent_aecp_responses().is_empty());

    controller.shutdown();
    pi.shutdown();
}

// A locally issued ACMP command completes through the typed answer
#[test]
fn connect_stream_completes_with_response_fields() {
    let (pi, controller) = setup();

    let talker = StreamIdentification::new(EntityId::new(0x71), 2);
    let listener = StreamIdentification::new(EntityId::new(0x11), 4);
    let (tx, rx) = mpsc::channel();
    controller.connect_stream(
        talker,
        listener,
        Box::new(move |talker, listener, count, flags, status| {
            tx.send((talker, listener, count, flags, status)).expect("Send should succeed");
        }),
    );

    let sent = pi.take_sent_acmp_commands();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message_type, AcmpMessageType::CONNECT_RX_COMMAND);
    assert_eq!(sent[0].controller_entity_id, CONTROLLER_ID);

    let mut response = sent[0].clone();
    response.message_type = AcmpMessageType::CONNECT_RX_RESPONSE;
    response.status = AcmpStatus::SUCCESS;
    response.connection_count = 1;
    pi.inject_acmp(response);
    pi.flush();

    let (rx_talker, rx_listener, count, _flags, status) =
        rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(rx_talker, talker);
    assert_eq!(rx_listener, listener);
    assert_eq!(count, 1);
    assert_eq!(status, ControlStatus::Success);

    controller.shutdown();
    pi.shutdown();
}

// GET_MILAN_INFO round trip through the MVU path
#[test]
fn get_milan_info_round_trip() {
    use havb::model::{MilanInfo, MilanInfoFeaturesFlags};
    use havb::protocol::mvu_payload;

    let (pi, controller) = setup();
    let entity_id = EntityId::new(0xE6);
    pi.inject_entity_online(entity_snapshot(entity_id, [0xAA, 0, 0, 0, 0, 7]));
    pi.flush();

    let (tx, rx) = mpsc::channel();
    controller.get_milan_info(
        entity_id,
        Box::new(move |_, status, info| {
            tx.send((status, info)).expect("Send should succeed");
        }),
    );

    let sent = pi.take_sent_aecp_commands();
    let Some(Aecpdu::Mvu(command)) = sent.last() else {
        panic!("expected a sent MVU command");
    };
    let expected = MilanInfo {
        protocol_version: 1,
        features_flags: MilanInfoFeaturesFlags::REDUNDANCY,
        certification_version: 0,
    };
    let mut response = command.clone();
    response.is_response = true;
    response.payload = mvu_payload::serialize_get_milan_info_response(&expected);
    pi.inject_aecp(Aecpdu::Mvu(response));
    pi.flush();

    let (status, info) = rx.recv_timeout(Duration::from_secs(2)).expect("Handler should be invoked");
    assert_eq!(status, havb::controller::MvuCommandStatus::Success);
    assert_eq!(info, expected);

    controller.shutdown();
    pi.shutdown();
}
