// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Milan vendor-unique payload codec (Milan v1.0 Clause 7.4).

use crate::model::{MilanInfo, MilanInfoFeaturesFlags};
use crate::protocol::cursor::{check_payload_size, Deserializer, PayloadResult, Serializer};

/// GET_MILAN_INFO command payload size (reserved u16)
pub const GET_MILAN_INFO_COMMAND_SIZE: usize = 2;

/// GET_MILAN_INFO response payload size
pub const GET_MILAN_INFO_RESPONSE_SIZE: usize = 14;

/// GET_MILAN_INFO Command - Milan v1.0 Clause 7.4.1
pub fn serialize_get_milan_info_command() -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_MILAN_INFO_COMMAND_SIZE);
    ser.write_u16(0); // reserved
    ser.into_vec()
}

/// GET_MILAN_INFO Response - Milan v1.0 Clause 7.4.1
pub fn serialize_get_milan_info_response(info: &MilanInfo) -> Vec<u8> {
    let mut ser = Serializer::with_capacity(GET_MILAN_INFO_RESPONSE_SIZE);
    ser.write_u16(0); // reserved
    ser.write_u32(info.protocol_version);
    ser.write_u32(info.features_flags.bits());
    ser.write_u32(info.certification_version);
    ser.into_vec()
}

/// GET_MILAN_INFO Response - Milan v1.0 Clause 7.4.1
pub fn deserialize_get_milan_info_response(payload: &[u8]) -> PayloadResult<MilanInfo> {
    check_payload_size(payload, GET_MILAN_INFO_RESPONSE_SIZE)?;
    let mut des = Deserializer::new(payload);
    let _reserved = des.read_u16()?;
    Ok(MilanInfo {
        protocol_version: des.read_u32()?,
        features_flags: MilanInfoFeaturesFlags(des.read_u32()?),
        certification_version: des.read_u32()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_milan_info_command_is_reserved_word() {
        assert_eq!(serialize_get_milan_info_command(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_get_milan_info_response_roundtrip() {
        let info = MilanInfo {
            protocol_version: 1,
            features_flags: MilanInfoFeaturesFlags::REDUNDANCY,
            certification_version: 0x0100_0000,
        };
        let bytes = serialize_get_milan_info_response(&info);
        assert_eq!(bytes.len(), GET_MILAN_INFO_RESPONSE_SIZE);
        let parsed = deserialize_get_milan_info_response(&bytes).expect("Deserialize should succeed");
        assert_eq!(parsed, info);
    }

    #[test]
    fn test_truncated_response_rejected() {
        let bytes = serialize_get_milan_info_response(&MilanInfo::default());
        assert!(deserialize_get_milan_info_response(&bytes[..13]).is_err());
    }
}
