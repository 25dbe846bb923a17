// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Address Access TLVs (IEEE 1722.1-2013 Clause 9.2.1.3).
//!
//! Address Access reads and writes raw memory ranges on an entity. Each
//! TLV carries a mode, a 64-bit address and, for writes and read
//! responses, the memory contents.

use crate::protocol::cursor::{Deserializer, PayloadError, PayloadResult, Serializer};

/// TLV mode field (Clause 9.2.1.3.3)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TlvMode {
    Read,
    Write,
    Execute,
    /// Mode code not defined by the standard
    Unknown(u8),
}

impl TlvMode {
    pub const fn to_wire(self) -> u8 {
        match self {
            Self::Read => 0x0,
            Self::Write => 0x1,
            Self::Execute => 0x2,
            Self::Unknown(value) => value,
        }
    }

    pub const fn from_wire(value: u8) -> Self {
        match value {
            0x0 => Self::Read,
            0x1 => Self::Write,
            0x2 => Self::Execute,
            other => Self::Unknown(other),
        }
    }
}

/// One Address Access TLV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub mode: TlvMode,
    pub address: u64,
    /// Memory contents: command data for writes, response data for reads.
    /// For read commands the length states how many bytes to read and the
    /// data is empty.
    pub data: Vec<u8>,
    /// Byte count for read commands whose data is not yet present
    pub length: u16,
}

impl Tlv {
    /// A read request covering `length` bytes at `address`
    pub fn read(address: u64, length: u16) -> Self {
        Self { mode: TlvMode::Read, address, data: Vec::new(), length }
    }

    /// A write request carrying `data` for `address`
    pub fn write(address: u64, data: Vec<u8>) -> Self {
        let length = data.len() as u16;
        Self { mode: TlvMode::Write, address, data, length }
    }

    /// Wire length field: explicit for reads, data length otherwise
    fn wire_length(&self) -> u16 {
        if self.data.is_empty() {
            self.length
        } else {
            self.data.len() as u16
        }
    }
}

/// Serialize a TLV sequence into an Address Access payload
pub fn serialize_tlvs(tlvs: &[Tlv]) -> PayloadResult<Vec<u8>> {
    if tlvs.is_empty() {
        return Err(PayloadError::InvalidValue { field: "tlvs" });
    }
    let mut ser = Serializer::new();
    ser.write_u16(tlvs.len() as u16);
    for tlv in tlvs {
        let length = tlv.wire_length();
        // mode in the top 4 bits of the length u16 (Clause 9.2.1.3.2)
        if length > 0x0FFF {
            return Err(PayloadError::InvalidValue { field: "tlv length" });
        }
        ser.write_u16(((tlv.mode.to_wire() as u16) << 12) | length);
        ser.write_u64(tlv.address);
        if !tlv.data.is_empty() {
            ser.write_bytes(&tlv.data);
        }
    }
    Ok(ser.into_vec())
}

/// Deserialize an Address Access payload into its TLV sequence.
///
/// Response TLVs always carry their data (reads come back filled in).
pub fn deserialize_tlvs(payload: &[u8]) -> PayloadResult<Vec<Tlv>> {
    let mut des = Deserializer::new(payload);
    let count = des.read_u16().map_err(|_| PayloadError::IncorrectPayloadSize {
        expected: 2,
        actual: payload.len(),
    })?;

    let mut tlvs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mode_length = des.read_u16()?;
        let mode = TlvMode::from_wire((mode_length >> 12) as u8);
        let length = mode_length & 0x0FFF;
        let address = des.read_u64()?;
        let data = des.read_bytes(length as usize)?.to_vec();
        tlvs.push(Tlv { mode, address, data, length });
    }
    Ok(tlvs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tlv_roundtrip() {
        let tlvs = vec![
            Tlv::write(0x0000_0000_DEAD_0000, vec![0xCA, 0xFE]),
            Tlv { mode: TlvMode::Read, address: 0x10, data: vec![1, 2, 3, 4], length: 4 },
        ];
        let bytes = serialize_tlvs(&tlvs).expect("Serialize should succeed");
        let parsed = deserialize_tlvs(&bytes).expect("Deserialize should succeed");
        assert_eq!(parsed, tlvs);
    }

    #[test]
    fn test_read_request_has_no_data() {
        let tlvs = vec![Tlv::read(0x100, 16)];
        let bytes = serialize_tlvs(&tlvs).expect("Serialize should succeed");
        // count(2) + mode_length(2) + address(8), no data bytes
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytes[2] >> 4, 0); // mode Read
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]) & 0x0FFF, 16);
    }

    #[test]
    fn test_empty_tlv_list_rejected() {
        assert!(serialize_tlvs(&[]).is_err());
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let tlvs = vec![Tlv::write(0, vec![0; 8])];
        let bytes = serialize_tlvs(&tlvs).expect("Serialize should succeed");
        assert!(deserialize_tlvs(&bytes[..bytes.len() - 1]).is_err());
        assert!(deserialize_tlvs(&[0x00]).is_err());
    }
}
