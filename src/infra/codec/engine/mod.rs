//! Decode engine driven by static frame descriptors. Walks the field specs
//! of a layout over a raw payload and produces a typed record.
use super::bytes;
use crate::core::{DecodedField, DecodedRecord, FieldKind, FieldValue, FrameDescriptor};
use crate::protocol::transport::can_id::CanId;

/// Decode `payload` according to `descriptor`.
///
/// Fields whose byte range falls partially or fully outside the payload are
/// reported absent; a short frame still yields every extractable field and
/// is never rejected outright. The function cannot fail: layout problems are
/// rejected at table load, not here.
pub fn decode(descriptor: &FrameDescriptor, id: CanId, payload: &[u8]) -> DecodedRecord {
    let mut record = DecodedRecord::new(id, descriptor.name);

    for spec in descriptor.fields {
        let value =
            field_bytes(payload, spec.offset, spec.width()).map(|raw| decode_field(spec.kind, raw));
        record.push(DecodedField {
            name: spec.name,
            value,
        });
    }

    record
}

/// Slice the field's byte range, or `None` when the payload is too short.
fn field_bytes(payload: &[u8], offset: usize, width: usize) -> Option<&[u8]> {
    let end = offset.checked_add(width)?;
    if end > payload.len() {
        return None;
    }
    Some(&payload[offset..end])
}

/// Interpret one in-range byte slice. `raw` has exactly the field's width.
fn decode_field(kind: FieldKind, raw: &[u8]) -> FieldValue {
    match kind {
        FieldKind::Number {
            width,
            signed,
            order,
        } => {
            let value = bytes::read_unsigned(raw, order);
            match (signed, width) {
                (false, 1) => FieldValue::U8(value as u8),
                (false, 2) => FieldValue::U16(value as u16),
                (false, _) => FieldValue::U32(value),
                (true, 1) => FieldValue::I8(bytes::sign_extend(value, 1) as i8),
                (true, 2) => FieldValue::I16(bytes::sign_extend(value, 2) as i16),
                (true, _) => FieldValue::I32(bytes::sign_extend(value, width)),
            }
        }
        FieldKind::Flag { mask } => FieldValue::Bool(raw[0] & mask != 0),
        FieldKind::Triple => {
            let combined =
                (u32::from(raw[0]) << 16 | u32::from(raw[1]) << 8 | u32::from(raw[2])) & 0x00FF_FFFF;
            FieldValue::Triple {
                bytes: [raw[0], raw[1], raw[2]],
                value: combined,
            }
        }
    }
}
