//! Dispatch routing tests: known, unknown, filtered, and masking behavior.
use super::*;
use crate::core::FieldValue;
use crate::protocol::descriptors::{self, DescriptorTable};
use crate::protocol::transport::can_id::EFF_FLAG;

fn monitor_session() -> DecodeSession {
    DecodeSession::new(DescriptorTable::standard().unwrap(), Mode::Monitor)
}

#[test]
/// A mapped identifier with a full payload decodes every declared field.
fn test_known_id_decodes_fully() {
    let mut session = monitor_session();
    let frame = CanFrame::new(
        descriptors::SHIFTER,
        &[0x00, 0x03, 0x11, 0x22, 0x33, 0x44, 0x00, 0x00],
    );

    match session.dispatch(&frame) {
        Dispatch::Decoded(record) => {
            assert_eq!(record.slot, "shifter");
            assert!(record.fields().iter().all(|f| f.value.is_some()));
            assert_eq!(
                record.field("gear").unwrap().value,
                Some(FieldValue::U16(0x0003))
            );
        }
        other => panic!("expected a decoded record, got {other:?}"),
    }
    assert_eq!(session.unknown_count(), 0);
}

#[test]
/// Every mapped identifier decodes a full-length payload without a single
/// absent field.
fn test_all_known_ids_decode_full_payloads() {
    let mut session = monitor_session();
    let payload = [0u8; 8];

    for descriptor in descriptors::FRAME_DESCRIPTORS {
        let frame = CanFrame::new(descriptor.id, &payload);
        match session.dispatch(&frame) {
            Dispatch::Decoded(record) => {
                assert_eq!(record.slot, descriptor.name);
                assert_eq!(record.len(), descriptor.fields.len());
                assert!(
                    record.fields().iter().all(|f| f.value.is_some()),
                    "absent field in {}",
                    descriptor.name
                );
            }
            other => panic!("{} did not decode: {other:?}", descriptor.name),
        }
    }
    assert_eq!(session.unknown_count(), 0);
}

#[test]
/// Unknown identifiers go to the tracker: count rises once, then never
/// again for the same identifier.
fn test_unknown_id_tracked_once() {
    let mut session = monitor_session();
    let frame = CanFrame::new(0x0000_0500, &[0xAA]);

    assert_eq!(
        session.dispatch(&frame),
        Dispatch::Unknown {
            id: CanId::new(0x500),
            newly_tracked: true,
        }
    );
    assert_eq!(session.unknown_count(), 1);

    assert_eq!(
        session.dispatch(&frame),
        Dispatch::Unknown {
            id: CanId::new(0x500),
            newly_tracked: false,
        }
    );
    assert_eq!(session.unknown_count(), 1);
    assert_eq!(session.unknown_ids(), &[CanId::new(0x500)]);
}

#[test]
/// A raw word with the high transport flag set dispatches exactly like the
/// bare identifier.
fn test_transport_flags_do_not_affect_matching() {
    let mut session = monitor_session();

    let bare = CanFrame::new(descriptors::TRUNK, &[0x80]);
    let flagged = CanFrame::new(descriptors::TRUNK | EFF_FLAG, &[0x80]);

    let bare_dispatch = session.dispatch(&bare);
    let flagged_dispatch = session.dispatch(&flagged);
    assert_eq!(bare_dispatch, flagged_dispatch);
    assert!(matches!(bare_dispatch, Dispatch::Decoded(_)));
}

#[test]
/// A truncated frame still yields a record; missing fields are absent.
fn test_truncated_known_frame_still_decodes() {
    let mut session = monitor_session();
    let frame = CanFrame::new(descriptors::SHIFTER, &[0x00]);

    match session.dispatch(&frame) {
        Dispatch::Decoded(record) => {
            assert!(record.field("gear").unwrap().value.is_none());
            assert!(record.field("unk4").unwrap().value.is_none());
        }
        other => panic!("expected a decoded record, got {other:?}"),
    }
}

#[test]
/// Single-target mode drops everything but the target before dispatch:
/// no record, no tracker update.
fn test_single_target_filters_other_ids() {
    let target = CanId::new(0x0000_0764);
    let mut session =
        DecodeSession::new(DescriptorTable::standard().unwrap(), Mode::Single(target));

    // A mapped identifier is still not the target, so it is filtered too.
    let shifter = CanFrame::new(descriptors::SHIFTER, &[0x00; 8]);
    assert_eq!(session.dispatch(&shifter), Dispatch::Filtered);

    let stranger = CanFrame::new(0x0000_0123, &[0x00; 8]);
    assert_eq!(session.dispatch(&stranger), Dispatch::Filtered);
    assert_eq!(session.unknown_count(), 0);
}

#[test]
/// The target decodes with the generic eight-byte layout, flags masked.
fn test_single_target_uses_generic_layout() {
    let target = CanId::new(0x0000_0764);
    let mut session =
        DecodeSession::new(DescriptorTable::standard().unwrap(), Mode::Single(target));

    let frame = CanFrame::new(
        0x0000_0764 | EFF_FLAG,
        &[0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80],
    );

    match session.dispatch(&frame) {
        Dispatch::Decoded(record) => {
            assert_eq!(record.slot, "generic");
            assert_eq!(record.len(), 8);
            assert_eq!(record.field("b0").unwrap().value, Some(FieldValue::U8(0x10)));
            assert_eq!(record.field("b7").unwrap().value, Some(FieldValue::U8(0x80)));
        }
        other => panic!("expected a decoded record, got {other:?}"),
    }
}

#[test]
/// Even a target that happens to be in the semantic table is decoded with
/// the generic layout in single-target mode.
fn test_single_target_ignores_semantic_table() {
    let target = CanId::new(descriptors::SHIFTER);
    let mut session =
        DecodeSession::new(DescriptorTable::standard().unwrap(), Mode::Single(target));

    let frame = CanFrame::new(descriptors::SHIFTER, &[0x00; 8]);
    match session.dispatch(&frame) {
        Dispatch::Decoded(record) => assert_eq!(record.slot, "generic"),
        other => panic!("expected a decoded record, got {other:?}"),
    }
}
