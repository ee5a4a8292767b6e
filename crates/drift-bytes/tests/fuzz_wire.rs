// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests: arbitrary values round-trip, arbitrary bytes never panic.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use drift_bytes::{Error, InputBuffer, OutputBuffer, Variant};
use proptest::prelude::*;

fn any_variant() -> impl Strategy<Value = Variant> {
    prop_oneof![
        prop::collection::vec(any::<bool>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<i8>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<i16>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<i32>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<i64>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<u16>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<u32>(), 0..16).prop_map(Variant::from),
        prop::collection::vec(any::<u64>(), 0..16).prop_map(Variant::from),
        // NaN never compares equal; bit-exactness is covered in round_trip.rs.
        prop::collection::vec(-1.0e30f32..1.0e30, 0..16).prop_map(Variant::from),
        prop::collection::vec(-1.0e300f64..1.0e300, 0..16).prop_map(Variant::from),
        prop::collection::vec(".{0,12}", 0..8).prop_map(Variant::from),
    ]
}

fn any_matrix() -> impl Strategy<Value = Variant> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(any::<i32>(), cols), rows).prop_map(
            move |m| {
                let v = Variant::from_matrix(m).expect("rectangular");
                assert_eq!(v.shape(), &[rows, cols]);
                v
            },
        )
    })
}

proptest! {
    #[test]
    fn sequences_round_trip_in_order(
        pushed in prop::collection::vec(prop_oneof![any_variant(), any_matrix()], 0..12)
    ) {
        let mut out = OutputBuffer::new();
        out.extend(&pushed);
        let mut input = InputBuffer::new(out.into_bytes());
        for expected in &pushed {
            prop_assert_eq!(&input.pop().expect("pop"), expected);
        }
        prop_assert!(input.empty());
    }

    #[test]
    fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        // The goal is simply to ensure decoding terminates without panicking.
        for item in InputBuffer::new(bytes) {
            if item.is_err() {
                break;
            }
        }
    }

    #[test]
    fn truncation_never_yields_a_partial_value(
        pushed in any_variant(),
        cut in any::<prop::sample::Index>()
    ) {
        let mut out = OutputBuffer::new();
        out.push_back(&pushed);
        let bytes = out.bytes().to_vec();
        let cut = cut.index(bytes.len());

        match InputBuffer::new(bytes[..cut].to_vec()).pop() {
            Err(Error::BufferUnderflow { .. } | Error::MalformedString { .. }) => {}
            other => prop_assert!(false, "cut at {} of {}: {:?}", cut, bytes.len(), other),
        }
    }
}
