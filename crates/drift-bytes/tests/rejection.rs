// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Malformed construction input and corrupted byte streams fail predictably.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use drift_bytes::{
    DecodeLimits, Error, InputBuffer, Limit, OutputBuffer, StringFault, TypeTag, Variant,
};

fn encode(variants: &[Variant]) -> Vec<u8> {
    let mut out = OutputBuffer::new();
    out.extend(variants);
    out.bytes().to_vec()
}

#[test]
fn irregular_matrix_is_rejected() {
    assert_eq!(
        Variant::from_matrix(vec![vec![1i32, 2], vec![3, 4, 5]]),
        Err(Error::IrregularShape {
            row: 1,
            expected: 2,
            actual: 3,
        })
    );
}

#[test]
fn shape_mismatch_is_rejected() {
    assert_eq!(
        Variant::with_shape(vec![0.0f32; 5], [2, 3]),
        Err(Error::ShapeMismatch {
            expected: 6,
            actual: 5,
        })
    );
}

#[test]
fn truncated_stream_underflows() {
    let mut bytes = encode(&[
        Variant::from("kept"),
        Variant::from(vec![10i64, 20, 30]),
    ]);
    bytes.pop();

    let mut input = InputBuffer::new(bytes);
    assert_eq!(input.pop(), Ok(Variant::from("kept")));
    assert!(matches!(input.pop(), Err(Error::BufferUnderflow { .. })));
}

#[test]
fn every_truncation_point_fails_cleanly() {
    let bytes = encode(&[Variant::from_matrix(vec![vec![1u32, 2], vec![3, 4]]).expect("matrix")]);
    for cut in 0..bytes.len() {
        let err = InputBuffer::new(bytes[..cut].to_vec()).pop().unwrap_err();
        assert!(
            matches!(err, Error::BufferUnderflow { .. }),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn unknown_tag_is_rejected() {
    let mut bytes = encode(&[Variant::from(5u8)]);
    bytes[0] = 0x7f;
    assert_eq!(
        InputBuffer::new(bytes).pop(),
        Err(Error::UnknownTypeTag {
            offset: 0,
            tag: 0x7f,
        })
    );
}

#[test]
fn unknown_tag_in_second_record_reports_its_offset() {
    let first = encode(&[Variant::from(5u8)]);
    let mut bytes = first.clone();
    bytes.extend(encode(&[Variant::from(6u8)]));
    bytes[first.len()] = TypeTag::ALL.len() as u8;

    let mut input = InputBuffer::new(bytes);
    input.pop().expect("first record");
    assert_eq!(
        input.pop(),
        Err(Error::UnknownTypeTag {
            offset: first.len(),
            tag: 12,
        })
    );
}

#[test]
fn string_running_past_the_end_is_malformed() {
    let mut bytes = encode(&[Variant::from("abcdef")]);
    bytes.truncate(bytes.len() - 2);
    let err = InputBuffer::new(bytes).pop().unwrap_err();
    assert_eq!(
        err,
        Error::MalformedString {
            offset: 17,
            reason: StringFault::Truncated {
                declared: 6,
                remaining: 4,
            },
        }
    );
}

#[test]
fn string_with_invalid_utf8_is_malformed() {
    let mut bytes = encode(&[Variant::from("ab")]);
    let last = bytes.len() - 1;
    bytes[last] = 0xc3;
    let err = InputBuffer::new(bytes).pop().unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedString {
            reason: StringFault::InvalidUtf8,
            ..
        }
    ));
}

#[test]
fn string_limit_is_enforced() {
    let bytes = encode(&[Variant::from("a fairly long string")]);
    let limits = DecodeLimits::default().with_max_string_len(8);
    let err = InputBuffer::with_limits(bytes, limits).pop().unwrap_err();
    assert!(matches!(
        err,
        Error::LimitExceeded {
            what: Limit::StringLen,
            limit: 8,
            actual: 20,
        }
    ));
}

#[test]
fn default_limits_accept_deep_shapes() {
    let deep = Variant::with_shape(vec![9u8], vec![1; 40]).expect("deep");
    let bytes = encode(&[deep.clone()]);

    let mut input = InputBuffer::new(bytes.clone());
    assert_eq!(input.pop(), Ok(deep));
    assert!(input.empty());

    let limits = DecodeLimits::default().with_max_rank(32);
    assert_eq!(
        InputBuffer::with_limits(bytes, limits).pop(),
        Err(Error::LimitExceeded {
            what: Limit::Rank,
            limit: 32,
            actual: 40,
        })
    );
}

#[test]
fn zero_product_shapes_accept_empty_data_in_any_order() {
    let huge = 1usize << 40;
    for dims in [[0, huge, huge], [huge, huge, 0]] {
        let v = Variant::with_shape(Vec::<u8>::new(), dims).expect("zero product");
        assert!(v.is_empty());
        let mut input = InputBuffer::new(encode(&[v.clone()]));
        assert_eq!(input.pop(), Ok(v));
    }
}

#[test]
fn bad_bool_byte_is_rejected() {
    let mut bytes = encode(&[Variant::from(true)]);
    let last = bytes.len() - 1;
    bytes[last] = 2;
    assert_eq!(
        InputBuffer::new(bytes).pop(),
        Err(Error::InvalidBool {
            offset: 17,
            value: 2,
        })
    );
}

#[test]
fn scalar_view_does_not_coerce() {
    let v = Variant::from(1u8);
    for err in [
        v.as_scalar::<i8>().unwrap_err(),
        v.as_scalar::<u16>().unwrap_err(),
        v.as_scalar::<bool>().unwrap_err(),
    ] {
        assert!(matches!(
            err,
            Error::TypeMismatch {
                actual: TypeTag::Uint8,
                ..
            }
        ));
    }
}
