//! Property tests for the primitive codec, array framer and trailer

use codec::{
    decode, decode_array_header, decode_many_into, encode, encode_array_header, encode_many,
    push_trailer, verify_trailer, ArrayLength, Primitive,
};
use microbuf_types::{array_header_len, ARRAY16_MARKER, ARRAY32_MARKER};
use proptest::prelude::*;

fn round_trips<T: Primitive>(value: T) -> Result<(), TestCaseError> {
    let encoded = encode(value);
    prop_assert_eq!(encoded.len(), T::ENCODED_LEN);
    prop_assert_eq!(decode::<T>(&encoded).ok(), Some(value));
    Ok(())
}

proptest! {
    #[test]
    fn prop_uint_round_trip(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>()) {
        round_trips(a)?;
        round_trips(b)?;
        round_trips(c)?;
        round_trips(d)?;
    }

    #[test]
    fn prop_bool_round_trip(value in any::<bool>()) {
        round_trips(value)?;
    }

    #[test]
    fn prop_float_bits_round_trip(bits32 in any::<u32>(), bits64 in any::<u64>()) {
        // compare bit patterns so NaN payloads count too
        let f = f32::from_bits(bits32);
        prop_assert_eq!(decode::<f32>(&encode(f)).unwrap().to_bits(), bits32);
        let g = f64::from_bits(bits64);
        prop_assert_eq!(decode::<f64>(&encode(g)).unwrap().to_bits(), bits64);
    }

    #[test]
    fn prop_header_round_trip(count in 1u32..=u32::MAX) {
        let length = ArrayLength::new(count).unwrap();
        let header = encode_array_header(length);
        prop_assert_eq!(header.len(), array_header_len(count));
        prop_assert_eq!(decode_array_header(&header, 0).unwrap(), (length, header.len()));

        let expected_marker = match count {
            1..=15 => 0x90 | count as u8,
            16..=65_535 => ARRAY16_MARKER,
            _ => ARRAY32_MARKER,
        };
        prop_assert_eq!(header[0], expected_marker);
    }

    #[test]
    fn prop_run_round_trip(values in prop::collection::vec(any::<u32>(), 1..64)) {
        let mut wire = Vec::new();
        encode_many(&mut wire, &values).unwrap();

        let mut decoded = vec![0u32; values.len()];
        let next = decode_many_into(&wire, 0, &mut decoded).unwrap();
        prop_assert_eq!(next, wire.len());
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn prop_single_bit_flip_detected(
        body in prop::collection::vec(any::<u8>(), 1..256),
        bit_seed in any::<usize>(),
    ) {
        let mut message = body;
        push_trailer(&mut message);
        prop_assert!(verify_trailer(&message));

        let bit = bit_seed % (message.len() * 8);
        message[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify_trailer(&message));
    }
}
