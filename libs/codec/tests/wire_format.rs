//! Byte-exact wire format tests
//!
//! Pins the encoded form of every tag, header width and the reference
//! scenarios so two independent endpoints stay interoperable.

use codec::{
    decode, decode_array_header, encode, encode_array_header, encode_many, ArrayLength,
    CodecError, FixedBuffer, GrowableBuffer, WireWriter,
};
use hex_literal::hex;
use microbuf_types::{PrimitiveKind, WireTag};

#[test]
fn test_scenario_a_fixed_buffer() {
    let mut buf = FixedBuffer::<13>::new();
    buf.put_array_header::<0, 1>();
    buf.put::<u64, 1>(1234567890123456789);
    buf.seal();

    assert_eq!(
        buf.into_bytes(),
        hex!("91 CF 11 22 10 F4 7D E9 81 15 CD 14 E9")
    );
}

#[test]
fn test_scenario_a_growable_buffer() {
    let mut buf = GrowableBuffer::new();
    buf.put_array_header(ArrayLength::ONE).unwrap();
    buf.put(1234567890123456789u64).unwrap();
    buf.put_trailer(0).unwrap();

    assert_eq!(buf.as_bytes(), hex!("91 CF 11 22 10 F4 7D E9 81 15 CD 14 E9"));
}

#[test]
fn test_scenario_b_floats() {
    assert_eq!(encode(1.23f32).as_bytes(), hex!("CA 3F 9D 70 A4"));
    assert_eq!(encode(4.56f64).as_bytes(), hex!("CB 40 12 3D 70 A3 D7 0A 3D"));
}

#[test]
fn test_scenario_c_repeated_run() {
    let mut out = Vec::new();
    assert_eq!(encode_many(&mut out, &[1u16, 2, 3, 100, 200, 300]).unwrap(), 18);
    // no array header, each element carries its own tag
    assert_eq!(
        out,
        hex!("CD 00 01 CD 00 02 CD 00 03 CD 00 64 CD 00 C8 CD 01 2C")
    );
}

#[test]
fn test_tag_table() {
    assert_eq!(encode(false).as_bytes(), [0xC2]);
    assert_eq!(encode(true).as_bytes(), [0xC3]);
    assert_eq!(encode(0u8).as_bytes(), hex!("CC 00"));
    assert_eq!(encode(0u16).as_bytes(), hex!("CD 00 00"));
    assert_eq!(encode(0u32).as_bytes(), hex!("CE 00 00 00 00"));
    assert_eq!(encode(0u64).as_bytes(), hex!("CF 00 00 00 00 00 00 00 00"));
    assert_eq!(encode(0.0f32).as_bytes(), hex!("CA 00 00 00 00"));
    assert_eq!(encode(0.0f64).as_bytes(), hex!("CB 00 00 00 00 00 00 00 00"));

    for kind in PrimitiveKind::ALL {
        let tags: Vec<u8> = (0u8..=0xFF).filter(|&tag| kind.accepts_tag(tag)).collect();
        for tag in tags {
            let wire_tag = WireTag::try_from(tag).unwrap();
            assert!(!wire_tag.is_array_marker(), "{kind} claims array marker {wire_tag}");
        }
    }
}

#[test]
fn test_max_values() {
    assert_eq!(encode(u8::MAX).as_bytes(), hex!("CC FF"));
    assert_eq!(encode(u16::MAX).as_bytes(), hex!("CD FF FF"));
    assert_eq!(encode(u32::MAX).as_bytes(), hex!("CE FF FF FF FF"));
    assert_eq!(encode(u64::MAX).as_bytes(), hex!("CF FF FF FF FF FF FF FF FF"));
    assert_eq!(decode::<u64>(&hex!("CF FF FF FF FF FF FF FF FF")).unwrap(), u64::MAX);
}

#[test]
fn test_header_widths() {
    let cases: [(u32, &[u8]); 6] = [
        (1, &hex!("91")),
        (15, &hex!("9F")),
        (16, &hex!("DC 00 10")),
        (42_000, &hex!("DC A4 10")),
        (65_536, &hex!("DD 00 01 00 00")),
        (420_000, &hex!("DD 00 06 68 A0")),
    ];
    for (count, wire) in cases {
        let length = ArrayLength::new(count).unwrap();
        assert_eq!(encode_array_header(length).as_bytes(), wire, "count {count}");
        assert_eq!(decode_array_header(wire, 0).unwrap(), (length, wire.len()));
    }
}

#[test]
fn test_fifteen_uint8_after_fixarray() {
    let mut buf = FixedBuffer::<31>::new();
    buf.put_array_header::<0, 15>();
    let values: [u8; 15] = std::array::from_fn(|i| i as u8);
    buf.put_many::<u8, 1, 15>(&values);

    assert_eq!(buf[0], 0x9F);
    assert_eq!(&buf[1..7], hex!("CC 00 CC 01 CC 02"));
    assert_eq!(&buf[29..], hex!("CC 0E"));
    assert_eq!(buf.get_many::<u8, 1, 15>().unwrap(), values);
}

#[test]
fn test_decoders_never_read_past_input() {
    let full = encode(1234567890123456789u64);
    for cut in 0..full.len() {
        assert!(matches!(
            decode::<u64>(&full[..cut]),
            Err(CodecError::Truncated { .. })
        ));
    }
}
