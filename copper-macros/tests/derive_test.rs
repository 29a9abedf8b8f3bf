use std::io::Cursor;

use copper_macros::{ReadFrom, WriteTo};
use copper_utils::serial::{ReadFrom, WriteTo};

#[derive(ReadFrom, WriteTo, Debug, PartialEq, Clone)]
struct TestPacket {
    #[read(as = VarInt)]
    #[write(as = VarInt)]
    id: i32,
    name: String,
    flag: bool,
    value: i32,
    #[read(as = Prefixed(VarInt))]
    #[write(as = Prefixed(VarInt))]
    payload: Vec<u16>,
}

#[derive(ReadFrom, WriteTo, Debug, PartialEq, Clone, Copy)]
#[read(as = VarInt)]
#[write(as = VarInt)]
#[repr(i32)]
enum TestMode {
    First = 0,
    Second = 1,
    Tenth = 10,
}

#[derive(ReadFrom, WriteTo, Debug, PartialEq, Clone, Copy)]
#[read(as = u8)]
#[write(as = u8)]
#[repr(u8)]
enum TestByteMode {
    Off = 0,
    On = 1,
}

#[test]
fn test_struct_roundtrip() {
    let packet = TestPacket {
        id: 300,
        name: "copper".to_string(),
        flag: true,
        value: -7,
        payload: vec![1, 2, 500],
    };

    let mut buf = Vec::new();
    packet.write(&mut buf).expect("write failed");

    let decoded = TestPacket::read(&mut Cursor::new(buf.as_slice())).expect("read failed");
    assert_eq!(decoded, packet);
}

#[test]
fn test_struct_wire_layout() {
    let packet = TestPacket {
        id: 1,
        name: "ab".to_string(),
        flag: false,
        value: 2,
        payload: vec![3],
    };

    let mut buf = Vec::new();
    packet.write(&mut buf).expect("write failed");

    // varint id, prefixed string, bool, big-endian i32, prefixed u16s.
    assert_eq!(
        buf,
        vec![1, 2, b'a', b'b', 0, 0, 0, 0, 2, 1, 0, 3]
    );
}

#[test]
fn test_enum_varint_roundtrip() {
    for mode in [TestMode::First, TestMode::Second, TestMode::Tenth] {
        let mut buf = Vec::new();
        mode.write(&mut buf).expect("write failed");
        assert_eq!(buf.len(), 1);

        let decoded = TestMode::read(&mut Cursor::new(buf.as_slice())).expect("read failed");
        assert_eq!(decoded, mode);
    }
}

#[test]
fn test_enum_unknown_discriminant_is_rejected() {
    let mut cursor = Cursor::new([5u8].as_slice());
    assert!(TestMode::read(&mut cursor).is_err());
}

#[test]
fn test_enum_byte_strategy() {
    let mut buf = Vec::new();
    TestByteMode::On.write(&mut buf).expect("write failed");
    assert_eq!(buf, vec![1]);

    let decoded = TestByteMode::read(&mut Cursor::new(buf.as_slice())).expect("read failed");
    assert_eq!(decoded, TestByteMode::On);
}
