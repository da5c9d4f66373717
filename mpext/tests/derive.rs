#![cfg(feature = "macros")]

use mpext::{ExtType, Factory, rmpv::Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, ExtType)]
struct Pair(u8, u8);

#[derive(Debug, PartialEq, Serialize, Deserialize, ExtType)]
#[ext_type(named)]
struct Version {
    major: u16,
    minor: u16,
}

#[test]
fn test_derived_positional_payload() {
    let payload = Pair(1, 2).to_msgpack_ext().unwrap();
    assert_eq!(payload, rmp_serde::to_vec(&Pair(1, 2)).unwrap());
    assert_eq!(Pair::from_msgpack_ext(&payload).unwrap(), Pair(1, 2));
}

#[test]
fn test_derived_named_payload_is_a_map() {
    let payload = Version { major: 1, minor: 4 }.to_msgpack_ext().unwrap();
    let value = mpext::rmpv::decode::read_value(&mut payload.as_slice()).unwrap();
    assert!(matches!(value, Value::Map(_)));
}

#[test]
fn test_derived_type_registers_and_roundtrips() {
    let mut factory = Factory::new();
    factory.register_ext::<Version>(12).unwrap();

    let mut packer = factory.packer();
    packer.write(&Version { major: 2, minor: 0 }).unwrap();

    let mut unpacker = factory.unpacker();
    unpacker.feed(packer.as_bytes());
    assert_eq!(
        unpacker.read().unwrap().downcast::<Version>().unwrap(),
        Version { major: 2, minor: 0 }
    );
}
