mod common;

use common::{Label, Point, decode_label, encode_label, encode_point};
use mpext::{
    CodecError, ExtOptions, Factory, HookError, TypeDescriptor, Unpacked, UnpackerOptions,
    hooks::{LoggingDecoder, LoggingEncoder},
    rmpv::{self, Value},
};

fn point_factory() -> Factory {
    let mut factory = Factory::new();
    factory
        .register_type_with(
            1,
            TypeDescriptor::of::<Point>(),
            ExtOptions::new()
                .packer(common::encode_point)
                .unpacker(common::decode_point),
        )
        .unwrap();
    factory
}

#[test]
fn test_point_roundtrip_with_explicit_hooks() {
    let factory = point_factory();
    let point = Point { x: 3, y: 4 };

    let mut packer = factory.packer();
    packer.write(&point).unwrap();
    let bytes = packer.into_bytes();

    // On the wire: an extension value with code 1 and the hook's payload.
    let raw = rmpv::decode::read_value(&mut bytes.as_slice()).unwrap();
    assert_eq!(raw, Value::Ext(1, encode_point(&point).unwrap()));

    let mut unpacker = factory.unpacker();
    unpacker.feed(&bytes);
    assert_eq!(unpacker.read().unwrap().downcast::<Point>().unwrap(), point);
}

#[test]
fn test_point_roundtrip_with_conventional_methods() {
    let mut factory = Factory::new();
    factory.register_ext::<Point>(1).unwrap();
    let point = Point { x: -3, y: 40_000 };

    let mut packer = factory.packer();
    packer.write(&point).unwrap();

    let mut unpacker = factory.unpacker();
    unpacker.feed(packer.as_bytes());
    assert_eq!(unpacker.read().unwrap().downcast::<Point>().unwrap(), point);
}

#[test]
fn test_mixed_stream() {
    let mut factory = point_factory();
    factory
        .register_type_with(
            -1,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new()
                .packer(LoggingEncoder::new("label", encode_label))
                .unpacker(LoggingDecoder::new("label", decode_label)),
        )
        .unwrap();

    let mut packer = factory.packer();
    packer
        .write(&Value::from("header"))
        .unwrap()
        .write(&Point { x: 1, y: 1 })
        .unwrap()
        .write(&Label("tail".into()))
        .unwrap();

    let mut unpacker = factory.unpacker();
    unpacker.feed(packer.as_bytes());
    let objects = unpacker.read_all().unwrap();

    assert_eq!(objects.len(), 3);
    assert_eq!(objects[0].as_value(), Some(&Value::from("header")));
    assert_eq!(objects[1].downcast_ref::<Point>(), Some(&Point { x: 1, y: 1 }));
    assert_eq!(objects[2].downcast_ref::<Label>(), Some(&Label("tail".into())));
}

#[test]
fn test_stream_fed_in_pieces() {
    let factory = point_factory();
    let mut packer = factory.packer();
    packer.write(&Point { x: 10, y: 20 }).unwrap();
    let bytes = packer.into_bytes();

    let mut unpacker = factory.unpacker();
    let (head, tail) = bytes.split_at(bytes.len() / 2);
    unpacker.feed(head);
    assert!(matches!(unpacker.read(), Err(CodecError::Incomplete)));
    unpacker.feed(tail);
    assert!(unpacker.read().unwrap().is_ext());
}

#[test]
fn test_missing_named_method_fails_when_used() {
    // `Label` exposes no `to_msgpack_ext`, so registration succeeds and the
    // first write fails.
    let mut factory = Factory::new();
    factory
        .register_type(7, TypeDescriptor::of::<Label>())
        .unwrap();

    let err = factory.packer().write(&Label("x".into())).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Hook(HookError::NoMethod { ref method, .. }) if method == "to_msgpack_ext"
    ));
}

#[test]
fn test_unset_direction_fails_when_used() {
    let mut factory = Factory::new();
    factory
        .register_type_with(
            8,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new().packer(encode_label),
        )
        .unwrap();

    let mut packer = factory.packer();
    packer.write(&Label("only out".into())).unwrap();

    let mut unpacker = factory.unpacker();
    unpacker.feed(packer.as_bytes());
    let err = unpacker.read().unwrap_err();
    assert_eq!(
        err.to_string(),
        "extension hook failed: no unpacker hook registered for code 8"
    );
}

#[test]
fn test_unknown_ext_passthrough() {
    let factory = point_factory();
    let mut packer = factory.packer();
    packer.write_ext(mpext::ExtCode::new(42), vec![1, 2, 3]).unwrap();

    let mut unpacker = factory.unpacker_with(UnpackerOptions::new().with_allow_unknown_ext(true));
    unpacker.feed(packer.as_bytes());
    match unpacker.read().unwrap() {
        Unpacked::Value(value) => assert_eq!(value, Value::Ext(42, vec![1, 2, 3])),
        Unpacked::Ext(_) => panic!("unregistered code must not be decoded"),
    }
}
