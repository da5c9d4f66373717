mod common;

use common::{Label, Point, decode_label, encode_label};
use mpext::{
    CodecError, ExtOptions, ExtRegistry, Factory, TypeDescriptor, UnpackerOptions,
    testing::{CountingDecoder, RecordingEncoder},
};

fn label_options() -> ExtOptions {
    ExtOptions::new().packer(encode_label).unpacker(decode_label)
}

#[test]
fn test_packer_ignores_later_registrations() {
    let mut factory = Factory::new();
    factory
        .register_type(1, TypeDescriptor::ext::<Point>())
        .unwrap();

    let mut packer = factory.packer();
    factory
        .register_type_with(2, TypeDescriptor::of::<Label>(), label_options())
        .unwrap();

    assert_eq!(packer.registry().len(), 1);
    assert!(packer.write(&Point { x: 1, y: 2 }).is_ok());
    assert!(matches!(
        packer.write(&Label("late".into())),
        Err(CodecError::UnregisteredType(_))
    ));

    // A packer built afterwards sees both.
    let mut fresh = factory.packer();
    assert!(fresh.write(&Label("late".into())).is_ok());
}

#[test]
fn test_unpacker_ignores_later_registrations() {
    let mut factory = Factory::new();
    let mut early = factory.unpacker();
    factory
        .register_type_with(2, TypeDescriptor::of::<Label>(), label_options())
        .unwrap();

    let mut packer = factory.packer();
    packer.write(&Label("hi".into())).unwrap();

    early.feed(packer.as_bytes());
    assert!(matches!(early.read(), Err(CodecError::UnknownExtType(_))));

    let mut late = factory.unpacker();
    late.feed(packer.as_bytes());
    assert_eq!(
        late.read().unwrap().downcast::<Label>().unwrap(),
        Label("hi".into())
    );
}

#[test]
fn test_overwrite_after_snapshot_keeps_old_hook() {
    let first = RecordingEncoder::new(encode_label);
    let second = RecordingEncoder::new(encode_label);

    let mut factory = Factory::new();
    factory
        .register_type_with(
            3,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new().packer(first.clone()),
        )
        .unwrap();
    let mut old = factory.packer();

    factory
        .register_type_with(
            3,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new().packer(second.clone()),
        )
        .unwrap();
    let mut new = factory.packer();

    old.write(&Label("a".into())).unwrap();
    new.write(&Label("b".into())).unwrap();

    assert_eq!(first.values(), vec![Label("a".into())]);
    assert_eq!(second.values(), vec![Label("b".into())]);
}

#[test]
fn test_codecs_outlive_factory() {
    let decoder = CountingDecoder::new(decode_label);
    let mut factory = Factory::new();
    factory
        .register_type_with(
            4,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new()
                .packer(encode_label)
                .unpacker(decoder.clone()),
        )
        .unwrap();

    let mut packer = factory.packer();
    let mut unpacker = factory.unpacker_with(UnpackerOptions::new());
    drop(factory);

    packer.write(&Label("kept".into())).unwrap();
    unpacker.feed(packer.as_bytes());
    let value = unpacker.read().unwrap();
    assert_eq!(value.downcast_ref::<Label>(), Some(&Label("kept".into())));
    assert_eq!(decoder.count(), 1);
}

#[test]
fn test_codec_moves_across_threads() {
    let mut factory = Factory::new();
    factory
        .register_type(1, TypeDescriptor::ext::<Point>())
        .unwrap();
    let mut packer = factory.packer();

    let handle = std::thread::spawn(move || {
        packer.write(&Point { x: 7, y: 8 }).unwrap();
        packer.into_bytes()
    });

    // The factory keeps mutating while the packer is away.
    factory
        .register_type(9, TypeDescriptor::ext::<Point>())
        .unwrap();

    let bytes = handle.join().unwrap();
    let mut unpacker = factory.unpacker();
    unpacker.feed(&bytes);
    assert_eq!(
        unpacker.read().unwrap().downcast::<Point>().unwrap(),
        Point { x: 7, y: 8 }
    );
}
