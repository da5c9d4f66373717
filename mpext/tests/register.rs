mod common;

use common::{Label, Point, Shape, decode_label, encode_label};
use mpext::{
    Arg, CodeRangeError, ExtCode, ExtOptions, ExtRegistry, Factory, RegisterError,
    TypeDescriptor, TypeKey, rmpv::Value,
};

fn assert_untouched(factory: &Factory) {
    assert!(factory.packer_registry().is_empty());
    assert!(factory.unpacker_registry().is_empty());
}

#[test]
fn test_register_args_arity() {
    let mut factory = Factory::new();

    for args in [
        vec![],
        vec![Arg::Int(1)],
        vec![
            Arg::Int(1),
            Arg::Type(TypeDescriptor::ext::<Point>()),
            Arg::Options(ExtOptions::new()),
            Arg::Options(ExtOptions::new()),
        ],
    ] {
        let given = args.len();
        let err = factory.register_type_args(args).unwrap_err();
        assert_eq!(
            err,
            RegisterError::Arity {
                given,
                expected: "2..3"
            }
        );
        assert_eq!(err.to_string(), format!("wrong number of arguments ({given} for 2..3)"));
    }
    assert_untouched(&factory);
}

#[test]
fn test_register_rejects_codes_outside_signed_byte() {
    let mut factory = Factory::new();

    for code in [128, -129, 1000, i64::MIN] {
        let err = factory
            .register_type(code, TypeDescriptor::ext::<Point>())
            .unwrap_err();
        assert_eq!(err, RegisterError::Range(CodeRangeError(code.into())));
    }
    assert_untouched(&factory);
}

#[test]
fn test_register_accepts_boundary_codes() {
    let mut factory = Factory::new();
    factory
        .register_type(127, TypeDescriptor::ext::<Point>())
        .unwrap();
    factory
        .register_type_with(
            -128,
            TypeDescriptor::of::<Label>(),
            ExtOptions::new().packer(encode_label).unpacker(decode_label),
        )
        .unwrap();

    assert!(factory.unpacker_registry().contains_key(&ExtCode::MAX));
    assert!(factory.unpacker_registry().contains_key(&ExtCode::MIN));
    assert_eq!(factory.packer_registry().len(), 2);
}

#[test]
fn test_register_rejects_non_map_options() {
    let mut factory = Factory::new();
    let err = factory
        .register_type_args([
            Arg::Int(1),
            Arg::Type(TypeDescriptor::ext::<Point>()),
            Arg::Value(Value::from("packer")),
        ])
        .unwrap_err();

    assert_eq!(
        err,
        RegisterError::TypeMismatch {
            expected: "options map",
            found: "string".into()
        }
    );
    assert_untouched(&factory);
}

#[test]
fn test_register_rejects_abstract_types() {
    let mut factory = Factory::new();
    let err = factory
        .register_type_args([
            Arg::Int(1),
            Arg::Type(TypeDescriptor::interface::<dyn Shape>()),
        ])
        .unwrap_err();

    assert!(matches!(err, RegisterError::TypeMismatch { expected: "concrete type", .. }));
    assert_untouched(&factory);
}

#[test]
fn test_register_options_from_host_map() {
    let mut factory = Factory::new();
    factory
        .register_type_args([
            Arg::Int(2),
            Arg::Type(TypeDescriptor::ext::<Point>()),
            Arg::Value(Value::Map(vec![(
                Value::from("packer"),
                Value::from(mpext::TO_MSGPACK_EXT),
            )])),
        ])
        .unwrap();

    let entry = factory
        .packer_registry()
        .get(&TypeKey::of::<Point>())
        .unwrap();
    assert_eq!(entry.hook().and_then(|h| h.method_name()), Some(mpext::TO_MSGPACK_EXT));
    let unpacker_entry = factory.unpacker_registry().get(&ExtCode::new(2)).unwrap();
    assert!(unpacker_entry.hook().is_none());
}

#[test]
fn test_last_registration_wins() {
    let mut factory = Factory::new();
    factory
        .register_type(1, TypeDescriptor::ext::<Point>())
        .unwrap();
    factory
        .register_type(5, TypeDescriptor::ext::<Point>())
        .unwrap();

    let entry = factory
        .packer_registry()
        .get(&TypeKey::of::<Point>())
        .unwrap();
    assert_eq!(entry.code(), ExtCode::new(5));
    assert_eq!(factory.packer_registry().len(), 1);

    // The decode side keeps both codes; only the encode side is keyed by type.
    assert_eq!(factory.unpacker_registry().len(), 2);
}

#[test]
fn test_from_args_rejects_arguments() {
    let err = Factory::from_args([Arg::Value(Value::Nil)]).unwrap_err();
    assert_eq!(err.to_string(), "wrong number of arguments (1 for 0)");
}

#[test]
fn test_register_rejects_hooks_built_for_another_type() {
    let mut factory = Factory::new();
    let err = factory
        .register_type_with(
            1,
            TypeDescriptor::of::<Point>(),
            ExtOptions::new().packer(encode_label).unpacker(decode_label),
        )
        .unwrap_err();

    assert!(matches!(err, RegisterError::TypeMismatch { ref found, .. } if found.contains("Label")));
    assert_untouched(&factory);
}
