use std::sync::{Arc, LazyLock};

use binstream::{
    Codec, CodecConfig, ElementKind, Endianness, Error, FieldDescriptor, FieldKind, HEADER_SIZE,
    MapKey, MapKeyKind, Message, MessageHeader, ScalarKind, Schema, StreamMap, Value,
};

static POSITION: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("Position")
        .field("x", "x", FieldKind::scalar(ScalarKind::F32))
        .field("y", "y", FieldKind::scalar(ScalarKind::F32))
        .build()
        .expect("position schema")
});

static TANK_STATE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::message("TankState")
        .field("id", "id", FieldKind::scalar(ScalarKind::U32))
        .field("hp", "hp", FieldKind::scalar(ScalarKind::I16))
        .field("name", "name", FieldKind::string())
        .field("pos", "pos", FieldKind::message(&POSITION))
        .field("trail", "trail", FieldKind::array(POSITION.clone()))
        .field("ammo", "ammo", FieldKind::map(MapKeyKind::U32, ScalarKind::U8))
        .field(
            "labels",
            "labels",
            FieldKind::map(MapKeyKind::String, ElementKind::String),
        )
        .build()
        .expect("tank state schema")
});

fn position(x: f32, y: f32) -> Message {
    let mut pos = Message::new(&POSITION);
    pos.set("x", x).unwrap();
    pos.set("y", y).unwrap();
    pos
}

fn tank() -> Message {
    let mut msg = Message::with_cmd(&TANK_STATE, 3, 11).unwrap();
    msg.set("id", 42u32).unwrap();
    msg.set("hp", -5i16).unwrap();
    msg.set("name", "tiger").unwrap();
    msg.set("pos", position(1.5, -2.0)).unwrap();
    msg.set(
        "trail",
        vec![Value::from(position(0.0, 0.0)), Value::from(position(0.5, 1.0))],
    )
    .unwrap();
    let ammo: StreamMap = [(7u32, 3u8), (1u32, 9u8)].into_iter().collect();
    msg.set("ammo", ammo).unwrap();
    let labels: StreamMap = [("team", "red"), ("rank", "中士")].into_iter().collect();
    msg.set("labels", labels).unwrap();
    msg
}

#[test]
fn scenario_main_sub_name() {
    let schema = Schema::message("Hello")
        .field("name", "name", FieldKind::string())
        .build()
        .unwrap();
    let mut msg = Message::with_cmd(&schema, 7, 2).unwrap();
    msg.set("name", "ok").unwrap();

    let bytes = msg.encode().unwrap();
    assert_eq!(bytes.len(), 14);

    let mut decoded = Message::new(&schema);
    assert!(decoded.decode(bytes));
    assert_eq!(decoded.main_cmd(), 7);
    assert_eq!(decoded.sub_cmd(), 2);
    assert_eq!(decoded.get_str("name"), Some("ok"));
}

#[test]
fn full_message_roundtrip() {
    for endianness in [Endianness::Big, Endianness::Little] {
        let codec = Codec::new(CodecConfig::with_endianness(endianness));
        let mut original = tank();
        let bytes = codec.encode(&mut original).unwrap();

        let mut decoded = Message::new(&TANK_STATE);
        codec.decode(&mut decoded, bytes).unwrap();
        assert_eq!(decoded, original, "{endianness}");

        let keys: Vec<_> = decoded
            .get_map("labels")
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect();
        assert_eq!(keys, [MapKey::from("team"), MapKey::from("rank")]);
    }
}

#[test]
fn size_matches_bytes_written() {
    let codec = Codec::default();
    let mut msg = tank();
    let size = codec.encoded_size(&msg).unwrap();
    let bytes = codec.encode(&mut msg).unwrap();
    assert_eq!(bytes.len(), size);

    let expected = HEADER_SIZE
        + 4 // id
        + 2 // hp
        + 4 + 5 // name
        + 8 // pos
        + 4 + 2 * 8 // trail
        + 4 + 2 * (4 + 1) // ammo
        + 4 + (4 + 4 + 4 + 3) + (4 + 4 + 4 + 6); // labels
    assert_eq!(size, expected);
}

#[test]
fn size_per_field_kind() {
    let cases: Vec<(FieldKind, Value, usize)> = vec![
        (FieldKind::scalar(ScalarKind::F64), Value::F64(1.0), 8),
        (FieldKind::string(), Value::from("abc"), 7),
        (
            FieldKind::array(ScalarKind::I16),
            Value::Array(vec![Value::I16(1), Value::I16(2)]),
            8,
        ),
        (
            FieldKind::map(MapKeyKind::U32, ElementKind::String),
            Value::Map([(1u32, "x")].into_iter().collect()),
            4 + 4 + 5,
        ),
        (
            FieldKind::message(&POSITION),
            Value::from(position(1.0, 2.0)),
            8,
        ),
    ];

    for (kind, value, field_size) in cases {
        let label = kind.to_string();
        let schema = Schema::message("One")
            .field("f", "f", kind)
            .build()
            .unwrap();
        let mut msg = Message::new(&schema);
        msg.set("f", value).unwrap();

        let size = Codec::default().encoded_size(&msg).unwrap();
        let bytes = msg.encode().unwrap();
        assert_eq!(size, HEADER_SIZE + field_size, "{label}");
        assert_eq!(bytes.len(), size, "{label}");
    }
}

#[test]
fn inherited_descriptor_table() {
    let base = Schema::builder("Base")
        .field("first", "first", FieldKind::scalar(ScalarKind::I32))
        .field("second", "second", FieldKind::string())
        .build()
        .unwrap();
    let derived = Schema::extend("Derived", &base)
        .field("third", "third", FieldKind::scalar(ScalarKind::U8))
        .build()
        .unwrap();

    let keys: Vec<_> = derived.fields().map(FieldDescriptor::key).collect();
    assert_eq!(keys, ["first", "second", "third"]);
    assert_eq!(base.len(), 2);
    assert!(base.get("third").is_none());
}

#[test]
fn duplicate_registration_fails() {
    let result = Schema::message("Twice")
        .field("name", "name", FieldKind::string())
        .field("name", "alias", FieldKind::string())
        .build();
    assert!(matches!(result, Err(Error::DuplicateField { key, .. }) if key == "name"));

    let header_clash = Schema::message("Clash")
        .field("mainCmd", "other", FieldKind::scalar(ScalarKind::I32))
        .build();
    assert!(header_clash.is_err());
}

#[test]
fn header_occupies_first_eight_bytes() {
    for endianness in [Endianness::Big, Endianness::Little] {
        let codec = Codec::new(CodecConfig::with_endianness(endianness));
        let mut msg = tank();
        msg.set_main_cmd(-100).unwrap();
        msg.set_sub_cmd(65_536).unwrap();
        let bytes = codec.encode(&mut msg).unwrap();

        let header = MessageHeader::peek(&bytes, endianness).unwrap();
        assert_eq!(header.route(), (-100, 65_536));
        assert_eq!(&bytes[..HEADER_SIZE], &header.to_bytes(endianness));
    }
}

#[test]
fn empty_array_is_four_bytes() {
    let schema = Schema::message("Empty")
        .field("items", "items", FieldKind::array(ElementKind::String))
        .build()
        .unwrap();
    let mut msg = Message::new(&schema);
    let bytes = msg.encode().unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 4);
    assert_eq!(&bytes[HEADER_SIZE..], &[0, 0, 0, 0]);

    let mut decoded = Message::new(&schema);
    assert!(decoded.decode(bytes));
    assert_eq!(decoded.get_array("items"), Some(&[][..]));
}

#[test]
fn null_values_encode_as_zero_and_empty() {
    let schema = Schema::message("Nulls")
        .field("n", "n", FieldKind::scalar(ScalarKind::U16))
        .field("s", "s", FieldKind::string())
        .build()
        .unwrap();
    let mut msg = Message::new(&schema);
    msg.set("n", Value::Null).unwrap();
    msg.set("s", Value::Null).unwrap();

    let bytes = msg.encode().unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 2 + 4);
    assert!(bytes.iter().all(|b| *b == 0));

    let mut decoded = Message::new(&schema);
    assert!(decoded.decode(bytes));
    assert_eq!(decoded.get_u32("n"), Some(0));
    assert_eq!(decoded.get_str("s"), Some(""));
}

#[test]
fn message_reuse_overwrites_state() {
    let mut first = tank();
    let first_bytes = first.encode().unwrap();

    let mut second = tank();
    second.set("name", "panther").unwrap();
    second.set("trail", Vec::<Value>::new()).unwrap();
    let second_bytes = second.encode().unwrap();

    let mut target = Message::new(&TANK_STATE);
    assert!(target.decode(first_bytes));
    assert!(target.decode(second_bytes.clone()));
    assert_eq!(target, second);
    assert_eq!(target.buffer(), &second_bytes);
}

#[test]
fn failed_decode_reports_false() {
    let mut msg = tank();
    let bytes = msg.encode().unwrap();
    let truncated = bytes.slice(..bytes.len() - 1);

    let mut target = Message::new(&TANK_STATE);
    assert!(!target.decode(truncated));
    assert_eq!(target.get_u32("id"), Some(42));
    assert_eq!(target.get_str("name"), Some("tiger"));
}
