// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end roundtrips: derive a codec from a declared record type, encode
// a value through the in-memory event format, replay the events and compare.

mod common;

use common::{EventDecoder, EventEncoder};
use elser::{Codec, CodecCache, EnumType, RecordType, TypeRef, Value};
use std::sync::Arc;

fn roundtrip(cache: &CodecCache, record: &RecordType, value: &Value) -> Value {
    let codec = cache.codec_for(record).unwrap().unwrap();
    let mut out = EventEncoder::default();
    codec.encode(&mut out, value).unwrap();
    let mut inp = EventDecoder::new(out.events);
    codec.decode(&mut inp).unwrap()
}

#[test]
fn test_primitive_and_text_fields() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Data")
        .field("value1", TypeRef::string())
        .field("value2", TypeRef::i32());
    let value = Value::Record(vec![Value::from("s1"), Value::from(42i32)]);
    assert_eq!(roundtrip(&cache, &record, &value), value);
}

#[test]
fn test_all_primitive_shapes() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Mixed")
        .field("flag", TypeRef::bool())
        .field("small", TypeRef::new(elser::model::BaseType::I8))
        .field("medium", TypeRef::new(elser::model::BaseType::I16))
        .field("int", TypeRef::i32())
        .field("long", TypeRef::i64())
        .field("single", TypeRef::new(elser::model::BaseType::F32))
        .field("double", TypeRef::f64())
        .field("letter", TypeRef::new(elser::model::BaseType::Char))
        .field("text", TypeRef::string());
    let value = Value::Record(vec![
        Value::from(true),
        Value::from(-8i8),
        Value::from(300i16),
        Value::from(70_000i32),
        Value::from(i64::from(i32::MAX) + 1),
        Value::from(1.5f32),
        Value::from(-2.25f64),
        Value::from('q'),
        Value::from("text"),
    ]);
    assert_eq!(roundtrip(&cache, &record, &value), value);
}

#[test]
fn test_unit_field() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.WithUnit")
        .field("marker", TypeRef::unit())
        .field("n", TypeRef::i32());
    let value = Value::Record(vec![Value::Unit, Value::from(5i32)]);
    assert_eq!(roundtrip(&cache, &record, &value), value);
}

#[test]
fn test_nullable_field_both_arms() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Opt")
        .field("maybe", TypeRef::string().nullable())
        .field("n", TypeRef::i32());

    let present = Value::Record(vec![Value::from("here"), Value::from(1i32)]);
    assert_eq!(roundtrip(&cache, &record, &present), present);

    let absent = Value::Record(vec![Value::Null, Value::from(2i32)]);
    assert_eq!(roundtrip(&cache, &record, &absent), absent);
}

#[test]
fn test_enum_field() {
    let cache = CodecCache::with_builtins();
    let color = Arc::new(EnumType::new("demo.Color", ["RED", "GREEN", "BLUE"]));
    let record = RecordType::new("demo.Paint")
        .field("color", TypeRef::enumeration(color))
        .field("opacity", TypeRef::f64());
    let value = Value::Record(vec![Value::Enum(2), Value::from(0.5f64)]);
    assert_eq!(roundtrip(&cache, &record, &value), value);
}

#[test]
fn test_list_lengths() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Bag").field("items", TypeRef::list_of(TypeRef::i32()));

    for len in [0usize, 1, 17] {
        let items: Vec<Value> = (0..len).map(|i| Value::from(i as i32)).collect();
        let value = Value::Record(vec![Value::List(items)]);
        assert_eq!(roundtrip(&cache, &record, &value), value);
    }
}

#[test]
fn test_list_of_nullable_strings() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Sparse")
        .field("names", TypeRef::list_of(TypeRef::string().nullable()));
    let value = Value::Record(vec![Value::List(vec![
        Value::from("a"),
        Value::Null,
        Value::from("c"),
    ])]);
    assert_eq!(roundtrip(&cache, &record, &value), value);
}

#[test]
fn test_nullable_list() {
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.MaybeBag")
        .field("items", TypeRef::list_of(TypeRef::i64()).nullable());

    let full = Value::Record(vec![Value::from(vec![1i64, 2, 3])]);
    assert_eq!(roundtrip(&cache, &record, &full), full);

    let none = Value::Record(vec![Value::Null]);
    assert_eq!(roundtrip(&cache, &record, &none), none);
}

#[test]
fn test_nested_record_field() {
    let cache = CodecCache::with_builtins();
    let point = RecordType::new("demo.Point")
        .field("x", TypeRef::i32())
        .field("y", TypeRef::i32());
    cache.register_record(&point).unwrap().unwrap();

    let shape = RecordType::new("demo.Shape")
        .field("origin", TypeRef::named("demo.Point"))
        .field("label", TypeRef::string());
    let value = Value::Record(vec![
        Value::Record(vec![Value::from(3i32), Value::from(4i32)]),
        Value::from("unit square"),
    ]);
    assert_eq!(roundtrip(&cache, &shape, &value), value);
}

#[test]
fn test_list_of_records() {
    let cache = CodecCache::with_builtins();
    let point = RecordType::new("demo.Point")
        .field("x", TypeRef::i32())
        .field("y", TypeRef::i32());
    cache.register_record(&point).unwrap().unwrap();

    let path = RecordType::new("demo.Path")
        .field("points", TypeRef::list_of(TypeRef::named("demo.Point")));
    let value = Value::Record(vec![Value::List(vec![
        Value::Record(vec![Value::from(0i32), Value::from(0i32)]),
        Value::Record(vec![Value::from(1i32), Value::from(2i32)]),
    ])]);
    assert_eq!(roundtrip(&cache, &path, &value), value);
}

#[test]
fn test_randomized_instances() {
    fastrand::seed(7);
    let cache = CodecCache::with_builtins();
    let record = RecordType::new("demo.Random")
        .field("flag", TypeRef::bool())
        .field("int", TypeRef::i32())
        .field("long", TypeRef::i64())
        .field("double", TypeRef::f64())
        .field("text", TypeRef::string())
        .field("ints", TypeRef::list_of(TypeRef::i32()));

    for _ in 0..50 {
        let text: String = (0..fastrand::usize(0..12))
            .map(|_| fastrand::alphanumeric())
            .collect();
        let ints: Vec<Value> = (0..fastrand::usize(0..8))
            .map(|_| Value::from(fastrand::i32(..)))
            .collect();
        let value = Value::Record(vec![
            Value::from(fastrand::bool()),
            Value::from(fastrand::i32(..)),
            Value::from(fastrand::i64(..)),
            Value::from(fastrand::f64()),
            Value::from(text),
            Value::List(ints),
        ]);
        assert_eq!(roundtrip(&cache, &record, &value), value);
    }
}
