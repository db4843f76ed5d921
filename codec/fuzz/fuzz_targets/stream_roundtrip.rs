#![no_main]

use arbitrary::Arbitrary;
use binstream_codec::{Order, OrderedStream, Triad};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

#[derive(Arbitrary, Debug, Clone)]
enum Value {
    U8(u8),
    I8(i8),
    Bool(bool),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Triad(u32),
    String(String),
    RawString(String),
    Address([u8; 4], u16),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    little: bool,
    values: Vec<Value>,
}

fn write(stream: &mut OrderedStream, value: &Value) {
    match value {
        Value::U8(v) => stream.write_u8(*v),
        Value::I8(v) => stream.write_i8(*v),
        Value::Bool(v) => stream.write_bool(*v),
        Value::U16(v) => stream.write_u16(*v),
        Value::I16(v) => stream.write_i16(*v),
        Value::U32(v) => stream.write_u32(*v),
        Value::I32(v) => stream.write_i32(*v),
        Value::U64(v) => stream.write_u64(*v),
        Value::I64(v) => stream.write_i64(*v),
        Value::F32(v) => stream.write_f32(*v),
        Value::F64(v) => stream.write_f64(*v),
        Value::Triad(v) => stream.write_triad(Triad::new(v & 0xFF_FFFF).unwrap()),
        Value::String(v) | Value::RawString(v) if v.len() <= u16::MAX as usize => {
            stream.write_string(v)
        }
        Value::String(_) | Value::RawString(_) => {}
        Value::Address(ip, port) => {
            let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(*ip), *port));
            stream.write_address(&addr).unwrap();
        }
    }
}

fn check(stream: &mut OrderedStream, value: &Value) {
    match value {
        Value::U8(v) => assert_eq!(stream.read_u8().unwrap(), *v),
        Value::I8(v) => assert_eq!(stream.read_i8().unwrap(), *v),
        Value::Bool(v) => assert_eq!(stream.read_bool().unwrap(), *v),
        Value::U16(v) => assert_eq!(stream.read_u16().unwrap(), *v),
        Value::I16(v) => assert_eq!(stream.read_i16().unwrap(), *v),
        Value::U32(v) => assert_eq!(stream.read_u32().unwrap(), *v),
        Value::I32(v) => assert_eq!(stream.read_i32().unwrap(), *v),
        Value::U64(v) => assert_eq!(stream.read_u64().unwrap(), *v),
        Value::I64(v) => assert_eq!(stream.read_i64().unwrap(), *v),
        Value::F32(v) => assert_eq!(stream.read_f32().unwrap().to_bits(), v.to_bits()),
        Value::F64(v) => assert_eq!(stream.read_f64().unwrap().to_bits(), v.to_bits()),
        Value::Triad(v) => assert_eq!(stream.read_triad().unwrap().get(), v & 0xFF_FFFF),
        Value::String(v) if v.len() <= u16::MAX as usize => {
            assert_eq!(&stream.read_string().unwrap(), v)
        }
        Value::RawString(v) if v.len() <= u16::MAX as usize => {
            let expected = Bytes::copy_from_slice(v.as_bytes());
            assert_eq!(stream.read_string_bytes().unwrap(), expected)
        }
        Value::String(_) | Value::RawString(_) => {}
        Value::Address(ip, port) => {
            let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(*ip), *port));
            assert_eq!(stream.read_address().unwrap(), addr);
        }
    }
}

fn fuzz(input: FuzzInput) {
    let order = if input.little {
        Order::Little
    } else {
        Order::Big
    };
    let mut stream = OrderedStream::new(order);
    for value in &input.values {
        write(&mut stream, value);
    }
    for value in &input.values {
        check(&mut stream, value);
    }
    assert_eq!(stream.remaining_len(), 0);
    assert!(stream.is_valid());
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
