#![no_main]

use binstream_codec::{Error, Order, Stream};
use libfuzzer_sys::fuzz_target;

fn fuzz(data: &[u8]) {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let order = if selector & 1 == 0 {
        Order::Big
    } else {
        Order::Little
    };
    let mut stream = Stream::from_bytes(rest);
    while stream.remaining_len() > 0 {
        let before = stream.offset();
        let result: Result<(), Error> = match (selector >> 1) % 8 {
            0 => stream.read_u16(order).map(drop),
            1 => stream.read_i32(order).map(drop),
            2 => stream.read_f64(order).map(drop),
            3 => stream.read_triad(order).map(drop),
            4 => stream.read_string(order).map(drop),
            5 => stream.read_address(order).map(drop),
            6 => stream.read_hex_exact(3).map(drop),
            _ => stream.read_bool().map(drop),
        };
        assert!(stream.offset() >= before);
        assert!(stream.offset() <= stream.len());
        match result {
            Ok(()) => assert!(stream.offset() > before),
            Err(Error::BufferUnderflow { .. }) => {
                assert_eq!(stream.remaining_len(), 0);
                assert!(!stream.is_valid());
            }
            Err(_) => {
                if stream.offset() == before {
                    break;
                }
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    fuzz(data);
});
