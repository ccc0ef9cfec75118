//! Fixed-width record layout.
//!
//! Every attribute occupies a slot whose width depends only on its declared
//! domain, slots are concatenated in attribute order. Numbers are stored
//! big-endian. A `String` slot is a 2-byte length followed by
//! [`STRING_CAPACITY`] payload bytes, zero padded. A `Character` slot holds a
//! single byte, so only characters up to `U+00FF` are representable.
use super::*;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use static_assertions::const_assert;

/// Maximum number of UTF-8 bytes a `String` value may occupy.
pub const STRING_CAPACITY: usize = 64;
/// Width of a `String` slot: length prefix plus payload.
pub const STRING_SLOT: usize = STRING_LEN_SIZE + STRING_CAPACITY;

const STRING_LEN_SIZE: usize = std::mem::size_of::<u16>();

const_assert!(STRING_CAPACITY <= u16::MAX as usize);

/// Width in bytes of a slot for the given domain.
pub const fn slot_size(domain: Domain) -> usize {
    match domain {
        Domain::Byte | Domain::Character => 1,
        Domain::Short => 2,
        Domain::Integer | Domain::Float => 4,
        Domain::Long | Domain::Double => 8,
        Domain::String => STRING_SLOT,
    }
}

/// Size of a packed tuple for the given domains.
pub fn tuple_size(domains: &[Domain]) -> usize {
    domains.iter().copied().map(slot_size).sum()
}

/// Packs `tuple` into a fixed-width record.
pub fn pack(tuple: &[Value], domains: &[Domain]) -> Result<Bytes> {
    if tuple.len() != domains.len() {
        return Err(Error::codec(format!(
            "tuple has {} values, domain declares {}",
            tuple.len(),
            domains.len()
        )));
    }
    let mut buf = BytesMut::with_capacity(tuple_size(domains));
    for (value, &domain) in tuple.iter().zip(domains) {
        put_value(&mut buf, value, domain)?;
    }
    trace!("tuple packed into {} bytes", buf.len());
    Ok(buf.freeze())
}

/// Reconstructs a tuple from a record produced by [`pack`].
pub fn unpack(record: &[u8], domains: &[Domain]) -> Result<Tuple> {
    let expected = tuple_size(domains);
    if record.len() != expected {
        return Err(Error::codec(format!(
            "record is {} bytes, domain requires {}",
            record.len(),
            expected
        )));
    }
    let mut buf = record;
    domains
        .iter()
        .map(|&domain| get_value(&mut buf, domain))
        .collect()
}

fn put_value(buf: &mut BytesMut, value: &Value, domain: Domain) -> Result<()> {
    match (value, domain) {
        (Value::Byte(v), Domain::Byte) => buf.put_i8(*v),
        (Value::Short(v), Domain::Short) => buf.put_i16(*v),
        (Value::Int(v), Domain::Integer) => buf.put_i32(*v),
        (Value::Long(v), Domain::Long) => buf.put_i64(*v),
        (Value::Float(v), Domain::Float) => buf.put_f32(*v),
        (Value::Double(v), Domain::Double) => buf.put_f64(*v),
        (Value::Char(c), Domain::Character) => {
            let byte = u8::try_from(u32::from(*c)).map_err(|_| {
                Error::codec(format!("character {:?} doesn't fit into one byte", c))
            })?;
            buf.put_u8(byte);
        }
        (Value::Str(s), Domain::String) => {
            let bytes = s.as_bytes();
            if bytes.len() > STRING_CAPACITY {
                return Err(Error::codec(format!(
                    "string of {} bytes exceeds slot capacity {}",
                    bytes.len(),
                    STRING_CAPACITY
                )));
            }
            // fits, checked against STRING_CAPACITY above
            buf.put_u16(bytes.len() as u16);
            buf.put_slice(bytes);
            buf.put_bytes(0, STRING_CAPACITY - bytes.len());
        }
        (value, domain) => {
            return Err(Error::codec(format!(
                "value {:?} doesn't belong to domain {}",
                value, domain
            )))
        }
    }
    Ok(())
}

fn get_value(buf: &mut &[u8], domain: Domain) -> Result<Value> {
    let value = match domain {
        Domain::Byte => Value::Byte(buf.get_i8()),
        Domain::Short => Value::Short(buf.get_i16()),
        Domain::Integer => Value::Int(buf.get_i32()),
        Domain::Long => Value::Long(buf.get_i64()),
        Domain::Float => Value::Float(buf.get_f32()),
        Domain::Double => Value::Double(buf.get_f64()),
        Domain::Character => Value::Char(char::from(buf.get_u8())),
        Domain::String => {
            let len = buf.get_u16() as usize;
            if len > STRING_CAPACITY {
                return Err(Error::codec(format!(
                    "stored string length {} exceeds slot capacity {}",
                    len, STRING_CAPACITY
                )));
            }
            let slot = &buf[..STRING_CAPACITY];
            let s = std::str::from_utf8(&slot[..len])
                .map_err(|e| Error::codec(format!("string slot is not utf-8: {}", e)))?
                .to_owned();
            buf.advance(STRING_CAPACITY);
            Value::Str(s)
        }
    };
    Ok(value)
}
