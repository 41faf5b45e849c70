use bytes::{BufMut, BytesMut};

use crate::cursor::BodyCursor;
use crate::error::{RecordError, Result};
use crate::Record;

/// Fixed width of each credential slot on the wire.
pub const MAX_CREDENTIAL_LEN: usize = 16;

/// Login/registration credentials: two fixed 16-byte zero-padded slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

fn put_slot(dst: &mut BytesMut, field: &'static str, value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_CREDENTIAL_LEN {
        return Err(RecordError::TooLong {
            field,
            len: bytes.len(),
            max: MAX_CREDENTIAL_LEN,
        });
    }
    dst.put_slice(bytes);
    dst.put_bytes(0, MAX_CREDENTIAL_LEN - bytes.len());
    Ok(())
}

fn take_slot(cursor: &mut BodyCursor<'_>, field: &'static str) -> Result<String> {
    let slot = cursor.take(MAX_CREDENTIAL_LEN)?;
    let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    std::str::from_utf8(&slot[..len])
        .map(str::to_owned)
        .map_err(|_| RecordError::Utf8 { field })
}

impl Record for Credentials {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        put_slot(dst, "username", &self.username)?;
        put_slot(dst, "password", &self.password)
    }

    fn decode(body: &[u8]) -> Result<Self> {
        let mut cursor = BodyCursor::new(body);
        let username = take_slot(&mut cursor, "username")?;
        let password = take_slot(&mut cursor, "password")?;
        cursor.finish()?;
        Ok(Self { username, password })
    }
}
