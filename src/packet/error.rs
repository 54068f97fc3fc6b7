use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Message text has {len} bytes, but the length field only allows up to {max}")]
    MessageTooLong { len: usize, max: usize },
    #[error("Value {value} does not fit into a 16-bit packet field")]
    ValueTooLarge { value: usize },
    #[error("Escaped body corrupt, unpaired escape byte at offset {offset}")]
    MalformedEscape { offset: usize },
    #[error("Volume {0} out of range 0..=8")]
    VolumeOutOfRange(u8),
    #[error("Timestamp {0} can not be sent to the sign, year must be in range 2000..=2255")]
    TimestampOutOfRange(NaiveDateTime),
}
