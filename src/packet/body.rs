//! The packet body: a tag-prefixed sub-header describing how to render the
//! text, the raw text itself, and a terminator.

use super::{builder::Builder, Error, Result};
use crate::message::{DisplayMessage, ParseAttributeError, MAX_VOLUME};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::str::FromStr;

pub const SUBHEADER_MAGIC: [u8; 4] = [0x0F, 0x00, 0x0E, 0x02];
pub const TEXT_TERMINATOR: u8 = 0x17;

const TAG_SCROLL: u8 = 0x0D;
const TAG_PAUSE: u8 = 0x0E;
const TAG_PRIORITY: u8 = 0x0B;
const PARAMETER_BLOCK: [u8; 3] = [0x0F, 0x00, 0x0C];
const TAG_VOLUME: u8 = 0x0A;
const TAG_FONT: u8 = 0x06;
const TAG_COLOR: u8 = 0x07;
const UNKNOWN_BLOCK_0: [u8; 4] = [0x08, 0x01, 0x14, 0x00];
const TAG_DATE: u8 = 0x19;
const DATE_TERMINATOR: u8 = 0x1A;
const CONTENT_BLOCK: [u8; 3] = [0x02, 0x00, 0x00];
const TAG_ZONE: u8 = 0x03;
const ZONE_TERMINATOR: u8 = 0x00;
const UNKNOWN_BLOCK_1: [u8; 2] = [0x0C, 0x00];
const TEXT_PREFIX: [u8; 2] = [0x00, 0x00];

/// Years are sent as a single byte offset from this one.
const BASE_YEAR: i32 = 2000;

/// Firmware revisions disagree on how the body is laid out, so the caller has
/// to pick the one that matches the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVariant {
    /// Two-byte message length, with volume tag and date block.
    ShortLength,
    /// One-byte message length, neither volume tag nor date block.
    ByteLength,
}

impl ProtocolVariant {
    /// Longest text that fits into the message length field.
    pub fn max_text_len(self) -> usize {
        match self {
            ProtocolVariant::ShortLength => usize::from(u16::MAX),
            ProtocolVariant::ByteLength => usize::from(u8::MAX),
        }
    }

    /// Length of the body in front of the text.
    pub fn subheader_len(self) -> usize {
        match self {
            ProtocolVariant::ShortLength => 48,
            ProtocolVariant::ByteLength => 37,
        }
    }
}

impl Default for ProtocolVariant {
    fn default() -> Self {
        ProtocolVariant::ShortLength
    }
}

impl FromStr for ProtocolVariant {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> std::result::Result<Self, Self::Err> {
        match source {
            "short_length" => Ok(ProtocolVariant::ShortLength),
            "byte_length" => Ok(ProtocolVariant::ByteLength),
            _ => Err(ParseAttributeError::unknown("protocol variant", source)),
        }
    }
}

/// Serializes the sub-header, the text and the terminator, unescaped.
pub fn build_body(message: &DisplayMessage, variant: ProtocolVariant) -> Result<Vec<u8>> {
    let text = message.text();
    let max = variant.max_text_len();
    if text.len() > max {
        return Err(Error::MessageTooLong {
            len: text.len(),
            max,
        });
    }
    if message.volume() > MAX_VOLUME {
        return Err(Error::VolumeOutOfRange(message.volume()));
    }

    let rect = message.rect();
    let mut builder = Builder::with_capacity(variant.subheader_len() + text.len() + 1);
    builder
        .buf(&SUBHEADER_MAGIC)
        .u8(message.zone())
        .u8(rect.x)
        .u8(rect.y)
        .u8(rect.width)
        .u8(rect.height)
        .tagged(TAG_SCROLL, message.scroll().code())
        .tagged(TAG_PAUSE, message.pause())
        .tagged(TAG_PRIORITY, message.priority().code())
        .buf(&PARAMETER_BLOCK);
    if variant == ProtocolVariant::ShortLength {
        builder.tagged(TAG_VOLUME, message.volume());
    }
    builder
        .tagged(TAG_FONT, message.font().code())
        .tagged(TAG_COLOR, message.color().code())
        .buf(&UNKNOWN_BLOCK_0);
    if variant == ProtocolVariant::ShortLength {
        builder
            .u8(TAG_DATE)
            .buf(&date_fields(message.timestamp())?)
            .u8(DATE_TERMINATOR);
    }
    builder
        .buf(&CONTENT_BLOCK)
        .tagged(TAG_ZONE, message.zone())
        .u8(ZONE_TERMINATOR)
        .buf(&UNKNOWN_BLOCK_1);
    // length was checked against the field width above
    match variant {
        ProtocolVariant::ShortLength => builder.u16(text.len() as u16),
        ProtocolVariant::ByteLength => builder.u8(text.len() as u8),
    };
    let body = builder
        .buf(&TEXT_PREFIX)
        .buf(text)
        .u8(TEXT_TERMINATOR)
        .finish();

    debug_assert_eq!(body.len(), variant.subheader_len() + text.len() + 1);
    Ok(body)
}

/// Year offset, month, day, hour, minute, second.
fn date_fields(timestamp: NaiveDateTime) -> Result<[u8; 6]> {
    let year = timestamp.year() - BASE_YEAR;
    if !(0..=i32::from(u8::MAX)).contains(&year) {
        return Err(Error::TimestampOutOfRange(timestamp));
    }
    // chrono keeps all of these well below 256
    Ok([
        year as u8,
        timestamp.month() as u8,
        timestamp.day() as u8,
        timestamp.hour() as u8,
        timestamp.minute() as u8,
        timestamp.second() as u8,
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::message::{Color, Font, Priority, Rect, ScrollSpeed};

    fn hello() -> DisplayMessage {
        DisplayMessage::new("HELLO", Color::Yellow, Font::Proportional11)
    }

    #[test]
    fn short_length_layout() {
        let message = hello()
            .with_zone(2)
            .with_rect(Rect {
                x: 1,
                y: 2,
                width: 3,
                height: 4,
            })
            .with_scroll(ScrollSpeed::Fast)
            .with_pause(9)
            .with_volume(5)
            .with_priority(Priority::Follow)
            .with_timestamp("2021-09-09T20:15:30".parse().unwrap());
        let body = build_body(&message, ProtocolVariant::ShortLength).unwrap();

        assert_eq!(&body[0..4], &SUBHEADER_MAGIC, "sub-header magic");
        assert_eq!(body[4], 2, "zone id");
        assert_eq!(&body[5..9], &[1, 2, 3, 4], "rectangle");
        assert_eq!(&body[9..11], &[TAG_SCROLL, 3], "scroll speed");
        assert_eq!(&body[11..13], &[TAG_PAUSE, 9], "pause");
        assert_eq!(&body[13..15], &[TAG_PRIORITY, 3], "priority");
        assert_eq!(&body[15..18], &PARAMETER_BLOCK, "parameter block");
        assert_eq!(&body[18..20], &[TAG_VOLUME, 5], "volume");
        assert_eq!(&body[20..22], &[TAG_FONT, 3], "font");
        assert_eq!(&body[22..24], &[TAG_COLOR, 3], "color");
        assert_eq!(&body[24..28], &UNKNOWN_BLOCK_0, "first unknown block");
        assert_eq!(
            &body[28..36],
            &[TAG_DATE, 21, 9, 9, 20, 15, 30, DATE_TERMINATOR],
            "date"
        );
        assert_eq!(&body[36..39], &CONTENT_BLOCK, "content block");
        assert_eq!(&body[39..42], &[TAG_ZONE, 2, ZONE_TERMINATOR], "zone tag");
        assert_eq!(&body[42..44], &UNKNOWN_BLOCK_1, "second unknown block");
        assert_eq!(&body[44..46], &[5, 0], "message length");
        assert_eq!(&body[46..48], &TEXT_PREFIX, "text prefix");
        assert_eq!(&body[48..53], b"HELLO", "text");
        assert_eq!(body[53], TEXT_TERMINATOR, "terminator");
        assert_eq!(body.len(), 54);
    }

    #[test]
    fn byte_length_layout() {
        let body = build_body(&hello(), ProtocolVariant::ByteLength).unwrap();

        assert_eq!(&body[0..4], &SUBHEADER_MAGIC);
        assert_eq!(&body[15..18], &PARAMETER_BLOCK);
        assert_eq!(
            &body[18..22],
            &[TAG_FONT, 3, TAG_COLOR, 3],
            "Expected font directly after parameter block without volume"
        );
        assert_eq!(&body[22..26], &UNKNOWN_BLOCK_0);
        assert_eq!(
            &body[26..29],
            &CONTENT_BLOCK,
            "Expected content block directly after unknown block without date"
        );
        assert_eq!(&body[29..32], &[TAG_ZONE, 1, ZONE_TERMINATOR]);
        assert_eq!(&body[32..34], &UNKNOWN_BLOCK_1);
        assert_eq!(body[34], 5, "one byte message length");
        assert_eq!(&body[35..37], &TEXT_PREFIX);
        assert_eq!(&body[37..42], b"HELLO");
        assert_eq!(body[42], TEXT_TERMINATOR);
        assert_eq!(body.len(), ProtocolVariant::ByteLength.subheader_len() + 6);
    }

    #[test]
    fn empty_text() {
        let message = DisplayMessage::new("", Color::Red, Font::Monospace7);
        let body = build_body(&message, ProtocolVariant::ShortLength).unwrap();
        assert_eq!(&body[44..46], &[0, 0]);
        assert_eq!(body.len(), 49);
        assert_eq!(body[48], TEXT_TERMINATOR);
    }

    #[test]
    fn byte_length_boundary() {
        let at_limit = DisplayMessage::new(vec![b'x'; 255], Color::Green, Font::Monospace16);
        let body = build_body(&at_limit, ProtocolVariant::ByteLength).unwrap();
        assert_eq!(body[34], 0xFF);

        let over_limit = DisplayMessage::new(vec![b'x'; 256], Color::Green, Font::Monospace16);
        assert_eq!(
            build_body(&over_limit, ProtocolVariant::ByteLength).unwrap_err(),
            Error::MessageTooLong { len: 256, max: 255 }
        );
        build_body(&over_limit, ProtocolVariant::ShortLength).unwrap();
    }

    #[test]
    fn short_length_boundary() {
        let at_limit = DisplayMessage::new(vec![b'x'; 65535], Color::Green, Font::Monospace16);
        let body = build_body(&at_limit, ProtocolVariant::ShortLength).unwrap();
        assert_eq!(&body[44..46], &[0xFF, 0xFF]);

        let over_limit = DisplayMessage::new(vec![b'x'; 65536], Color::Green, Font::Monospace16);
        assert_eq!(
            build_body(&over_limit, ProtocolVariant::ShortLength).unwrap_err(),
            Error::MessageTooLong {
                len: 65536,
                max: 65535
            }
        );
    }

    #[test]
    fn volume_out_of_range() {
        build_body(&hello().with_volume(8), ProtocolVariant::ShortLength).unwrap();
        assert_eq!(
            build_body(&hello().with_volume(9), ProtocolVariant::ShortLength).unwrap_err(),
            Error::VolumeOutOfRange(9)
        );
    }

    #[test]
    fn timestamp_out_of_range() {
        let timestamp: NaiveDateTime = "1999-12-31T23:59:59".parse().unwrap();
        let message = hello().with_timestamp(timestamp);
        assert_eq!(
            build_body(&message, ProtocolVariant::ShortLength).unwrap_err(),
            Error::TimestampOutOfRange(timestamp)
        );
        // no date block, nothing to complain about
        build_body(&message, ProtocolVariant::ByteLength).unwrap();
    }

    #[test]
    fn parse_variant() {
        assert_eq!(
            "byte_length".parse::<ProtocolVariant>().unwrap(),
            ProtocolVariant::ByteLength
        );
        assert!("raw".parse::<ProtocolVariant>().is_err());
    }
}
