//! Display messages and the attribute catalogs understood by NetBrite signs.
//!
//! A [DisplayMessage] is everything the sign needs to know to render one piece of
//! text into one zone. It is built once with [DisplayMessage::new], adjusted with
//! the consuming `with_` methods and then only read by the packet builder.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// Placeholder timestamp sent when the caller does not care about the sign clock.
    pub static ref DEFAULT_TIMESTAMP: NaiveDateTime = NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("2022-01-01T00:00:00 is a valid date");
}

pub const DEFAULT_ZONE: u8 = 1;
pub const DEFAULT_PAUSE: u8 = 0;
pub const DEFAULT_VOLUME: u8 = 4;
/// Highest volume level the sign accepts.
pub const MAX_VOLUME: u8 = 8;
/// The whole visible area of the sign.
pub const FULL_DISPLAY: Rect = Rect {
    x: 0,
    y: 0,
    width: 200,
    height: 16,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    zone: u8,
    rect: Rect,
    scroll: ScrollSpeed,
    pause: u8,
    volume: u8,
    priority: Priority,
    font: Font,
    color: Color,
    timestamp: NaiveDateTime,
    text: Vec<u8>,
}

impl DisplayMessage {
    /// A message covering the full display in zone 1, scrolling at medium speed
    /// without pause, at volume 4 and stamped with [DEFAULT_TIMESTAMP].
    pub fn new(text: impl Into<Vec<u8>>, color: Color, font: Font) -> Self {
        DisplayMessage {
            zone: DEFAULT_ZONE,
            rect: FULL_DISPLAY,
            scroll: ScrollSpeed::default(),
            pause: DEFAULT_PAUSE,
            volume: DEFAULT_VOLUME,
            priority: Priority::default(),
            font,
            color,
            timestamp: *DEFAULT_TIMESTAMP,
            text: text.into(),
        }
    }

    pub fn with_zone(mut self, zone: u8) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollSpeed) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_pause(mut self, pause: u8) -> Self {
        self.pause = pause;
        self
    }

    /// Sets the volume. Values above [MAX_VOLUME] are accepted here but rejected
    /// when the packet body is built.
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn scroll(&self) -> ScrollSpeed {
        self.scroll
    }

    pub fn pause(&self) -> u8 {
        self.pause
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Raw text bytes, sent to the sign without any transcoding.
    pub fn text(&self) -> &[u8] {
        &self.text[..]
    }
}

/// A rectangle in display coordinates, upper-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Default for Rect {
    fn default() -> Self {
        FULL_DISPLAY
    }
}

/// Parses `x,y,width,height`, e.g. `0,0,200,16`.
impl FromStr for Rect {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let numbers = source
            .split(',')
            .map(|n| n.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| ParseAttributeError::unknown("rectangle", source))?;
        match numbers[..] {
            [x, y, width, height] => Ok(Rect {
                x,
                y,
                width,
                height,
            }),
            _ => Err(ParseAttributeError::unknown("rectangle", source)),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red = 1,
    Green = 2,
    Yellow = 3,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSpeed {
    Slow = 1,
    Medium = 2,
    Fast = 3,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Override = 1,
    Interrupt = 2,
    Follow = 3,
    Yield = 4,
    RoundRobin = 10,
}

/// The bitmap fonts built into the sign firmware.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Font {
    #[serde(rename = "monospace_16")]
    Monospace16 = 0,
    #[serde(rename = "proportional_7")]
    Proportional7 = 1,
    #[serde(rename = "proportional_5")]
    Proportional5 = 2,
    #[serde(rename = "proportional_11")]
    Proportional11 = 3,
    #[serde(rename = "monospace_24")]
    Monospace24 = 4,
    #[serde(rename = "bold_proportional_7")]
    BoldProportional7 = 5,
    #[serde(rename = "bold_proportional_11")]
    BoldProportional11 = 6,
    #[serde(rename = "monospace_7")]
    Monospace7 = 7,
    #[serde(rename = "script_16")]
    Script16 = 8,
    #[serde(rename = "proportional_9")]
    Proportional9 = 9,
    #[serde(rename = "picture_24")]
    Picture24 = 10,
}

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl ScrollSpeed {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Priority {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Font {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Yellow
    }
}

impl Default for ScrollSpeed {
    fn default() -> Self {
        ScrollSpeed::Medium
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Override
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::Proportional11
    }
}

impl FromStr for Color {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source {
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            _ => Err(ParseAttributeError::unknown("color", source)),
        }
    }
}

impl FromStr for ScrollSpeed {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source {
            "slow" => Ok(ScrollSpeed::Slow),
            "medium" => Ok(ScrollSpeed::Medium),
            "fast" => Ok(ScrollSpeed::Fast),
            _ => Err(ParseAttributeError::unknown("scroll speed", source)),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source {
            "override" => Ok(Priority::Override),
            "interrupt" => Ok(Priority::Interrupt),
            "follow" => Ok(Priority::Follow),
            "yield" => Ok(Priority::Yield),
            "round_robin" => Ok(Priority::RoundRobin),
            _ => Err(ParseAttributeError::unknown("priority", source)),
        }
    }
}

impl FromStr for Font {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let font = match source {
            "monospace_16" => Font::Monospace16,
            "proportional_7" => Font::Proportional7,
            "proportional_5" => Font::Proportional5,
            "proportional_11" => Font::Proportional11,
            "monospace_24" => Font::Monospace24,
            "bold_proportional_7" => Font::BoldProportional7,
            "bold_proportional_11" => Font::BoldProportional11,
            "monospace_7" => Font::Monospace7,
            "script_16" => Font::Script16,
            "proportional_9" => Font::Proportional9,
            "picture_24" => Font::Picture24,
            _ => return Err(ParseAttributeError::unknown("font", source)),
        };
        Ok(font)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAttributeError {
    #[error("Unknown {attribute}: `{input}`")]
    Unknown {
        attribute: &'static str,
        input: String,
    },
}

impl ParseAttributeError {
    pub(crate) fn unknown(attribute: &'static str, source: &str) -> Self {
        Self::Unknown {
            attribute,
            input: source.to_string(),
        }
    }
}
