use argh::FromArgs;
use chrono::NaiveDateTime;
use netbrite::{
    connection::{AddressFamily, Transport},
    message::{
        Color, DisplayMessage, Font, Priority, Rect, ScrollSpeed, DEFAULT_PAUSE, DEFAULT_VOLUME,
        DEFAULT_ZONE,
    },
    packet::ProtocolVariant,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Show text on NetBrite LED signs over the network.
#[derive(FromArgs)]
pub struct TopLevel {
    /// log debug output.
    #[argh(switch, short = 'v')]
    pub verbose: bool,
    #[argh(subcommand)]
    pub invocation: Invocation,
}

/// Inner top-level command.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand)]
#[serde(rename_all = "snake_case")]
pub enum Invocation {
    #[serde(skip)]
    Run(Run),
    Send(SendText),
    Preview(Preview),
}

/// Take run parameters from a specified YAML configuration file.
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
pub struct Run {
    #[argh(positional)]
    pub config: PathBuf,
}

/// Connect to a sign and show the given text on it.
#[derive(FromArgs, Deserialize, Debug)]
#[argh(subcommand, name = "send")]
pub struct SendText {
    /// host name or IP address of the sign.
    #[argh(positional)]
    pub address: String,
    /// port of the sign, in range 1-65535.
    #[argh(positional)]
    pub port: u16,
    /// text to show.
    #[argh(positional)]
    pub text: String,
    /// text color, one of red, green or yellow.
    #[argh(option, default = "Color::default()")]
    #[serde(default)]
    pub color: Color,
    /// font, e.g. proportional_11 or monospace_16.
    #[argh(option, default = "Font::default()")]
    #[serde(default)]
    pub font: Font,
    /// scroll speed, one of slow, medium or fast.
    #[argh(option, default = "ScrollSpeed::default()")]
    #[serde(default)]
    pub scroll: ScrollSpeed,
    /// zone to show the text in.
    #[argh(option, default = "DEFAULT_ZONE")]
    #[serde(default = "default_zone")]
    pub zone: u8,
    /// zone rectangle as x,y,width,height.
    #[argh(option, default = "Rect::default()")]
    #[serde(default)]
    pub rect: Rect,
    /// pause duration.
    #[argh(option, default = "DEFAULT_PAUSE")]
    #[serde(default)]
    pub pause: u8,
    /// volume in range 0-8.
    #[argh(option, default = "DEFAULT_VOLUME")]
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// priority, e.g. override or round_robin.
    #[argh(option, default = "Priority::default()")]
    #[serde(default)]
    pub priority: Priority,
    /// timestamp to send to the sign, e.g. 2022-06-01T12:00:00.
    #[argh(option)]
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    /// protocol variant of the sign firmware, short_length or byte_length.
    #[argh(option, default = "ProtocolVariant::default()")]
    #[serde(default)]
    pub variant: ProtocolVariant,
    /// transport, tcp or udp.
    #[argh(option, default = "Transport::default()")]
    #[serde(default)]
    pub transport: Transport,
    /// restrict resolved addresses to any, ipv4 or ipv6.
    #[argh(option, default = "AddressFamily::default()")]
    #[serde(default)]
    pub family: AddressFamily,
}

/// Print the packet that would be sent for the given text, without connecting.
#[derive(FromArgs, Deserialize, Debug)]
#[argh(subcommand, name = "preview")]
pub struct Preview {
    /// text to show.
    #[argh(positional)]
    pub text: String,
    /// text color, one of red, green or yellow.
    #[argh(option, default = "Color::default()")]
    #[serde(default)]
    pub color: Color,
    /// font, e.g. proportional_11 or monospace_16.
    #[argh(option, default = "Font::default()")]
    #[serde(default)]
    pub font: Font,
    /// scroll speed, one of slow, medium or fast.
    #[argh(option, default = "ScrollSpeed::default()")]
    #[serde(default)]
    pub scroll: ScrollSpeed,
    /// zone to show the text in.
    #[argh(option, default = "DEFAULT_ZONE")]
    #[serde(default = "default_zone")]
    pub zone: u8,
    /// zone rectangle as x,y,width,height.
    #[argh(option, default = "Rect::default()")]
    #[serde(default)]
    pub rect: Rect,
    /// pause duration.
    #[argh(option, default = "DEFAULT_PAUSE")]
    #[serde(default)]
    pub pause: u8,
    /// volume in range 0-8.
    #[argh(option, default = "DEFAULT_VOLUME")]
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// priority, e.g. override or round_robin.
    #[argh(option, default = "Priority::default()")]
    #[serde(default)]
    pub priority: Priority,
    /// timestamp to send to the sign, e.g. 2022-06-01T12:00:00.
    #[argh(option)]
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    /// protocol variant of the sign firmware, short_length or byte_length.
    #[argh(option, default = "ProtocolVariant::default()")]
    #[serde(default)]
    pub variant: ProtocolVariant,
    /// sequence number to stamp into the header.
    #[argh(option, default = "1")]
    #[serde(default = "first_sequence")]
    pub sequence: u16,
    /// session number to stamp into the header.
    #[argh(option, default = "1")]
    #[serde(default = "first_session")]
    pub session: u8,
}

impl SendText {
    pub fn message(&self) -> DisplayMessage {
        let message = DisplayMessage::new(self.text.as_bytes(), self.color, self.font)
            .with_scroll(self.scroll)
            .with_zone(self.zone)
            .with_rect(self.rect)
            .with_pause(self.pause)
            .with_volume(self.volume)
            .with_priority(self.priority);
        match self.timestamp {
            Some(timestamp) => message.with_timestamp(timestamp),
            None => message,
        }
    }
}

impl Preview {
    pub fn message(&self) -> DisplayMessage {
        let message = DisplayMessage::new(self.text.as_bytes(), self.color, self.font)
            .with_scroll(self.scroll)
            .with_zone(self.zone)
            .with_rect(self.rect)
            .with_pause(self.pause)
            .with_volume(self.volume)
            .with_priority(self.priority);
        match self.timestamp {
            Some(timestamp) => message.with_timestamp(timestamp),
            None => message,
        }
    }
}

fn default_zone() -> u8 {
    DEFAULT_ZONE
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

fn first_sequence() -> u16 {
    1
}

fn first_session() -> u8 {
    1
}
