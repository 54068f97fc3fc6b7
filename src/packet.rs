//! NetBrite packets.
//!
//! A packet is a fixed-size header, the body with its interior escaped, and a
//! footer holding a CRC16 over header and unescaped body followed by an
//! end-of-message byte. All multi-byte fields are little-endian.
//!
//! Building is pure: the functions here neither perform I/O nor log.

use crate::message::DisplayMessage;
use std::fmt;

mod body;
mod builder;
mod checksum;
mod error;
mod escape;
mod header;

pub use body::{build_body, ProtocolVariant};
pub use checksum::compute_checksum;
pub use error::Error;
pub use escape::{escape_body, unescape_body};
pub use header::{build_header, HEADER_LEN};

pub type Result<T> = std::result::Result<T, Error>;

pub const END_OF_MESSAGE: u8 = 0x04;
pub const FOOTER_LEN: usize = 3;

/// A finished packet, ready to be written to the sign as is.
///
/// Produced by [assemble], which guarantees at least a full header and footer.
#[derive(Clone, PartialEq, Eq)]
pub struct Packet(Vec<u8>);

impl Packet {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn header(&self) -> &[u8] {
        &self.0[..HEADER_LEN]
    }

    /// The body as transmitted, that is, with its interior escaped.
    pub fn escaped_body(&self) -> &[u8] {
        &self.0[HEADER_LEN..self.0.len() - FOOTER_LEN]
    }

    pub fn footer(&self) -> &[u8] {
        &self.0[self.0.len() - FOOTER_LEN..]
    }

    /// Length of the unescaped body as announced in the header.
    pub fn body_length(&self) -> u16 {
        self.header_u16(header::BODY_LENGTH_OFFSET)
    }

    pub fn sequence_number(&self) -> u16 {
        self.header_u16(header::SEQUENCE_OFFSET)
    }

    pub fn session_number(&self) -> u8 {
        self.0[header::SESSION_OFFSET]
    }

    pub fn checksum(&self) -> u16 {
        let footer = self.footer();
        u16::from_le_bytes([footer[0], footer[1]])
    }

    fn header_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.0[offset], self.0[offset + 1]])
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<H:{header}><B:{body}><F:{footer}>",
            header = hex(self.header()),
            body = hex(self.escaped_body()),
            footer = hex(self.footer())
        )
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the complete packet for a message, stamped with the given sequence
/// and session numbers.
pub fn assemble(
    message: &DisplayMessage,
    variant: ProtocolVariant,
    sequence_number: u16,
    session_number: u8,
) -> Result<Packet> {
    let body = build_body(message, variant)?;
    let header = build_header(body.len(), sequence_number, session_number)?;
    // checksum covers the body before escaping
    let checksum = checksum::compute_checksum_of(&[&header[..], &body[..]]);
    let escaped = escape_body(&body);

    let mut data = Vec::with_capacity(header.len() + escaped.len() + FOOTER_LEN);
    data.extend_from_slice(&header);
    data.extend(escaped);
    data.extend(&checksum.to_le_bytes());
    data.push(END_OF_MESSAGE);
    Ok(Packet(data))
}
