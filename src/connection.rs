//! A live connection to a single sign.
//!
//! The connection owns the socket and the sequence and session counters that
//! make each packet distinguishable to the sign. Both counters start at zero, the
//! first packet carries one for each, and each wraps around independently.

use crate::message::{Color, DisplayMessage, Font};
use crate::packet::{self, ProtocolVariant};
use std::{
    io,
    net::{SocketAddr, ToSocketAddrs},
};

mod endpoint;
mod error;

use endpoint::Endpoint;

pub use endpoint::{AddressFamily, Transport};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub struct SignConnection {
    address: String,
    port: u16,
    peer: SocketAddr,
    endpoint: Endpoint,
    variant: ProtocolVariant,
    sequence_number: u16,
    session_number: u8,
}

/// Connection options, obtained through [SignConnection::builder].
#[derive(Debug, Clone)]
pub struct SignConnectionBuilder {
    address: String,
    port: u16,
    transport: Transport,
    variant: ProtocolVariant,
    family: AddressFamily,
}

impl SignConnectionBuilder {
    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn variant(mut self, variant: ProtocolVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    /// Resolves the address and connects to the first usable result.
    pub fn connect(self) -> Result<SignConnection> {
        let candidates = resolve(&self.address, self.port, self.family)?;
        let (endpoint, peer) = Endpoint::open(&candidates, self.transport)?;
        Ok(SignConnection {
            address: self.address,
            port: self.port,
            peer,
            endpoint,
            variant: self.variant,
            sequence_number: 0,
            session_number: 0,
        })
    }
}

impl SignConnection {
    /// Connects over TCP, speaking the short length protocol variant.
    pub fn connect(address: &str, port: u16) -> Result<Self> {
        Self::builder(address, port).connect()
    }

    pub fn builder(address: &str, port: u16) -> SignConnectionBuilder {
        SignConnectionBuilder {
            address: address.into(),
            port,
            transport: Transport::default(),
            variant: ProtocolVariant::default(),
            family: AddressFamily::default(),
        }
    }

    /// Shows the text in the given color and font, using defaults for everything
    /// else.
    ///
    /// Texts too long for the protocol variant fail with an error for which
    /// [Error::is_message_too_long] holds.
    pub fn send_message(
        &mut self,
        text: impl Into<Vec<u8>>,
        color: Color,
        font: Font,
    ) -> Result<()> {
        self.send(&DisplayMessage::new(text, color, font))
    }

    /// Builds the packet for the message with the next counter values and writes
    /// it to the sign.
    ///
    /// If the packet can not be built, the counters stay where they were. Once
    /// writing has been attempted, the counters are advanced even if it failed.
    pub fn send(&mut self, message: &DisplayMessage) -> Result<()> {
        let sequence_number = self.sequence_number.wrapping_add(1);
        let session_number = self.session_number.wrapping_add(1);
        let packet = packet::assemble(message, self.variant, sequence_number, session_number)?;

        // the sign may have seen these numbers from here on
        self.sequence_number = sequence_number;
        self.session_number = session_number;

        let peer = self.peer;
        self.endpoint
            .send(packet.as_bytes())
            .map_err(|source| Error::SendFailed { peer, source })
    }

    /// Sequence number of the last packet sent, zero before the first one.
    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    /// Session number of the last packet sent, zero before the first one.
    pub fn session_number(&self) -> u8 {
        self.session_number
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The resolved socket address actually connected to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }
}

impl Drop for SignConnection {
    fn drop(&mut self) {
        self.endpoint.shutdown();
    }
}

fn resolve(address: &str, port: u16, family: AddressFamily) -> Result<Vec<SocketAddr>> {
    let resolved: Vec<SocketAddr> = (address, port)
        .to_socket_addrs()
        .map_err(|e| Error::resolution(address, port, e))?
        .collect();
    if resolved.is_empty() {
        return Err(Error::resolution(
            address,
            port,
            io::Error::new(io::ErrorKind::NotFound, "name resolved to no addresses"),
        ));
    }

    let candidates: Vec<SocketAddr> = resolved
        .into_iter()
        .filter(|candidate| family.admits(candidate))
        .collect();
    if candidates.is_empty() {
        return Err(Error::UnsupportedAddressFamily {
            address: address.into(),
            family,
        });
    }

    Ok(candidates)
}
