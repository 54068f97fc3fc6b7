use super::{AddressFamily, Transport};
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not resolve sign address {address}:{port}, error: {source}")]
    ResolutionFailed {
        address: String,
        port: u16,
        source: std::io::Error,
    },
    #[error("Sign address {address} did not resolve to any {family} address")]
    UnsupportedAddressFamily {
        address: String,
        family: AddressFamily,
    },
    #[error("Could not create {transport} socket, error: {source}")]
    SocketCreationFailed {
        transport: Transport,
        source: std::io::Error,
    },
    #[error("Could not connect to sign at {peer}, error: {source}")]
    ConnectionFailed {
        peer: SocketAddr,
        source: std::io::Error,
    },
    #[error("Could not build packet: {0}")]
    Packet(#[from] crate::packet::Error),
    #[error("Could not send message to sign at {peer}, error: {source}")]
    SendFailed {
        peer: SocketAddr,
        source: std::io::Error,
    },
}

impl Error {
    pub(super) fn resolution(address: &str, port: u16, source: std::io::Error) -> Self {
        Self::ResolutionFailed {
            address: address.into(),
            port,
            source,
        }
    }

    /// Whether the message was rejected for being too long, either for the
    /// message length field or for the body length field of the header.
    pub fn is_message_too_long(&self) -> bool {
        matches!(
            self,
            Error::Packet(crate::packet::Error::MessageTooLong { .. })
                | Error::Packet(crate::packet::Error::ValueTooLarge { .. })
        )
    }
}
