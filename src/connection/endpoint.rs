use super::{Error, Result};
use crate::message::ParseAttributeError;
use serde::Deserialize;
use std::{
    fmt,
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpStream, UdpSocket},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    Tcp,
    Udp,
}

/// Restricts which resolved addresses are considered when connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFamily {
    Any,
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn admits(self, address: &SocketAddr) -> bool {
        match (self, address) {
            (AddressFamily::Any, _) => true,
            (AddressFamily::Ipv4, SocketAddr::V4(_)) => true,
            (AddressFamily::Ipv6, SocketAddr::V6(_)) => true,
            _ => false,
        }
    }
}

/// An open socket to the sign.
pub enum Endpoint {
    Stream(TcpStream),
    Datagram(UdpSocket),
    #[cfg(test)]
    Mock(mock::MockEndpoint),
}

impl Endpoint {
    /// Connects to the first candidate that accepts, reporting the error of the
    /// last one if none does. Candidates must not be empty.
    pub fn open(
        candidates: &[SocketAddr],
        transport: Transport,
    ) -> Result<(Endpoint, SocketAddr)> {
        debug_assert!(!candidates.is_empty(), "Expected at least one candidate");
        let mut last_err = None;
        for &peer in candidates {
            let opened = match transport {
                Transport::Tcp => TcpStream::connect(peer)
                    .map(Endpoint::Stream)
                    .map_err(|source| Error::ConnectionFailed { peer, source }),
                Transport::Udp => open_datagram(peer).map(Endpoint::Datagram),
            };
            match opened {
                Ok(endpoint) => return Ok((endpoint, peer)),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| Error::ConnectionFailed {
            peer: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            source: io::Error::new(io::ErrorKind::AddrNotAvailable, "no address to connect to"),
        }))
    }

    /// Sends the whole buffer in one blocking call.
    pub fn send(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            Endpoint::Stream(stream) => stream.write_all(data),
            Endpoint::Datagram(socket) => {
                let sent = socket.send(data)?;
                if sent != data.len() {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("datagram truncated to {} of {} bytes", sent, data.len()),
                    ));
                }
                Ok(())
            }
            #[cfg(test)]
            Endpoint::Mock(mock) => mock.send(data),
        }
    }

    /// Closes the connection, ignoring any errors.
    pub fn shutdown(&mut self) {
        match self {
            Endpoint::Stream(stream) => {
                let _ = stream.shutdown(Shutdown::Both);
            }
            // nothing to tear down besides the handle itself
            Endpoint::Datagram(_) => {}
            #[cfg(test)]
            Endpoint::Mock(_) => {}
        }
    }
}

fn open_datagram(peer: SocketAddr) -> Result<UdpSocket> {
    let local = match peer {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    };
    let socket = UdpSocket::bind(local).map_err(|source| Error::SocketCreationFailed {
        transport: Transport::Udp,
        source,
    })?;
    socket
        .connect(peer)
        .map_err(|source| Error::ConnectionFailed { peer, source })?;
    Ok(socket)
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Tcp
    }
}

impl Default for AddressFamily {
    fn default() -> Self {
        AddressFamily::Any
    }
}

impl FromStr for Transport {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> std::result::Result<Self, Self::Err> {
        match source {
            "tcp" => Ok(Transport::Tcp),
            "udp" => Ok(Transport::Udp),
            _ => Err(ParseAttributeError::unknown("transport", source)),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = ParseAttributeError;

    fn from_str(source: &str) -> std::result::Result<Self, Self::Err> {
        match source {
            "any" => Ok(AddressFamily::Any),
            "ipv4" => Ok(AddressFamily::Ipv4),
            "ipv6" => Ok(AddressFamily::Ipv6),
            _ => Err(ParseAttributeError::unknown("address family", source)),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "TCP"),
            Transport::Udp => write!(f, "UDP"),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressFamily::Any => write!(f, "IPv4 or IPv6"),
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn family_filter() {
        let v4: SocketAddr = "127.0.0.1:700".parse().unwrap();
        let v6: SocketAddr = "[::1]:700".parse().unwrap();
        assert!(AddressFamily::Any.admits(&v4));
        assert!(AddressFamily::Any.admits(&v6));
        assert!(AddressFamily::Ipv4.admits(&v4));
        assert!(!AddressFamily::Ipv4.admits(&v6));
        assert!(AddressFamily::Ipv6.admits(&v6));
        assert!(!AddressFamily::Ipv6.admits(&v4));
    }

    #[test]
    fn parse_transport() {
        assert_eq!("udp".parse::<Transport>().unwrap(), Transport::Udp);
        assert!("sctp".parse::<Transport>().is_err());
    }

    #[test]
    fn mock_plan() {
        let mut mock = mock::MockEndpoint::builder()
            .accept()
            .fail(io::ErrorKind::BrokenPipe)
            .build();
        mock.send(b"one").unwrap();
        assert_eq!(
            mock.send(b"two").unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
        mock.send(b"three").unwrap();
        assert_eq!(mock.sent(), &[b"one".to_vec(), b"three".to_vec()]);
    }
}
