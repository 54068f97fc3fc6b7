//! Shows text on NetBrite LED message signs.
//!
//! [message::DisplayMessage] describes what to show, [packet] encodes it into the
//! binary protocol of the sign firmware, and [connection::SignConnection] delivers
//! it over TCP or UDP.
//!
//! ```no_run
//! use netbrite::connection::SignConnection;
//! use netbrite::message::{Color, Font};
//!
//! # fn main() -> Result<(), netbrite::connection::Error> {
//! let mut sign = SignConnection::connect("192.168.1.50", 700)?;
//! sign.send_message("HELLO", Color::Yellow, Font::Proportional11)?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod message;
pub mod packet;
