use crate::args::SendText;
use netbrite::connection::{self, SignConnection};
use thiserror::Error;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, SendError>;

#[tracing::instrument(skip(opts), fields(address = %opts.address, port = opts.port))]
pub fn send(opts: &SendText) -> Result<()> {
    if opts.port == 0 {
        return Err(SendError::InvalidArgument(
            "port must be in range 1-65535".into(),
        ));
    }

    info!(
        "Connecting to sign at {}:{}, and setting message: {}",
        opts.address, opts.port, opts.text
    );
    let mut connection = SignConnection::builder(&opts.address, opts.port)
        .transport(opts.transport)
        .variant(opts.variant)
        .family(opts.family)
        .connect()?;
    debug!(
        "Connected to {peer} over {transport}",
        peer = connection.peer(),
        transport = opts.transport
    );

    connection.send(&opts.message())?;
    debug!(
        sequence = connection.sequence_number(),
        session = connection.session_number(),
        "Message sent"
    );

    Ok(())
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Connection(#[from] connection::Error),
}
