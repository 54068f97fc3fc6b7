use crate::args::Preview;
use netbrite::packet::{self, Packet};
use tracing::debug;

/// Assembles the packet for the given options and prints it to stdout.
#[tracing::instrument(skip(opts))]
pub fn preview(opts: &Preview) -> Result<(), packet::Error> {
    let packet = assemble(opts)?;
    debug!(
        len = packet.as_bytes().len(),
        body_length = packet.body_length(),
        checksum = packet.checksum(),
        "Assembled packet"
    );
    println!("{:?}", packet);
    Ok(())
}

fn assemble(opts: &Preview) -> Result<Packet, packet::Error> {
    packet::assemble(&opts.message(), opts.variant, opts.sequence, opts.session)
}
