//! Raw byte output for external statistical test batteries.

use std::io::{ErrorKind, Write};

use tracing::{debug, info};
use truernd::{HwRng, Source};
use zeroize::Zeroize;

use crate::error::CliError;

const BLOCK: usize = 8192;

/// Write hardware random bytes to `out` until `limit` bytes have been
/// written, or forever when `limit` is `None`. A closed reader (broken pipe)
/// ends the stream normally. Returns the number of bytes written.
pub fn run<S: Source, W: Write>(
    rng: &mut HwRng<S>,
    out: &mut W,
    limit: Option<u64>,
) -> Result<u64, CliError> {
    let mut block = [0u8; BLOCK];
    let result = pump(rng, out, limit, &mut block);
    block.zeroize();
    result
}

fn pump<S: Source, W: Write>(
    rng: &mut HwRng<S>,
    out: &mut W,
    limit: Option<u64>,
    block: &mut [u8; BLOCK],
) -> Result<u64, CliError> {
    let mut written: u64 = 0;
    loop {
        let len = match limit {
            Some(limit) if written >= limit => break,
            Some(limit) => {
                usize::try_from(limit - written).map_or(BLOCK, |rest| BLOCK.min(rest))
            }
            None => BLOCK,
        };

        rng.fill(&mut block[..len])?;
        match out.write_all(&block[..len]) {
            Ok(()) => written += len as u64,
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                debug!(written, "reader closed the stream");
                return Ok(written);
            }
            Err(err) => return Err(err.into()),
        }
    }
    match out.flush() {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::BrokenPipe => {}
        Err(err) => return Err(err.into()),
    }
    info!(written, "stream finished");
    Ok(written)
}
