use anyhow::{Context, Result};
use std::io::{BufRead, ErrorKind};
use tracing::trace;

/// Line buffers start with, and grow by, this many bytes.
const READ_BLOCK: usize = 1024;

/// Reads command lines from a buffered input stream.
///
/// Each call to [`LineReader::read_line`] returns one owned line without its
/// trailing newline. Lines of any length are accepted; the buffer grows one
/// block at a time and a failed reservation is reported as an error instead
/// of aborting.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` once the stream is exhausted and no bytes were read.
    /// A final line without a newline is returned as-is. Invalid UTF-8 is
    /// replaced lossily.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = Vec::new();
        reserve_blocks(&mut line, 0)?;
        let mut saw_input = false;

        loop {
            let available = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("failed to read input"),
            };
            if available.is_empty() {
                if !saw_input {
                    trace!("end of input");
                    return Ok(None);
                }
                break;
            }
            saw_input = true;

            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = match newline {
                Some(i) => &available[..i],
                None => available,
            };
            reserve_blocks(&mut line, chunk.len())?;
            line.extend_from_slice(chunk);

            let consumed = chunk.len() + usize::from(newline.is_some());
            self.input.consume(consumed);
            if newline.is_some() {
                break;
            }
        }

        trace!(bytes = line.len(), "read line");
        Ok(Some(match String::from_utf8(line) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }))
    }
}

/// Make room for `extra` more bytes, rounding capacity up to whole blocks.
fn reserve_blocks(buf: &mut Vec<u8>, extra: usize) -> Result<()> {
    let needed = (buf.len() + extra).max(1);
    if needed <= buf.capacity() {
        return Ok(());
    }
    let target = needed.div_ceil(READ_BLOCK) * READ_BLOCK;
    buf.try_reserve_exact(target - buf.len())
        .context("allocation error")
}
