//! Byte sinks for the serializer
//!
//! A [`Sink`] owns the output buffer the serializer writes into and decides
//! what happens when the buffer runs out of space (grow it, drain it, or
//! fail) and when a complete top-level value has been produced.

use std::io::Write;

use super::SerializeError;
use crate::event::Event;

/// A byte sink receiving serialized JSON output
///
/// The serializer writes into the buffer returned by [`buf`](Self::buf),
/// tracking the number of occupied bytes itself and passing it to the
/// [`overflow`](Self::overflow) and [`flush`](Self::flush) hooks. The
/// buffer's length is its capacity.
///
/// Two invariants are guaranteed by the serializer: `overflow` is never
/// called in the middle of a UTF-8 sequence or escape sequence (those are
/// written atomically), and `flush` is called exactly once after each
/// complete top-level value, never after the absent events closing the
/// value sequence.
pub trait Sink {
    /// The current output buffer; its length is the capacity
    fn buf(&mut self) -> &mut [u8];

    /// Number of bytes in the buffer which are already occupied when
    /// serialization starts
    ///
    /// Used by sinks which append to existing content.
    fn initial_size(&self) -> usize {
        0
    }

    /// Called when the next write would exceed the buffer capacity
    ///
    /// `extra` is a hint indicating the extra space likely to be required.
    /// Implementations can either grow the buffer (preserving its contents)
    /// or drain `*size` bytes to the final destination and reset `*size` to
    /// 0. If afterwards the free capacity is still insufficient, the
    /// serializer fails with a `buffer_overflow` error; the default
    /// implementation therefore simply rejects the write by doing nothing.
    fn overflow(
        &mut self,
        size: &mut usize,
        event: Event,
        extra: usize,
    ) -> Result<(), SerializeError> {
        let _ = (size, event, extra);
        Ok(())
    }

    /// Called once after each complete top-level value
    fn flush(&mut self, size: &mut usize, event: Event) -> Result<(), SerializeError> {
        let _ = (size, event);
        Ok(())
    }
}

/// Sink which appends to a growable `Vec<u8>`
///
/// Existing content of the vector is preserved. After each complete
/// top-level value the vector is trimmed to the serialized content, so once
/// serialization is finished the vector holds exactly the output text.
///
/// For a `String` result, serialize to a `Vec<u8>` and convert with
/// [`String::from_utf8`] (serialization with checking disabled may produce
/// non-UTF-8 output, which a `String` cannot hold).
pub struct VecSink<'a> {
    vec: &'a mut Vec<u8>,
    initial_size: usize,
}

impl<'a> VecSink<'a> {
    /// Creates a sink appending to the given vector
    pub fn new(vec: &'a mut Vec<u8>) -> Self {
        let initial_size = vec.len();
        Self { vec, initial_size }
    }
}

impl Sink for VecSink<'_> {
    fn buf(&mut self) -> &mut [u8] {
        self.vec
    }

    fn initial_size(&self) -> usize {
        self.initial_size
    }

    fn overflow(
        &mut self,
        _size: &mut usize,
        _event: Event,
        extra: usize,
    ) -> Result<(), SerializeError> {
        let new_len = self.vec.len() + extra;
        self.vec.resize(new_len, 0);
        // Use whatever additional capacity the allocator handed out
        let capacity = self.vec.capacity();
        self.vec.resize(capacity, 0);
        Ok(())
    }

    fn flush(&mut self, size: &mut usize, _event: Event) -> Result<(), SerializeError> {
        self.vec.truncate(*size);
        Ok(())
    }
}

/// Sink writing into a fixed byte buffer
///
/// If the buffer is not big enough for the output text, the
/// [`Serializer::next`](super::Serializer::next) call which reaches the
/// limit fails with a `buffer_overflow` error. The number of bytes written
/// is available via [`Serializer::size`](super::Serializer::size).
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
}

impl<'a> SliceSink<'a> {
    /// Creates a sink writing into the given buffer
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }
}

impl Sink for SliceSink<'_> {
    fn buf(&mut self) -> &mut [u8] {
        self.buf
    }

    // A fixed buffer cannot grow; the default `overflow` rejects the write
}

const STREAM_SCRATCH_SIZE: usize = 4096;

/// Sink draining into a [`Write`] through a 4 KiB scratch buffer
///
/// The scratch buffer is drained to the writer whenever it runs out of
/// space, and after each complete top-level value (which also flushes the
/// writer). Errors of the writer surface as [`SerializeError::Io`].
pub struct StreamSink<W: Write> {
    writer: W,
    scratch: Vec<u8>,
}

impl<W: Write> StreamSink<W> {
    /// Creates a sink draining into the given writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: vec![0; STREAM_SCRATCH_SIZE],
        }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn drain(&mut self, size: &mut usize) -> Result<(), SerializeError> {
        self.writer.write_all(&self.scratch[..*size])?;
        *size = 0;
        Ok(())
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn buf(&mut self) -> &mut [u8] {
        &mut self.scratch
    }

    fn overflow(
        &mut self,
        size: &mut usize,
        _event: Event,
        _extra: usize,
    ) -> Result<(), SerializeError> {
        self.drain(size)
    }

    fn flush(&mut self, size: &mut usize, _event: Event) -> Result<(), SerializeError> {
        self.drain(size)?;
        self.writer.flush()?;
        Ok(())
    }
}
