// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipe channels: child output streams bridged into accumulated text.
//!
//! Each channel owns the read end of one pipe. Reads never block the
//! worker: a read that would block just waits for the next readiness
//! event. The channel closes on end-of-stream, on a read error, or when
//! the exit waiter cancels it, and the descriptor is released on every
//! one of those paths when the pump task returns.

use std::fs::File;
use std::io::{self, PipeWriter, Read};
use std::os::fd::OwnedFd;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::unix::pipe;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::decode::ChunkDecoder;
use crate::invocation::ChunkHook;

/// Bytes requested per read.
const READ_CHUNK: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// Allocate a pipe and put its read end into non-blocking mode.
///
/// The write end stays blocking; it becomes the child's stdout or stderr.
/// Both ends are close-on-exec, so only the duplicated descriptor survives
/// into the child.
pub(crate) fn open_pipe() -> io::Result<(pipe::Receiver, PipeWriter)> {
    let (reader, writer) = io::pipe()?;
    let receiver = pipe::Receiver::from_owned_fd(OwnedFd::from(reader))?;
    Ok((receiver, writer))
}

/// Serializes chunk callbacks across the two channels of one invocation.
pub(crate) type OutputLock = Arc<Mutex<()>>;

pub(crate) struct PipeChannel {
    receiver: pipe::Receiver,
    output: Output,
}

/// Decoded text of one stream, delivered to its hook as it arrives.
struct Output {
    stream: Stream,
    decoder: ChunkDecoder,
    buffer: String,
    hook: Option<ChunkHook>,
    lock: OutputLock,
}

impl PipeChannel {
    pub(crate) fn new(
        stream: Stream,
        receiver: pipe::Receiver,
        hook: Option<ChunkHook>,
        output_lock: OutputLock,
    ) -> Self {
        Self {
            receiver,
            output: Output {
                stream,
                decoder: ChunkDecoder::default(),
                buffer: String::new(),
                hook,
                lock: output_lock,
            },
        }
    }

    /// Start pumping on the current runtime.
    pub(crate) fn start(self) -> ChannelHandle {
        let stream = self.output.stream;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = tokio::spawn(self.pump(cancel_rx));
        ChannelHandle {
            stream,
            cancel: Some(cancel_tx),
            task,
        }
    }

    async fn pump(self, mut cancel: oneshot::Receiver<()>) -> String {
        let Self {
            receiver,
            mut output,
        } = self;
        let stream = output.stream.as_str();
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            tokio::select! {
                ready = receiver.readable() => {
                    if let Err(e) = ready {
                        tracing::debug!(stream, error = %e, "readiness failed");
                        break;
                    }
                    match receiver.try_read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => output.accept(&buf[..n]),
                        Err(e) if e.kind() == io::ErrorKind::WouldBlock => continue,
                        Err(e) => {
                            tracing::debug!(stream, error = %e, "read failed");
                            break;
                        }
                    }
                }
                // A dropped sender counts as cancellation too
                _ = &mut cancel => {
                    drain(receiver, &mut output, &mut buf);
                    return output.close();
                }
            }
        }
        output.close()
    }
}

/// Take whatever is already buffered in the pipe without waiting for
/// more. Used after the child has exited, when a surviving grandchild may
/// keep the write end open indefinitely.
///
/// Reads go straight to the descriptor: the reactor's cached readiness may
/// not reflect bytes written just before the child exited.
fn drain(receiver: pipe::Receiver, output: &mut Output, buf: &mut [u8]) {
    let fd = match receiver.into_nonblocking_fd() {
        Ok(fd) => fd,
        Err(e) => {
            tracing::debug!(stream = output.stream.as_str(), error = %e, "cannot detach pipe");
            return;
        }
    };
    let mut file = File::from(fd);
    loop {
        match file.read(buf) {
            Ok(0) => break,
            Ok(n) => output.accept(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
            Err(e) => {
                tracing::debug!(stream = output.stream.as_str(), error = %e, "drain failed");
                break;
            }
        }
    }
}

impl Output {
    fn accept(&mut self, bytes: &[u8]) {
        let text = self.decoder.decode(bytes);
        self.deliver(text);
    }

    fn deliver(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(hook) = self.hook.as_mut() {
            let _serial = self.lock.lock();
            hook(&text);
        }
        self.buffer.push_str(&text);
    }

    fn close(mut self) -> String {
        let tail = self.decoder.finish();
        self.deliver(tail);
        tracing::trace!(
            stream = self.stream.as_str(),
            bytes = self.buffer.len(),
            "channel closed"
        );
        self.buffer
    }
}

/// The exit waiter's side of a running channel.
pub(crate) struct ChannelHandle {
    stream: Stream,
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<String>,
}

impl ChannelHandle {
    /// Ask the channel to drain and close. Idempotent.
    pub(crate) fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the close signal and take the accumulated text.
    pub(crate) async fn closed(mut self) -> String {
        self.cancel();
        match self.task.await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(stream = self.stream.as_str(), error = %e, "channel task failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "pipe_tests.rs"]
mod tests;
