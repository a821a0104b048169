//! ## jsonlog-core::sink
//! **Output destinations for formatted lines**
//!
//! A sink receives complete lines (newline included) and must write each one
//! without interleaving it with concurrent writes to the same destination.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

pub trait Sink: Send + Sync {
    /// Writes one complete line.
    fn write_line(&self, line: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Releases whatever the sink holds. Defaults to a flush.
    fn shutdown(&self) -> io::Result<()> {
        self.flush()
    }
}

/// Sink over any writer, serialized by a mutex.
pub struct StreamSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl StreamSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

/// In-memory sink. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(line.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn stream_sink_writes_through() {
        let sink = StreamSink::new(Vec::new());
        sink.write_line("one\n").unwrap();
        sink.write_line("two\n").unwrap();
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let view = sink.clone();
        assert!(view.is_empty());

        sink.write_line("hello\n").unwrap();
        assert_eq!(view.contents(), "hello\n");
        assert_eq!(view.lines(), vec!["hello".to_string()]);

        view.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let sink = Arc::new(StreamSink::new(Vec::new()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    let line = format!("{}\n", t.to_string().repeat(64));
                    for _ in 0..100 {
                        sink.write_line(&line).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let sink = Arc::try_unwrap(sink).ok().unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 800);
        for line in lines {
            let first = line.chars().next().unwrap();
            assert_eq!(line.len(), 64);
            assert!(line.chars().all(|c| c == first));
        }
    }
}
