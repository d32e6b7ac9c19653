//! Destinations for the dualizer's verbose summary.

use std::io::{self, Write};

/// Where verbose output is written
#[derive(Default)]
pub(crate) enum PrintTarget {
    #[default]
    Stdout,
    Buffer(Vec<u8>),
    Stream(Box<dyn Write + Send + Sync>),
    Sink,
}

impl std::fmt::Debug for PrintTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrintTarget::Stdout => "Stdout",
            PrintTarget::Buffer(_) => "Buffer",
            PrintTarget::Stream(_) => "Stream",
            PrintTarget::Sink => "Sink",
        };
        f.write_str(name)
    }
}

impl Write for PrintTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PrintTarget::Stdout => io::stdout().write(buf),
            PrintTarget::Buffer(bytes) => bytes.write(buf),
            PrintTarget::Stream(stream) => stream.write(buf),
            PrintTarget::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PrintTarget::Stdout => io::stdout().flush(),
            PrintTarget::Stream(stream) => stream.flush(),
            PrintTarget::Buffer(_) | PrintTarget::Sink => Ok(()),
        }
    }
}

/// Redirection of verbose output.
///
/// Files are passed to [`print_to_stream`](ConfigurablePrintTarget::print_to_stream)
/// like any other writer.
pub trait ConfigurablePrintTarget {
    fn print_to_stdout(&mut self);
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>);
    /// discard output
    fn print_to_sink(&mut self);
    /// collect output in memory, see [`get_print_buffer`](ConfigurablePrintTarget::get_print_buffer)
    fn print_to_buffer(&mut self);
    /// output collected since the last `print_to_buffer`
    fn get_print_buffer(&mut self) -> io::Result<String>;
}

impl ConfigurablePrintTarget for PrintTarget {
    fn print_to_stdout(&mut self) {
        *self = PrintTarget::Stdout;
    }

    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        *self = PrintTarget::Stream(stream);
    }

    fn print_to_sink(&mut self) {
        *self = PrintTarget::Sink;
    }

    fn print_to_buffer(&mut self) {
        *self = PrintTarget::Buffer(Vec::new());
    }

    fn get_print_buffer(&mut self) -> io::Result<String> {
        match self {
            PrintTarget::Buffer(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            other => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("output is not buffered (target is {other:?})"),
            )),
        }
    }
}
