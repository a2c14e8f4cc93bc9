//! Reading messages from a transport.
//!
//! Head readers drive the parsers over a [`ByteSource`]; body readers
//! deliver the body according to the message framing.

mod body;
mod bound;
mod chunked;
mod eof;
mod error;
mod head;
mod options;
mod source;

// Re-export public items
pub use body::BodyReader;
pub use bound::BoundBodyReader;
pub use chunked::ChunkedBodyReader;
pub use eof::EofBodyReader;
pub use error::{MakeBodyReaderError, ReadError};
pub use head::{read_request, read_response};
pub use options::ReadOptions;
pub use source::{BufferedStream, ByteSource};
