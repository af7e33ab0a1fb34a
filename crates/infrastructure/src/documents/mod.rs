//! Document decoding and node lookup

mod path;
mod reader;

pub use path::find_node;
pub use reader::SerdeDocumentReader;
