//! Structure export: path canonicalization, tree rendering and encoding.

pub mod encode;
pub mod errors;
pub mod path_codec;
pub mod serializer;
pub mod tree;

pub use encode::{Encoder, JsonEncoder, OutputFormat, XmlEncoder};
pub use errors::ExportError;
pub use path_codec::{PathCase, PathContext};
pub use serializer::{render, render_with, StructureSerializer};
pub use tree::{Node, Tree};
