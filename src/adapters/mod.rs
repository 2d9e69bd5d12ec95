// Adapters layer: concrete implementations of the domain ports.

pub mod reader;

pub use reader::DefaultSourceReader;
