pub mod delimited;

pub use delimited::{FormatError, FormatErrorKind, LoadError, LoadOptions, LoadedDeck, load, load_from_reader};
