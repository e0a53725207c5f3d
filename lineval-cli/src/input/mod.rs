//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod pairing;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
pub use pairing::{load_lines, pair_files, prediction_path, split_all_ext, FilePair, MissingPrediction};
