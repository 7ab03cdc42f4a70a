pub mod scanner;

pub use scanner::{IwScanner, ScanProvider, ScanSession};
