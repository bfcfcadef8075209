pub mod codec;
pub mod error;
pub mod file_set;
pub mod formats;
pub mod workflow;

pub use error::{CodecError, SetupError};
pub use file_set::FileSet;
pub use formats::OutputFormat;
pub use workflow::{CancelFlag, ConversionRequest, RunObserver, RunSummary};
