mod http;
mod memory;
mod traits;

pub use http::RestClient;
pub use memory::{MemoryClient, RecordOp};
pub use traits::{ClientError, TaskRecords};
