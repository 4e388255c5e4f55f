pub mod error;
pub mod scenario;
pub mod types;

pub use error::WhatIfError;
pub use types::*;

/// Standard result type for all engine operations
pub type WhatIfResult<T> = Result<T, WhatIfError>;
