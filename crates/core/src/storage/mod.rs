mod error;
pub mod expression;
mod traits;
mod types;
pub mod updates;
mod value;

pub use error::{Result, StoreError};
pub use traits::UserBackend;
pub use types::{UpdateRequest, UpdatedAttributes};
pub use value::{Attributes, FieldValue, ValueKind};
