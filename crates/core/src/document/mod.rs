pub mod model;
pub mod normalize;
pub mod validate;
pub mod value;

pub use model::{Document, DocumentError, FieldMap, Record};
pub use normalize::normalize;
pub use validate::{validate_campaign_id, ValidationError};
pub use value::{FieldValue, Timestamp};
