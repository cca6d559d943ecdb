//! Form state: field objects, the partnership form, and validation rules

mod field;
mod form_state;
pub mod partner;
mod path;
pub mod rules;
pub mod submit;

pub use field::*;
pub use form_state::*;
pub use partner::{ContactFields, FieldRef, PartnerForm, TOTAL_STEPS};
pub use path::{FieldPath, Section};
pub use rules::ErrorMap;
