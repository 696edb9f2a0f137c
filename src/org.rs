//! Organization-domain identifiers, verification tokens, and organization records.

pub mod domain;
pub mod id;
pub mod record;
pub mod token;

pub use domain::*;
pub use id::*;
pub use record::*;
pub use token::*;
