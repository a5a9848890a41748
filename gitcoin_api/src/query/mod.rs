mod common;
pub use self::common::{FilterValue, Query};
mod schema;
pub use self::schema::{FieldRule, FieldSchema, Normalizer};

mod params;
pub use self::params::ParameterSet;

mod bounty;
pub use self::bounty::bounty_schema;

pub mod validation;
