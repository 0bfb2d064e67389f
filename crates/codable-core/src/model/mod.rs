mod field;
mod record;

pub use self::field::*;
pub use self::record::*;
