pub mod record;
pub mod style;

pub use record::PostRecord;
pub use style::Style;
