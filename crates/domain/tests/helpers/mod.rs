pub mod builders;

pub use builders::ZoneRecordBuilder;
