mod record;
mod record_type;
mod resource_data;

pub use record::ZoneRecord;
pub use record_type::RecordType;
pub use resource_data::{
    ResourceData, ResourceRecord, SoaData, DEFAULT_MX_PRIORITY, DEFAULT_SRV_PRIORITY,
};
