#![allow(dead_code)]

mod dns_messages;
mod zone_fixtures;

pub use dns_messages::*;
pub use zone_fixtures::*;
