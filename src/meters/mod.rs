pub mod matcher;
pub mod record;
pub mod street_name;
