pub mod air_quality_record;
pub mod class_map;
pub mod daily_record;
pub mod date_map;
pub mod example;
