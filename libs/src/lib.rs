pub mod field_structures;
pub mod group_structures;
