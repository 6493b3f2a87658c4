pub mod dances;
pub mod regions;
