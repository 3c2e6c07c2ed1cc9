pub mod identity;
pub mod pickups;
