pub mod admin;
pub mod communities;
pub mod health;
pub mod issues;
pub mod me;
pub mod pickups;
