pub mod doctor;
pub mod memory;
pub mod reset;
pub mod streak;
