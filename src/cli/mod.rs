pub mod doctor;
pub mod handoffs;
pub mod inspect;
