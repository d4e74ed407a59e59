//! Canned scenario data

pub mod sample;

pub use sample::load_sample_data;
