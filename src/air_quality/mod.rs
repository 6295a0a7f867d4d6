pub mod epa;
