pub mod activities;
pub mod attendances;
pub mod contributions;
pub mod members;
pub mod root;
pub mod stats;
