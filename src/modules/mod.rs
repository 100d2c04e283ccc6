pub mod notes;
pub mod settings;
