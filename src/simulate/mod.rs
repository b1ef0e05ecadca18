pub mod genome;
pub mod insert;
