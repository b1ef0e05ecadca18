pub mod detect;
pub mod insert;
pub mod simulate;
pub mod tir_info;
