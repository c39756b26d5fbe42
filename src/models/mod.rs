pub mod registration;
pub mod track;
