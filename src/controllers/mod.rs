pub mod root;
pub mod spotify;
pub mod wedding;
pub use root::RootController;
