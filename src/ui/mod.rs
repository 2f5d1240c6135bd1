pub mod interactions;
pub mod window;

// Re-exports
pub use window::run;
