// Handler modules
pub mod check;
pub mod fix;
pub mod networks;
pub mod utils;
pub mod validate;

// Re-export all handler functions
pub use check::handle_check;
pub use fix::handle_fix;
pub use networks::handle_networks;
pub use validate::handle_validate;
