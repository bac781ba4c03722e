//! Utility modules for common functionality

pub mod cancellation;
pub mod exit_codes;
pub mod text;

pub use cancellation::install_ctrl_c_handler;
pub use exit_codes::{exit_code_for, get_exit_code_description};
pub use text::title_from_branch;
