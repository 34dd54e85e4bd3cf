mod config_error;
mod database_error;
mod parse_error;
mod path_error;
mod random_path_error;

pub use config_error::*;
pub use database_error::*;
pub use parse_error::*;
pub use path_error::*;
pub use random_path_error::*;
