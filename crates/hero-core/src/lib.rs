pub mod config;
pub mod constants;
pub mod driver;
pub mod faces;
pub mod mapper;
pub mod mount;
pub mod progress;
pub mod viewport;

pub use config::*;
pub use constants::*;
pub use driver::*;
pub use faces::*;
pub use mapper::*;
pub use mount::*;
pub use progress::*;
pub use viewport::*;
