//! Command Runner Implementations

mod system;

pub use system::SystemCommandRunner;
