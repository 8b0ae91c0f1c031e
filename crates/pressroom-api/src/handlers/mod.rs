pub mod health;
pub mod intake;
pub mod process;

pub use health::health;
pub use intake::ticket_intake;
pub use process::{process_status, start_process};
