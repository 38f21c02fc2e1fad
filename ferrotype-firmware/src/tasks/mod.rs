//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels and the
//! shared link state.

pub mod fetch;
pub mod idle;
pub mod link;
pub mod print;

pub use fetch::fetch_task;
pub use idle::idle_supervisor_task;
pub use link::link_task;
pub use print::print_task;
