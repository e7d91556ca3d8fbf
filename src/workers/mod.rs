pub mod core;
pub mod dispatcher;
pub mod poller;

pub use dispatcher::{Dispatcher, UserCommand};
pub use poller::Poller;
