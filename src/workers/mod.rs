pub mod core;
pub mod requests;

pub use self::core::EventSender;
pub use requests::RequestWorker;
