pub mod draw_service;
pub mod round_service;
pub mod ticket_service;
pub mod user_service;

pub use draw_service::*;
pub use round_service::*;
pub use ticket_service::*;
pub use user_service::*;
