pub mod draws;
pub mod rounds;
pub mod tickets;
pub mod users;

pub use draws as draw_entity;
pub use rounds as round_entity;
pub use tickets as ticket_entity;
pub use users as user_entity;
