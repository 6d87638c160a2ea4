pub mod ticket;

pub use ticket::{NewTicket, Ticket, TicketUpdate, TicketWithImage};
