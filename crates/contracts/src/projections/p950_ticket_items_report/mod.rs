pub mod dto;

pub use dto::TicketItemDto;
