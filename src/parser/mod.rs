pub mod columns;
pub mod deserializers;
pub mod pipeline;
pub mod types;

pub use pipeline::{
    parse_colaboradores, parse_colaboradores_reader, parse_tickets,
    parse_tickets_reader, ParseOutput,
};
pub use types::{ParseWarning, SmapTicketNormalized, SmapTicketRaw};
