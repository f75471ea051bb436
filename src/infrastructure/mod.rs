pub mod decoders;
pub mod mock;
pub mod models;
pub mod observability;
