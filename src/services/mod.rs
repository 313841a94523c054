pub mod analysis;
pub mod cast;
pub mod coingecko;
pub mod sources;
pub mod token;
