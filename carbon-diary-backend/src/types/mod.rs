pub mod response;

pub use response::AckResponse;
