pub mod api {
    pub mod client;
    pub mod error;
    pub mod models;
}

pub mod logger;
pub mod utils;
