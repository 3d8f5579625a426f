pub mod client;
pub mod models;
pub mod response;
pub mod service;

pub use client::HttpDogApi;
pub use models::{Credentials, DogSearchRequest, SearchPage};
pub use service::DogApi;
