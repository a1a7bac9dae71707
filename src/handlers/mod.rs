pub mod articles;
pub mod contact;
pub mod health;
pub mod reviews;
