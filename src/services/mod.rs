pub mod contact;
pub mod mail;
pub mod toc;
