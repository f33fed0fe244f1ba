pub mod api;
pub mod download;
pub mod generate;
pub mod health;
pub mod openapi;
pub mod pages;
