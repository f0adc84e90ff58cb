pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod currency;
pub mod error;
pub mod identity;
pub mod order;
pub mod phone;
pub mod pickup;
pub mod product;
pub mod sales;
pub mod session;
pub mod stock;
pub mod support;
pub mod timestamp;
pub mod user;
pub mod wallet;
