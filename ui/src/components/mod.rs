pub mod accordion_md;
pub mod add_product;
pub mod admin_orders;
pub mod api_actions;
pub mod api_client;
pub mod app;
pub mod balance_view;
pub mod cart_view;
pub mod catalog_view;
pub mod faq_view;
pub mod favorites_view;
pub mod login_view;
pub mod order_history;
pub mod pickup_view;
pub mod register_view;
pub mod sales_dashboard;
pub mod shared_state;
pub mod stock_manager;
pub mod storage;
pub mod support_inbox;
pub mod support_view;
pub mod user_state;
