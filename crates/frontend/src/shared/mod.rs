pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod fetch_cache;
pub mod page_state;
