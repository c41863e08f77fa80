mod view;
mod view_model;

pub use view::AppUserDetails;
pub use view_model::AppUserDetailsViewModel;
