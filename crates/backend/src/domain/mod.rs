pub mod a001_company;
pub mod a002_app_user;
pub mod a003_tool;
pub mod a004_rental_agreement;
