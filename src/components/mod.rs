pub mod app_shell;
pub mod home_page;
pub mod location_card;
pub mod location_form;
pub mod locations_page;
pub mod login_screen;
pub mod page_content;
pub mod profile_page;
pub mod ranking_page;
pub mod rating_form;
pub mod ratings_list;
pub mod toast_container;
