mod dashboard;
mod data;
mod home;

pub use dashboard::Dashboard;
pub use data::Data;
pub use home::Home;
