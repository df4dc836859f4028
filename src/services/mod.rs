pub mod auth_service;
pub mod branch_counter_service;
pub mod branch_office_service;
pub mod company_profile_service;
pub mod dashboard_service;
pub mod user_service;
pub mod validation;
pub mod vote_service;

pub use auth_service::*;
pub use branch_counter_service::*;
pub use branch_office_service::*;
pub use company_profile_service::*;
pub use dashboard_service::*;
pub use user_service::*;
pub use vote_service::*;
