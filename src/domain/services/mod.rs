mod localizer;
mod subnet;
mod validator;

pub use localizer::NameLocalizer;
pub use subnet::SubnetDeriver;
pub use validator::DatabaseValidator;
