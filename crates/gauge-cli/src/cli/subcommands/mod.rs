mod contact;
mod user;

pub use contact::ContactCommands;
pub use user::UserCommands;
