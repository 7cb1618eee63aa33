pub mod activities;
pub mod analyze;
pub mod contact;
pub mod dispatch;
pub mod documents;
pub mod health;
pub mod shared;
pub mod stats;
pub mod user;
