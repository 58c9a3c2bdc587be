//! Account flow: signup, login, Google identity exchange, sessions,
//! profile, password reset.

pub mod email;
pub mod extract;
pub mod google;
pub mod handlers;
pub mod models;
pub mod password;
pub mod service;
pub mod tokens;
