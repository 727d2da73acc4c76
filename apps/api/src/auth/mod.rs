//! User accounts: signup and login over a pluggable `UserStore`.

pub mod handlers;
pub mod password;
pub mod store;
