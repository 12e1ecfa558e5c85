// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login;    // POST /users/login - verify credentials and issue JWT
pub mod register; // POST /users/register - create new account
pub mod utils;    // Registration field rules

pub use login::login;
pub use register::register;
