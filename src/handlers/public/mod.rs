// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation and token acquisition. These are the only routes that run
// without the JWT gate, so every input is validated here before it reaches
// the credential service.

pub mod auth;
