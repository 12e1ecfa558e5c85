// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route in this tier sits behind `jwt_auth_middleware`. Handlers receive
// the verified caller as `AuthUser`; ownership rules for deletes are enforced
// by the services, never by trusting ids from the request body.

pub mod activities; // GET /activities
pub mod comments;   // /comments, /comments/:id
pub mod posts;      // /posts, /posts/:id
pub mod utils;
