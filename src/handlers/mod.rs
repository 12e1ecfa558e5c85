// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (JWT auth gate, ownership checks in services)
//
pub mod public;    // Tier 1: No authentication required (/users/*)
pub mod protected; // Tier 2: JWT authentication required (/posts, /comments, /activities)
