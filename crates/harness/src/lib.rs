//! posverify - browser-driven verification harness
//!
//! Drives a real browser (Playwright) against a running instance of the
//! Sistema de Facturacion frontend to confirm that role-gated
//! authentication and post-login navigation work end to end, capturing
//! PNG screenshots as evidence.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Harness (runner)                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  ReadinessGate  - bounded polling of GET /api/health       │
//! │  actor_flow     - login -> verify -> screenshot -> logout  │
//! │  view_tour      - authenticated walk over the app views    │
//! │  Driver         - one Playwright session per flow:         │
//! │                   goto / fill-by-label / click-by-role /   │
//! │                   expect-visible / settle / screenshot     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend and the frontend dev server are started out-of-band; the
//! readiness gate is the only synchronization with them. Element lookup is
//! strictly by accessible role or label plus the human-visible name: that
//! pairing is the compatibility contract with the application under test.

pub mod driver;
pub mod error;
pub mod fixtures;
pub mod flows;
pub mod readiness;
pub mod runner;

pub use error::{VerifyError, VerifyResult};
pub use fixtures::Fixtures;
pub use runner::{Harness, HarnessConfig};
