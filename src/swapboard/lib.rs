//! # Swapboard Architecture
//!
//! Swapboard is an **in-memory campus marketplace library**. Students register,
//! publish second-hand items, buy them, and keep a cart and a favorites list; an
//! administrator can take down any listing. The bundled binary is one client of
//! the library, not the library itself.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses shell lines, renders results, tracks the session  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - TradingPlatform<S>: seeds the admin, dispatches          │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Authorization, item lifecycle, list rules                │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract MarketStore trait                               │
//! │  - InMemoryStore                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`search`] sits beside the layers: it filters and sorts any `&[Item]`
//! snapshot and never touches the store.
//!
//! ## Item Lifecycle
//!
//! ```text
//!              purchase
//!   AVAILABLE ──────────▶ SOLD
//!       │                   │
//!       │ delete            │ delete
//!       ▼                   │
//!    DELETED ◀──────────────┘
//! ```
//!
//! Nothing leaves DELETED, and only delete leaves SOLD. Deletion is a flag:
//! the item stays in the collection, keeps its id and still shows up in the
//! full listing.
//!
//! ## Errors
//!
//! Operations return [`error::Result`]. A failed operation never changes
//! anything. [`error::MarketError::kind`] sorts failures into validation,
//! authorization, not-found, conflict and benign rejections (re-adding an item
//! that is already in the cart).
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of the business rules against
//!    `InMemoryStore`.
//! 2. **API** (`api.rs`): dispatch and seeding, built with the
//!    `PlatformFixture` builder.
//! 3. **Integration** (`tests/`): whole scenarios through the public API, and
//!    the binary driven over stdin.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and the in-memory backend
//! - [`model`]: Core data types (`Item`, `User`, `Profile`, ids)
//! - [`search`]: Filtering and sorting over item snapshots
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Shell parsing, session handling and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod store;
