//! In-memory storage adapters.
//!
//! These provide the same observable behavior as the PostgreSQL adapters in
//! [`crate::db`], backed by process-local maps. They exist for tests and
//! lightweight deployments; state continuity across requests comes from the
//! factory sharing one instance per contract for the process lifetime.
//!
//! The maps are lock-guarded: requests on a multi-threaded runtime race on
//! the same keys otherwise. Writes are whole-operation, so a poisoned lock
//! holds no half-written state and is safe to recover.

pub mod items;
pub mod users;

pub use items::MemoryItemRepository;
pub use users::MemoryUserRepository;
