//! Result store: point lookups plus per-viewer rankings.
//!
//! Two interchangeable backends implement [`MatchStore`]:
//! - [`MemoryMatchStore`]: nested map, ranking computed by scan + sort at read time
//! - [`RedisMatchStore`]: point record per pair plus a sorted-set index per viewer,
//!   maintained at write time
//!
//! Results are never deleted; a recomputation overwrites the pair (last write wins).

pub mod config;
pub mod error;
pub mod factory;
pub mod memory;
pub mod redis_store;
pub mod seed;
pub mod traits;


pub use config::{DEFAULT_REDIS_POOL_SIZE, StorageBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use factory::build_store;
pub use memory::MemoryMatchStore;
pub use redis_store::RedisMatchStore;
pub use seed::{parse_seed, read_seed_file};
pub use traits::MatchStore;
