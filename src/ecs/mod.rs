//! Frame-loop plumbing: the component store façade, the scheduler and its profiling.

pub mod profiling;
pub mod scheduler;
pub mod store;

pub use self::profiling::SystemTimings;
pub use self::scheduler::Scheduler;
pub use self::store::ComponentStore;
