//! Core resolution types.

mod builder;
mod merge;
mod reporter;
mod resolved;
mod resolver;

pub use builder::ConfigResolverBuilder;
pub use merge::overlay;
pub use reporter::{ErrorReporter, TracingReporter};
pub use resolved::{DEPLOYMENT_KEY, ResolvedConfig};
pub use resolver::{ConfigResolver, ConfigSource};
