pub use flow::*;
pub use hint::*;
pub use snapshot::*;

mod flow;
mod hint;
mod snapshot;
