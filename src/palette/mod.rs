//! Command palette: static command registry, fuzzy task matching, ranked
//! result composition, and the keyboard-driven selection session.

pub mod fuzzy;
pub mod registry;
pub mod resolver;
pub mod session;

pub use fuzzy::FuzzyMatcher;
pub use registry::{Command, CommandContext, CommandRegistry, Effect};
pub use resolver::{resolve, sections, QueryMode, ResolvedEntry, Section, TASKS_SECTION};
pub use session::{Execution, PaletteSession};
