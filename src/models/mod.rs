//! Domain model module declarations.

pub mod notification;
pub mod task;
pub mod view;

pub use notification::{Notification, NotificationKind};
pub use task::{GitMetadata, Priority, Task, TaskStatus, TaskType};
pub use view::{BoardFilter, BoardLayout, View};
