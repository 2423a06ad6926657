//! # RTW Ship Core
//!
//! Domain-free building blocks shared by the ship editor crates:
//!
//! - **Observers**: synchronous publish/subscribe attached to any mutable
//!   entity, with snapshot delivery so a handler may subscribe or
//!   unsubscribe while a notification is in flight.
//! - **Commands**: reversible edits and a linear undo/redo stack.
//!
//! ```rust,ignore
//! use rtwship_core::{Command, CommandStack};
//!
//! let mut stack = CommandStack::new();
//! stack.do_command(MyCommand::new(), &mut document);
//! stack.undo(&mut document);
//! stack.redo(&mut document);
//! ```

pub mod command;
pub mod observable;

pub use command::{Command, CommandStack};
pub use observable::{Notification, Observable, Observers, Subscription, SubscriptionId};
