//! # Events Module
//!
//! Event-driven reporting so any front end can follow the engine.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress or decisions.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let mut engine = TriageEngine::new().with_events(sender);
//! engine.open_session(&dir)?;
//!
//! for event in receiver.drain() {
//!     if let Event::Triage(TriageEvent::SessionOpened { total_photos, .. }) = event {
//!         println!("{} photos to review", total_photos);
//!     }
//! }
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
