//! The upload → detect → confirm → search → detail journey as a state machine.
//!
//! [`update`] is the pure transition function: old state plus event gives the
//! new state and the external calls ([`Effect`]s) to make. [`Workflow`] runs
//! those calls against a [`DetectionService`](crate::clients::DetectionService)
//! and a [`RecipeService`](crate::clients::RecipeService) and feeds the
//! outcomes back in.
//!
//! ```text
//! upload ──image──▶ processing ──detected──▶ ingredients ──confirm──▶ processing ──▶ recipes
//!   ▲                   │                        │    ▲                    │           │
//!   │                   └──failed──▶ error ◀─────┼────┼────────failed──────┘           │
//!   └──────── dismiss / retake / start over ─────┴────┴─────────────────────────────────┘
//! ```
//!
//! Every effect carries the state's version. Resets and new operations bump
//! it, and results stamped with an older version are dropped.

mod driver;
mod effect;
mod event;
mod state;
mod update;

pub use driver::{run_effect, Workflow};
pub use effect::Effect;
pub use event::Event;
pub use state::{AppState, ErrorState, Pending, Selection, Session, Stage};
pub use update::update;
