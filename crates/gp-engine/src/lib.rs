//! `gp-engine` — the per-tick driver of the geoplace positioning engine.
//!
//! # Tick
//!
//! ```text
//! tick(now_ms, registry, observer):
//!   ① Clock     — advance the tick counter; in recording mode derive now_ms
//!                 from the frame rate instead of the wall clock.
//!   ② Acquire   — unless paused or fatal, evaluate the acquisition state
//!                 machine once; a fresh fix goes through the position filter.
//!   ③ Heading   — while sampling, read the compass into the heading tracker.
//!   ④ Place     — with a device position (fixed override or filter estimate),
//!                 recompute placements if the device moved, the area changed,
//!                 or a target is dirty.
//!   ⑤ Sync      — refresh the time-sync stretch factor for the current second.
//! ```
//!
//! The only externally visible failure is [`Engine::error_message`], set once
//! when acquisition turns fatal.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gp_engine::{EngineBuilder, EngineConfig, NoopObserver};
//! use gp_location::SimulatedProvider;
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default(), SimulatedProvider::new())
//!     .build()?;
//! let mut targets = vec![Target::new(TargetId(0), poi)];
//! loop {
//!     engine.tick(now_ms(), &mut targets, &mut NoopObserver);
//!     render(&targets);
//!     targets.clear_dirty();
//! }
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod trace;


pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use engine::{Engine, TickReport};
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use trace::{CsvTraceObserver, TraceError, TraceResult};
