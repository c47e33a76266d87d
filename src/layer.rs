//! Bridge from `tracing` into the facade.
//!
//! [`FacadeLayer`] lets code instrumented with `tracing` macros end up in the
//! same outputs, encoding, and source tag as direct facade calls:
//!
//! ```no_run
//! use tracing_subscriber::layer::SubscriberExt;
//! use tracing_subscriber::util::SubscriberInitExt;
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::registry()
//!     .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
//!     .with(logfacade::FacadeLayer::global())
//!     .init();
//!
//! tracing::info!(port = 8080u64, "listening");
//! ```
//!
//! `TRACE` and `DEBUG` both map to [`Level::Debug`]. The `message` field becomes
//! the record message; every other field becomes a typed [`Field`]. Events emitted
//! by this crate's own diagnostics are dropped so a rebuild never logs into itself.

use crate::field::{self, Field};
use crate::global;
use crate::handle::LoggerHandle;
use crate::level::Level;
use std::fmt;
use std::sync::Arc;
use tracing::field::Visit;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

enum Route {
    Global,
    Handle(Arc<LoggerHandle>),
}

/// `tracing_subscriber` layer that forwards events to a [`LoggerHandle`].
pub struct FacadeLayer {
    route: Route,
}

impl FacadeLayer {
    /// Forward to the process-wide handle.
    pub fn global() -> Self {
        Self {
            route: Route::Global,
        }
    }

    /// Forward to an application-owned handle.
    pub fn new(handle: Arc<LoggerHandle>) -> Self {
        Self {
            route: Route::Handle(handle),
        }
    }

    fn handle(&self) -> &LoggerHandle {
        match &self.route {
            Route::Global => global::handle(),
            Route::Handle(handle) => handle.as_ref(),
        }
    }
}

/// Whether `target` names this crate or one of its modules.
fn is_own_target(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME")
        || target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::"))
}

fn map_level(level: &tracing::Level) -> Level {
    if *level == tracing::Level::ERROR {
        Level::Error
    } else if *level == tracing::Level::WARN {
        Level::Warn
    } else if *level == tracing::Level::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let level = map_level(metadata.level());
        let handle = self.handle();
        if !handle.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        handle
            .logger()
            .log_untracked(level, &visitor.message, &visitor.fields);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl Visit for EventVisitor {
    fn record_i64(&mut self, f: &tracing::field::Field, value: i64) {
        self.fields.push(field::int64(f.name(), value));
    }

    fn record_u64(&mut self, f: &tracing::field::Field, value: u64) {
        self.fields.push(field::uint64(f.name(), value));
    }

    fn record_f64(&mut self, f: &tracing::field::Field, value: f64) {
        self.fields.push(field::float64(f.name(), value));
    }

    fn record_bool(&mut self, f: &tracing::field::Field, value: bool) {
        self.fields.push(field::boolean(f.name(), value));
    }

    fn record_str(&mut self, f: &tracing::field::Field, value: &str) {
        if f.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(field::string(f.name(), value));
        }
    }

    fn record_debug(&mut self, f: &tracing::field::Field, value: &dyn fmt::Debug) {
        if f.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(field::string(f.name(), format!("{value:?}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_target_matches_whole_segment() {
        assert!(is_own_target("logfacade"));
        assert!(is_own_target("logfacade::handle"));
        assert!(!is_own_target("logfacade_ext"));
        assert!(!is_own_target("logfacadeextra::io"));
        assert!(!is_own_target("app"));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(map_level(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(map_level(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(map_level(&tracing::Level::INFO), Level::Info);
        assert_eq!(map_level(&tracing::Level::WARN), Level::Warn);
        assert_eq!(map_level(&tracing::Level::ERROR), Level::Error);
    }
}
