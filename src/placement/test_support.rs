use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy::log::tracing::{self, Event, Level, Subscriber};
use bevy::log::tracing_subscriber::Registry;
use bevy::log::tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Layer counting warning-level events.
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a thread-local subscriber that counts warnings, returning its result and the count.
pub(crate) fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = Registry::default().with(WarnCounter(Arc::clone(&count)));
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, count.load(Ordering::SeqCst))
}
