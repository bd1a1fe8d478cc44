//! Platform reactor selection.

use krait_config::{ApplicationConfig, Platform};

/// Chooses the event-loop identifier passed to the supervised runtime.
///
/// An explicit `reactor` entry in the configuration always wins,
/// regardless of platform; otherwise each platform family maps to its
/// native poller.
pub(super) fn select_reactor(config: &ApplicationConfig, platform: Platform) -> String {
    if let Some(reactor) = &config.reactor {
        return reactor.clone();
    }
    let default = match platform {
        Platform::Linux => "epoll",
        Platform::Bsd => "kqueue",
        Platform::Darwin => "cf",
        Platform::Windows => "iocp",
        Platform::Other => "select",
    };
    default.to_owned()
}
