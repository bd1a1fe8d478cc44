//! Reserved-port privilege validation.
//!
//! The check runs only on POSIX-like platforms; systems without a
//! notion of reserved ports skip it entirely, which is intentional
//! rather than an oversight.

use krait_config::ApplicationConfig;

use super::error::LifecycleError;

/// Highest port number reserved for privileged users on POSIX systems.
const MAX_RESERVED_PORT: u16 = 1024;

/// Validates that the invoking user may bind the configured port.
///
/// A missing port signals a malformed configuration upstream and fails
/// before any privilege consideration.
pub(super) fn validate_port(
    config: &ApplicationConfig,
    privileged: bool,
) -> Result<(), LifecycleError> {
    let port = config.port.ok_or(LifecycleError::MissingPort)?;
    if port <= MAX_RESERVED_PORT && !privileged {
        return Err(LifecycleError::PrivilegedPortDenied { port });
    }
    Ok(())
}

/// Whether the invoking user may bind reserved ports.
pub(crate) fn current_user_is_privileged() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid(2) takes no arguments and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config_with_port(port: Option<u16>) -> ApplicationConfig {
        ApplicationConfig {
            port,
            ..ApplicationConfig::default()
        }
    }

    #[rstest]
    #[case(80)]
    #[case(1024)]
    fn unprivileged_user_is_denied_reserved_ports(#[case] port: u16) {
        let error = validate_port(&config_with_port(Some(port)), false)
            .expect_err("reserved port should be denied");
        assert!(matches!(
            error,
            LifecycleError::PrivilegedPortDenied { port: denied } if denied == port
        ));
    }

    #[rstest]
    #[case(1025, false)]
    #[case(8080, false)]
    #[case(80, true)]
    fn permitted_combinations_pass(#[case] port: u16, #[case] privileged: bool) {
        validate_port(&config_with_port(Some(port)), privileged)
            .expect("port should be permitted");
    }

    #[test]
    fn missing_port_is_rejected_before_privilege_checks() {
        let error = validate_port(&config_with_port(None), true)
            .expect_err("missing port should fail");
        assert!(matches!(error, LifecycleError::MissingPort));
    }
}
