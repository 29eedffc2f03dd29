//! Session context for reaching the user's settings store.
//!
//! The store is keyed to the desktop session: writes need the session bus
//! address of the user whose settings are being changed. When the process is
//! privilege-elevated the real user comes from the elevation environment,
//! not from the effective identity - an elevated run with no recoverable
//! real user has no session to write to and must abort up front.

use anyhow::{Context, Result, bail};

/// Resolved identity and bus address for one run.
///
/// Built once before the first backend call and shared read-only for the
/// rest of the run.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// User whose settings are being reconciled
    pub user: String,
    /// Uid of that user
    pub uid: u32,
    /// Session bus address writes are routed through
    pub bus_address: String,
}

impl SessionContext {
    /// Detect the session from the process environment.
    pub fn detect() -> Result<Self> {
        let session = Self::resolve(effective_uid(), |key| std::env::var(key).ok())?;
        log::debug!(
            "session: user={} uid={} bus={}",
            session.user,
            session.uid,
            session.bus_address
        );
        Ok(session)
    }

    fn resolve(euid: u32, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let (user, uid) = if euid == 0 {
            let user = env("SUDO_USER").filter(|u| !u.is_empty() && u.as_str() != "root");
            match user {
                Some(user) => {
                    let uid = env("SUDO_UID")
                        .and_then(|v| v.parse().ok())
                        .context("SUDO_UID is not set; cannot resolve the real user's session")?;
                    (user, uid)
                }
                None => bail!(
                    "running elevated with no identifiable real user; \
                     re-run via sudo from the target user's session"
                ),
            }
        } else {
            let user = env("USER").unwrap_or_else(|| euid.to_string());
            (user, euid)
        };

        // an inherited bus address only names the right session when we are
        // still that user; under elevation the target user's bus is always
        // at the run-dir path
        let bus_address = match env("DBUS_SESSION_BUS_ADDRESS") {
            Some(addr) if !addr.is_empty() && euid != 0 => addr,
            _ => format!("unix:path=/run/user/{uid}/bus"),
        };

        Ok(Self {
            user,
            uid,
            bus_address,
        })
    }
}

fn effective_uid() -> u32 {
    // SAFETY: geteuid cannot fail and touches no shared state
    unsafe { libc::geteuid() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unelevated_uses_own_identity_and_bus() {
        let session = SessionContext::resolve(
            1000,
            env_of(&[
                ("USER", "alice"),
                ("DBUS_SESSION_BUS_ADDRESS", "unix:path=/run/user/1000/bus"),
            ]),
        )
        .unwrap();

        assert_eq!(session.user, "alice");
        assert_eq!(session.uid, 1000);
        assert_eq!(session.bus_address, "unix:path=/run/user/1000/bus");
    }

    #[test]
    fn unelevated_falls_back_to_run_dir_bus() {
        let session = SessionContext::resolve(1000, env_of(&[("USER", "alice")])).unwrap();
        assert_eq!(session.bus_address, "unix:path=/run/user/1000/bus");
    }

    #[test]
    fn elevated_resolves_the_real_user_from_sudo_env() {
        let session = SessionContext::resolve(
            0,
            env_of(&[
                ("SUDO_USER", "alice"),
                ("SUDO_UID", "1000"),
                ("DBUS_SESSION_BUS_ADDRESS", "unix:path=/run/user/0/bus"),
            ]),
        )
        .unwrap();

        assert_eq!(session.user, "alice");
        assert_eq!(session.uid, 1000);
        // root's inherited bus address is ignored in favor of the target user's
        assert_eq!(session.bus_address, "unix:path=/run/user/1000/bus");
    }

    #[test]
    fn elevated_without_identity_aborts() {
        let result = SessionContext::resolve(0, env_of(&[("USER", "root")]));
        assert!(result.is_err());
    }

    #[test]
    fn elevated_with_root_sudo_user_aborts() {
        let result = SessionContext::resolve(0, env_of(&[("SUDO_USER", "root")]));
        assert!(result.is_err());
    }
}
