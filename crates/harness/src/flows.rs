//! Flow compilation: login cycles and the view tour
//!
//! Flows are compiled to driver steps ahead of execution. Each step is a
//! precondition for the next; the first failure aborts the session and the
//! rest of the run.

use std::path::Path;

use crate::driver::{AriaRole, Step};
use crate::fixtures::{
    Actor, Trigger, ViewStop, LOGIN_BUTTON, LOGIN_HEADING, LOGIN_PATH, LOGOUT_BUTTON,
    PASSWORD_LABEL, USERNAME_LABEL,
};

/// Wait window for the login heading, confirming the right page loaded.
const PAGE_LOAD_TIMEOUT_MS: u64 = 5_000;

/// Wait window for the logout control after submitting credentials. Longer
/// than the page-load window: the backend round-trip is part of it.
const AUTH_TIMEOUT_MS: u64 = 10_000;

/// Wait window for a view landmark after its trigger.
const LANDMARK_TIMEOUT_MS: u64 = 10_000;

fn login_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH)
}

fn root_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Steps that take a fresh session to an authenticated state.
fn login_steps(actor: &Actor, base_url: &str) -> Vec<Step> {
    vec![
        Step::Goto {
            url: login_url(base_url),
        },
        Step::ExpectVisible {
            role: AriaRole::Heading,
            name: LOGIN_HEADING.to_string(),
            timeout_ms: PAGE_LOAD_TIMEOUT_MS,
        },
        Step::FillLabeled {
            label: USERNAME_LABEL.to_string(),
            value: actor.username.clone(),
        },
        Step::FillLabeled {
            label: PASSWORD_LABEL.to_string(),
            value: actor.password.clone(),
        },
        Step::ClickRole {
            role: AriaRole::Button,
            name: LOGIN_BUTTON.to_string(),
        },
        Step::ExpectVisible {
            role: AriaRole::Button,
            name: LOGOUT_BUTTON.to_string(),
            timeout_ms: AUTH_TIMEOUT_MS,
        },
    ]
}

/// One full login -> verify -> screenshot -> logout cycle for an actor.
///
/// Runs in its own browser session. The closing logout click returns the
/// application to the unauthenticated state so the next actor starts
/// clean.
pub fn actor_flow(actor: &Actor, base_url: &str, screenshot_dir: &Path) -> Vec<Step> {
    let mut steps = login_steps(actor, base_url);
    steps.push(Step::Screenshot {
        path: screenshot_dir.join(actor.screenshot_name()),
    });
    steps.push(Step::ClickRole {
        role: AriaRole::Button,
        name: LOGOUT_BUTTON.to_string(),
    });
    steps
}

/// The full view tour in one session: optional login, then every stop in
/// order.
///
/// There is no rollback between stops; each trigger assumes whatever state
/// the previous stop left the application in, which makes the sequence
/// order-sensitive.
pub fn view_tour(
    login: Option<&Actor>,
    stops: &[ViewStop],
    base_url: &str,
    screenshot_dir: &Path,
) -> Vec<Step> {
    let mut steps = Vec::new();

    if let Some(actor) = login {
        steps.extend(login_steps(actor, base_url));
    }

    for stop in stops {
        match &stop.trigger {
            Trigger::Root => {
                steps.push(Step::Goto {
                    url: root_url(base_url),
                });
            }
            Trigger::Link { name } => {
                steps.push(Step::ClickRole {
                    role: AriaRole::Link,
                    name: name.clone(),
                });
            }
            Trigger::DashboardButton { link, button } => {
                steps.push(Step::ClickRole {
                    role: AriaRole::Link,
                    name: link.clone(),
                });
                steps.push(Step::Goto {
                    url: root_url(base_url),
                });
                steps.push(Step::ClickRole {
                    role: AriaRole::Button,
                    name: button.clone(),
                });
            }
        }
        steps.push(Step::ExpectVisible {
            role: AriaRole::Heading,
            name: stop.landmark.clone(),
            timeout_ms: LANDMARK_TIMEOUT_MS,
        });
        steps.push(Step::Settle { ms: stop.settle_ms });
        steps.push(Step::Screenshot {
            path: screenshot_dir.join(&stop.screenshot),
        });
    }

    steps
}
