//! Fixture data: the actors and the view tour
//!
//! Deterministic, declarative test data. The defaults mirror the deployed
//! application; a YAML file with the same shape can override them for
//! other environments.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VerifyResult;

/// Route of the login view, relative to the frontend base URL.
pub const LOGIN_PATH: &str = "/login";

/// Heading identifying the login view.
pub const LOGIN_HEADING: &str = "Sistema de Facturación";

/// Accessible label of the username input.
pub const USERNAME_LABEL: &str = "Usuario";

/// Accessible label of the password input.
pub const PASSWORD_LABEL: &str = "Contraseña";

/// Name of the login submit button.
pub const LOGIN_BUTTON: &str = "Iniciar Sesión";

/// Name of the logout button. Only an authenticated session sees it, which
/// makes its visibility the authentication success signal.
pub const LOGOUT_BUTTON: &str = "Cerrar Sesión";

/// One credential set and the role it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub username: String,
    pub password: String,
    /// Role under test; also names the evidence screenshot.
    pub role_label: String,
}

impl Actor {
    pub fn new(username: &str, password: &str, role_label: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role_label: role_label.to_string(),
        }
    }

    /// Evidence filename for this actor.
    pub fn screenshot_name(&self) -> String {
        format!("{}_dashboard.png", self.role_label)
    }
}

/// How a view is reached from the state the previous stop left behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Navigate straight to the application root.
    Root,
    /// Follow a named navigation link.
    Link { name: String },
    /// Follow the link, then return to the root and press a named button.
    /// Used for views whose entry point only exists on the dashboard.
    DashboardButton { link: String, button: String },
}

/// One stop of the view tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewStop {
    pub trigger: Trigger,
    /// Heading that must become visible once the view has loaded.
    pub landmark: String,
    /// Evidence filename for this view.
    pub screenshot: String,
    /// Pause after the landmark appears, for animations and data loads.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_settle_ms() -> u64 {
    2000
}

/// Complete fixture set for one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    /// Actors exercised by the session flow runner, in order.
    pub actors: Vec<Actor>,
    /// View tour stops, in order. The order is significant: each trigger
    /// assumes the state the previous stop left the application in.
    pub views: Vec<ViewStop>,
    /// Actor the view tour authenticates as before walking the views.
    #[serde(default)]
    pub tour_login: Option<Actor>,
}

impl Default for Fixtures {
    fn default() -> Self {
        let admin = Actor::new("admin", "admin123", "admin");
        Self {
            actors: vec![
                Actor::new("cajero", "cajero123", "cajero"),
                admin.clone(),
                Actor::new("dev", "dev", "dev"),
            ],
            views: vec![
                ViewStop {
                    trigger: Trigger::Root,
                    landmark: "Dashboard".to_string(),
                    screenshot: "01_dashboard.png".to_string(),
                    settle_ms: 2000,
                },
                ViewStop {
                    trigger: Trigger::Link {
                        name: "Productos".to_string(),
                    },
                    landmark: "Gestión de Productos".to_string(),
                    screenshot: "02_products.png".to_string(),
                    settle_ms: 2000,
                },
                // "Ventas" lands on the sales list; the point-of-sale view
                // is only reachable through the dashboard's "Nueva Venta"
                // button.
                ViewStop {
                    trigger: Trigger::DashboardButton {
                        link: "Ventas".to_string(),
                        button: "Nueva Venta".to_string(),
                    },
                    landmark: "Punto de Venta".to_string(),
                    screenshot: "03_sales_pos.png".to_string(),
                    settle_ms: 1000,
                },
                ViewStop {
                    trigger: Trigger::Link {
                        name: "Clientes".to_string(),
                    },
                    landmark: "Gestión de Clientes".to_string(),
                    screenshot: "04_customers.png".to_string(),
                    settle_ms: 2000,
                },
                ViewStop {
                    trigger: Trigger::Link {
                        name: "Inventario".to_string(),
                    },
                    landmark: "Control de Inventario".to_string(),
                    screenshot: "05_inventory.png".to_string(),
                    settle_ms: 2000,
                },
                ViewStop {
                    trigger: Trigger::Link {
                        name: "Reportes".to_string(),
                    },
                    landmark: "Reportes y Análisis".to_string(),
                    screenshot: "06_reports.png".to_string(),
                    settle_ms: 2000,
                },
                ViewStop {
                    trigger: Trigger::Link {
                        name: "Configuración".to_string(),
                    },
                    landmark: "Configuración del Sistema".to_string(),
                    screenshot: "07_settings.png".to_string(),
                    settle_ms: 1000,
                },
            ],
            tour_login: Some(admin),
        }
    }
}

impl Fixtures {
    /// Parse fixtures from a YAML string.
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse fixtures from a YAML file.
    pub fn from_file(path: &Path) -> VerifyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("cajero", "cajero_dashboard.png")]
    #[test_case("admin", "admin_dashboard.png")]
    #[test_case("dev", "dev_dashboard.png")]
    fn screenshot_names_follow_the_role(role: &str, expected: &str) {
        assert_eq!(Actor::new("u", "p", role).screenshot_name(), expected);
    }

    #[test]
    fn default_actors_cover_all_roles() {
        let fixtures = Fixtures::default();
        let roles: Vec<&str> = fixtures
            .actors
            .iter()
            .map(|a| a.role_label.as_str())
            .collect();
        assert_eq!(roles, ["cajero", "admin", "dev"]);
        assert_eq!(fixtures.actors[0].screenshot_name(), "cajero_dashboard.png");
    }

    #[test]
    fn default_tour_has_seven_ordered_views() {
        let fixtures = Fixtures::default();
        let shots: Vec<&str> = fixtures.views.iter().map(|v| v.screenshot.as_str()).collect();
        assert_eq!(
            shots,
            [
                "01_dashboard.png",
                "02_products.png",
                "03_sales_pos.png",
                "04_customers.png",
                "05_inventory.png",
                "06_reports.png",
                "07_settings.png",
            ]
        );
    }

    #[test]
    fn point_of_sale_goes_through_the_dashboard() {
        let fixtures = Fixtures::default();
        let pos = &fixtures.views[2];
        assert_eq!(pos.landmark, "Punto de Venta");
        assert_eq!(
            pos.trigger,
            Trigger::DashboardButton {
                link: "Ventas".to_string(),
                button: "Nueva Venta".to_string(),
            }
        );
    }

    #[test]
    fn tour_authenticates_as_admin() {
        let fixtures = Fixtures::default();
        assert_eq!(
            fixtures.tour_login.as_ref().map(|a| a.username.as_str()),
            Some("admin")
        );
    }

    #[test]
    fn fixtures_parse_from_yaml() {
        let yaml = r#"
actors:
  - username: cajero
    password: cajero123
    role_label: cajero
views:
  - trigger:
      kind: root
    landmark: Dashboard
    screenshot: 01_dashboard.png
  - trigger:
      kind: link
      name: Productos
    landmark: Gestión de Productos
    screenshot: 02_products.png
"#;
        let fixtures = Fixtures::from_yaml(yaml).unwrap();
        assert_eq!(fixtures.actors.len(), 1);
        assert_eq!(
            fixtures.views[1].trigger,
            Trigger::Link {
                name: "Productos".to_string(),
            }
        );
        assert_eq!(fixtures.views[0].settle_ms, 2000);
        assert!(fixtures.tour_login.is_none());
    }
}
