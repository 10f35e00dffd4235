//! Script compilation over the default fixtures, across module seams.

use std::path::Path;

use posverify_harness::driver::{build_script, DriverConfig};
use posverify_harness::fixtures::Fixtures;
use posverify_harness::flows::{actor_flow, view_tour};

#[test]
fn role_flow_compiles_to_one_self_closing_session() {
    let fixtures = Fixtures::default();
    let steps = actor_flow(
        &fixtures.actors[0],
        "http://localhost:5173",
        Path::new("verification"),
    );
    let script = build_script(&DriverConfig::default(), &steps);

    assert_eq!(script.matches("chromium.launch").count(), 1);
    assert_eq!(script.matches("await browser.close();").count(), 1);
    assert!(script.contains("page.goto('http://localhost:5173/login')"));
    assert!(script.contains("getByLabel('Usuario').fill('cajero')"));
    assert!(script.contains("getByLabel('Contraseña').fill('cajero123')"));
    assert!(script.contains("getByRole('button', { name: 'Iniciar Sesión' }).click()"));
    assert!(script.contains("getByRole('button', { name: 'Cerrar Sesión' }).waitFor"));
    assert!(script.contains("path: 'verification/cajero_dashboard.png'"));
}

#[test]
fn view_tour_compiles_every_screenshot_in_order() {
    let fixtures = Fixtures::default();
    let steps = view_tour(
        fixtures.tour_login.as_ref(),
        &fixtures.views,
        "http://localhost:5173",
        Path::new("verification"),
    );
    let script = build_script(&DriverConfig::default(), &steps);

    let mut last = 0;
    for shot in [
        "01_dashboard.png",
        "02_products.png",
        "03_sales_pos.png",
        "04_customers.png",
        "05_inventory.png",
        "06_reports.png",
        "07_settings.png",
    ] {
        let pos = script
            .find(shot)
            .unwrap_or_else(|| panic!("{} missing from script", shot));
        assert!(pos > last, "{} out of order", shot);
        last = pos;
    }

    // The whole tour is one browser session.
    assert_eq!(script.matches("chromium.launch").count(), 1);
    assert_eq!(script.matches("await browser.close();").count(), 1);
}
