//! Browser session driver
//!
//! Each flow compiles to a single Playwright script that owns one browser,
//! one context, and one page. Sessions are never shared across flows: a
//! `run` call launches a fresh browser and the generated `finally` block
//! closes it on every exit path, so a failed assertion never leaks a
//! browser process.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use crate::error::{VerifyError, VerifyResult};

/// Accessible roles the harness interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaRole {
    Heading,
    Button,
    Link,
}

impl AriaRole {
    fn as_str(&self) -> &'static str {
        match self {
            AriaRole::Heading => "heading",
            AriaRole::Button => "button",
            AriaRole::Link => "link",
        }
    }
}

/// One scripted browser action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Navigate to an absolute URL.
    Goto { url: String },
    /// Fill the input associated with a visible label.
    FillLabeled { label: String, value: String },
    /// Click an element by accessible role and name.
    ClickRole { role: AriaRole, name: String },
    /// Wait until an element is visible, failing the session on timeout.
    ExpectVisible {
        role: AriaRole,
        name: String,
        timeout_ms: u64,
    },
    /// Fixed pause for animations and data loads to finish.
    Settle { ms: u64 },
    /// Capture the page to a PNG.
    Screenshot { path: PathBuf },
}

/// Configuration for the browser driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Final status line printed by the generated script.
#[derive(Debug, Deserialize)]
struct SessionStatus {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Handle to the Playwright driver.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Create a driver, verifying Playwright is available.
    pub fn new(config: DriverConfig) -> VerifyResult<Self> {
        Self::check_installed()?;
        Ok(Self { config })
    }

    fn check_installed() -> VerifyResult<()> {
        let status = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(VerifyError::DriverNotFound),
        }
    }

    /// Run a compiled flow in a fresh browser session.
    pub async fn run(&self, steps: &[Step]) -> VerifyResult<()> {
        let script = build_script(&self.config, steps);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("session.js");
        std::fs::write(&script_path, &script)?;

        debug!("running browser session script: {}", script_path.display());

        let output = TokioCommand::new("node").arg(&script_path).output().await?;

        if output.status.success() {
            info!("browser session completed ({} step(s))", steps.len());
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(VerifyError::Session(session_failure(&stdout, &stderr)))
    }
}

/// Compile a flow into a standalone Playwright script.
///
/// The whole flow runs inside one browser context. Values interpolated
/// into the script are escaped for embedding in JS string literals.
pub fn build_script(config: &DriverConfig, steps: &[Step]) -> String {
    let mut script = String::new();

    script.push_str(&format!(
        r#"const {{ chromium }} = require('playwright');

(async () => {{
  const browser = await chromium.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
"#,
        headless = config.headless,
        width = config.viewport_width,
        height = config.viewport_height,
    ));

    for (i, step) in steps.iter().enumerate() {
        script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step_name(step)));
        script.push_str(&step_to_js(step));
        script.push('\n');
    }

    script.push_str(
        r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message }));
    process.exitCode = 1;
  } finally {
    await context.close();
    await browser.close();
  }
})();
"#,
    );

    script
}

/// Short label for a step, used in the generated script and in logs.
fn step_name(step: &Step) -> String {
    match step {
        Step::Goto { url } => format!("goto:{}", url),
        Step::FillLabeled { label, .. } => format!("fill:{}", label),
        Step::ClickRole { role, name } => format!("click:{}:{}", role.as_str(), name),
        Step::ExpectVisible { role, name, .. } => {
            format!("expect-visible:{}:{}", role.as_str(), name)
        }
        Step::Settle { ms } => format!("settle:{}ms", ms),
        Step::Screenshot { path } => format!("screenshot:{}", path.display()),
    }
}

fn step_to_js(step: &Step) -> String {
    match step {
        Step::Goto { url } => format!("    await page.goto('{}');", js_quote(url)),
        Step::FillLabeled { label, value } => format!(
            "    await page.getByLabel('{}').fill('{}');",
            js_quote(label),
            js_quote(value)
        ),
        Step::ClickRole { role, name } => format!(
            "    await page.getByRole('{}', {{ name: '{}' }}).click();",
            role.as_str(),
            js_quote(name)
        ),
        Step::ExpectVisible {
            role,
            name,
            timeout_ms,
        } => format!(
            "    await page.getByRole('{}', {{ name: '{}' }}).waitFor({{ state: 'visible', timeout: {} }});",
            role.as_str(),
            js_quote(name),
            timeout_ms
        ),
        Step::Settle { ms } => format!("    await page.waitForTimeout({});", ms),
        Step::Screenshot { path } => format!(
            "    await page.screenshot({{ path: '{}', fullPage: false }});",
            js_quote(&path.to_string_lossy())
        ),
    }
}

/// Extract the driver's JSON status line, falling back to the raw output.
fn session_failure(stdout: &str, stderr: &str) -> String {
    for line in stderr.lines().rev() {
        if let Ok(status) = serde_json::from_str::<SessionStatus>(line) {
            if !status.success {
                if let Some(error) = status.error {
                    return error;
                }
            }
        }
    }
    format!("script failed:\nstdout: {}\nstderr: {}", stdout, stderr)
}

/// Escape a value for embedding in a single-quoted JS string.
fn js_quote(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}
