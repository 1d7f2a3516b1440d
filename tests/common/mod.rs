//! Common test utilities and helpers

#![allow(dead_code)]

use aerocoeff::artifacts::ArtifactStore;
use aerocoeff::server::build_router;
use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MACH_AOA_MODES: [&str; 4] = [
    "Von-Karman Nose",
    "Missile Shape 1",
    "Missile Shape 2",
    "Missile Shape 3",
];

/// Model directory populated with small linear networks for every mode.
///
/// For the two-input modes the scaler is the identity, so with
/// `mach = 0.8, aoa = 4` the CL model gives `0.1 * 0.8 + 0.05 * 4 = 0.28`
/// and the CD model gives `0.02 * 0.8 + 0.001 * 4 + 0.01 = 0.03`.
pub struct ModelFixture {
    pub dir: TempDir,
}

impl ModelFixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;

        for mode in MACH_AOA_MODES {
            write_json(
                dir.path(),
                &format!("{mode}_cl.json"),
                json!({"layers": [{"weights": [[0.1], [0.05]], "bias": [0.0]}]}),
            )?;
            write_json(
                dir.path(),
                &format!("{mode}_cd.json"),
                json!({"layers": [{"weights": [[0.02], [0.001]], "bias": [0.01]}]}),
            )?;
            write_json(
                dir.path(),
                &format!("{mode}_scaler.json"),
                json!({"min": [0.0, 0.0], "scale": [1.0, 1.0]}),
            )?;
        }

        write_json(
            dir.path(),
            "NASA_cl.json",
            json!({"layers": [
                {
                    "weights": [
                        [0.2, -0.1, 0.05],
                        [0.1, 0.3, -0.2],
                        [-0.3, 0.1, 0.4],
                        [0.5, 0.2, 0.1],
                        [0.7, -0.4, 0.3]
                    ],
                    "bias": [0.01, 0.02, 0.03],
                    "activation": "relu"
                },
                {"weights": [[0.6], [0.2], [0.123456789]], "bias": [0.05]}
            ]}),
        )?;
        write_json(
            dir.path(),
            "NASA_cd.json",
            json!({"layers": [
                {
                    "weights": [[0.1, 0.2], [0.1, 0.2], [0.1, 0.2], [0.3, 0.1], [0.2, 0.05]],
                    "bias": [0.0, 0.0],
                    "activation": "tanh"
                },
                {"weights": [[0.25], [0.1]], "bias": [0.02], "activation": "softplus"}
            ]}),
        )?;
        write_json(
            dir.path(),
            "NASA_scaler.json",
            json!({
                "min": [-0.5, -0.2, -0.1, 0.0, 0.137931034],
                "scale": [0.004, 0.01, 0.02, 0.25, 0.034482759]
            }),
        )?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Starts the router on an ephemeral port and returns its base URL.
    pub async fn spawn_server(&self) -> Result<String> {
        let app = build_router(ArtifactStore::new(self.path()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(format!("http://{addr}"))
    }
}

fn write_json(dir: &Path, name: &str, value: Value) -> Result<()> {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

/// A NASA request body with the given angle of attack.
pub fn nasa_body(aoa: f64) -> Value {
    json!({
        "mode": "NASA",
        "mach": 0.8,
        "aoa": aoa,
        "ln": 19.32,
        "swept": 16.54,
        "lln": 120.0
    })
}

/// True when `value` has at most five decimal places.
pub fn is_rounded_to_5(value: f64) -> bool {
    ((value * 1e5).round() / 1e5 - value).abs() < 1e-12
}
