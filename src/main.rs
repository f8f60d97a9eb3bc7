// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use watchrs::config::settings::Settings;
use watchrs::infrastructure::storage::create_storage_repository;
use watchrs::presentation::routes;
use watchrs::probes::capture::BrowserCapturer;
use watchrs::probes::certificate::TlsInspector;
use watchrs::probes::liveness::HttpProber;
use watchrs::probes::orchestrator::BatchRunner;
use watchrs::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting watchrs...");

    // Initialize Prometheus Metrics
    watchrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize screenshot storage
    let storage = create_storage_repository(&settings.storage)?;
    let screenshot_dir = settings
        .storage
        .local_path
        .clone()
        .unwrap_or_else(|| "./screenshots".to_string());
    tokio::fs::create_dir_all(&screenshot_dir).await?;
    info!("Screenshot storage initialized at {}", screenshot_dir);

    // 4. Initialize probes
    let prober = Arc::new(HttpProber::new(Duration::from_secs(
        settings.probe.liveness_timeout_secs,
    )));
    let inspector = Arc::new(TlsInspector::new(Duration::from_secs(
        settings.probe.certificate_timeout_secs,
    )));
    let capturer = Arc::new(BrowserCapturer::new(
        storage,
        Duration::from_secs(settings.probe.navigation_timeout_secs),
        Duration::from_millis(settings.probe.settle_delay_ms),
    ));
    let runner = Arc::new(BatchRunner::new(prober, inspector, capturer));
    info!("Check pipeline initialized");

    // 5. Start HTTP server
    let app = routes::routes(runner, &screenshot_dir);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
