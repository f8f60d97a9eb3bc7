// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// 初始化Prometheus指标导出器并注册计数器
pub fn init_metrics() {
    let addr: SocketAddr = std::env::var("WATCHRS_METRICS_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:9000".to_string())
        .parse()
        .expect("Invalid metrics address");

    // Ignore error if a recorder is already installed (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::warn!(error = %e, "Failed to install Prometheus recorder");
        return;
    }

    describe_counter!(
        "watchrs_sites_checked_total",
        "Number of websites processed by the batch runner"
    );
    describe_counter!(
        "watchrs_capture_failures_total",
        "Number of screenshot captures that failed"
    );

    info!("Metrics exporter listening on {}", addr);
}
