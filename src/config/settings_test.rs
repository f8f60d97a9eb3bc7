// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

/// 验证内置默认配置
#[test]
fn test_default_settings() {
    let settings = Settings::new().expect("default settings should load");

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.storage.storage_type, "local");
    assert_eq!(settings.storage.local_path.as_deref(), Some("./screenshots"));
    assert_eq!(settings.probe.liveness_timeout_secs, 30);
    assert_eq!(settings.probe.certificate_timeout_secs, 5);
    assert_eq!(settings.probe.navigation_timeout_secs, 30);
    assert_eq!(settings.probe.settle_delay_ms, 2000);
}
