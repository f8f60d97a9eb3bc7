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

use crate::domain::models::check_result::{CheckResult, CheckStatus};
use crate::domain::models::website::WebsiteRecord;
use crate::probes::is_https_url;
use crate::probes::traits::{CertificateInfo, ProbeOutcome};

/// 将三个独立信号合并为一条最终结果
///
/// 优先级规则：
///
/// 1. `status` 取探测器的结果；但截图成功时强制为 `Up`——完整的浏览器导航
///    成功渲染是站点可达的有力证据，即便轻量探测被机器人拦截或对请求头敏感
/// 2. `ssl_valid` 取证书检查器的确定结果；检查器无结果时，截图成功
///    且URL为加密协议则视为有效（渲染经过了加密通道）
/// 3. 证书日期字段只来自检查器，截图成功不会凭空捏造日期
/// 4. `error_message` 仅在截图失败时保留；截图成功时探测失败被抑制
/// 5. `response_time_ms` 总是来自探测器
pub fn reconcile(
    website: &WebsiteRecord,
    probe: ProbeOutcome,
    certificate: Option<CertificateInfo>,
    screenshot: Option<String>,
) -> CheckResult {
    let captured = screenshot.is_some();

    let status = if captured { CheckStatus::Up } else { probe.status };

    let ssl_valid = match &certificate {
        Some(info) => info.valid,
        None => captured && is_https_url(&website.url),
    };

    let error_message = if captured { None } else { probe.error_message };

    CheckResult {
        id: website.id,
        url: website.url.clone(),
        status,
        ssl_valid,
        ssl_issued_on: certificate.as_ref().map(|c| c.issued_on),
        ssl_expires_on: certificate.as_ref().map(|c| c.expires_on),
        ssl_days_remaining: certificate.as_ref().map(|c| c.days_remaining),
        response_time_ms: Some(probe.response_time_ms),
        screenshot_ref: screenshot,
        error_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn site(url: &str) -> WebsiteRecord {
        WebsiteRecord {
            id: 1,
            url: url.to_string(),
        }
    }

    fn probe(status: CheckStatus, error: Option<&str>) -> ProbeOutcome {
        ProbeOutcome {
            status,
            ssl_valid: false,
            response_time_ms: 120,
            error_message: error.map(|s| s.to_string()),
        }
    }

    fn cert(valid: bool, days: i64) -> CertificateInfo {
        CertificateInfo {
            valid,
            issued_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expires_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            days_remaining: days,
        }
    }

    /// 截图成功时状态强制为 Up，探测失败被覆盖
    #[test]
    fn test_capture_overrides_status_to_up() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Error, Some("Request timeout")),
            None,
            Some("/screenshots/site_1_1.png".to_string()),
        );
        assert_eq!(result.status, CheckStatus::Up);
    }

    /// 截图失败时状态保留探测器的结论
    #[test]
    fn test_probe_status_kept_without_capture() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Down, None),
            None,
            None,
        );
        assert_eq!(result.status, CheckStatus::Down);
    }

    /// 检查器的确定结果优先于截图佐证
    #[test]
    fn test_inspector_result_takes_precedence() {
        // Expired certificate stays invalid even though the capture succeeded
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Up, None),
            Some(cert(false, -3)),
            Some("/screenshots/site_1_2.png".to_string()),
        );
        assert!(!result.ssl_valid);
        assert_eq!(result.ssl_days_remaining, Some(-3));
    }

    /// 检查器无结果时，加密URL的成功截图佐证证书有效
    #[test]
    fn test_capture_corroborates_ssl_over_https() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Error, Some("blocked")),
            None,
            Some("/screenshots/site_1_3.png".to_string()),
        );
        assert!(result.ssl_valid);
        // Capture success never fabricates certificate dates
        assert!(result.ssl_issued_on.is_none());
        assert!(result.ssl_expires_on.is_none());
        assert!(result.ssl_days_remaining.is_none());
    }

    /// 非加密URL即使截图成功也不视为证书有效
    #[test]
    fn test_plain_http_never_ssl_valid() {
        let result = reconcile(
            &site("http://example.com"),
            probe(CheckStatus::Up, None),
            None,
            Some("/screenshots/site_1_4.png".to_string()),
        );
        assert!(!result.ssl_valid);
    }

    /// 截图成功时探测错误消息被抑制
    #[test]
    fn test_capture_suppresses_probe_error() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Error, Some("Request timeout")),
            None,
            Some("/screenshots/site_1_5.png".to_string()),
        );
        assert!(result.error_message.is_none());
    }

    /// 截图失败时错误消息反映探测失败原因
    #[test]
    fn test_probe_error_surfaces_when_capture_fails() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Error, Some("Request timeout")),
            None,
            None,
        );
        assert_eq!(result.error_message.as_deref(), Some("Request timeout"));
    }

    /// 截图失败且探测成功时没有错误消息
    #[test]
    fn test_no_error_when_probe_succeeded() {
        let result = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Up, None),
            Some(cert(true, 90)),
            None,
        );
        assert!(result.error_message.is_none());
        assert!(result.screenshot_ref.is_none());
        assert!(result.ssl_valid);
    }

    /// 耗时总是来自探测器，与截图结果无关
    #[test]
    fn test_response_time_always_from_probe() {
        let with_capture = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Up, None),
            None,
            Some("/screenshots/site_1_6.png".to_string()),
        );
        let without_capture = reconcile(
            &site("https://example.com"),
            probe(CheckStatus::Up, None),
            None,
            None,
        );
        assert_eq!(with_capture.response_time_ms, Some(120));
        assert_eq!(without_capture.response_time_ms, Some(120));
    }

    /// 输出的 id 与 url 逐字来自输入
    #[test]
    fn test_identity_fields_copied() {
        let website = WebsiteRecord {
            id: 42,
            url: "https://example.org/page".to_string(),
        };
        let result = reconcile(&website, probe(CheckStatus::Up, None), None, None);
        assert_eq!(result.id, 42);
        assert_eq!(result.url, "https://example.org/page");
    }
}
