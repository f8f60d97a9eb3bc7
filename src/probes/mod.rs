// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod capture;
pub mod certificate;
pub mod liveness;
pub mod orchestrator;
pub mod reconcile;
pub mod traits;

/// 探测与截图共用的桌面浏览器 User-Agent
///
/// 部分服务器会拒绝明显的机器人UA
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 判断URL是否使用加密协议
///
/// 非法URL视为非加密
pub(crate) fn is_https_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false)
}
