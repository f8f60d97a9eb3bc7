// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 网站存活状态分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// 收到成功范围内的响应
    Up,
    /// 收到非成功状态码的响应
    Down,
    /// 请求超时或传输失败
    Error,
}

/// 一个网站的合并检查结果
///
/// 每条 WebsiteRecord 对应一条结果，仅在响应中存在，不做持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// 调用方分配的网站标识（从输入复制）
    pub id: i64,
    /// 网站URL（从输入复制）
    pub url: String,
    /// 存活状态
    pub status: CheckStatus,
    /// 证书是否有效（或被成功截图佐证）
    pub ssl_valid: bool,
    /// 证书签发日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_issued_on: Option<NaiveDate>,
    /// 证书过期日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_expires_on: Option<NaiveDate>,
    /// 距离过期的天数，已过期为负数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_days_remaining: Option<i64>,
    /// 存活探测耗时（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// 截图存储引用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_ref: Option<String>,
    /// 失败描述，最长100个字符
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
