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

use crate::domain::models::check_result::CheckStatus;
use crate::domain::repositories::storage_repository::StorageError;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// 存活探测结果
///
/// 每次探测都会产生一个确定的结果，失败被转换为 status/error_message 而不是错误
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// 存活状态分类
    pub status: CheckStatus,
    /// 粗粒度的证书信号：URL为加密协议且响应成功
    ///
    /// 合并时会被证书检查器的细粒度结果取代
    pub ssl_valid: bool,
    /// 从发出请求到收到响应或失败的耗时（毫秒）
    pub response_time_ms: u64,
    /// 失败描述，最长100个字符
    pub error_message: Option<String>,
}

/// 证书检查结果
///
/// 仅当加密连接成功并返回可解析的证书时存在
#[derive(Debug, Clone)]
pub struct CertificateInfo {
    /// 当前时间是否在有效期窗口内
    pub valid: bool,
    /// 签发日期
    pub issued_on: NaiveDate,
    /// 过期日期
    pub expires_on: NaiveDate,
    /// 距离过期的天数（向下取整），已过期为负数
    pub days_remaining: i64,
}

/// 截图错误类型
#[derive(Error, Debug)]
pub enum CaptureError {
    /// 浏览器启动失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 页面导航超时
    #[error("Navigation timed out")]
    NavigationTimeout,
    /// 截图失败
    #[error("Screenshot failed: {0}")]
    Screenshot(String),
    /// 截图保存失败
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// 存活探测器特质
#[async_trait]
pub trait LivenessProber: Send + Sync {
    /// 对URL执行一次存活探测
    ///
    /// 探测失败在此边界内被转换为确定的失败结果，不会向外抛出
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// 证书检查器特质
#[async_trait]
pub trait CertificateInspector: Send + Sync {
    /// 检查URL对应主机的服务器证书
    ///
    /// 非加密协议URL、握手失败或证书不可解析时返回 `None`
    async fn inspect(&self, url: &str) -> Option<CertificateInfo>;
}

/// 页面截图器特质
#[async_trait]
pub trait PageCapturer: Send + Sync {
    /// 渲染页面并保存固定视口截图
    ///
    /// 成功时返回存储制品的引用
    async fn capture(&self, website_id: i64, url: &str) -> Result<String, CaptureError>;
}
