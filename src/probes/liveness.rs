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
use crate::probes::traits::{LivenessProber, ProbeOutcome};
use crate::probes::{is_https_url, BROWSER_USER_AGENT};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// 失败描述的最大长度（字符）
const MAX_ERROR_LEN: usize = 100;

/// 存活探测器
///
/// 基于reqwest实现，发送单个GET请求（不用HEAD，部分服务器会拒绝HEAD）
pub struct HttpProber {
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// 将失败描述截断到有界长度
pub(crate) fn truncate_error(message: String) -> String {
    if message.chars().count() <= MAX_ERROR_LEN {
        return message;
    }
    message.chars().take(MAX_ERROR_LEN).collect()
}

#[async_trait]
impl LivenessProber for HttpProber {
    /// 执行存活探测
    ///
    /// 结果映射：
    ///
    /// * 成功状态码 - `Up`
    /// * 非成功状态码 - `Down`
    /// * 请求超时 - `Error`，消息为 "Request timeout"
    /// * 其他传输失败 - `Error`，消息截断到100个字符
    async fn probe(&self, url: &str) -> ProbeOutcome {
        // Each probe gets a fresh client for cookie isolation
        let client = match reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                return ProbeOutcome {
                    status: CheckStatus::Error,
                    ssl_valid: false,
                    response_time_ms: 0,
                    error_message: Some(truncate_error(e.to_string())),
                };
            }
        };

        let start = Instant::now();
        match client.get(url).send().await {
            Ok(response) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let success = response.status().is_success();
                ProbeOutcome {
                    status: if success {
                        CheckStatus::Up
                    } else {
                        CheckStatus::Down
                    },
                    // Coarse signal only, superseded by the certificate inspector
                    ssl_valid: success && is_https_url(url),
                    response_time_ms: elapsed,
                    error_message: None,
                }
            }
            Err(e) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let message = if e.is_timeout() {
                    "Request timeout".to_string()
                } else {
                    truncate_error(e.to_string())
                };
                ProbeOutcome {
                    status: CheckStatus::Error,
                    ssl_valid: false,
                    response_time_ms: elapsed,
                    error_message: Some(message),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "liveness_test.rs"]
mod tests;
