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

use crate::domain::models::check_result::CheckResult;
use crate::domain::models::website::WebsiteRecord;
use crate::probes::reconcile::reconcile;
use crate::probes::traits::{CertificateInspector, LivenessProber, PageCapturer};
use std::sync::Arc;
use tracing::{info, warn};

/// 批量检查协调器
///
/// 严格按输入顺序逐个处理站点，绝不并发处理多个站点：
/// 并发的浏览器实例会带来不可控的资源压力。单个站点内部的
/// 三个探测相互独立，可以并发执行。
pub struct BatchRunner {
    prober: Arc<dyn LivenessProber>,
    inspector: Arc<dyn CertificateInspector>,
    capturer: Arc<dyn PageCapturer>,
}

impl BatchRunner {
    pub fn new(
        prober: Arc<dyn LivenessProber>,
        inspector: Arc<dyn CertificateInspector>,
        capturer: Arc<dyn PageCapturer>,
    ) -> Self {
        Self {
            prober,
            inspector,
            capturer,
        }
    }

    /// 对输入列表中的每个网站执行一次完整检查
    ///
    /// 输出与输入等长且顺序一致，全部站点处理完才返回，没有部分响应
    pub async fn run(&self, websites: &[WebsiteRecord]) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(websites.len());
        for website in websites {
            results.push(self.check_site(website).await);
        }
        results
    }

    /// 检查单个网站并合并三个信号
    async fn check_site(&self, website: &WebsiteRecord) -> CheckResult {
        info!(id = website.id, url = %website.url, "checking website");
        metrics::counter!("watchrs_sites_checked_total").increment(1);

        // The three probes are independent, run them concurrently and
        // wait for all of them before reconciling
        let (probe, certificate, capture) = tokio::join!(
            self.prober.probe(&website.url),
            self.inspector.inspect(&website.url),
            self.capturer.capture(website.id, &website.url),
        );

        let screenshot = match capture {
            Ok(reference) => Some(reference),
            Err(e) => {
                warn!(id = website.id, url = %website.url, error = %e, "screenshot capture failed");
                metrics::counter!("watchrs_capture_failures_total").increment(1);
                None
            }
        };

        reconcile(website, probe, certificate, screenshot)
    }
}
