// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::StorageRepository;
use crate::probes::traits::{CaptureError, PageCapturer};
use crate::probes::BROWSER_USER_AGENT;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

/// 固定视口宽度
const VIEWPORT_WIDTH: u32 = 1920;
/// 固定视口高度
const VIEWPORT_HEIGHT: u32 = 1080;

/// 页面截图器
///
/// 基于chromiumoxide实现。每次调用启动一个独立的无头浏览器实例，
/// 不跨站点复用或池化：单个站点的挂起或崩溃不会污染其他站点的截图。
pub struct BrowserCapturer {
    storage: Arc<dyn StorageRepository>,
    navigation_timeout: Duration,
    settle_delay: Duration,
}

impl BrowserCapturer {
    pub fn new(
        storage: Arc<dyn StorageRepository>,
        navigation_timeout: Duration,
        settle_delay: Duration,
    ) -> Self {
        Self {
            storage,
            navigation_timeout,
            settle_delay,
        }
    }

    /// 在已启动的浏览器中执行导航与截图
    async fn navigate_and_capture(
        &self,
        browser: &Browser,
        website_id: i64,
        url: &str,
    ) -> Result<String, CaptureError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        page.set_user_agent(BROWSER_USER_AGENT)
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        // goto waits for the load event, not network idle
        tokio::time::timeout(self.navigation_timeout, page.goto(url))
            .await
            .map_err(|_| CaptureError::NavigationTimeout)?
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        // Fixed settling delay so asynchronous content gets a chance to render
        tokio::time::sleep(self.settle_delay).await;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .build();
        let bytes = page
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::Screenshot(e.to_string()))?;

        // Keyed by id + capture timestamp, so repeated runs never collide
        let key = format!("site_{}_{}.png", website_id, Utc::now().timestamp_millis());
        self.storage.save(&key, &bytes).await?;

        Ok(format!("/screenshots/{key}"))
    }
}

#[async_trait]
impl PageCapturer for BrowserCapturer {
    /// 渲染页面并保存固定视口截图
    ///
    /// 浏览器实例在每次调用结束时无条件销毁，成功或失败都一样
    async fn capture(&self, website_id: i64, url: &str) -> Result<String, CaptureError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .viewport(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
                ..Default::default()
            })
            .request_timeout(self.navigation_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(CaptureError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CaptureError::Launch(e.to_string()))?;

        // Drive browser events while the capture runs
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = self.navigate_and_capture(&browser, website_id, url).await;

        // Teardown runs on every exit path
        if let Err(e) = browser.close().await {
            tracing::debug!(error = %e, "browser close failed");
        }
        let _ = browser.wait().await;
        events.abort();

        result
    }
}
