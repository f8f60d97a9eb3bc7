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

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::dto::check_request::CheckRequestDto,
    domain::models::check_result::CheckResult,
    domain::models::website::WebsiteRecord,
    presentation::errors::AppError,
    probes::orchestrator::BatchRunner,
};

/// 对提交的网站列表执行一次批量检查
///
/// 请求体缺失、非JSON或 `websites` 类型不符由Json提取器拒绝，
/// 空列表在任何探测开始之前被显式拒绝
pub async fn run_checks(
    Extension(runner): Extension<Arc<BatchRunner>>,
    Json(payload): Json<CheckRequestDto>,
) -> Result<Json<Vec<CheckResult>>, AppError> {
    if payload.websites.is_empty() {
        return Err(anyhow::anyhow!("websites list cannot be empty").into());
    }

    let websites: Vec<WebsiteRecord> = payload
        .websites
        .into_iter()
        .map(|w| WebsiteRecord { id: w.id, url: w.url })
        .collect();

    info!(count = websites.len(), "batch check requested");
    let results = runner.run(&websites).await;

    Ok(Json(results))
}
