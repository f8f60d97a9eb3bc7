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

use serde::{Deserialize, Serialize};

/// 批量检查请求数据传输对象
///
/// 由外部网站登记表提供的有序网站列表
#[derive(Debug, Deserialize, Serialize)]
pub struct CheckRequestDto {
    /// 待检查的网站列表
    pub websites: Vec<WebsiteRecordDto>,
}

/// 网站记录数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct WebsiteRecordDto {
    /// 调用方分配的唯一标识
    pub id: i64,
    /// 绝对URL（带协议）
    pub url: String,
}
