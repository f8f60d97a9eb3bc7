// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 被跟踪的网站记录
///
/// 由外部网站登记表提供，id 由调用方分配，在一次批量检查期间不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteRecord {
    /// 调用方分配的唯一标识
    pub id: i64,
    /// 绝对URL（带协议）
    pub url: String,
}
