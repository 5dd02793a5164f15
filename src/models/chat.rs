//! 聊天指令模型

use serde::{Deserialize, Serialize};

use super::Stock;

/// 聊天请求
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// 用户输入的指令文本
    pub message: String,
}

/// 聊天响应
///
/// 包含回复文本和执行指令后的完整股票列表
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatResponse {
    /// 回复文本
    pub reply: String,
    /// 当前股票列表快照
    pub stocks: Vec<Stock>,
}
