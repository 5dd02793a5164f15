//! 业务逻辑服务模块
//!
//! 封装自选股列表、聊天指令和财报数据处理逻辑

pub mod store;         // 内存股票列表
pub mod chat_service;  // 聊天指令解析
pub mod earnings;      // 财报日历服务
