//! Action 枚举定义 (Intent)
//!
//! 用户交互和网关响应都转化为明确的语义化 Action

use super::state::ScreenKind;
use crate::api::ApiResponse;

/// 用户操作枚举
#[derive(Debug)]
pub enum Action {
    Quit,
    Navigate(ScreenKind), // 导航栏按钮
    Retry,                // 重新发起失败的加载

    // 表单交互
    FocusNext,
    FocusPrev,
    SelectNext,
    SelectPrev,
    Input(char),
    DeleteChar,
    Submit,

    // 主循环
    Tick,
    Response(ApiResponse),
}
