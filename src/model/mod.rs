//! 核心数据模型。

pub mod generic;
pub mod source;
pub mod vars;
