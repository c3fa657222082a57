//! DTBook（Digital Talking Book）文本内容文件处理模块
//!
//! 此模块提供DTBook内容文件的解析和元数据更新功能。

mod parser;
mod updater;

// 重新导出公共类型
pub use parser::Dtbook;
pub use updater::update_metadata;
