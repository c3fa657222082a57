//! NCX（Navigation Control file for XML）文件处理模块
//!
//! 此模块提供DAISY v3导航文件的解析和元数据更新功能。

mod navigation;
mod parser;
mod updater;

// 重新导出公共类型
pub use navigation::{NavPoint, PageTarget};
pub use parser::Ncx;
pub use updater::update_metadata;
