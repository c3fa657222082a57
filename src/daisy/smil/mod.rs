//! SMIL（Synchronized Multimedia Integration Language）文件处理模块
//!
//! 此模块提供DAISY v3时间同步文件的解析和元数据更新功能。

mod clip;
mod parser;
mod updater;

// 重新导出公共类型
pub use clip::AudioClip;
pub use parser::Smil;
pub use updater::update_metadata;
