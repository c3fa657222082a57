//! OPF（Open Packaging Format）文件处理模块
//!
//! 此模块提供DAISY v3包文件的解析和元数据更新功能，包括元数据、
//! 清单、播放顺序等信息的提取。

mod manifest;
mod parser;
mod spine;
mod updater;

// 重新导出公共类型
pub use manifest::ManifestItem;
pub use parser::Opf;
pub use spine::SpineItem;
pub use updater::{update_metadata, update_metadata_with_config};
