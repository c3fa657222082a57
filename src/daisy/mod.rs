//! DAISY v3有声书XML文件处理模块
//!
//! 包含OPF、NCX、SMIL、DTBook四种格式的解析器和元数据更新器，
//! 以及它们共用的节点树、查询、切分和时间编解码基础设施。

pub mod config;
pub mod dtbook;
pub mod error;
pub mod metadata;
pub mod ncx;
pub mod opf;
pub mod smil;
pub mod time;
pub mod tree;

// 重新导出错误处理
pub use error::{DaisyError, Result};

// 重新导出节点树相关
pub use tree::{paginate, split_by, split_by_tags, Element, Node, Page, PageUrls, PaginateOptions, Part};

// 重新导出元数据相关
pub use metadata::{extract_metadata, MetaValue, MetadataMap};

// 重新导出配置相关
pub use config::{DcTagConfigs, MetadataTagConfig};

// 重新导出时间编解码
pub use time::{calculate_duration, format_time, parse_time};

// 重新导出各格式的解析器
pub use dtbook::Dtbook;
pub use ncx::{NavPoint, Ncx, PageTarget};
pub use opf::{ManifestItem, Opf, SpineItem};
pub use smil::{AudioClip, Smil};

// 重新导出各格式的更新器（带格式前缀的别名）
pub use dtbook::update_metadata as update_dtbook_metadata;
pub use ncx::update_metadata as update_ncx_metadata;
pub use opf::update_metadata as update_opf_metadata;
pub use smil::update_metadata as update_smil_metadata;
