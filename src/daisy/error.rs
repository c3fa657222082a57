use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DaisyError>;

/// DAISY相关的错误类型
#[derive(Error, Debug)]
pub enum DaisyError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XML文档格式错误: {0}")]
    MalformedXml(String),

    #[error("缺少根元素: {0}")]
    MissingRootElement(String),

    #[error("缺少元数据容器: {0}")]
    MissingContainer(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}
